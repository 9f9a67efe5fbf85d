use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::is_blocked;
use crate::artifacts::merge::conflict::conflict_content;
use crate::artifacts::merge::merge_base::find_merge_base;
use crate::artifacts::merge::resolution::{MergePlan, Resolution};
use crate::artifacts::objects::commit::timestamp_from_env;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::artifacts::status::inspector::Inspector;
use crate::errors::RepositoryError;
use bytes::Bytes;
use std::path::PathBuf;

/// Working directory change decided by the merge plan
enum MergeWrite {
    Write {
        path: PathBuf,
        oid: ObjectId,
        content: Bytes,
    },
    Conflict {
        path: PathBuf,
        content: Bytes,
    },
    Delete {
        path: PathBuf,
    },
}

impl Repository {
    /// Merge `branch` into the active branch
    ///
    /// Returns whether any file ended up with conflict markers; the merge
    /// commit is created either way. When the active branch is an ancestor of
    /// `branch` it is fast-forwarded instead, which is reported as
    /// `FastForwarded` after the new state has been saved.
    pub fn merge(&mut self, branch: &str) -> crate::errors::Result<bool> {
        let branches = self.branches()?;
        let target_name =
            BranchName::try_parse(branch).map_err(|_| RepositoryError::NoSuchBranch)?;
        let target_head = branches
            .get(&target_name)
            .cloned()
            .ok_or(RepositoryError::NoSuchBranch)?;
        let current_name = branches.active().clone();
        let current_head = branches.head().clone();

        let head = self.head_commit()?;
        if !self.index().tree().same(head.snapshot()) {
            return Err(RepositoryError::UncommittedChanges);
        }
        if target_name == current_name {
            return Err(RepositoryError::SelfMerge);
        }

        // every path the merge or a fast-forward may write is tracked on one side
        let target_snapshot = self.graph().get(&target_head)?.snapshot();
        let untracked = Inspector::new(self.workspace()).untracked_files(self.index().tree())?;
        if head
            .snapshot()
            .paths()
            .chain(target_snapshot.paths())
            .any(|path| is_blocked(&untracked, path))
        {
            return Err(RepositoryError::UntrackedFileConflict);
        }

        let merge_base = find_merge_base(self.graph(), &current_head, &target_head);
        if merge_base.as_ref() == Some(&target_head) {
            return Err(RepositoryError::AncestorMerge);
        }
        if merge_base.as_ref() == Some(&current_head) {
            self.materialize(&target_head)?;
            self.branches_mut()?.set_head(target_head.clone());
            tracing::info!(branch = %current_name, head = %target_head, "fast-forwarded");
            self.save()?;

            return Err(RepositoryError::FastForwarded);
        }

        let base_snapshot = match &merge_base {
            Some(merge_base) => self.graph().get(merge_base)?.snapshot().clone(),
            None => Tree::new(),
        };
        let current_snapshot = self.graph().get(&current_head)?.snapshot().clone();
        let target_snapshot = self.graph().get(&target_head)?.snapshot().clone();
        let plan = MergePlan::new(&base_snapshot, &current_snapshot, &target_snapshot);

        let writes = self.load_merge_writes(&plan)?;
        let mut index = self.index().tree().clone();
        for write in writes {
            match write {
                MergeWrite::Write { path, oid, content } => {
                    self.workspace().write_file(&path, &content)?;
                    index.insert(path, oid);
                }
                MergeWrite::Conflict { path, content } => {
                    self.workspace().write_file(&path, &content)?;
                    index.add(self.database(), &path, content)?;
                }
                MergeWrite::Delete { path } => {
                    self.workspace().remove_file(&path)?;
                    index.remove(&path);
                }
            }
        }
        self.index_mut().replace(index.clone());

        let message = format!("Merged {target_name} into {current_name}.");
        let merge_commit = self
            .graph_mut()
            .create_commit(
                vec![current_head, target_head],
                &message,
                index,
                timestamp_from_env(),
            )?
            .oid()
            .clone();
        self.branches_mut()?.set_head(merge_commit);

        self.save()?;
        Ok(plan.has_conflicts())
    }

    /// Read every blob the plan needs before anything is written
    fn load_merge_writes(&self, plan: &MergePlan) -> crate::errors::Result<Vec<MergeWrite>> {
        let load = |oid: Option<&ObjectId>| -> crate::errors::Result<Bytes> {
            match oid {
                Some(oid) => Ok(self.database().load_blob(oid)?.into_content()),
                None => Ok(Bytes::new()),
            }
        };

        plan.resolutions()
            .map(|(path, resolution)| -> crate::errors::Result<MergeWrite> {
                let path = path.to_path_buf();

                Ok(match resolution {
                    Resolution::Take(oid) => MergeWrite::Write {
                        path,
                        oid: oid.clone(),
                        content: load(Some(oid))?,
                    },
                    Resolution::Delete => MergeWrite::Delete { path },
                    Resolution::Conflict { current, target } => MergeWrite::Conflict {
                        path,
                        content: conflict_content(
                            &load(current.as_ref())?,
                            &load(target.as_ref())?,
                        ),
                    },
                })
            })
            .collect()
    }
}
