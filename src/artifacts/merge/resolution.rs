//! Per-file three-way resolution
//!
//! Every path present in the base, current or target snapshot is classified
//! by which sides changed it relative to the base. Only paths that need the
//! working directory or the index to change end up in the plan.
//!
//! | changed by      | outcome                                   |
//! |-----------------|-------------------------------------------|
//! | nobody, current | keep the current version                  |
//! | target only     | take the target version (or delete it)    |
//! | both, same      | keep the current version                  |
//! | both, different | conflict                                  |

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use bitflags::bitflags;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ChangedBy: u8 {
        const NONE = 0b00;
        const CURRENT = 0b01;
        const TARGET = 0b10;
        const BOTH = Self::CURRENT.bits() | Self::TARGET.bits();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Write the target's blob and stage it
    Take(ObjectId),
    /// The target deleted a file the current side left alone
    Delete,
    /// Both sides changed the file differently; `None` marks a deleted side
    Conflict {
        current: Option<ObjectId>,
        target: Option<ObjectId>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    resolutions: BTreeMap<PathBuf, Resolution>,
}

impl MergePlan {
    pub fn new(base: &Tree, current: &Tree, target: &Tree) -> Self {
        let paths = base
            .paths()
            .chain(current.paths())
            .chain(target.paths())
            .collect::<BTreeSet<_>>();

        let resolutions = paths
            .into_iter()
            .filter_map(|path| {
                let resolution = Self::resolve(
                    base.get(path),
                    current.get(path),
                    target.get(path),
                )?;
                tracing::debug!(path = %path.display(), ?resolution, "merge resolution");

                Some((path.to_path_buf(), resolution))
            })
            .collect();

        MergePlan { resolutions }
    }

    fn resolve(
        base: Option<&ObjectId>,
        current: Option<&ObjectId>,
        target: Option<&ObjectId>,
    ) -> Option<Resolution> {
        let mut changed = ChangedBy::NONE;
        if current != base {
            changed |= ChangedBy::CURRENT;
        }
        if target != base {
            changed |= ChangedBy::TARGET;
        }

        if changed == ChangedBy::TARGET {
            Some(match target {
                Some(oid) => Resolution::Take(oid.clone()),
                None => Resolution::Delete,
            })
        } else if changed == ChangedBy::BOTH && current != target {
            Some(Resolution::Conflict {
                current: current.cloned(),
                target: target.cloned(),
            })
        } else {
            None
        }
    }

    pub fn resolutions(&self) -> impl Iterator<Item = (&Path, &Resolution)> {
        self.resolutions
            .iter()
            .map(|(path, resolution)| (path.as_path(), resolution))
    }

    pub fn has_conflicts(&self) -> bool {
        self.resolutions
            .values()
            .any(|resolution| matches!(resolution, Resolution::Conflict { .. }))
    }
}
