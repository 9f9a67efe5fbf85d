//! Branch table
//!
//! Named, mutable pointers into the commit graph plus the designated active
//! branch. HEAD is not stored separately: it is always the tip of the active
//! branch, which keeps the two from drifting apart.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use std::collections::BTreeMap;

/// Read-only view of one branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch<'t> {
    pub name: &'t BranchName,
    pub head: &'t ObjectId,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchTable {
    branches: BTreeMap<BranchName, ObjectId>,
    active: BranchName,
}

impl BranchTable {
    /// A table holding only `active`, pointing at `head`
    pub fn new(active: BranchName, head: ObjectId) -> Self {
        BranchTable {
            branches: BTreeMap::from([(active.clone(), head)]),
            active,
        }
    }

    /// Rebuild a table from persisted branches; the active branch must be among them
    pub fn from_parts(
        branches: BTreeMap<BranchName, ObjectId>,
        active: BranchName,
    ) -> Result<Self, RepositoryError> {
        if !branches.contains_key(&active) {
            return Err(RepositoryError::Corrupt(format!(
                "active branch {active} has no branch file"
            )));
        }

        Ok(BranchTable { branches, active })
    }

    pub fn active(&self) -> &BranchName {
        &self.active
    }

    /// HEAD: the tip of the active branch
    pub fn head(&self) -> &ObjectId {
        // from_parts and delete keep the active branch in the map
        &self.branches[&self.active]
    }

    pub fn get(&self, name: &BranchName) -> Option<&ObjectId> {
        self.branches.get(name)
    }

    pub fn is_active(&self, name: &BranchName) -> bool {
        &self.active == name
    }

    /// Branches in name order
    pub fn iter(&self) -> impl Iterator<Item = Branch<'_>> {
        self.branches.iter().map(|(name, head)| Branch {
            name,
            head,
            active: self.is_active(name),
        })
    }

    pub fn heads(&self) -> &BTreeMap<BranchName, ObjectId> {
        &self.branches
    }

    pub fn create(&mut self, name: BranchName, head: ObjectId) -> Result<(), RepositoryError> {
        if self.branches.contains_key(&name) {
            return Err(RepositoryError::BranchAlreadyExists);
        }

        self.branches.insert(name, head);
        Ok(())
    }

    /// Drop the pointer; the commits it referenced stay in the graph
    pub fn delete(&mut self, name: &BranchName) -> Result<ObjectId, RepositoryError> {
        if !self.branches.contains_key(name) {
            return Err(RepositoryError::NoSuchBranch);
        }
        if self.is_active(name) {
            return Err(RepositoryError::CannotRemoveActiveBranch);
        }

        self.branches
            .remove(name)
            .ok_or(RepositoryError::NoSuchBranch)
    }

    pub fn switch(&mut self, name: &BranchName) -> Result<(), RepositoryError> {
        if !self.branches.contains_key(name) {
            return Err(RepositoryError::NoSuchBranch);
        }

        self.active = name.clone();
        Ok(())
    }

    /// Move the active branch (and therefore HEAD) to `oid`
    pub fn set_head(&mut self, oid: ObjectId) {
        self.branches.insert(self.active.clone(), oid);
    }
}
