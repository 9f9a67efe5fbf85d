//! Merge base search
//!
//! The full ancestor set of the target head is collected first. The current
//! head's history is then walked breadth-first and the first commit found in
//! that set is the merge base.
//!
//! This picks *a* common ancestor, the one closest to the current head in
//! breadth-first order. In histories with several merge bases at different
//! depths it is not necessarily the lowest common ancestor.

use crate::artifacts::log::commit_graph::CommitGraph;
use crate::artifacts::objects::object_id::ObjectId;

pub fn find_merge_base(
    graph: &CommitGraph,
    current: &ObjectId,
    target: &ObjectId,
) -> Option<ObjectId> {
    let target_ancestors = graph.ancestor_ids(target);
    tracing::debug!(
        %target,
        ancestors = target_ancestors.len(),
        "collected target ancestors"
    );

    let merge_base = graph
        .ancestors(current)
        .map(|commit| commit.oid())
        .find(|oid| target_ancestors.contains(*oid))
        .cloned();

    match &merge_base {
        Some(merge_base) => tracing::debug!(%current, %target, %merge_base, "found merge base"),
        None => tracing::debug!(%current, %target, "no common ancestor"),
    }

    merge_base
}
