use crate::artifacts::log::commit_graph::CommitGraph;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashSet, VecDeque};

/// Breadth-first traversal along every parent edge
///
/// The queue is seeded with the start commit; each dequeued commit enqueues
/// all of its parents in order. A commit reachable along several paths is
/// yielded once, at its first position in that order.
#[derive(Clone)]
pub struct Ancestors<'g> {
    graph: &'g CommitGraph,
    queue: VecDeque<ObjectId>,
    seen: HashSet<ObjectId>,
}

impl<'g> Ancestors<'g> {
    pub fn new(graph: &'g CommitGraph, start: ObjectId) -> Self {
        Ancestors {
            graph,
            queue: VecDeque::from([start]),
            seen: HashSet::new(),
        }
    }
}

impl<'g> Iterator for Ancestors<'g> {
    type Item = &'g Commit;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(commit_oid) = self.queue.pop_front() {
            if !self.seen.insert(commit_oid.clone()) {
                continue;
            }

            // a dangling parent ends that line of history
            let Ok(commit) = self.graph.get(&commit_oid) else {
                continue;
            };

            self.queue.extend(commit.parents().iter().cloned());
            return Some(commit);
        }

        None
    }
}

/// Walk from a commit through first parents back to the root
#[derive(Clone)]
pub struct FirstParents<'g> {
    graph: &'g CommitGraph,
    current_commit_oid: Option<ObjectId>,
}

impl<'g> FirstParents<'g> {
    pub fn new(graph: &'g CommitGraph, start: Option<ObjectId>) -> Self {
        FirstParents {
            graph,
            current_commit_oid: start,
        }
    }
}

impl<'g> Iterator for FirstParents<'g> {
    type Item = &'g Commit;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.current_commit_oid.take()?;

        match self.graph.get(&commit_oid) {
            Ok(commit) => {
                // Move to the parent commit for the next iteration
                self.current_commit_oid = commit.parent().cloned();
                Some(commit)
            }
            Err(_) => None,
        }
    }
}
