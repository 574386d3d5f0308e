//! Descendant discovery over a process snapshot

use crate::core::types::{ProcessEntry, ProcessId};

/// Collects every transitive descendant of `target` from the snapshot's
/// (pid, parent_pid) edges.
///
/// A process is a descendant if its parent is the target or an already
/// recognized descendant; the walk iterates to a fixpoint so discovery does
/// not depend on snapshot order. Parent ids are point-in-time values; a
/// reparented orphan simply stops matching, which is acceptable for a
/// best-effort snapshot.
pub fn descendants_of(target: ProcessId, processes: &[ProcessEntry]) -> Vec<ProcessId> {
    let mut descendants: Vec<ProcessId> = Vec::new();

    loop {
        let mut widened = false;
        for process in processes {
            if process.pid == target || descendants.contains(&process.pid) {
                continue;
            }
            let is_sub =
                process.parent_pid == target || descendants.contains(&process.parent_pid);
            if is_sub {
                descendants.push(process.pid);
                widened = true;
            }
        }
        if !widened {
            break;
        }
    }

    descendants
}
