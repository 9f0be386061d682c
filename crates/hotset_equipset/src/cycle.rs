//! Cycle-reference validation
//!
//! Cycle sets point at other sets by name, and those may be cycle sets too.
//! A chain that leads back to the set being edited would recurse forever when
//! executed, so it is rejected up front.

use hotset_core::InvalidReason;
use std::collections::{HashSet, VecDeque};

/// Check that following `members` never leads back to `name`.
///
/// `lookup` resolves a name to the members of the cycle set it names, or
/// `None` when the name dangles or names a non-cycle set. The walk stops after
/// `depth_limit` hops so stale data can never keep it running.
pub fn check_cycle_chain<'a, F>(
    name: &str,
    members: &'a [String],
    lookup: F,
    depth_limit: usize,
) -> Result<(), InvalidReason>
where
    F: Fn(&str) -> Option<&'a [String]>,
{
    if members.iter().any(|m| m == name) {
        return Err(InvalidReason::SelfReference);
    }

    // (current name, top-level member it was reached through, depth)
    let mut queue: VecDeque<(&str, &str, usize)> =
        members.iter().map(|m| (m.as_str(), m.as_str(), 1)).collect();
    let mut visited: HashSet<&str> = HashSet::new();

    while let Some((current, via, depth)) = queue.pop_front() {
        if current == name {
            return Err(InvalidReason::CyclicReference { via: via.to_string() });
        }
        if depth > depth_limit || !visited.insert(current) {
            continue;
        }
        if let Some(next) = lookup(current) {
            queue.extend(next.iter().map(|m| (m.as_str(), via, depth + 1)));
        }
    }

    Ok(())
}
