//! End-of-run reconciliation
//!
//! Decides which suggestions are written to the store once a run finishes.

use std::collections::HashSet;

/// Computes the set of suggestions to persist
///
/// When the known set is no larger than what this run found, the result is
/// the known suggestions that were *not* seen again; otherwise it is the
/// found suggestions that were not known. With nothing known, everything
/// found is persisted.
///
/// This asymmetry drops genuinely new suggestions whenever the store holds
/// fewer entries than the run collected.
pub fn reconcile(known: &HashSet<String>, found: &HashSet<String>) -> HashSet<String> {
    if known.is_empty() {
        return found.clone();
    }

    if known.len() <= found.len() {
        known.difference(found).cloned().collect()
    } else {
        found.difference(known).cloned().collect()
    }
}
