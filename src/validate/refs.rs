//! Cross-collection reference checks.
//!
//! The store enforces no foreign keys, so reference targets are confirmed
//! here with one batched count query per id set rather than one existence
//! probe per id. The gap between this check and the final write is accepted:
//! a concurrent delete can still slip through it.

use crate::resources::ResourceKind;
use crate::store::{DocumentStore, StoreError};
use std::collections::BTreeSet;

/// Result of resolving one set of candidate references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefCheck {
    /// Every distinct id names an existing document.
    Ok,
    /// At least one id is not syntactically valid for the store.
    Malformed,
    /// Well-formed ids that resolve to nothing.
    Dangling { missing: usize },
}

/// Confirm that every id in `ids` names an existing document of `kind`.
///
/// Ids are deduplicated first, and syntax problems win over existence
/// problems: one malformed id fails the whole set before storage is asked.
pub async fn check_references<S>(
    store: &S,
    kind: ResourceKind,
    ids: &[&str],
) -> Result<RefCheck, StoreError>
where
    S: DocumentStore + ?Sized,
{
    let distinct: BTreeSet<&str> = ids.iter().copied().collect();
    if distinct.is_empty() {
        return Ok(RefCheck::Ok);
    }

    if distinct.iter().any(|id| !store.is_valid_identifier(id)) {
        return Ok(RefCheck::Malformed);
    }

    let distinct: Vec<&str> = distinct.into_iter().collect();
    let found = store.count_by_ids(kind, &distinct).await?;
    if found != distinct.len() {
        return Ok(RefCheck::Dangling {
            missing: distinct.len() - found,
        });
    }
    Ok(RefCheck::Ok)
}
