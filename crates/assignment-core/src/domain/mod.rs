//! Canonical entities rendered by the workflow screens.
//!
//! Every value here is fully populated: it came either from a normalized
//! gateway payload or from the fallback provider.

pub mod course;
pub mod error;
pub mod professor;
pub mod student;

use std::collections::BTreeMap;

pub use course::Course;
pub use error::{CommitError, FetchError, NormalizationError, Result, WorkflowError};
pub use professor::Professor;
pub use student::Student;

/// Records addressable by an identifier within a listing.
pub trait Identified {
    fn id(&self) -> &str;
}

/// Identifiers that occur more than once in `records`, sorted.
///
/// Collisions are reported, never resolved: which record "wins" is left to
/// the caller.
pub fn duplicate_ids<T: Identified>(records: &[T]) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.id()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(id, _)| id.to_string())
        .collect()
}

/// The single record with identifier `id`.
///
/// # Errors
///
/// `WorkflowError::UnknownRecord` when nothing matches,
/// `WorkflowError::AmbiguousId` when several records share the identifier.
pub fn find_unique<'a, T: Identified>(
    records: &'a [T],
    kind: &'static str,
    id: &str,
) -> Result<&'a T> {
    let mut matches = records.iter().filter(|r| r.id() == id);
    let first = matches.next().ok_or_else(|| WorkflowError::UnknownRecord {
        kind,
        id: id.to_string(),
    })?;
    let extra = matches.count();
    if extra > 0 {
        return Err(WorkflowError::AmbiguousId {
            kind,
            id: id.to_string(),
            count: extra + 1,
        });
    }
    Ok(first)
}
