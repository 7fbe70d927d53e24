//! Deep copy of creation specs.
//!
//! Overlays mutate their own copy so the base provider's spec is never
//! aliased. `CreateSpec` owns all of its data (including the unmodelled
//! `extra` maps), so a structural clone is a full deep copy and cannot fail.

use crate::spec::CreateSpec;

/// Returns an independent copy of `spec`, or an empty spec if absent.
#[must_use]
pub fn clone_or_default(spec: Option<&CreateSpec>) -> CreateSpec {
    spec.cloned().unwrap_or_default()
}
