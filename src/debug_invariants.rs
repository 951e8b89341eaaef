//! Post-condition checks run at the end of every builder and topology edit.
//!
//! Checks are compiled in for debug builds and for release builds with the
//! `strict-invariants` or `check-invariants` feature; otherwise they vanish.

use crate::data::datasets::Datasets;
use crate::mesh_error::EpiMeshError;
use crate::topology::validation::ValidationOptions;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Assert invariants in debug builds or when invariant checking is enabled.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), EpiMeshError>;
}

/// Runs a fallible check and panics with `ctx` on error when invariant
/// checking is enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}

/// Checks a freshly produced generation with operation-specific options.
///
/// `op` names the producing operation in the panic message.
#[allow(unused_variables)]
pub(crate) fn check_generation(datasets: &Datasets, options: &ValidationOptions, op: &str) {
    #[cfg(any(
        debug_assertions,
        feature = "strict-invariants",
        feature = "check-invariants"
    ))]
    if let Err(e) = crate::topology::validation::validate_datasets(datasets, options) {
        panic!("[invariants] {op}: {e}");
    }
}
