//! Jolie semantic analysis.
//!
//! Runs after parsing and before interpretation:
//! - `analyze::structure` - name resolution, type and operation equivalence,
//!   correlation sets, control-shape rules
//! - `analyze::fault_flow` - advisory check of faults escaping each operation
//!   against its declared interface
//! - `diagnostics` - error reporting

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyze;
pub mod config;
pub mod diagnostics;

#[cfg(test)]
pub mod test_utils;

pub use analyze::{
    CorrelationFunction, CorrelationPair, FaultFlowReport, FaultFlowVerifier, SemanticVerifier,
    Validated,
};
pub use config::Config;
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};

/// Errors that can occur during semantic verification.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// One or more structural checks failed; carries every diagnostic collected.
    #[error("program is semantically invalid with {} errors", .0.error_count())]
    SemanticError(Diagnostics),
}

impl Error {
    pub fn diagnostics(&self) -> &Diagnostics {
        match self {
            Error::SemanticError(diagnostics) => diagnostics,
        }
    }
}

/// Result type for verification.
pub type Result<T> = std::result::Result<T, Error>;
