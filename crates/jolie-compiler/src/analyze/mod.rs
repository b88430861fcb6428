//! Semantic analysis passes.
//!
//! Both passes walk the program read-only:
//! - Structural checks (structure): name resolution, type and operation
//!   equivalence, correlation sets, control-shape rules
//! - Fault flow (fault_flow): faults escaping each operation, compared with
//!   the declared interface

mod correlation;
pub mod fault_flow;
pub mod structure;
mod type_equiv;
pub mod visitor;

#[cfg(test)]
mod type_equiv_tests;

pub use correlation::{CorrelationFunction, CorrelationPair, CorrelationSetId};
pub use fault_flow::{FaultFlowReport, FaultFlowVerifier};
pub use structure::{SemanticVerifier, Validated};
pub use type_equiv::{contains_path, is_equivalent};
pub use visitor::Visitor;
