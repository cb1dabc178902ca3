//! Operation registry: named binary arithmetic operations.
//!
//! # Invariants
//! - The registry is built statically and never mutated at runtime.
//! - Every operation is a pure function of its two operands.
//! - Precision rounding is applied to results, never to inputs.

pub mod registry;

pub use registry::{OPERATIONS, Operation, OperationError, resolve};
