//! FFI (Foreign Function Interface) module
//!
//! PyO3 bindings that let a Python presentation layer drive the estimator.
//!
//! # Design Principles
//!
//! 1. **Minimal boundary**: Only the lookup and calculation surface
//! 2. **Simple types**: Primitives, strings, and dicts at the boundary
//! 3. **Safe errors**: Rust errors become Python exceptions
//! 4. **No references**: Python gets copies, never references to Rust state

pub mod estimator;
pub mod types;
