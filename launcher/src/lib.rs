//! Scenario workflow loading for the test launcher.
//!
//! A workflow file lists test scenarios. Loading one resolves the workflow
//! reference, validates it against the workflow schema, reads it, and
//! resolves every scenario path. The crate is split the same way throughout:
//!
//! - **[`core`]**: Pure logic (reference classification, data model). No I/O.
//! - **[`io`]**: Collaborators that touch the filesystem and environment,
//!   each behind a trait so tests can record what the loader asks for.
//!
//! [`workflow`] wires them together; [`error`] holds the shared error type.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod workflow;
