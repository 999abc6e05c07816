//! Deterministic, pure logic shared by the launcher.
//!
//! Core modules must be free of I/O side effects. They classify references
//! and describe the workflow data model; resolving and reading happen in
//! [`crate::io`].

pub mod reference;
pub mod scenario;
