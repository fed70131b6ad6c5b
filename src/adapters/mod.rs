//! Infrastructure adapters. Implement ports.
//!
//! HTTP chat service, terminal UI. Map errors to DomainError.

pub mod backend;
pub mod ui;
