//! Chat backend adapters. Implement ChatBackend.
//!
//! HTTP adapter for the real service and an echo mock for offline use and tests.

pub mod http;
pub mod mock;

pub use http::HttpChatBackend;
pub use mock::MockChatBackend;
