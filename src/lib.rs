//! chatbox: terminal chat client for a JSON question-answering service, Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
