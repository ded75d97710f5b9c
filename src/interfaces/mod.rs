//! Transport adapters exposing the core to external collaborators.

pub mod http;
