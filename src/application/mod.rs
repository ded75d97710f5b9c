//! Application layer orchestrating the domain.
//!
//! This module defines the `TransferEngine`, the only component allowed to
//! move balance between records. It acquires per-record locks in a fixed
//! order and re-validates every precondition while holding them.

pub mod engine;
