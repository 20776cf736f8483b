//! Deterministic, pure helpers.
//!
//! Core modules must be free of I/O side effects. They operate on caller-owned
//! values and return deterministic outputs suitable for tests.

pub mod map;
pub mod member;
pub mod nullable;
