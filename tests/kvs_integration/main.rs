//! Integration tests for the store.
//!
//! These tests exercise the full open → mutate → flush → drop → reopen
//! lifecycle against real files in a temporary directory. Unit tests in
//! each crate cover the codec, checksum and rotation in isolation.

#[path = "../common/mod.rs"]
mod common;

mod lifecycle;
mod model;
mod open_policies;
mod snapshots;
