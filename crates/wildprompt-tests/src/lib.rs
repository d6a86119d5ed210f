//! Wildprompt End-to-End Test Infrastructure
//!
//! This crate provides integration tests that run the engine against real
//! wildcard directories on disk:
//!
//! - Expansion: grammar features end to end
//! - **Loading**: eager and lazy stores resolve identically; fallback; refresh
//! - **Determinism**: same text and seed give byte-identical output
//! - Statistics: weight convergence and multi-select distinctness
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p wildprompt-tests
//!
//! # A single suite
//! cargo test -p wildprompt-tests --test e2e_loading
//! ```

pub mod determinism;
pub mod fixtures;
