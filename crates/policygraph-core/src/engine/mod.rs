//! The policy graph engine.
//!
//! This module provides:
//! - **errors**: Error types for construction and lookup failures
//! - **probability**: Probability and distribution validation
//! - **scenario**: Named opaque scenario payloads
//! - **node**: Deterministic and stochastic stage nodes, scenario sampling
//! - **graph**: The policy graph tree and subproblem assignments
//! - **linear**: Chain builder that appends stages sequentially
//! - **summary**: Read-only summaries and structured exports

pub mod errors;
pub mod graph;
pub mod linear;
pub mod node;
pub mod probability;
pub mod scenario;
pub mod summary;
