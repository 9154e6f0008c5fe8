//! Top-level module for the word-clump Markov chain system.
//!
//! This module provides:
//! - The transition table and its builder (`MarkovChain`)
//! - Per-key successor statistics (`ClumpState`)
//! - The weighted random walk generator (`ChainWalker`)

/// Transition table mapping an N-token clump to its weighted successors.
///
/// Handles sliding-window construction (sequential and sharded), additive
/// merging, and the diagnostic frequency ranking.
pub mod chain;

/// Weighted random walk over a built transition table.
///
/// Exposes seeding, step-by-step weighted selection and the counted
/// random-fallback policy.
pub mod walker;

/// Internal representation of a single clump key (successor counts).
///
/// Tracks outgoing transitions and supports weighted random sampling.
/// This module is not exposed publicly.
mod state;
