//! Markov-chain text generation library.
//!
//! This crate provides a word-clump Markov chain system including:
//! - Transition table construction from a cleaned token stream
//! - Frequency-weighted random walk generation
//! - Corpus ingestion (cleaning, tokenization, directory loading)
//! - Presentation helpers (line wrapping, sentence heuristics, report files)
//!
//! The model groups `clump_size` consecutive words into one atomic unit and
//! learns which clump tends to follow which. Generation is a weighted random
//! walk over that table, with a counted random-fallback policy for clumps
//! that were observed as successors but never as keys.

/// Core chain model and generation logic.
///
/// This module exposes the transition table and the walker interface while
/// keeping the per-key state representation private.
pub mod model;

/// Corpus ingestion: character cleaning, tokenization and directory loading.
pub mod corpus;

/// Presentation post-processing and report files.
///
/// Line wrapping, sentence-boundary heuristics and the tab-separated
/// transition dump. None of this affects generation statistics.
pub mod report;

/// Error taxonomy shared by the whole crate.
pub mod error;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;
