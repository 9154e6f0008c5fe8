use thiserror::Error;

/// Result type for chain construction and generation operations.
pub type Result<T> = std::result::Result<T, GenError>;

/// Errors that can occur while building or walking a Markov chain.
///
/// Sampling-time anomalies (a cursor clump with no table entry, an empty
/// successor pick) are deliberately *not* represented here: they are handled
/// by the random-fallback policy and only counted for diagnostics.
#[derive(Error, Debug)]
pub enum GenError {
	/// Rejected before any work is done (clump size of zero, bad paths).
	#[error("Invalid configuration: {0}")]
	InvalidConfiguration(String),

	/// The walker was handed a transition table with no usable keys.
	#[error("Empty model: the transition table has no keys")]
	EmptyModel,

	/// Two chains of different clump sizes cannot be merged.
	#[error("Clump size mismatch: expected {expected}, got {found}")]
	ClumpSizeMismatch { expected: usize, found: usize },

	/// IO error occurred
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}
