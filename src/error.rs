//! Error types for loading the family tree

use thiserror::Error;

/// Errors raised while starting the family tree
#[derive(Error, Debug)]
pub enum FamilyTreeError {
	/// The bundled dataset is not valid family JSON
	#[error("Invalid family dataset: {0}")]
	Dataset(#[from] serde_json::Error),
}

/// Result type alias for family tree operations
pub type Result<T> = std::result::Result<T, FamilyTreeError>;
