use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the analysis stages.
///
/// `MissingDataFile` is recovered by the loader (the language is skipped),
/// `EmptyTrainingSet` and `CollaboratorUnavailable` are recovered by the
/// pipeline (the failing stage is reported, the others still run).
#[derive(Error, Debug)]
pub enum LisanError {
	#[error("data file not found: {}", .0.display())]
	MissingDataFile(PathBuf),

	#[error("unsupported language: {0} (expected 'english' or 'arabic')")]
	UnsupportedLanguage(String),

	#[error("training set is empty after splitting and filtering")]
	EmptyTrainingSet,

	#[error("{collaborator} unavailable: {reason}")]
	CollaboratorUnavailable {
		collaborator: String,
		reason: String,
	},

	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

impl LisanError {
	/// Shorthand for a collaborator failure.
	pub fn unavailable(collaborator: impl Into<String>, reason: impl ToString) -> Self {
		Self::CollaboratorUnavailable {
			collaborator: collaborator.into(),
			reason: reason.to_string(),
		}
	}
}

pub type Result<T> = std::result::Result<T, LisanError>;
