use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LisanError;

/// Language of a pipeline run.
///
/// Every language-dependent routine matches on this enum exhaustively, so
/// adding a language is a compile-time-checked change.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
	English,
	Arabic,
}

impl Language {
	pub const ALL: [Language; 2] = [Language::English, Language::Arabic];

	/// Lowercase name, as used in file names and on the command line.
	pub fn name(self) -> &'static str {
		match self {
			Language::English => "english",
			Language::Arabic => "arabic",
		}
	}
}

impl fmt::Display for Language {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Language {
	type Err = LisanError;

	/// Parses a language name (case-insensitive).
	///
	/// # Errors
	/// Returns `UnsupportedLanguage` for anything but english/arabic.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"english" | "en" => Ok(Language::English),
			"arabic" | "ar" => Ok(Language::Arabic),
			_ => Err(LisanError::UnsupportedLanguage(s.to_owned())),
		}
	}
}
