use std::{collections::HashSet, fmt::Display};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A named source file in a virtual file set.
///
/// The name doubles as a module id and as a `/`-separated path. Stages in the
/// compile pipeline never edit a `File`; they produce a new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct File {
	pub name: String,
	pub content: String,
}

impl Display for File {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.name)
	}
}

impl File {
	pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			content: content.into(),
		}
	}

	pub fn with_name(self, name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			content: self.content,
		}
	}

	pub fn with_content(self, content: impl Into<String>) -> Self {
		Self {
			name: self.name,
			content: content.into(),
		}
	}
}

/// Helpers for treating a slice of files as a file set.
pub trait FileSetExt {
	/// A copy of the set in canonical order: ascending by name, compared byte-wise.
	fn sorted(&self) -> Vec<File>;
	fn by_name(&self, name: &str) -> Option<&File>;
	fn names(&self) -> Vec<&str>;
	fn ensure_unique_names(&self) -> Result<(), Error>;
}

impl FileSetExt for [File] {
	fn sorted(&self) -> Vec<File> {
		let mut files = self.to_vec();
		files.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
		files
	}

	fn by_name(&self, name: &str) -> Option<&File> {
		self.iter().find(|file| file.name == name)
	}

	fn names(&self) -> Vec<&str> {
		self.iter().map(|file| file.name.as_str()).collect()
	}

	fn ensure_unique_names(&self) -> Result<(), Error> {
		let mut seen = HashSet::with_capacity(self.len());
		for file in self {
			if !seen.insert(file.name.as_str()) {
				return Err(Error::DuplicateName(file.name.clone()));
			}
		}
		Ok(())
	}
}
