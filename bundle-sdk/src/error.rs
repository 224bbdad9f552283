use strum::Display;
use thiserror::Error;

/// The three capabilities a plugin can expose, in the order the pipeline calls them.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum Step {
	ResolveId,
	Load,
	Transform,
}

/// The primary error type for codec validation and compilation.
#[derive(Error, Debug)]
pub enum Error {
	#[error("Plugin `{plugin}` failed during {step} of `{file}`")]
	Plugin {
		plugin: String,
		step: Step,
		file: String,
		#[source]
		source: Box<Error>,
	},

	#[error("File `{0}` contains a reserved separator and cannot be encoded")]
	Separator(String),

	#[error("File set contains a file with an empty name")]
	EmptyName,

	#[error("File `{0}` has no content and would be dropped when decoded")]
	EmptyContent(String),

	#[error("File set contains `{0}` more than once")]
	DuplicateName(String),

	#[error("Error in configuration: {0}")]
	Config(String),

	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Other(#[from] anyhow::Error),
}

impl Error {
	pub fn plugin(plugin: impl Into<String>, step: Step, file: impl Into<String>, source: Error) -> Self {
		Error::Plugin {
			plugin: plugin.into(),
			step,
			file: file.into(),
			source: Box::new(source),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn plugin_error_names_the_failing_step() {
		let err = Error::plugin("css", Step::ResolveId, "app.css", Error::Config("boom".into()));
		assert_eq!(err.to_string(), "Plugin `css` failed during resolve_id of `app.css`");
		assert!(matches!(err, Error::Plugin { step: Step::ResolveId, .. }));
		assert!(std::error::Error::source(&err).is_some());
	}
}
