use std::{
	collections::BTreeMap,
	path::{Path, PathBuf},
	sync::Arc,
};

use anyhow::{Context, Result};
use bundle_sdk::{context::CompileContext, error::Error, Compiler, PROJECT_NAME};
use bundle_std::{
	default_plugins,
	overrides::{DirLoader, MapLoader, MapResolver},
	StdOptions,
};
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Looked up in the working directory when no `--config` is given.
pub const LOCAL_CONFIG: &str = "bundle.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
	#[serde(default)]
	pub plugins: StdOptions,
	#[serde(default)]
	pub defaults: Defaults,
}

/// Overrides for the default plugin that runs ahead of every registered one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
	/// Id renames, `from = "to"`.
	#[serde(default)]
	pub resolve: BTreeMap<String, String>,
	/// Inline contents by resolved id.
	#[serde(default)]
	pub load: BTreeMap<String, String>,
	/// Directory resolved ids are read from.
	#[serde(default)]
	pub load_dir: Option<PathBuf>,
}

impl Config {
	pub fn parse(content: &str) -> Result<Self, Error> {
		toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config TOML: {e}")))
	}

	pub async fn from_file(path: &Path) -> Result<Self> {
		let content = fs::read_to_string(path)
			.await
			.with_context(|| format!("Failed to read config file: {}", path.display()))?;
		Self::parse(&content).with_context(|| format!("Invalid config file format: {}", path.display()))
	}

	/// An explicit path must exist. Otherwise `./bundle.toml` is tried, then
	/// `<config dir>/bundle/config.toml`, then the defaults.
	pub async fn resolve(explicit: Option<&Path>) -> Result<Self> {
		if let Some(path) = explicit {
			return Self::from_file(path).await;
		}

		let local = Path::new(LOCAL_CONFIG);
		if fs::try_exists(local).await.unwrap_or(false) {
			return Self::from_file(local).await;
		}

		let Some(config_dir) = dirs::config_dir() else {
			tracing::info!("Could not determine OS-specific config directory. Using default config.");
			return Ok(Self::default());
		};
		let path = config_dir.join(PROJECT_NAME).join("config.toml");
		match fs::read_to_string(&path).await {
			Ok(content) => Self::parse(&content).with_context(|| format!("Invalid config file format: {}", path.display())),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
				tracing::info!("No config file found at {}. Using default config.", path.display());
				Ok(Self::default())
			}
			Err(e) => Err(e).with_context(|| format!("Failed to read config file: {}", path.display())),
		}
	}

	pub fn context(&self) -> Result<CompileContext, Error> {
		let mut ctx = CompileContext::default();
		if !self.defaults.resolve.is_empty() {
			ctx = ctx.with_default_resolver(Arc::new(MapResolver::new(self.defaults.resolve.clone())));
		}
		match (self.defaults.load.is_empty(), &self.defaults.load_dir) {
			(false, Some(_)) => {
				return Err(Error::Config(
					"`defaults.load` and `defaults.load_dir` cannot be used together".to_string(),
				))
			}
			(false, None) => ctx = ctx.with_default_loader(Arc::new(MapLoader::new(self.defaults.load.clone()))),
			(true, Some(dir)) => ctx = ctx.with_default_loader(Arc::new(DirLoader::new(dir))),
			(true, None) => {}
		}
		Ok(ctx)
	}

	pub fn compiler(&self) -> Compiler {
		Compiler::new(default_plugins(&self.plugins))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use bundle_sdk::plugins::{Loader, Resolver};

	#[test]
	fn empty_config_is_default() {
		assert_eq!(Config::parse("").unwrap(), Config::default());
	}

	#[test]
	fn parses_plugin_options_and_defaults() {
		let config = Config::parse(
			r#"
			[plugins.esm]
			cdn = "https://cdn.example"

			[plugins.esm.dependencies]
			vue = "3.4.21"

			[defaults]
			load_dir = "src"

			[defaults.resolve]
			"main.ts" = "main.js"
			"#,
		)
		.unwrap();
		assert_eq!(config.plugins.esm.cdn, "https://cdn.example");
		assert_eq!(config.plugins.esm.dependencies["vue"], "3.4.21");
		assert_eq!(config.defaults.resolve["main.ts"], "main.js");
		assert_eq!(config.defaults.load_dir.as_deref(), Some(Path::new("src")));
	}

	#[test]
	fn unknown_keys_are_rejected() {
		let err = Config::parse("[defaults]\nresolver = {}\n").unwrap_err();
		assert!(matches!(err, Error::Config(_)));
	}

	#[test]
	fn inline_and_directory_loading_are_exclusive() {
		let mut config = Config::default();
		config.defaults.load.insert("a.js".into(), "x".into());
		config.defaults.load_dir = Some(PathBuf::from("src"));
		assert!(matches!(config.context().unwrap_err(), Error::Config(_)));
	}

	#[tokio::test]
	async fn context_carries_the_configured_defaults() {
		let mut config = Config::default();
		config.defaults.resolve.insert("main.ts".into(), "main.js".into());
		config.defaults.load.insert("main.js".into(), "export {}".into());
		let ctx = config.context().unwrap();

		let resolver = ctx.default_resolver.clone().unwrap();
		let loader = ctx.default_loader.clone().unwrap();
		assert_eq!(resolver.resolve_id("main.ts", &ctx).await.unwrap().as_deref(), Some("main.js"));
		assert_eq!(loader.load("main.js", &ctx).await.unwrap().as_deref(), Some("export {}"));
	}

	#[tokio::test]
	async fn explicit_path_must_exist() {
		let dir = tempfile::tempdir().unwrap();
		assert!(Config::resolve(Some(&dir.path().join("missing.toml"))).await.is_err());

		let path = dir.path().join("bundle.toml");
		std::fs::write(&path, "[plugins.esm]\ncdn = \"https://x.dev\"\n").unwrap();
		let config = Config::resolve(Some(&path)).await.unwrap();
		assert_eq!(config.plugins.esm.cdn, "https://x.dev");
	}
}
