use std::{collections::BTreeMap, sync::LazyLock};

use async_trait::async_trait;
use bundle_sdk::{
	context::CompileContext,
	error::Error,
	file::File,
	plugins::{Resolver, Transformer},
};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// `from "x"`, `import "x"` and `import("x")`, capturing the keyword, quotes and specifier.
static SPECIFIER: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"(\bfrom\s*|\bimport\s*\(?\s*)(["'])([^"'\n]+)(["'])"#).expect("valid specifier pattern")
});

fn default_cdn() -> String {
	"https://esm.sh".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EsmOptions {
	/// Base URL bare specifiers are rewritten against.
	#[serde(default = "default_cdn")]
	pub cdn: String,
	/// Version pins by package name.
	#[serde(default)]
	pub dependencies: BTreeMap<String, String>,
}

impl Default for EsmOptions {
	fn default() -> Self {
		Self {
			cdn: default_cdn(),
			dependencies: BTreeMap::new(),
		}
	}
}

/// Claims every JavaScript module and points its bare imports at a CDN, so the
/// output runs in a browser without an import map.
#[derive(Debug, Clone)]
pub struct EsmPlugin {
	options: EsmOptions,
}

impl EsmPlugin {
	pub fn new(options: EsmOptions) -> Self {
		Self { options }
	}

	fn rewrite(&self, specifier: &str) -> Option<String> {
		if !is_bare(specifier) {
			return None;
		}
		let (package, subpath) = split_package(specifier);
		let cdn = self.options.cdn.trim_end_matches('/');
		let url = match self.options.dependencies.get(package) {
			Some(version) => format!("{cdn}/{package}@{version}{subpath}"),
			None => format!("{cdn}/{specifier}"),
		};
		Some(url)
	}
}

fn is_bare(specifier: &str) -> bool {
	!(specifier.starts_with('.') || specifier.starts_with('/') || specifier.starts_with('#') || specifier.contains(':'))
}

/// Splits `@scope/name/sub/path` into `@scope/name` and `/sub/path`.
fn split_package(specifier: &str) -> (&str, &str) {
	let segments = if specifier.starts_with('@') { 2 } else { 1 };
	match specifier.match_indices('/').nth(segments - 1) {
		Some((index, _)) => specifier.split_at(index),
		None => (specifier, ""),
	}
}

#[async_trait]
impl Resolver for EsmPlugin {
	async fn resolve_id(&self, id: &str, _: &CompileContext) -> Result<Option<String>, Error> {
		Ok((id.ends_with(".js") || id.ends_with(".mjs")).then(|| id.to_string()))
	}
}

#[async_trait]
impl Transformer for EsmPlugin {
	async fn transform(&self, file: &File, _: &CompileContext) -> Result<Option<File>, Error> {
		let rewritten = SPECIFIER.replace_all(&file.content, |caps: &Captures| match self.rewrite(&caps[3]) {
			Some(url) => format!("{}{}{url}{}", &caps[1], &caps[2], &caps[4]),
			None => caps[0].to_string(),
		});
		if rewritten == file.content.as_str() {
			return Ok(None);
		}
		tracing::debug!(file = %file.name, "Rewrote bare imports");
		Ok(Some(File::new(file.name.clone(), rewritten.into_owned())))
	}
}
