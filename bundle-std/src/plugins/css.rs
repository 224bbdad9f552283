use std::{collections::BTreeMap, sync::LazyLock};

use async_trait::async_trait;
use bundle_sdk::{
	codec,
	context::CompileContext,
	error::Error,
	file::File,
	plugins::{Resolver, Transformer},
};
use regex::{Captures, Regex};

/// Text between two blocks that opens a new one, i.e. a selector list or an at-rule prelude.
static PRELUDE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([^{}]+)\{").expect("valid prelude pattern"));
/// A class selector, or a quoted string or `url(...)` that must be left alone.
static CLASS: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#""(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'|url\([^)]*\)|\.(-?[_a-zA-Z][_a-zA-Z0-9-]*)"#)
		.expect("valid class pattern")
});

/// Turns stylesheets into JavaScript modules that inject a `<style>` tag.
///
/// `x.css` resolves to `x.css.js`. Files named `*.module.css` additionally get
/// their class names suffixed with a hash of the file name, and the module
/// exports the original-to-scoped class map instead of the stylesheet text.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssPlugin;

#[async_trait]
impl Resolver for CssPlugin {
	async fn resolve_id(&self, id: &str, _: &CompileContext) -> Result<Option<String>, Error> {
		Ok(id.ends_with(".css").then(|| format!("{id}.js")))
	}
}

#[async_trait]
impl Transformer for CssPlugin {
	async fn transform(&self, file: &File, _: &CompileContext) -> Result<Option<File>, Error> {
		let source = file.name.strip_suffix(".js").unwrap_or(&file.name);
		let (css, classes) = if source.ends_with(".module.css") {
			let (css, classes) = scope_classes(&file.content, source);
			(css, Some(classes))
		} else {
			(file.content.clone(), None)
		};

		let export = match classes {
			Some(classes) => serde_json::to_string(&classes)?,
			None => "css".to_string(),
		};
		let module = format!(
			"const css = {css};\nif (typeof document !== \"undefined\") {{\n\tconst style = document.createElement(\"style\");\n\tstyle.setAttribute(\"data-bundle-id\", {id});\n\tstyle.textContent = css;\n\tdocument.head.appendChild(style);\n}}\nexport default {export};\n",
			css = serde_json::to_string(&css)?,
			id = serde_json::to_string(source)?,
		);
		Ok(Some(File::new(file.name.clone(), module)))
	}
}

/// Rewrites every class selector `.name` to `.name_<hash>` and returns the rewritten sheet with the mapping.
fn scope_classes(css: &str, source: &str) -> (String, BTreeMap<String, String>) {
	let suffix = &codec::digest(source)[..8];
	let mut classes = BTreeMap::new();
	let scoped = PRELUDE.replace_all(css, |prelude: &Captures| {
		// Only the last statement before the brace is a selector list.
		let text = &prelude[1];
		let (statements, selector) = text.split_at(text.rfind(';').map_or(0, |i| i + 1));
		if selector.trim_start().starts_with('@') {
			return prelude[0].to_string();
		}
		let selectors = CLASS.replace_all(selector, |token: &Captures| match token.get(1) {
			Some(class) => {
				let scoped = format!("{}_{suffix}", class.as_str());
				classes.insert(class.as_str().to_string(), scoped.clone());
				format!(".{scoped}")
			}
			None => token[0].to_string(),
		});
		format!("{statements}{selectors}{{")
	});
	(scoped.into_owned(), classes)
}
