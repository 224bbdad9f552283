pub mod overrides;
pub mod plugins;

use std::sync::Arc;

use bundle_sdk::plugins::Plugin;
use serde::{Deserialize, Serialize};

use crate::plugins::{css::CssPlugin, esm::EsmPlugin, json::JsonPlugin};

/// Options for the standard plugins, as read from the `[plugins]` table of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StdOptions {
	#[serde(default)]
	pub esm: plugins::esm::EsmOptions,
}

/// The standard plugin chain, in registration order: stylesheets and data
/// files become JavaScript modules first, then every module gets its bare
/// imports rewritten.
pub fn default_plugins(options: &StdOptions) -> Vec<Plugin> {
	let css = Arc::new(CssPlugin);
	let json = Arc::new(JsonPlugin);
	let esm = Arc::new(EsmPlugin::new(options.esm.clone()));
	vec![
		Plugin::new("css").with_resolver(css.clone()).with_transformer(css),
		Plugin::new("json").with_resolver(json.clone()).with_transformer(json),
		Plugin::new("esm").with_resolver(esm.clone()).with_transformer(esm),
	]
}
