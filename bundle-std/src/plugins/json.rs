use async_trait::async_trait;
use bundle_sdk::{
	context::CompileContext,
	error::Error,
	file::File,
	plugins::{Resolver, Transformer},
};
use serde_json::Value;

/// Turns `x.json` into `x.json.js`, a module whose default export is the parsed document.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPlugin;

#[async_trait]
impl Resolver for JsonPlugin {
	async fn resolve_id(&self, id: &str, _: &CompileContext) -> Result<Option<String>, Error> {
		Ok(id.ends_with(".json").then(|| format!("{id}.js")))
	}
}

#[async_trait]
impl Transformer for JsonPlugin {
	async fn transform(&self, file: &File, _: &CompileContext) -> Result<Option<File>, Error> {
		let value: Value = serde_json::from_str(&file.content)?;
		let module = format!("export default {};\n", serde_json::to_string(&value)?);
		Ok(Some(File::new(file.name.clone(), module)))
	}
}
