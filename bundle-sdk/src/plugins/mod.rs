pub mod loader;
pub mod resolver;
pub mod transformer;

use std::sync::Arc;

pub use loader::Loader;
pub use resolver::Resolver;
pub use transformer::Transformer;

use crate::context::CompileContext;

pub const DEFAULT_PLUGIN: &str = "default";

/// A named bundle of up to three capabilities.
///
/// Every slot is optional. The pipeline only looks at a plugin whose resolver
/// claims the current file; a plugin without a resolver never runs.
#[derive(Debug, Clone)]
pub struct Plugin {
	name: String,
	resolver: Option<Arc<dyn Resolver>>,
	loader: Option<Arc<dyn Loader>>,
	transformer: Option<Arc<dyn Transformer>>,
}

impl Plugin {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			resolver: None,
			loader: None,
			transformer: None,
		}
	}

	/// The synthetic first plugin of every pipeline run, made of the context's
	/// override resolver and loader. It never transforms.
	pub fn defaults(ctx: &CompileContext) -> Self {
		Self {
			name: DEFAULT_PLUGIN.to_string(),
			resolver: ctx.default_resolver.clone(),
			loader: ctx.default_loader.clone(),
			transformer: None,
		}
	}

	pub fn with_resolver<R: Resolver + 'static>(mut self, resolver: Arc<R>) -> Self {
		self.resolver = Some(resolver);
		self
	}

	pub fn with_loader<L: Loader + 'static>(mut self, loader: Arc<L>) -> Self {
		self.loader = Some(loader);
		self
	}

	pub fn with_transformer<T: Transformer + 'static>(mut self, transformer: Arc<T>) -> Self {
		self.transformer = Some(transformer);
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn resolver(&self) -> Option<&dyn Resolver> {
		self.resolver.as_deref()
	}

	pub fn loader(&self) -> Option<&dyn Loader> {
		self.loader.as_deref()
	}

	pub fn transformer(&self) -> Option<&dyn Transformer> {
		self.transformer.as_deref()
	}
}
