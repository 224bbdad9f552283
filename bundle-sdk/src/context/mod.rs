pub mod logger;

use std::sync::Arc;

use crate::{
	context::logger::{LogSink, Logger, TracingSink},
	plugins::{Loader, Resolver},
};

/// Per-compilation configuration, shared by reference across every file and
/// plugin of a batch. Nothing in the pipeline mutates it; the sink is the only
/// side channel.
#[derive(Debug, Clone)]
pub struct CompileContext {
	/// Runs before every registered plugin, on every file.
	pub default_resolver: Option<Arc<dyn Resolver>>,
	/// Paired with `default_resolver`; ignored when no resolver is set.
	pub default_loader: Option<Arc<dyn Loader>>,
	pub sink: Arc<dyn LogSink>,
}

impl Default for CompileContext {
	fn default() -> Self {
		Self {
			default_resolver: None,
			default_loader: None,
			sink: Arc::new(TracingSink),
		}
	}
}

impl CompileContext {
	pub fn with_default_resolver<R: Resolver + 'static>(mut self, resolver: Arc<R>) -> Self {
		self.default_resolver = Some(resolver);
		self
	}

	pub fn with_default_loader<L: Loader + 'static>(mut self, loader: Arc<L>) -> Self {
		self.default_loader = Some(loader);
		self
	}

	pub fn with_sink<S: LogSink + 'static>(mut self, sink: Arc<S>) -> Self {
		self.sink = sink;
		self
	}

	pub fn logger<'a>(&'a self, scope: &'a str) -> Logger<'a> {
		Logger::new(scope, self.sink.as_ref())
	}
}
