use std::iter;

use crate::{
	context::{logger::Logger, CompileContext},
	error::{Error, Step},
	file::File,
	plugins::Plugin,
};

/// Threads a file through the default plugin and then every registered plugin,
/// once each, in order.
///
/// Each plugin sees the id left by the previous one. A plugin that does not
/// resolve the current id leaves the file untouched. There is no second pass: a
/// plugin that could claim the file only after a later rename never sees it.
#[derive(Debug, Clone, Copy)]
pub struct Pipeline<'a> {
	registered: &'a [Plugin],
	ctx: &'a CompileContext,
}

impl<'a> Pipeline<'a> {
	pub fn new(registered: &'a [Plugin], ctx: &'a CompileContext) -> Self {
		Self { registered, ctx }
	}

	pub async fn run(&self, file: File) -> Result<File, Error> {
		let logger = self.ctx.logger("compile_file");
		logger.log("start", &file.name);
		tracing::trace!(file = %file.name, content = %file.content, "Compiling file");

		let defaults = Plugin::defaults(self.ctx);
		let mut current = file;
		for plugin in iter::once(&defaults).chain(self.registered) {
			current = self.apply(plugin, current, &logger).await?;
		}

		logger.log("done", &current.name);
		tracing::trace!(file = %current.name, content = %current.content, "Compiled file");
		Ok(current)
	}

	async fn apply(&self, plugin: &Plugin, current: File, logger: &Logger<'_>) -> Result<File, Error> {
		let Some(resolver) = plugin.resolver() else {
			return Ok(current);
		};

		let resolved = resolver
			.resolve_id(&current.name, self.ctx)
			.await
			.map_err(|e| Error::plugin(plugin.name(), Step::ResolveId, &current.name, e))?
			.filter(|id| !id.is_empty());
		let Some(id) = resolved else {
			return Ok(current);
		};
		logger.log("resolve_id", format_args!("{} -> {id} ({})", current.name, plugin.name()));

		let loaded = match plugin.loader() {
			Some(loader) => loader
				.load(&id, self.ctx)
				.await
				.map_err(|e| Error::plugin(plugin.name(), Step::Load, &id, e))?
				.filter(|content| !content.is_empty()),
			None => None,
		};
		if loaded.is_some() {
			logger.log("load", &id);
		}

		let resolved = match loaded {
			Some(content) => current.with_name(id).with_content(content),
			None => current.with_name(id),
		};
		let Some(transformer) = plugin.transformer() else {
			return Ok(resolved);
		};
		let transformed = transformer
			.transform(&resolved, self.ctx)
			.await
			.map_err(|e| Error::plugin(plugin.name(), Step::Transform, &resolved.name, e))?;
		match transformed {
			Some(file) => {
				logger.log("transform", format_args!("{} -> {} ({})", resolved.name, file.name, plugin.name()));
				Ok(file)
			}
			None => Ok(resolved),
		}
	}
}
