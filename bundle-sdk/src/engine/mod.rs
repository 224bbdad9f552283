pub mod batch;
pub mod pipeline;

use std::sync::Arc;

use crate::{
	codec::{self, Bundle},
	context::CompileContext,
	engine::pipeline::Pipeline,
	error::Error,
	file::File,
	plugins::Plugin,
};

/// The compile engine. Owns the registered plugins, in the order they run.
///
/// The plugin list is fixed once built; per-call behavior only varies through
/// the [`CompileContext`].
#[derive(Debug, Clone)]
pub struct Compiler {
	plugins: Arc<[Plugin]>,
}

impl Compiler {
	pub fn new(plugins: Vec<Plugin>) -> Self {
		tracing::debug!(plugins = ?plugins.iter().map(Plugin::name).collect::<Vec<_>>(), "Registered plugins");
		Self { plugins: plugins.into() }
	}

	pub fn plugins(&self) -> &[Plugin] {
		&self.plugins
	}

	pub async fn compile_file(&self, file: File, ctx: &CompileContext) -> Result<File, Error> {
		Pipeline::new(&self.plugins, ctx).run(file).await
	}

	/// Compiles every file concurrently, one task per file, so it must be called
	/// from within a tokio runtime. The output is in completion order, so look
	/// files up by name rather than by position.
	pub async fn compile(&self, files: Vec<File>, ctx: &CompileContext) -> Result<Vec<File>, Error> {
		let logger = ctx.logger("compile");
		logger.log("start", format_args!("{} files", files.len()));
		let compiled = batch::run(self.plugins.clone(), ctx.clone(), files).await?;
		logger.log("done", format_args!("{} files", compiled.len()));
		Ok(compiled)
	}

	/// Decodes `blob`, compiles its files and returns the canonical encoding of the result.
	pub async fn compile_bundle(&self, blob: &str, ctx: &CompileContext) -> Result<Bundle, Error> {
		let source = codec::decode(blob);
		tracing::info!(hash = %source.hash, files = source.files.len(), "Compiling bundle");
		let compiled = self.compile(source.files, ctx).await?;
		Ok(Bundle::from_files(compiled))
	}
}

/// Installs a package into the file set. Not implemented: it accepts the request and does nothing.
pub async fn install(name: &str, version: &str) -> Result<(), Error> {
	tracing::warn!(name, version, "Package installation is not implemented, nothing was installed");
	Ok(())
}
