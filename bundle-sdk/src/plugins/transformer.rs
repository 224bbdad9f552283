use async_trait::async_trait;
use std::fmt::Debug;

use crate::{context::CompileContext, error::Error, file::File};

/// Rewrites a resolved and loaded file into its compiled form.
#[async_trait]
pub trait Transformer: Debug + Send + Sync {
	/// Returns the compiled file, or `None` to pass `file` through as it is.
	async fn transform(&self, file: &File, ctx: &CompileContext) -> Result<Option<File>, Error>;
}
