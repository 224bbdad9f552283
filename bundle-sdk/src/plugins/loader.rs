use async_trait::async_trait;
use std::fmt::Debug;

use crate::{context::CompileContext, error::Error};

/// Supplies content for a resolved id. `None` (or an empty string) keeps the file's current content.
#[async_trait]
pub trait Loader: Debug + Send + Sync {
	async fn load(&self, id: &str, ctx: &CompileContext) -> Result<Option<String>, Error>;
}
