use async_trait::async_trait;
use std::fmt::Debug;

use crate::{context::CompileContext, error::Error};

/// Decides whether a plugin claims a file, and under which id.
#[async_trait]
pub trait Resolver: Debug + Send + Sync {
	/// Returns the id the file should carry from this plugin onwards, or `None`
	/// if the plugin does not apply. An empty id is treated as `None`.
	async fn resolve_id(&self, id: &str, ctx: &CompileContext) -> Result<Option<String>, Error>;
}
