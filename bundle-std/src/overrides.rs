//! Ready-made default resolvers and loaders for [`CompileContext`].

use std::{
	collections::BTreeMap,
	path::{Component, Path, PathBuf},
};

use async_trait::async_trait;
use bundle_sdk::{
	context::CompileContext,
	error::Error,
	plugins::{Loader, Resolver},
};

/// Renames the ids listed in the map; every other id is left to the registered plugins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapResolver {
	ids: BTreeMap<String, String>,
}

impl MapResolver {
	pub fn new(ids: BTreeMap<String, String>) -> Self {
		Self { ids }
	}
}

#[async_trait]
impl Resolver for MapResolver {
	async fn resolve_id(&self, id: &str, _: &CompileContext) -> Result<Option<String>, Error> {
		Ok(self.ids.get(id).cloned())
	}
}

/// Serves content for resolved ids from an in-memory table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapLoader {
	contents: BTreeMap<String, String>,
}

impl MapLoader {
	pub fn new(contents: BTreeMap<String, String>) -> Self {
		Self { contents }
	}
}

#[async_trait]
impl Loader for MapLoader {
	async fn load(&self, id: &str, _: &CompileContext) -> Result<Option<String>, Error> {
		Ok(self.contents.get(id).cloned())
	}
}

/// Reads content for a resolved id from `root/<id>`. Missing files and ids that
/// would leave `root` yield no content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirLoader {
	root: PathBuf,
}

impl DirLoader {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	fn path_for(&self, id: &str) -> Option<PathBuf> {
		let relative = Path::new(id);
		relative
			.components()
			.all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
			.then(|| self.root.join(relative))
	}
}

#[async_trait]
impl Loader for DirLoader {
	async fn load(&self, id: &str, _: &CompileContext) -> Result<Option<String>, Error> {
		let Some(path) = self.path_for(id) else {
			tracing::warn!(id, "Refusing to load an id outside the load directory");
			return Ok(None);
		};
		match tokio::fs::read_to_string(&path).await {
			Ok(content) => Ok(Some(content)),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
			Err(e) => Err(Error::Io(e)),
		}
	}
}
