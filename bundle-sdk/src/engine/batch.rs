use std::sync::Arc;

use tokio::task::JoinSet;

use crate::{context::CompileContext, engine::pipeline::Pipeline, error::Error, file::File, plugins::Plugin};

/// Spawns one pipeline task per file and collects results in completion order.
///
/// The first failure is returned as soon as it arrives. The remaining tasks are
/// detached, not aborted: they run to completion and their results are dropped.
pub async fn run(plugins: Arc<[Plugin]>, ctx: CompileContext, files: Vec<File>) -> Result<Vec<File>, Error> {
	let mut tasks = JoinSet::new();
	for file in files {
		let plugins = plugins.clone();
		let ctx = ctx.clone();
		tasks.spawn(async move { Pipeline::new(&plugins, &ctx).run(file).await });
	}

	let mut compiled = Vec::with_capacity(tasks.len());
	while let Some(joined) = tasks.join_next().await {
		let result = match joined {
			Ok(result) => result,
			Err(e) => Err(Error::Other(anyhow::Error::new(e).context("Compile task did not finish"))),
		};
		match result {
			Ok(file) => compiled.push(file),
			Err(e) => {
				tracing::debug!(error = %e, remaining = tasks.len(), "File failed, detaching the rest of the batch");
				tasks.detach_all();
				return Err(e);
			}
		}
	}
	Ok(compiled)
}

#[cfg(test)]
mod tests {
	use std::{
		sync::{
			atomic::{AtomicUsize, Ordering},
			Arc,
		},
		time::Duration,
	};

	use async_trait::async_trait;

	use super::*;
	use crate::{
		context::CompileContext,
		file::FileSetExt,
		plugins::{Plugin, Resolver, Transformer},
	};

	/// Claims everything; fails on names starting with `bad`, never resolves names
	/// starting with `hang`, and sleeps for the number of milliseconds given as
	/// content before finishing.
	#[derive(Debug, Default)]
	struct Slow {
		finished: AtomicUsize,
	}

	#[async_trait]
	impl Resolver for Slow {
		async fn resolve_id(&self, id: &str, _: &CompileContext) -> Result<Option<String>, Error> {
			if id.starts_with("bad") {
				return Err(Error::Config(format!("cannot compile {id}")));
			}
			if id.starts_with("hang") {
				std::future::pending::<()>().await;
			}
			Ok(Some(id.replace(".ts", ".js")))
		}
	}

	#[async_trait]
	impl Transformer for Slow {
		async fn transform(&self, file: &File, _: &CompileContext) -> Result<Option<File>, Error> {
			let delay = file.content.parse().unwrap_or(0);
			tokio::time::sleep(Duration::from_millis(delay)).await;
			self.finished.fetch_add(1, Ordering::SeqCst);
			Ok(None)
		}
	}

	fn plugins(slow: &Arc<Slow>) -> Arc<[Plugin]> {
		Arc::from(vec![Plugin::new("slow").with_resolver(slow.clone()).with_transformer(slow.clone())])
	}

	#[tokio::test]
	async fn compiles_every_file() {
		let slow = Arc::new(Slow::default());
		let plugins = plugins(&slow);
		let ctx = CompileContext::default();
		let files = vec![File::new("a.ts", "30"), File::new("b.ts", "0"), File::new("c.ts", "10")];

		let compiled = run(plugins, ctx, files).await.unwrap();
		assert_eq!(compiled.sorted().names(), vec!["a.js", "b.js", "c.js"]);
		assert_eq!(compiled.by_name("a.js").map(|f| f.content.as_str()), Some("30"));
	}

	#[tokio::test]
	async fn results_arrive_in_completion_order() {
		let slow = Arc::new(Slow::default());
		let plugins = plugins(&slow);
		let ctx = CompileContext::default();
		let files = vec![File::new("a.ts", "60"), File::new("b.ts", "0")];

		let compiled = run(plugins, ctx, files).await.unwrap();
		assert_eq!(compiled.names(), vec!["b.js", "a.js"]);
	}

	#[tokio::test]
	async fn first_failure_returns_while_siblings_keep_running() {
		let slow = Arc::new(Slow::default());
		let files = vec![File::new("a.ts", "200"), File::new("bad.ts", "0"), File::new("c.ts", "100")];

		let err = run(plugins(&slow), CompileContext::default(), files).await.unwrap_err();
		assert!(matches!(err, Error::Plugin { ref file, .. } if file == "bad.ts"));
		assert_eq!(slow.finished.load(Ordering::SeqCst), 0);

		tokio::time::sleep(Duration::from_millis(500)).await;
		assert_eq!(slow.finished.load(Ordering::SeqCst), 2);
	}

	#[tokio::test]
	async fn hung_sibling_does_not_hold_back_a_failure() {
		let slow = Arc::new(Slow::default());
		let files = vec![File::new("hang.ts", "0"), File::new("bad.ts", "0")];

		let result = tokio::time::timeout(
			Duration::from_millis(500),
			run(plugins(&slow), CompileContext::default(), files),
		)
		.await
		.expect("batch should fail without waiting for the hung file");
		match result.unwrap_err() {
			Error::Plugin { file, source, .. } => {
				assert_eq!(file, "bad.ts");
				assert!(matches!(*source, Error::Config(_)));
			}
			other => panic!("expected a plugin error, got {other:?}"),
		}
	}

	#[tokio::test]
	async fn empty_batch() {
		let ctx = CompileContext::default();
		let compiled = run(Arc::from(Vec::new()), ctx, Vec::new()).await.unwrap();
		assert!(compiled.is_empty());
	}
}
