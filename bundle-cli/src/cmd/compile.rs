use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use bundle_sdk::{codec, file::FileSetExt, Bundle};
use clap::{Args, ValueHint};

use crate::{config::Config, tree, ui};

use super::Cmd;

#[derive(Debug, Args)]
pub struct Compile {
	/// A directory to compile, or a blob file.
	#[arg(value_hint = ValueHint::AnyPath)]
	pub input: PathBuf,
	/// Write the compiled blob to this file instead of stdout.
	#[arg(long, short = 'o', value_hint = ValueHint::FilePath, conflicts_with = "out_dir")]
	pub output: Option<PathBuf>,
	/// Write the compiled files into this directory instead of emitting a blob.
	#[arg(long, value_hint = ValueHint::DirPath)]
	pub out_dir: Option<PathBuf>,
	/// Config file; defaults to ./bundle.toml, then the user config directory.
	#[arg(long, short = 'c', value_hint = ValueHint::FilePath)]
	pub config: Option<PathBuf>,
	/// Include dot-files when the input is a directory.
	#[arg(long)]
	pub hidden: bool,
}

#[async_trait]
impl Cmd for Compile {
	async fn run(self) -> anyhow::Result<()> {
		let config = Config::resolve(self.config.as_deref()).await?;
		let ctx = config.context()?;
		let compiler = config.compiler();

		let source = if self.input.is_dir() {
			Bundle::from_files(tree::read_tree(&self.input, self.hidden).await?)
		} else {
			codec::decode(&tree::read_blob(&self.input).await?)
		};
		ui::info(&format!("Compiling {} files ({})", source.files.len(), source.hash));

		let compiled = compiler
			.compile(source.files, &ctx)
			.await
			.with_context(|| format!("Failed to compile {}", self.input.display()))?;
		let bundle = Bundle::from_files(compiled);

		match &self.out_dir {
			Some(dir) => {
				bundle.files.ensure_unique_names()?;
				tree::write_tree(dir, &bundle.files).await?;
			}
			None => {
				codec::validate(&bundle.files)?;
				tree::write_blob(self.output.as_deref(), &bundle.content).await?;
			}
		}
		ui::success(&format!("Compiled {} files ({})", bundle.files.len(), bundle.hash));
		Ok(())
	}
}
