use std::path::PathBuf;

use async_trait::async_trait;
use bundle_sdk::{codec, Bundle};
use clap::{Args, ValueHint};

use crate::{tree, ui};

use super::Cmd;

#[derive(Debug, Args)]
pub struct Pack {
	/// Directory whose files go into the blob.
	#[arg(value_hint = ValueHint::DirPath)]
	pub dir: PathBuf,
	/// Write the blob to this file instead of stdout.
	#[arg(long, short = 'o', value_hint = ValueHint::FilePath)]
	pub output: Option<PathBuf>,
	/// Include dot-files and dot-directories.
	#[arg(long)]
	pub hidden: bool,
}

#[async_trait]
impl Cmd for Pack {
	async fn run(self) -> anyhow::Result<()> {
		let files = tree::read_tree(&self.dir, self.hidden).await?;
		codec::validate(&files)?;
		let bundle = Bundle::from_files(files);
		tree::write_blob(self.output.as_deref(), &bundle.content).await?;
		ui::success(&format!("Packed {} files ({})", bundle.files.len(), bundle.hash));
		Ok(())
	}
}
