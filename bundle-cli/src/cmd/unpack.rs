use std::path::PathBuf;

use async_trait::async_trait;
use bundle_sdk::codec;
use clap::{Args, ValueHint};

use crate::{tree, ui};

use super::Cmd;

#[derive(Debug, Args)]
pub struct Unpack {
	/// Blob file to read.
	#[arg(value_hint = ValueHint::FilePath)]
	pub blob: PathBuf,
	/// Directory the files are written into.
	#[arg(long, short = 'o', value_hint = ValueHint::DirPath)]
	pub out_dir: PathBuf,
}

#[async_trait]
impl Cmd for Unpack {
	async fn run(self) -> anyhow::Result<()> {
		let blob = tree::read_blob(&self.blob).await?;
		let bundle = codec::decode(&blob);
		tree::write_tree(&self.out_dir, &bundle.files).await?;
		ui::success(&format!(
			"Unpacked {} files into {} ({})",
			bundle.files.len(),
			self.out_dir.display(),
			bundle.hash
		));
		Ok(())
	}
}
