use std::path::PathBuf;

use async_trait::async_trait;
use bundle_sdk::codec;
use clap::{Args, ValueHint};

use crate::tree;

use super::Cmd;

/// The hash is taken over the canonical re-encoding, so blobs that differ only
/// in record order or dropped records hash the same.
#[derive(Debug, Args)]
pub struct Hash {
	#[arg(value_hint = ValueHint::FilePath)]
	pub blob: PathBuf,
}

#[async_trait]
impl Cmd for Hash {
	async fn run(self) -> anyhow::Result<()> {
		let blob = tree::read_blob(&self.blob).await?;
		println!("{}", codec::decode(&blob).hash);
		Ok(())
	}
}
