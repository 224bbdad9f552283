use async_trait::async_trait;
use clap::Args;

use crate::ui;

use super::Cmd;

#[derive(Debug, Args)]
pub struct Install {
	/// Package name.
	pub name: String,
	/// Version or range to install.
	#[arg(default_value = "latest")]
	pub version: String,
}

#[async_trait]
impl Cmd for Install {
	async fn run(self) -> anyhow::Result<()> {
		bundle_sdk::install(&self.name, &self.version).await?;
		ui::warning(&format!("Installing {}@{} is not supported yet, nothing was done", self.name, self.version));
		Ok(())
	}
}
