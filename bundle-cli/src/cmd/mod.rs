use std::path::PathBuf;

use async_trait::async_trait;
use clap::{ArgAction, Parser, Subcommand, ValueHint};

use compile::Compile;
use hash::Hash;
use install::Install;
use pack::Pack;
use unpack::Unpack;

mod compile;
mod hash;
mod install;
mod logs;
mod pack;
mod unpack;

#[derive(Subcommand)]
enum Command {
	/// Serialize a directory into a blob.
	Pack(Pack),
	/// Write the files of a blob into a directory.
	Unpack(Unpack),
	/// Print the canonical hash of a blob.
	Hash(Hash),
	/// Compile a directory or blob through the plugin chain.
	Compile(Compile),
	/// Install a package (not implemented).
	Install(Install),
}

#[derive(Parser)]
#[command(about, author, version)]
pub struct App {
	/// Raise the log level on stderr: -v info, -vv debug, -vvv trace.
	#[arg(long, short = 'v', action = ArgAction::Count, global = true)]
	verbose: u8,
	/// Also write a full trace log into this directory.
	#[arg(long, global = true, value_hint = ValueHint::DirPath)]
	log_dir: Option<PathBuf>,
	#[command(subcommand)]
	command: Command,
}

#[async_trait]
pub trait Cmd {
	async fn run(self) -> anyhow::Result<()>;
}

#[async_trait]
impl Cmd for App {
	async fn run(self) -> anyhow::Result<()> {
		let _guard = logs::init(self.verbose, self.log_dir.as_deref());
		match self.command {
			Command::Pack(pack) => pack.run().await,
			Command::Unpack(unpack) => unpack.run().await,
			Command::Hash(hash) => hash.run().await,
			Command::Compile(compile) => compile.run().await,
			Command::Install(install) => install.run().await,
		}
	}
}
