pub const PROJECT_NAME: &str = "bundle";

pub mod codec;
pub mod context;
pub mod engine;
pub mod error;
pub mod file;
pub mod plugins;

pub use codec::Bundle;
pub use context::CompileContext;
pub use engine::{install, Compiler};
pub use error::{Error, Step};
pub use file::{File, FileSetExt};
pub use plugins::{Loader, Plugin, Resolver, Transformer};
