//! Moving file sets between the blob world and real directories.

use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context, Result};
use bundle_sdk::file::File;
use path_clean::PathClean;
use tokio::{fs, io::AsyncWriteExt};
use walkdir::{DirEntry, WalkDir};

fn is_hidden(entry: &DirEntry) -> bool {
	entry.depth() > 0 && entry.file_name().to_str().is_some_and(|name| name.starts_with('.'))
}

/// Collects every regular file under `root`, named by its `/`-separated path
/// relative to `root`. Empty and non-UTF-8 files cannot live in a blob and are
/// skipped with a warning.
pub async fn read_tree(root: &Path, hidden: bool) -> Result<Vec<File>> {
	let mut files = Vec::new();
	let walker = WalkDir::new(root).sort_by_file_name().into_iter();
	for entry in walker.filter_entry(|entry| hidden || !is_hidden(entry)) {
		let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
		if !entry.file_type().is_file() {
			continue;
		}
		let relative = entry.path().strip_prefix(root)?;
		let Some(name) = relative
			.components()
			.map(|component| component.as_os_str().to_str())
			.collect::<Option<Vec<_>>>()
			.map(|parts| parts.join("/"))
		else {
			tracing::warn!(path = %entry.path().display(), "Skipping file with a non-UTF-8 name");
			continue;
		};

		let bytes = fs::read(entry.path())
			.await
			.with_context(|| format!("Failed to read {}", entry.path().display()))?;
		let Ok(content) = String::from_utf8(bytes) else {
			tracing::warn!(file = %name, "Skipping non-UTF-8 file");
			continue;
		};
		if content.is_empty() {
			tracing::warn!(file = %name, "Skipping empty file");
			continue;
		}
		files.push(File::new(name, content));
	}
	Ok(files)
}

/// Joins a file name onto `root`, refusing names that would land outside it.
fn destination(root: &Path, name: &str) -> Result<PathBuf> {
	let relative = Path::new(name).clean();
	if !relative.components().all(|component| matches!(component, Component::Normal(_) | Component::CurDir)) {
		bail!("Refusing to write `{name}` outside of {}", root.display());
	}
	Ok(root.join(relative))
}

/// Writes `files` under `root`, creating directories as needed. Every name is
/// checked before anything touches the disk.
pub async fn write_tree(root: &Path, files: &[File]) -> Result<()> {
	let targets = files
		.iter()
		.map(|file| destination(root, &file.name))
		.collect::<Result<Vec<_>>>()?;
	for (file, path) in files.iter().zip(targets) {
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent)
				.await
				.with_context(|| format!("Failed to create {}", parent.display()))?;
		}
		fs::write(&path, &file.content)
			.await
			.with_context(|| format!("Failed to write {}", path.display()))?;
		tracing::debug!(file = %file.name, path = %path.display(), "Wrote file");
	}
	Ok(())
}

pub async fn read_blob(path: &Path) -> Result<String> {
	fs::read_to_string(path)
		.await
		.with_context(|| format!("Failed to read blob: {}", path.display()))
}

/// Writes `blob` to `path`, or to stdout when no path is given.
pub async fn write_blob(path: Option<&Path>, blob: &str) -> Result<()> {
	match path {
		Some(path) => fs::write(path, blob)
			.await
			.with_context(|| format!("Failed to write blob: {}", path.display())),
		None => {
			let mut stdout = tokio::io::stdout();
			stdout.write_all(blob.as_bytes()).await?;
			stdout.flush().await?;
			Ok(())
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use bundle_sdk::file::FileSetExt;

	#[tokio::test]
	async fn directory_round_trip() {
		let files = vec![
			File::new("index.html", "<main></main>"),
			File::new("src/main.js", "import './a.js';"),
			File::new("src/lib/a.js", "export {}"),
		];
		let dir = tempfile::tempdir().unwrap();
		write_tree(dir.path(), &files).await.unwrap();

		let read = read_tree(dir.path(), false).await.unwrap();
		assert_eq!(read.sorted(), files.sorted());
	}

	#[tokio::test]
	async fn skips_hidden_empty_and_binary_files() {
		let dir = tempfile::tempdir().unwrap();
		std::fs::create_dir(dir.path().join(".git")).unwrap();
		std::fs::write(dir.path().join(".git/HEAD"), "ref: main").unwrap();
		std::fs::write(dir.path().join(".env"), "KEY=1").unwrap();
		std::fs::write(dir.path().join("empty.txt"), "").unwrap();
		std::fs::write(dir.path().join("logo.bin"), [0xff, 0xfe, 0x00]).unwrap();
		std::fs::write(dir.path().join("main.js"), "export {}").unwrap();

		let read = read_tree(dir.path(), false).await.unwrap();
		assert_eq!(read.names(), vec!["main.js"]);

		let with_hidden = read_tree(dir.path(), true).await.unwrap();
		assert_eq!(with_hidden.sorted().names(), vec![".env", ".git/HEAD", "main.js"]);
	}

	#[tokio::test]
	async fn refuses_names_that_escape_the_root() {
		let dir = tempfile::tempdir().unwrap();
		let out = dir.path().join("out");
		for name in ["../evil.js", "a/../../evil.js", "/etc/evil.js"] {
			let files = vec![File::new("ok.js", "1"), File::new(name, "2")];
			assert!(write_tree(&out, &files).await.is_err(), "{name} was accepted");
		}
		assert!(!out.exists());
		assert!(!dir.path().join("evil.js").exists());
	}

	#[test]
	fn normalizes_inner_parent_segments() {
		let root = Path::new("/out");
		assert_eq!(destination(root, "a/../b.js").unwrap(), Path::new("/out/b.js"));
		assert_eq!(destination(root, "./c.js").unwrap(), Path::new("/out/c.js"));
	}
}
