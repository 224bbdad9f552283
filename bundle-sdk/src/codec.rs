//! Flat serialization of a file set.
//!
//! A blob is a list of records joined by [`RECORD_SEPARATOR`], each record being
//! `name` and `content` joined by [`FIELD_SEPARATOR`]:
//!
//! ```text
//! <name1>\0<content1>\0\0<name2>\0<content2>\0\0...
//! ```
//!
//! There is no escaping. Names and contents must not contain `\0`; [`validate`]
//! checks this for callers that read untrusted data. The canonical form sorts
//! files by name before joining, and the content hash is the SHA-256 of that form.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{
	error::Error,
	file::{File, FileSetExt},
};

pub const RECORD_SEPARATOR: &str = "\0\0";
pub const FIELD_SEPARATOR: &str = "\0";

/// A file set together with its canonical encoding and the hash of that encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
	/// The files, in whatever order they were produced. Only `content` and `hash` are canonical.
	pub files: Vec<File>,
	pub hash: String,
	pub content: String,
}

impl Bundle {
	pub fn from_files(files: Vec<File>) -> Self {
		let content = encode(&files);
		let hash = digest(&content);
		Self { files, hash, content }
	}
}

/// Encodes the files in canonical (name-sorted) order. The input slice is not reordered.
pub fn encode(files: &[File]) -> String {
	encode_unsorted(&files.sorted())
}

/// Encodes the files in the order given.
pub fn encode_unsorted(files: &[File]) -> String {
	files
		.iter()
		.map(|file| format!("{}{FIELD_SEPARATOR}{}", file.name, file.content))
		.join(RECORD_SEPARATOR)
}

/// Decodes a blob. Records that do not split into exactly one non-empty name and
/// one non-empty content are dropped, so this never fails.
pub fn decode(blob: &str) -> Bundle {
	let files = blob.split(RECORD_SEPARATOR).filter_map(parse_record).collect();
	Bundle::from_files(files)
}

fn parse_record(record: &str) -> Option<File> {
	let mut fields = record.split(FIELD_SEPARATOR);
	let (name, content) = (fields.next()?, fields.next()?);
	if name.is_empty() || content.is_empty() || fields.next().is_some() {
		tracing::trace!(len = record.len(), "Dropping malformed record");
		return None;
	}
	Some(File::new(name, content))
}

/// Lowercase hex SHA-256 of `content`.
pub fn digest(content: &str) -> String {
	let mut hasher = Sha256::new();
	hasher.update(content.as_bytes());
	let hash = hasher.finalize();
	format!("{hash:x}")
}

/// Checks that every file survives an encode/decode round trip unchanged.
pub fn validate(files: &[File]) -> Result<(), Error> {
	for file in files {
		if file.name.is_empty() {
			return Err(Error::EmptyName);
		}
		if file.name.contains(FIELD_SEPARATOR) || file.content.contains(FIELD_SEPARATOR) {
			return Err(Error::Separator(file.name.clone()));
		}
		if file.content.is_empty() {
			return Err(Error::EmptyContent(file.name.clone()));
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> Vec<File> {
		vec![
			File::new("src/main.ts", "import App from './App.vue'"),
			File::new("src/App.vue", "<template><div/></template>"),
			File::new("index.html", "<script type=\"module\" src=\"./src/main.ts\"></script>"),
			File::new("src/style.css", "body { margin: 0 }"),
		]
	}

	#[test]
	fn encode_sorts_by_name() {
		let files = vec![File::new("b", "2"), File::new("a", "1")];
		assert_eq!(encode(&files), "a\x001\x00\x00b\x002");
		assert_eq!(files[0].name, "b");
	}

	#[test]
	fn encode_unsorted_keeps_order() {
		let files = vec![File::new("b", "2"), File::new("a", "1")];
		assert_eq!(encode_unsorted(&files), "b\x002\x00\x00a\x001");
	}

	#[test]
	fn digest_is_stable() {
		let blob = encode(&[File::new("b", "2"), File::new("a", "1")]);
		let expected = "8de21f414440b06f6e176498949612f60d68115132334c6a91a0de7c997737bb";
		assert_eq!(digest(&blob), expected);
		assert_eq!(decode(&blob).hash, expected);
	}

	#[test]
	fn hash_ignores_input_order() {
		let files = sample();
		let mut reversed = files.clone();
		reversed.reverse();
		assert_eq!(decode(&encode_unsorted(&files)).hash, decode(&encode_unsorted(&reversed)).hash);
		assert_eq!(decode(&encode(&files)).hash, decode(&encode(&files.sorted())).hash);
	}

	#[test]
	fn canonical_blob_round_trips() {
		let blob = encode(&sample());
		let bundle = decode(&blob);
		assert_eq!(encode(&bundle.files), blob);
		assert_eq!(bundle.content, blob);
		assert_eq!(bundle.files.len(), 4);
	}

	#[test]
	fn decode_keeps_input_order_but_canonicalizes_content() {
		let bundle = decode("b\x002\x00\x00a\x001");
		assert_eq!(bundle.files, vec![File::new("b", "2"), File::new("a", "1")]);
		assert_eq!(bundle.content, "a\x001\x00\x00b\x002");
	}

	#[test]
	fn dangling_record_is_dropped() {
		let bundle = decode("a\x001\x00\x00dangling\x00\x00b\x002");
		assert_eq!(bundle.files.names(), vec!["a", "b"]);
		assert_eq!(bundle.content, "a\x001\x00\x00b\x002");
	}

	#[test]
	fn records_with_empty_or_extra_fields_are_dropped() {
		let bundle = decode("a\x00\x00\x00b\x002\x00\x00c\x003\x00extra\x00\x00d\x004");
		assert_eq!(bundle.files.names(), vec!["d"]);
	}

	#[test]
	fn empty_blob_decodes_to_empty_set() {
		let bundle = decode("");
		assert!(bundle.files.is_empty());
		assert_eq!(bundle.content, "");
		assert_eq!(bundle.hash, "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855");
	}

	#[test]
	fn validate_rejects_what_would_not_round_trip() {
		assert!(validate(&sample()).is_ok());
		assert!(matches!(validate(&[File::new("", "x")]), Err(Error::EmptyName)));
		assert!(matches!(validate(&[File::new("a", "")]), Err(Error::EmptyContent(name)) if name == "a"));
		assert!(matches!(validate(&[File::new("a", "x\0y")]), Err(Error::Separator(name)) if name == "a"));
		assert!(matches!(validate(&[File::new("a\0b", "x")]), Err(Error::Separator(_))));
	}
}
