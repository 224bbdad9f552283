use console::{style, Emoji};

// Status lines go to stderr so stdout stays clean for blobs and hashes.

pub fn success(message: &str) {
	eprintln!("{} {}", style(Emoji("✔", "✓")).green(), message);
}

pub fn info(message: &str) {
	eprintln!("{} {}", style(Emoji("ℹ", "i")).blue(), message);
}

pub fn warning(message: &str) {
	eprintln!("{} {}", style(Emoji("⚠", "!")).yellow(), message);
}
