use std::{
	fmt::{Debug, Display},
	sync::{Mutex, PoisonError},
};

/// One diagnostic line emitted while compiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
	pub scope: String,
	pub tag: String,
	pub message: String,
}

impl Display for LogRecord {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "[{}] [{}] {}", self.scope, self.tag, self.message)
	}
}

/// Where compile diagnostics go. Shared by every pipeline of a batch, so
/// implementations must tolerate concurrent appends.
pub trait LogSink: Debug + Send + Sync {
	fn log(&self, record: LogRecord);
}

/// Forwards records to `tracing` at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
	fn log(&self, record: LogRecord) {
		tracing::debug!(scope = %record.scope, tag = %record.tag, "{}", record.message);
	}
}

/// Keeps every record in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
	records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn records(&self) -> Vec<LogRecord> {
		self.records.lock().unwrap_or_else(PoisonError::into_inner).clone()
	}

	/// Records carrying `tag`, rendered with their message only.
	pub fn messages(&self, tag: &str) -> Vec<String> {
		self.records()
			.into_iter()
			.filter(|record| record.tag == tag)
			.map(|record| record.message)
			.collect()
	}
}

impl LogSink for MemorySink {
	fn log(&self, record: LogRecord) {
		self.records.lock().unwrap_or_else(PoisonError::into_inner).push(record);
	}
}

/// A sink bound to a scope name, handed out by [`CompileContext::logger`](super::CompileContext::logger).
#[derive(Debug, Clone, Copy)]
pub struct Logger<'a> {
	scope: &'a str,
	sink: &'a dyn LogSink,
}

impl<'a> Logger<'a> {
	pub fn new(scope: &'a str, sink: &'a dyn LogSink) -> Self {
		Self { scope, sink }
	}

	pub fn log(&self, tag: &str, message: impl Display) {
		self.sink.log(LogRecord {
			scope: self.scope.to_string(),
			tag: tag.to_string(),
			message: message.to_string(),
		});
	}
}
