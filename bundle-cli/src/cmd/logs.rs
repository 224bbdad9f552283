use chrono::Local;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
	filter::LevelFilter,
	fmt::{self},
	layer::SubscriberExt,
	util::SubscriberInitExt,
	Layer,
};

/// Installs the global subscriber: a compact stderr layer whose level follows
/// `verbosity`, plus a trace-level file layer when `dir` is given.
///
/// The returned guard flushes the file writer on drop and must outlive the command.
pub fn init(verbosity: u8, dir: Option<&Path>) -> Option<WorkerGuard> {
	let level = match verbosity {
		0 => LevelFilter::WARN,
		1 => LevelFilter::INFO,
		2 => LevelFilter::DEBUG,
		_ => LevelFilter::TRACE,
	};
	let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false).with_filter(level);

	let (file_layer, guard) = match dir {
		Some(dir) => {
			// Milliseconds keep back-to-back runs in separate files.
			let timestamp = Local::now().format("%Y-%m-%d-%H-%M-%S%.3f");
			let file_appender = tracing_appender::rolling::never(dir, format!("{timestamp}.log"));
			let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
			let layer = fmt::layer()
				.with_writer(non_blocking_writer)
				.with_ansi(false)
				.pretty()
				.with_filter(LevelFilter::TRACE);
			(Some(layer), Some(guard))
		}
		None => (None, None),
	};

	tracing_subscriber::registry().with(stderr_layer).with(file_layer).init();

	if let Some(dir) = dir {
		tracing::debug!("Logging initialized. Log file in: {}", dir.display());
	}
	guard
}
