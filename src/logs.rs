use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    {ContentLimit, FileRotate},
};
use log::{Level, Log};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

const MAX_LOG_FILES: usize = 3;
const LINES_PER_FILE: usize = 1000;

/// Writes every record to a rolling file and echoes warnings and errors to
/// stderr, since a library caller rarely tails the file.
pub struct MainLogger {
    write_logger: Box<WriteLogger<FileRotate<AppendTimestamp>>>,
}

impl MainLogger {
    fn new(write_logger: Box<WriteLogger<FileRotate<AppendTimestamp>>>) -> Self {
        Self { write_logger }
    }
}

impl Log for MainLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.write_logger.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        self.write_logger.log(record);
        if record.level() <= Level::Warn {
            eprintln!("{}:{} -- {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {
        self.write_logger.flush();
    }
}

/// Installs the process-wide logger writing to `<log_dir>/roam.log`.
/// Only the first call has an effect.
pub fn init(log_dir: &Path, level: LevelFilter) -> Result<()> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create {}", log_dir.display()))?;
    let log = FileRotate::new(
        log_dir.join("roam.log"),
        AppendTimestamp::default(FileLimit::MaxFiles(MAX_LOG_FILES)),
        ContentLimit::Lines(LINES_PER_FILE),
        Compression::None,
        #[cfg(unix)]
        None,
    );
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let write_logger = WriteLogger::new(level, config, log);
    if log::set_boxed_logger(Box::new(MainLogger::new(write_logger))).is_err() {
        warn!("`logs::init` is called multiple times");
        return Ok(());
    }
    log::set_max_level(level);
    Ok(())
}
