use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::{LevelFilter, Log, Metadata, Record};

/// Log file writer behind the `log` facade.
///
/// Output can't go to stdout here since stdout carries the LSP protocol
/// stream, so everything lands in a single file under the local data dir,
/// truncated on every start.
struct FileLogger {
    file: Mutex<std::fs::File>,
}

impl FileLogger {
    fn new(file_path: &Path) -> io::Result<Self> {
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(file_path)?;

        Ok(FileLogger {
            file: Mutex::new(file),
        })
    }
}

impl Log for FileLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(
                file,
                "[{}] [{}] [{}] {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            );
            let _ = file.flush();
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Initialize file logging, overwriting the previous session's log
pub fn init_logger() -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = dirs::data_local_dir()
        .ok_or("Could not determine local data directory")?;
    let log_file_path = data_dir
        .join("ScssLanguageServer")
        .join("scss_language_server.log");

    let logger = FileLogger::new(&log_file_path)?;
    log::set_boxed_logger(Box::new(logger))
        .map(|()| log::set_max_level(LevelFilter::Info))?;

    log::info!("Logging to {}", log_file_path.display());
    Ok(())
}
