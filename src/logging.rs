use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};

use crate::error::AppError;

const APP_DIR_NAME: &str = "block-snake";
const LOG_FILE_NAME: &str = "block-snake.log";

/// Returns the platform-correct log file path.
#[must_use]
pub fn default_log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(LOG_FILE_NAME);
    base
}

/// Level used for a run, raised to `Debug` by `--verbose`.
#[must_use]
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Installs a file logger. The terminal is in raw mode while playing, so
/// nothing is written to stdout or stderr.
pub fn init(path: &Path, level: LevelFilter) -> Result<(), AppError> {
    let file = create_log_file(path)?;
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();

    WriteLogger::init(level, config, file)?;
    Ok(())
}

fn create_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    File::create(path)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    use log::LevelFilter;

    use super::{create_log_file, default_log_path, level_for};

    #[test]
    fn verbose_raises_level_to_debug() {
        assert_eq!(level_for(false), LevelFilter::Info);
        assert_eq!(level_for(true), LevelFilter::Debug);
    }

    #[test]
    fn default_log_path_names_the_log_file() {
        let path = default_log_path();
        assert_eq!(
            path.file_name().and_then(|name| name.to_str()),
            Some("block-snake.log")
        );
    }

    #[test]
    fn log_file_parent_directories_are_created() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("block-snake-log-{nanos}"));
        let path = dir.join("nested").join("run.log");

        create_log_file(&path).expect("log file should be creatable");
        assert!(path.exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
