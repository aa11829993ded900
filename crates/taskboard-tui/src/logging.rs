use tracing::level_filters::LevelFilter;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config;

/// Log level override variable, consulted when `RUST_LOG` is unset.
pub fn log_env_var() -> String {
    format!("{}_LOG_LEVEL", config::project_name())
}

/// The log file lives in the data directory and is recreated on start.
pub fn log_file_name() -> String {
    format!("{}.log", env!("CARGO_PKG_NAME"))
}

pub fn init() -> color_eyre::Result<()> {
    let directory = config::get_data_dir();
    std::fs::create_dir_all(&directory)?;
    let log_file = std::fs::File::create(directory.join(log_file_name()))?;

    // Board mutations log at debug; default to info so the file stays small.
    let filter = EnvFilter::builder().with_default_directive(LevelFilter::INFO.into());
    let filter = filter
        .try_from_env()
        .or_else(|_| filter.with_env_var(log_env_var()).from_env())?;

    let file_layer = fmt::layer()
        .compact()
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(ErrorLayer::default())
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn override_variable_is_project_specific() {
        assert_eq!(log_env_var(), "TASKBOARD_TUI_LOG_LEVEL");
    }

    #[test]
    fn log_file_is_named_after_the_package() {
        assert_eq!(log_file_name(), "taskboard-tui.log");
    }
}
