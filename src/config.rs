//! Runtime settings for the command line front end.
//!
//! Values come from the environment, which `main` seeds from a `.env` file
//! through dotenv before calling [`Settings::from_env`].

use crate::processing::MAX_SUBNET_RESULTS;

pub const LOG_CONFIG_VAR: &str = "SUBNET_CALC_LOG_CONFIG";
pub const MAX_DISPLAY_ROWS_VAR: &str = "SUBNET_CALC_MAX_DISPLAY_ROWS";

const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Path of the log4rs yaml file.
    pub log_config: String,
    /// Table rows printed before the rest is summarised.
    pub max_display_rows: usize,
    /// Values that were ignored, logged once logging is up.
    pub ignored: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            log_config: DEFAULT_LOG_CONFIG.to_string(),
            max_display_rows: MAX_SUBNET_RESULTS as usize,
            ignored: Vec::new(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Settings {
        Settings::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup, falling back to defaults for
    /// missing or unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Settings
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();
        if let Some(path) = lookup(LOG_CONFIG_VAR).filter(|p| !p.trim().is_empty()) {
            settings.log_config = path.trim().to_string();
        }
        if let Some(raw) = lookup(MAX_DISPLAY_ROWS_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(rows) if rows > 0 => settings.max_display_rows = rows,
                _ => settings.ignored.push(format!(
                    "Ignoring {MAX_DISPLAY_ROWS_VAR}={raw}, using {}",
                    settings.max_display_rows
                )),
            }
        }
        settings
    }
}
