use std::path::PathBuf;

/// Default location of the library data file
pub const DEFAULT_DATA_FILE: &str = "library_data.txt";

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Text file holding the library snapshot (`LIBRARY_DATA_FILE`)
    pub data_file: PathBuf,
    /// Seed the sample catalog when no data file exists (`LIBRARY_SEED_SAMPLE`)
    pub seed_sample_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            seed_sample_data: false,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let data_file = lookup("LIBRARY_DATA_FILE")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_file);

        let seed_sample_data = lookup("LIBRARY_SEED_SAMPLE")
            .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.seed_sample_data);

        Self {
            data_file,
            seed_sample_data,
        }
    }
}
