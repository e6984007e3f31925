use std::path::PathBuf;

use derive_more::derive::From;
use foundation_testing::WorkloadConfig;

/// Failures while loading the workload file.
#[derive(Debug, From)]
pub enum ConfigError {
    Read(std::io::Error),
    Parse(toml::de::Error),
    #[from(ignore)]
    NotAFile(PathBuf),
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::NotAFile(_) => None,
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::Read(err) => write!(f, "failed to read workload config: {err}"),
            ConfigError::Parse(err) => write!(f, "invalid workload config: {err}"),
            ConfigError::NotAFile(path) => {
                write!(f, "workload config {} is not a file", path.display())
            }
        }
    }
}

pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Reads a `[workload]` table from the TOML file at `target`.
///
/// Missing keys, or a missing table, fall back to [`WorkloadConfig::default`].
pub fn from_path<V: Into<PathBuf>>(target: V) -> ConfigResult<WorkloadConfig> {
    let target_path = target.into();
    if !target_path.is_file() {
        return Err(ConfigError::NotAFile(target_path));
    }

    let config_content = std::fs::read_to_string(target_path)?;
    from_str(&config_content)
}

pub fn from_str(content: &str) -> ConfigResult<WorkloadConfig> {
    let file: ConfigFile = toml::from_str(content)?;
    Ok(file.workload)
}

#[derive(Debug, Default, serde::Deserialize)]
struct ConfigFile {
    #[serde(default)]
    workload: WorkloadConfig,
}
