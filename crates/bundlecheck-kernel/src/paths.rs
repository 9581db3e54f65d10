//! XDG Base Directory paths for harness configuration.
//!
//! | Purpose | XDG Variable | Default | bundlecheck Path |
//! |---------|--------------|---------|------------------|
//! | Config | `$XDG_CONFIG_HOME` | `~/.config` | `$XDG_CONFIG_HOME/bundlecheck/config.toml` |

use std::path::PathBuf;

use directories::BaseDirs;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "BUNDLECHECK_CONFIG";

/// Get the config directory.
///
/// Uses `$XDG_CONFIG_HOME/bundlecheck` or falls back to `~/.config/bundlecheck`.
pub fn config_dir() -> PathBuf {
    BaseDirs::new()
        .map(|d| d.config_dir().to_path_buf())
        .unwrap_or_else(|| home_fallback().join(".config"))
        .join("bundlecheck")
}

/// The default config file location.
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Fallback home directory when BaseDirs fails.
fn home_fallback() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_dir_is_under_bundlecheck() {
        assert!(config_dir().ends_with("bundlecheck"));
    }

    #[test]
    fn config_file_is_toml_in_config_dir() {
        let file = config_file();
        assert!(file.starts_with(config_dir()));
        assert_eq!(file.extension().and_then(|e| e.to_str()), Some("toml"));
    }
}
