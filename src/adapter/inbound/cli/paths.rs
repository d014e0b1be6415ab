//! Path utilities.
//!
//! User data lives under `~/.plstr/`:
//! - `~/.plstr/config.toml` - configuration
//! - `~/.plstr/keystores/` - encrypted wallet keystores

use std::path::PathBuf;

/// The plstr home directory (`~/.plstr/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".plstr")
}

/// Default config file path (`~/.plstr/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Default keystore directory (`~/.plstr/keystores/`).
pub fn keystore_dir() -> PathBuf {
    home_dir().join("keystores")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_under_plstr_home() {
        assert!(default_config().starts_with(home_dir()));
        assert!(keystore_dir().starts_with(home_dir()));
        assert!(home_dir().ends_with(".plstr"));
    }
}
