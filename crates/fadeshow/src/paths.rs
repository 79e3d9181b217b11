use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories_next::ProjectDirs;

/// Points fadeshow at a different directory for `fadeshow.toml`.
pub const ENV_CONFIG_DIR: &str = "FADESHOW_CONFIG_DIR";
pub const DEFAULT_CONFIG_FILE: &str = "fadeshow.toml";

#[derive(Debug, Clone)]
pub struct AppPaths {
    config_dir: PathBuf,
}

impl AppPaths {
    pub fn discover() -> Result<Self> {
        Self::with_override(env::var_os(ENV_CONFIG_DIR))
    }

    /// An empty override counts as unset.
    fn with_override(config_dir: Option<OsString>) -> Result<Self> {
        let config_dir = match config_dir.filter(|dir| !dir.is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => ProjectDirs::from("org", "Fadeshow", "Fadeshow")
                .ok_or_else(|| anyhow!("failed to determine the user config directory"))?
                .config_dir()
                .to_path_buf(),
        };
        Ok(Self { config_dir })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn default_config_file(&self) -> PathBuf {
        self.config_dir.join(DEFAULT_CONFIG_FILE)
    }
}

#[cfg(test)]
impl AppPaths {
    pub fn from_raw(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_replaces_platform_dir() {
        let paths = AppPaths::with_override(Some("/srv/slides".into())).unwrap();
        assert_eq!(paths.config_dir(), Path::new("/srv/slides"));
        assert_eq!(
            paths.default_config_file(),
            PathBuf::from("/srv/slides/fadeshow.toml")
        );
    }

    #[test]
    fn empty_override_is_ignored() {
        if let Ok(paths) = AppPaths::with_override(Some(OsString::new())) {
            assert_ne!(paths.config_dir(), Path::new(""));
        }
    }
}
