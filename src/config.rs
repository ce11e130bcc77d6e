use std::path::PathBuf;

/// Crowdin package for the vanilla-music project.
pub const DEFAULT_PACKAGE_URL: &str = "http://crowdin.net/download/project/vanilla-music.zip";

/// Resource directory, relative to the working directory. Must already exist.
pub const DEFAULT_RES_DIR: &str = "res";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // Source
    pub package_url: String,

    // Output
    pub res_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            package_url: DEFAULT_PACKAGE_URL.to_string(),
            res_dir: PathBuf::from(DEFAULT_RES_DIR),
        }
    }
}

impl Config {
    /// Build the configuration, letting `TRANSLATIONS_URL` and
    /// `TRANSLATIONS_RES_DIR` override the defaults. Neither is required.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            package_url: non_empty_var("TRANSLATIONS_URL").unwrap_or(defaults.package_url),
            res_dir: non_empty_var("TRANSLATIONS_RES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.res_dir),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
