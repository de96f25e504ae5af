use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::types::{ScanMode, SelfLinkPolicy};

/// Name of the optional config file in the working directory.
pub const CONFIG_FILE: &str = ".docxref.toml";

/// Project configuration loaded from `.docxref.toml`.
/// Every key is optional; defaults link `xml/*.xml` in the working directory.
#[derive(Debug, Clone)]
pub struct Config {
    /// Corpus directory, relative to the root unless absolute.
    pub dir: PathBuf,
    /// Document extension without the leading dot.
    pub extension: String,
    /// Identifier extraction mode for the collection pass.
    pub scan: ScanMode,
    /// Ownership rule applied by the rewrite pass.
    pub self_link: SelfLinkPolicy,
}

/// Raw TOML structure for `.docxref.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct DocxrefTomlConfig {
    #[serde(default)]
    dir: Option<PathBuf>,
    #[serde(default)]
    extension: Option<String>,
    #[serde(default)]
    scan: ScanMode,
    #[serde(default)]
    self_link: SelfLinkPolicy,
}

impl Default for Config {
    fn default() -> Self {
        return Self {
            dir: PathBuf::from("xml"),
            extension: "xml".to_string(),
            scan: ScanMode::default(),
            self_link: SelfLinkPolicy::default(),
        };
    }
}

impl Config {
    /// Load config from `.docxref.toml` in the given root directory.
    /// Returns defaults if the file doesn't exist. A file that exists but is
    /// malformed is an error, never a silent fallback.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };

        return Self::parse(&content);
    }

    /// Parse config from TOML text, filling defaults for missing keys.
    ///
    /// # Errors
    ///
    /// Returns `Error::TomlDe` if the TOML is malformed or has unknown keys.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let raw: DocxrefTomlConfig = toml::from_str(content)?;
        let defaults = Self::default();
        let extension = raw
            .extension
            .map(|ext| return ext.trim_start_matches('.').to_string())
            .unwrap_or(defaults.extension);

        return Ok(Self {
            dir: raw.dir.unwrap_or(defaults.dir),
            extension,
            scan: raw.scan,
            self_link: raw.self_link,
        });
    }

    /// Absolute-or-root-relative path of the corpus directory.
    pub fn corpus_dir(&self, root: &Path) -> PathBuf {
        return root.join(&self.dir);
    }
}
