//! Configuration system: TOML file + env var overrides + smart defaults.

#![allow(missing_docs)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{DistcleanError, Result};

/// Full distclean configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
#[derive(Default)]
pub struct Config {
    pub cleaner: CleanerConfig,
    pub patterns: PatternsConfig,
}

/// Sweep target and behavior knobs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CleanerConfig {
    /// Build output directory to sweep, resolved against the working directory.
    pub root_dir: PathBuf,
    /// Child directory of `root_dir` swept a second time. Single path component.
    pub nested_dir: String,
    /// Report what would be removed without deleting anything.
    pub dry_run: bool,
}

/// Filename fragments that mark a file for removal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PatternsConfig {
    /// Matched case-insensitively as substrings of the filename, never the path.
    pub forbidden: Vec<String>,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("dist"),
            nested_dir: "esm".to_string(),
            dry_run: false,
        }
    }
}

impl Default for PatternsConfig {
    fn default() -> Self {
        Self {
            forbidden: crate::sweep::patterns::DEFAULT_FORBIDDEN
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Default configuration path.
    #[must_use]
    pub fn default_path() -> PathBuf {
        let home_dir = env::var_os("HOME").map_or_else(
            || {
                eprintln!(
                    "[DCL-CONFIG] WARNING: HOME not set, falling back to /tmp for config path"
                );
                PathBuf::from("/tmp")
            },
            PathBuf::from,
        );
        home_dir.join(".config").join("distclean").join("config.toml")
    }

    /// Load config from default or explicit path, then apply env overrides.
    ///
    /// Missing config file is not an error when loading from default path; defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path_buf = path.map_or_else(Self::default_path, Path::to_path_buf);
        let is_explicit_path = path.is_some();

        let mut cfg = if path_buf.exists() {
            let raw = fs::read_to_string(&path_buf).map_err(|source| DistcleanError::Io {
                path: path_buf.clone(),
                source,
            })?;
            let parsed: Self = toml::from_str(&raw)?;
            parsed
        } else if is_explicit_path {
            return Err(DistcleanError::MissingConfig { path: path_buf });
        } else {
            Self::default()
        };

        cfg.apply_env_overrides()?;
        cfg.normalize();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Deterministic hash of the effective config for diagnostics.
    ///
    /// Uses FNV-1a for cross-process-stable hashing (no `DefaultHasher`
    /// whose seed may vary across Rust releases).
    pub fn stable_hash(&self) -> Result<String> {
        let canonical = serde_json::to_string(self)?;
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in canonical.as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        Ok(format!("{hash:016x}"))
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_env_overrides_from(env_var)
    }

    fn apply_env_overrides_from<F>(&mut self, mut lookup: F) -> Result<()>
    where
        F: FnMut(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("DISTCLEAN_CLEANER_ROOT_DIR") {
            self.cleaner.root_dir = PathBuf::from(raw);
        }
        if let Some(raw) = lookup("DISTCLEAN_CLEANER_NESTED_DIR") {
            self.cleaner.nested_dir = raw;
        }
        if let Some(raw) = lookup("DISTCLEAN_CLEANER_DRY_RUN") {
            self.cleaner.dry_run = parse_env_bool("DISTCLEAN_CLEANER_DRY_RUN", &raw)?;
        }
        if let Some(raw) = lookup("DISTCLEAN_PATTERNS_FORBIDDEN") {
            self.patterns.forbidden = split_env_list(&raw);
        }
        Ok(())
    }

    /// Normalize for consistent matching and comparison.
    fn normalize(&mut self) {
        // Needles match against lowercased filenames; store them lowercased.
        for needle in &mut self.patterns.forbidden {
            *needle = needle.trim().to_lowercase();
        }

        // Strip trailing slash from root_dir (but keep a bare "/").
        let s = self.cleaner.root_dir.to_string_lossy();
        if s.len() > 1
            && let Some(stripped) = s.strip_suffix('/')
        {
            self.cleaner.root_dir = PathBuf::from(stripped);
        }
    }

    fn validate(&self) -> Result<()> {
        if self.cleaner.root_dir.as_os_str().is_empty() {
            return Err(DistcleanError::InvalidConfig {
                details: "cleaner.root_dir must not be empty".to_string(),
            });
        }

        if !is_single_normal_component(&self.cleaner.nested_dir) {
            return Err(DistcleanError::InvalidConfig {
                details: format!(
                    "cleaner.nested_dir must be a single relative path component, got {:?}",
                    self.cleaner.nested_dir
                ),
            });
        }

        if self.patterns.forbidden.is_empty() {
            return Err(DistcleanError::InvalidConfig {
                details: "patterns.forbidden must contain at least one needle".to_string(),
            });
        }
        for needle in &self.patterns.forbidden {
            if needle.trim().is_empty() {
                return Err(DistcleanError::InvalidConfig {
                    details: "patterns.forbidden needles must be non-empty".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// A child directory name: exactly one normal component, nothing else.
fn is_single_normal_component(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(std::path::Component::Normal(_)), None)
    )
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|raw| !raw.trim().is_empty())
}

fn parse_env_bool(name: &str, raw: &str) -> Result<bool> {
    raw.parse::<bool>()
        .map_err(|error| DistcleanError::ConfigParse {
            context: "env",
            details: format!("{name}={raw:?}: {error}"),
        })
}

fn split_env_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
