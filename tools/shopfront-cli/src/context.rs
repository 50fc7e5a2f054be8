//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use shopfront_checkout::CheckoutConfig;

use crate::output::Output;

const CONFIG_NAMES: [&str; 3] = ["shopfront.toml", ".shopfront.toml", "shopfront.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Checkout configuration.
    pub config: CheckoutConfig,
    /// Where the configuration came from, if a file was used.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context, reading `config_path` or searching for a config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let config = CheckoutConfig::load(path)
                    .with_context(|| format!("Failed to load config from {}", path))?;
                (config, Some(PathBuf::from(path)))
            }
            None => match Self::find_config(&cwd)? {
                Some((config, path)) => (config, Some(path)),
                None => (CheckoutConfig::default(), None),
            },
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find a config file in the directory tree.
    ///
    /// A file that exists but fails to load is an error, not a miss.
    fn find_config(start: &Path) -> Result<Option<(CheckoutConfig, PathBuf)>> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_NAMES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    let config = CheckoutConfig::load(&candidate)
                        .with_context(|| format!("Failed to load config from {}", candidate.display()))?;
                    return Ok(Some((config, candidate)));
                }
            }

            if !current.pop() {
                return Ok(None);
            }
        }
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}
