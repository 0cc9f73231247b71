//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::choices::DEFAULT_MAX_ATTEMPTS;
use crate::engine::GeneratorConfig;

/// Top-level quadforge configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadforgeConfig {
    /// Seed for choice layouts. `None` draws a fresh seed per run.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Cap on distractor candidates examined per question.
    #[serde(default = "default_max_attempts")]
    pub max_choice_attempts: usize,
    /// Output directory for reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Report format: json or text.
    #[serde(default = "default_format")]
    pub default_format: String,
}

fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./quadforge-results")
}
fn default_format() -> String {
    "json".to_string()
}

impl Default for QuadforgeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_choice_attempts: default_max_attempts(),
            output_dir: default_output_dir(),
            default_format: default_format(),
        }
    }
}

impl QuadforgeConfig {
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            max_choice_attempts: self.max_choice_attempts,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied as-is and never rescanned. An unterminated
/// `${` is kept literally.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + 2 + len];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + 2 + len + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quadforge.toml` in the current directory
/// 2. `~/.config/quadforge/config.toml`
///
/// Environment variable override: `QUADFORGE_SEED`.
pub fn load_config() -> Result<QuadforgeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuadforgeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quadforge.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuadforgeConfig::default(),
    };

    if let Ok(seed) = std::env::var("QUADFORGE_SEED") {
        let seed = seed
            .trim()
            .parse::<u64>()
            .with_context(|| format!("QUADFORGE_SEED is not a valid seed: '{seed}'"))?;
        config.seed = Some(seed);
    }

    Ok(config)
}

/// Parse a config document, then resolve `${VAR}` references in its
/// string fields.
pub fn parse_config_str(content: &str) -> Result<QuadforgeConfig> {
    let mut config: QuadforgeConfig = toml::from_str(content)?;
    if let Some(dir) = config.output_dir.to_str() {
        config.output_dir = PathBuf::from(resolve_env_vars(dir));
    }
    config.default_format = resolve_env_vars(&config.default_format);
    anyhow::ensure!(
        config.max_choice_attempts >= 3,
        "max_choice_attempts must be at least 3, got {}",
        config.max_choice_attempts
    );
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quadforge"))
}
