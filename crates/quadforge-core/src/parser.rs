//! TOML item-set parser.
//!
//! Loads item sets from TOML files and directories, and validates them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::discriminant::discriminant;
use crate::model::{Coefficients, Item, ItemSet};

/// Intermediate TOML structure for parsing item set files.
#[derive(Debug, Deserialize)]
struct TomlItemFile {
    item_set: TomlItemSetHeader,
    #[serde(default)]
    items: Vec<TomlItem>,
}

#[derive(Debug, Deserialize)]
struct TomlItemSetHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TomlItem {
    id: String,
    a: i64,
    b: i64,
    c: i64,
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

/// Parse a single TOML file into an `ItemSet`.
pub fn parse_item_set(path: &Path) -> Result<ItemSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read item set file: {}", path.display()))?;

    parse_item_set_str(&content, path)
}

/// Parse a TOML string into an `ItemSet` (useful for testing).
pub fn parse_item_set_str(content: &str, source_path: &Path) -> Result<ItemSet> {
    let parsed: TomlItemFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let items = parsed
        .items
        .into_iter()
        .map(|i| Item {
            id: i.id,
            coefficients: Coefficients::new(i.a, i.b, i.c),
            prompt: i.prompt,
            tags: i.tags,
        })
        .collect();

    Ok(ItemSet {
        id: parsed.item_set.id,
        name: parsed.item_set.name,
        description: parsed.item_set.description,
        seed: parsed.item_set.seed,
        items,
    })
}

/// Recursively load all `.toml` item set files from a directory.
pub fn load_item_directory(dir: &Path) -> Result<Vec<ItemSet>> {
    let mut sets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            sets.extend(load_item_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_item_set(&path) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(sets)
}

/// Load a single file or every set under a directory.
pub fn load_item_sets(path: &Path) -> Result<Vec<ItemSet>> {
    if path.is_dir() {
        load_item_directory(path)
    } else {
        Ok(vec![parse_item_set(path)?])
    }
}

/// A warning from item set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The item ID (if applicable).
    pub item_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate an item set for common issues.
pub fn validate_item_set(set: &ItemSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if set.items.is_empty() {
        warnings.push(ValidationWarning {
            item_id: None,
            message: "item set has no items".into(),
        });
    }

    // Check for duplicate item IDs
    let mut seen_ids = std::collections::HashSet::new();
    for item in &set.items {
        if !seen_ids.insert(&item.id) {
            warnings.push(ValidationWarning {
                item_id: Some(item.id.clone()),
                message: format!("duplicate item ID: {}", item.id),
            });
        }
    }

    for item in &set.items {
        if item.coefficients.a == 0 {
            warnings.push(ValidationWarning {
                item_id: Some(item.id.clone()),
                message: "a is 0, the equation is not quadratic".into(),
            });
            continue;
        }
        match discriminant(item.coefficients) {
            Ok(d) if d < 0 => warnings.push(ValidationWarning {
                item_id: Some(item.id.clone()),
                message: format!("discriminant {d} is negative, no real roots"),
            }),
            Ok(_) => {}
            Err(e) => warnings.push(ValidationWarning {
                item_id: Some(item.id.clone()),
                message: e.to_string(),
            }),
        }
    }

    // Check for blank prompts
    for item in &set.items {
        if item.prompt.as_deref().is_some_and(|p| p.trim().is_empty()) {
            warnings.push(ValidationWarning {
                item_id: Some(item.id.clone()),
                message: "prompt is empty".into(),
            });
        }
    }

    warnings
}
