//! The `quadforge validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quadforge_core::parser::{load_item_sets, validate_item_set};

pub fn execute(item_set_path: PathBuf) -> Result<()> {
    let sets = load_item_sets(&item_set_path)?;

    let mut total_warnings = 0;

    for set in &sets {
        println!("Item set: {} ({} items)", set.name, set.items.len());

        let warnings = validate_item_set(set);
        for w in &warnings {
            let prefix = w
                .item_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All item sets valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
