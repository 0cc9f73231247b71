//! The `quadforge compare` command.

use std::path::PathBuf;

use anyhow::Result;

use quadforge_core::report::QuizReport;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    fail_on_drift: bool,
    format: String,
) -> Result<()> {
    let baseline = QuizReport::load_json(&baseline_path)?;
    let current = QuizReport::load_json(&current_path)?;

    let report = current.compare(&baseline);

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            println!(
                "Comparison: {} changed, {} unchanged",
                report.drifted.len(),
                report.unchanged
            );

            if !report.drifted.is_empty() {
                println!("\nChanged answers:");
                for d in &report.drifted {
                    println!(
                        "  {}: {}, {} -> {}, {}",
                        d.item_id, d.baseline.0, d.baseline.1, d.current.0, d.current.1
                    );
                }
            }

            if report.new_items > 0 {
                println!("\n{} new item(s)", report.new_items);
            }
            if report.removed_items > 0 {
                println!("{} removed item(s)", report.removed_items);
            }
        }
    }

    if fail_on_drift && report.has_drift() {
        std::process::exit(1);
    }

    Ok(())
}
