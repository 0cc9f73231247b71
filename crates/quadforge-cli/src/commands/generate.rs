//! The `quadforge generate` command.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};

use quadforge_core::config::load_config_from;
use quadforge_core::engine::{ProgressReporter, Question, QuestionGenerator};
use quadforge_core::error::QuestionError;
use quadforge_core::parser;
use quadforge_core::report::QuizReport;

use super::{render_question, resolve_seed};

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_item_complete(&self, question: &Question) {
        let (x1, x2) = question.roots();
        eprintln!(
            "  Done: {} :: {} -> {x1}, {x2} [{}]",
            question.item_id.as_deref().unwrap_or("-"),
            question.equation,
            question.choices.correct,
        );
    }

    fn on_item_error(&self, item_id: &str, error: &QuestionError) {
        let hint = if error.is_resample() {
            " (pick new coefficients)"
        } else {
            ""
        };
        eprintln!("  ERROR: {item_id}: {error}{hint}");
    }

    fn on_set_complete(&self, total: usize, completed: usize, failed: usize, elapsed: Duration) {
        eprintln!(
            "\nComplete: {completed}/{total} generated, {failed} failed ({:.1}s)",
            elapsed.as_secs_f64()
        );
    }
}

pub fn execute(
    item_set_path: PathBuf,
    seed: Option<u64>,
    output: Option<PathBuf>,
    format: Option<String>,
    filter: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let output = output.unwrap_or_else(|| config.output_dir.clone());
    let format = format.unwrap_or_else(|| config.default_format.clone());

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "text"]
    } else {
        format.split(',').map(str::trim).collect()
    };
    for fmt in &formats {
        if !matches!(*fmt, "json" | "text") {
            bail!("unknown format '{fmt}', expected json, text or all");
        }
    }

    let mut item_sets = parser::load_item_sets(&item_set_path)?;

    if let Some(filter_tags) = &filter {
        let tags: Vec<&str> = filter_tags.split(',').map(|s| s.trim()).collect();
        for set in &mut item_sets {
            set.items
                .retain(|item| item.tags.iter().any(|t| tags.contains(&t.as_str())));
        }
        item_sets.retain(|set| {
            if set.items.is_empty() {
                tracing::warn!("no items in '{}' match filter '{filter_tags}'", set.id);
            }
            !set.items.is_empty()
        });
    }

    let generator = QuestionGenerator::new(config.generator_config());
    let reporter = ConsoleReporter;

    for item_set in &item_sets {
        let seed = resolve_seed(&[seed, item_set.seed, config.seed]);
        eprintln!(
            "quadforge v{}: generating {} items from '{}' (seed {seed})",
            env!("CARGO_PKG_VERSION"),
            item_set.items.len(),
            item_set.name,
        );
        eprintln!();

        let report = generator.generate_set(item_set, seed, &reporter);

        print_summary(&report);

        std::fs::create_dir_all(&output)
            .with_context(|| format!("failed to create {}", output.display()))?;
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
        let stem = format!("report-{}-{timestamp}", item_set.id);

        for fmt in &formats {
            match *fmt {
                "json" => {
                    let path = output.join(format!("{stem}.json"));
                    report.save_json(&path)?;
                    eprintln!("Results saved to: {}", path.display());
                }
                _ => {
                    let path = output.join(format!("{stem}.txt"));
                    write_quiz_sheet(&report, &path)?;
                    eprintln!("Quiz sheet: {}", path.display());
                }
            }
        }
    }

    Ok(())
}

fn print_summary(report: &QuizReport) {
    use comfy_table::{Cell, Table};

    let stats = &report.stats;
    let mut table = Table::new();
    table.set_header(vec![
        "Questions",
        "Failed",
        "Rational",
        "Irrational",
        "Double root",
        "Fallbacks",
        "A/B/C/D",
        "χ²",
    ]);
    let [ca, cb, cc, cd] = stats.positions.counts;
    table.add_row(vec![
        Cell::new(report.questions.len()),
        Cell::new(report.failures.len()),
        Cell::new(stats.rational_count),
        Cell::new(stats.irrational_count),
        Cell::new(stats.double_root_count),
        Cell::new(stats.fallback_count),
        Cell::new(format!("{ca}/{cb}/{cc}/{cd}")),
        Cell::new(format!("{:.2}", stats.positions.chi_square)),
    ]);

    eprintln!("\n{table}");
}

/// Write a printable sheet: every question, then the answer key.
fn write_quiz_sheet(report: &QuizReport, path: &Path) -> Result<()> {
    let mut sheet = format!("{}\nSeed: {}\n\n", report.item_set.name, report.seed);
    for (n, question) in report.questions.iter().enumerate() {
        sheet.push_str(&format!("{}. ", n + 1));
        sheet.push_str(&render_question(question, false, false));
        sheet.push('\n');
    }
    sheet.push_str("Answer key\n");
    for (n, question) in report.questions.iter().enumerate() {
        sheet.push_str(&format!("  {}. {}\n", n + 1, question.choices.correct));
    }
    std::fs::write(path, sheet)
        .with_context(|| format!("failed to write quiz sheet to {}", path.display()))?;
    Ok(())
}
