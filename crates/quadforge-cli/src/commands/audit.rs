//! The `quadforge audit` command.

use anyhow::{ensure, Result};
use comfy_table::{Cell, Table};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use quadforge_core::engine::QuestionGenerator;
use quadforge_core::model::{Coefficients, Letter};
use quadforge_core::statistics::{PositionStats, CHI_SQUARE_CRITICAL_3DOF};

/// Upper bound on `--trials`.
const MAX_TRIALS: u64 = 1_000_000;

pub fn execute(a: i64, b: i64, c: i64, trials: u64, seed: u64) -> Result<()> {
    ensure!(
        (1..=MAX_TRIALS).contains(&trials),
        "trials must be between 1 and {MAX_TRIALS}, got {trials}"
    );

    let coefficients = Coefficients::new(a, b, c);
    let generator = QuestionGenerator::default();

    let letters = (0..trials)
        .map(|i| {
            let mut rng = ChaCha20Rng::seed_from_u64(seed.wrapping_add(i));
            generator
                .generate(coefficients, &mut rng)
                .map(|question| question.choices.correct)
        })
        .collect::<Result<Vec<Letter>, _>>()?;
    let stats = PositionStats::from_letters(letters);

    let expected = stats.total() as f64 / 4.0;
    let mut table = Table::new();
    table.set_header(vec!["Slot", "Correct", "Expected", "Share"]);
    for letter in Letter::ALL {
        let count = stats.counts[letter.index()];
        table.add_row(vec![
            Cell::new(letter),
            Cell::new(count),
            Cell::new(format!("{expected:.1}")),
            Cell::new(format!("{:.1}%", count as f64 * 100.0 / stats.total() as f64)),
        ]);
    }
    println!("{table}");
    println!(
        "χ² = {:.3} (critical {CHI_SQUARE_CRITICAL_3DOF} at p = 0.001, 3 dof)",
        stats.chi_square
    );

    if stats.is_biased() {
        println!("Verdict: BIASED");
    } else {
        println!("Verdict: uniform");
    }

    Ok(())
}
