//! The `quadforge check` command.

use anyhow::{bail, Context, Result};

use quadforge_core::evaluate::evaluate;
use quadforge_core::solver::solve;

const TOLERANCE: f64 = 1e-9;

pub fn execute(a: i64, b: i64, c: i64, answer: String) -> Result<()> {
    let solution = solve(a, b, c)?;
    let value = evaluate(&answer).with_context(|| format!("cannot read answer '{answer}'"))?;

    let roots = [solution.x1, solution.x2];
    let matched = roots
        .iter()
        .find(|root| (root.to_f64() - value).abs() <= TOLERANCE * root.to_f64().abs().max(1.0));

    match matched {
        Some(root) => {
            println!("Correct: {answer} = {root}");
            Ok(())
        }
        None => {
            let (x1, x2) = solution.format();
            bail!("{answer} ≈ {value:.6} is not a root; expected {x1} or {x2}")
        }
    }
}
