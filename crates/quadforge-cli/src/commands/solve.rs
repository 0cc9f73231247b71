//! The `quadforge solve` command.

use anyhow::Result;

use quadforge_core::discriminant::classify;
use quadforge_core::equation::render_equation;
use quadforge_core::model::Coefficients;
use quadforge_core::solver::{format, solve};

pub fn execute(a: i64, b: i64, c: i64) -> Result<()> {
    let coefficients = Coefficients::new(a, b, c);
    let discriminant = classify(coefficients)?;
    let solution = solve(a, b, c)?;
    let (x1, x2) = format(&solution);

    println!("{}", render_equation(coefficients));
    println!(
        "Discriminant: {} ({})",
        discriminant.value,
        discriminant.kind.label()
    );
    println!("x₁ = {x1}");
    println!("x₂ = {x2}");

    Ok(())
}
