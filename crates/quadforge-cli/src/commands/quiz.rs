//! The `quadforge quiz` command.

use std::path::PathBuf;

use anyhow::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use quadforge_core::config::load_config_from;
use quadforge_core::engine::QuestionGenerator;
use quadforge_core::model::Coefficients;

use super::{render_question, resolve_seed};

pub fn execute(
    a: i64,
    b: i64,
    c: i64,
    seed: Option<u64>,
    explain: bool,
    json: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let seed = resolve_seed(&[seed, config.seed]);
    let mut rng = ChaCha20Rng::seed_from_u64(seed);

    let generator = QuestionGenerator::new(config.generator_config());
    let question = generator.generate(Coefficients::new(a, b, c), &mut rng)?;

    if json {
        let output = serde_json::json!({ "seed": seed, "question": question });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print!("{}", render_question(&question, true, explain));
    println!("Seed: {seed}");

    Ok(())
}
