pub mod audit;
pub mod check;
pub mod compare;
pub mod generate;
pub mod init;
pub mod quiz;
pub mod solve;
pub mod validate;

use quadforge_core::engine::Question;

/// Use the first seed given, or draw a fresh one so the run can be replayed.
pub fn resolve_seed(candidates: &[Option<u64>]) -> u64 {
    candidates
        .iter()
        .flatten()
        .copied()
        .next()
        .unwrap_or_else(rand::random)
}

/// Render a question as plain text, optionally with the answer key.
pub fn render_question(question: &Question, with_key: bool, explain: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", question.prompt));
    out.push_str(&format!("  {}\n\n", question.equation));
    for (letter, text) in question.choices.iter() {
        out.push_str(&format!("  {letter}) {text}"));
        if explain {
            if let Some(model) = question.slot_models[letter.index()] {
                out.push_str(&format!("    [{model}: {}]", model.description()));
            }
        }
        out.push('\n');
    }
    if with_key {
        out.push_str(&format!("\nAnswer: {}\n", question.choices.correct));
    }
    out
}
