//! Plain-text rendering of `ax² + bx + c = 0`.

use crate::model::Coefficients;

/// Render the equation with folded signs and unit coefficients omitted.
///
/// ```
/// use quadforge_core::equation::render_equation;
/// use quadforge_core::model::Coefficients;
///
/// assert_eq!(render_equation(Coefficients::new(1, 6, 5)), "x² + 6x + 5 = 0");
/// assert_eq!(render_equation(Coefficients::new(-2, 0, 8)), "-2x² + 8 = 0");
/// ```
pub fn render_equation(coefficients: Coefficients) -> String {
    let Coefficients { a, b, c } = coefficients;
    let mut out = String::new();

    for (coef, var) in [(a, "x²"), (b, "x"), (c, "")] {
        if coef == 0 {
            continue;
        }
        let magnitude = coef.unsigned_abs();
        let body = if magnitude == 1 && !var.is_empty() {
            var.to_string()
        } else {
            format!("{magnitude}{var}")
        };
        match (out.is_empty(), coef < 0) {
            (true, true) => out.push_str(&format!("-{body}")),
            (true, false) => out.push_str(&body),
            (false, true) => out.push_str(&format!(" - {body}")),
            (false, false) => out.push_str(&format!(" + {body}")),
        }
    }

    if out.is_empty() {
        out.push('0');
    }
    out.push_str(" = 0");
    out
}
