/// Returns the symbolic classical negation of a formula label.
///
/// A formula starting with the negation sign loses it (redundant outer
/// parentheses are removed from the remainder); any other formula gains it.
/// Compound formulas, recognized by whitespace or a connective, are wrapped in
/// parentheses first so the negation applies to the whole formula.
///
/// # Example
///
/// ```
/// # use sargo::theory::negate;
/// assert_eq!("¬flies", negate("flies"));
/// assert_eq!("flies", negate("¬flies"));
/// assert_eq!("¬(p→q)", negate("p→q"));
/// assert_eq!("¬(p ∧ q)", negate("(p ∧ q)"));
/// ```
pub fn negate(formula: &str) -> String {
    if let Some(stripped) = formula.strip_prefix('¬') {
        return if is_fully_parenthesized(stripped) {
            stripped[1..stripped.len() - 1].to_string()
        } else {
            stripped.to_string()
        };
    }
    if is_compound(formula) && !is_fully_parenthesized(formula) {
        format!("¬({})", formula)
    } else {
        format!("¬{}", formula)
    }
}

fn is_compound(formula: &str) -> bool {
    formula
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '→' | '∧' | '∨' | '↔' | '¬'))
}

/// Checks whether the formula is a single parenthesized group, i.e. the opening
/// parenthesis closes at the very last character.
fn is_fully_parenthesized(formula: &str) -> bool {
    if !formula.starts_with('(') || !formula.ends_with(')') {
        return false;
    }
    let mut depth = 0usize;
    for (i, c) in formula.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return i == formula.len() - ')'.len_utf8();
                }
            }
            _ => {}
        }
    }
    false
}
