use crate::theory::{RuleKind, StructuredTheory};
use strum_macros::Display;

/// The way a contraried formula breaks the well-formedness of a theory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum WellFormednessIssue {
    /// The formula is an axiom, which must not have contraries.
    #[strum(serialize = "contraried axiom")]
    ContrariedAxiom,
    /// The formula is the consequent of a strict rule, which must not have
    /// contraries.
    #[strum(serialize = "contraried strict consequent")]
    ContrariedStrictConsequent,
}

/// A well-formedness violation, naming the offending formula.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WellFormednessViolation {
    /// The label of the contraried formula.
    pub formula: String,
    /// The way the formula breaks well-formedness.
    pub issue: WellFormednessIssue,
}

/// Checks the well-formedness of a theory.
///
/// A theory is well-formed when no formula with declared contraries is an axiom
/// or the consequent of a strict rule; such formulas are beyond doubt and
/// declaring a contrary for them contradicts their status.
pub fn check_well_formedness(theory: &StructuredTheory) -> Vec<WellFormednessViolation> {
    let mut violations = Vec::new();
    for formula in theory.language().iter() {
        if theory.contrary_ids(formula.id()).is_empty() {
            continue;
        }
        if theory.is_axiom(formula.label()).unwrap_or(false) {
            violations.push(WellFormednessViolation {
                formula: formula.label().to_string(),
                issue: WellFormednessIssue::ContrariedAxiom,
            });
        }
        if theory
            .iter_rules()
            .any(|r| r.kind() == RuleKind::Strict && r.consequent().id() == formula.id())
        {
            violations.push(WellFormednessViolation {
                formula: formula.label().to_string(),
                issue: WellFormednessIssue::ContrariedStrictConsequent,
            });
        }
    }
    violations
}
