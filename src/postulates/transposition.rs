use crate::theory::{negate, RuleKind, RuleSpec, StructuredTheory};
use anyhow::{anyhow, Result};
use log::debug;

/// A transposed rule required for closure but absent from the rule base.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingTransposition {
    /// The identifier the generated rule would receive.
    pub id: String,
    /// The antecedents of the expected rule.
    pub antecedents: Vec<String>,
    /// The consequent of the expected rule.
    pub consequent: String,
    /// The identifier of the rule the transposition stems from.
    pub source_rule_id: String,
    /// The index of the transposed antecedent in the source rule.
    pub transposed_index: usize,
    /// A textual account of the expected contrapositive.
    pub explanation: String,
}

/// The outcome of checking a rule base for closure under transposition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranspositionValidation {
    /// `true` iff every required transposition is present.
    pub is_closed: bool,
    /// The required transpositions that are absent.
    pub missing_rules: Vec<MissingTransposition>,
    /// The number of required transpositions.
    pub total_required: usize,
    /// The number of required transpositions that are present.
    pub total_present: usize,
}

impl TranspositionValidation {
    /// Renders a one-line account of the validation.
    pub fn summary(&self) -> String {
        if self.is_closed {
            return format!(
                "closed under transposition ({}/{} transpositions present)",
                self.total_present, self.total_required
            );
        }
        let percentage = self.total_present * 100 / self.total_required;
        format!(
            "{}/{} transpositions present ({}%), {} missing",
            self.total_present,
            self.total_required,
            percentage,
            self.missing_rules.len()
        )
    }
}

/// Generates the transpositions of a strict rule.
///
/// Each antecedent gives one contrapositive, replacing that antecedent in place
/// by the negated consequent and concluding the negated antecedent. An error is
/// returned when the rule is not strict; transposing a defeasible rule is
/// unsound, as its contrapositive does not follow from it.
pub fn generate_transpositions(rule: &RuleSpec) -> Result<Vec<RuleSpec>> {
    if rule.kind != RuleKind::Strict {
        return Err(anyhow!("cannot transpose the non-strict rule {}", rule.id));
    }
    Ok((0..rule.antecedents.len())
        .map(|i| {
            let mut antecedents = rule.antecedents.clone();
            antecedents[i] = negate(&rule.consequent);
            RuleSpec {
                id: format!("{}_transpose_{}", rule.id, i),
                antecedents,
                consequent: negate(&rule.antecedents[i]),
                kind: RuleKind::Strict,
            }
        })
        .collect())
}

/// Checks that a rule base contains the transpositions of all its strict rules.
///
/// Generated transpositions (recognized by their identifier) are not themselves
/// required to be transposed, and the presence check ignores the order of the
/// antecedents.
pub fn validate_transposition_closure(rules: &[RuleSpec]) -> TranspositionValidation {
    let mut missing_rules = Vec::new();
    let mut total_required = 0;
    let mut total_present = 0;
    for rule in rules.iter().filter(|r| is_transposition_source(r)) {
        for (i, expected) in generate_transpositions(rule)
            .unwrap_or_default()
            .into_iter()
            .enumerate()
        {
            total_required += 1;
            if is_present(rules, &expected.antecedents, &expected.consequent) {
                total_present += 1;
            } else {
                let explanation = format!(
                    "contrapositive of {} exchanging {} with ¬({})",
                    rule.id, rule.antecedents[i], rule.consequent
                );
                missing_rules.push(MissingTransposition {
                    id: expected.id,
                    antecedents: expected.antecedents,
                    consequent: expected.consequent,
                    source_rule_id: rule.id.clone(),
                    transposed_index: i,
                    explanation,
                });
            }
        }
    }
    TranspositionValidation {
        is_closed: missing_rules.is_empty(),
        missing_rules,
        total_required,
        total_present,
    }
}

/// Returns the rule base augmented with the transpositions it lacks.
///
/// The operation is idempotent: generated rules are not transposed again, and
/// rules already present (up to antecedent order) are not duplicated.
pub fn apply_transposition_closure(rules: &[RuleSpec]) -> Result<Vec<RuleSpec>> {
    let mut closed = rules.to_vec();
    for rule in rules.iter().filter(|r| is_transposition_source(r)) {
        for expected in generate_transpositions(rule)? {
            if !is_present(&closed, &expected.antecedents, &expected.consequent) {
                closed.push(expected);
            }
        }
    }
    Ok(closed)
}

/// Closes the rule base of a theory under transposition, interning the negated
/// formulas the generated rules mention.
///
/// Returns the number of rules added to the theory.
pub fn close_under_transposition(theory: &mut StructuredTheory) -> Result<usize> {
    let specs = theory.rule_specs();
    let closed = apply_transposition_closure(&specs)?;
    let mut added = 0;
    for spec in &closed[specs.len()..] {
        theory.new_rule_from_spec(spec)?;
        added += 1;
    }
    debug!("transposition closure added {} rules", added);
    Ok(added)
}

fn is_transposition_source(rule: &RuleSpec) -> bool {
    rule.kind == RuleKind::Strict && !rule.id.contains("_transpose_")
}

fn is_present(rules: &[RuleSpec], antecedents: &[String], consequent: &str) -> bool {
    let mut expected = antecedents.to_vec();
    expected.sort_unstable();
    rules.iter().any(|r| {
        if r.kind != RuleKind::Strict || r.consequent != consequent {
            return false;
        }
        let mut actual = r.antecedents.clone();
        actual.sort_unstable();
        actual == expected
    })
}
