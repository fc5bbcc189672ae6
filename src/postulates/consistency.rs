use crate::theory::{RuleKind, StructuredTheory};
use crate::utils::monotone_fixpoint;
use log::debug;

/// A pair of conflicting formulas breaking the consistency of the axioms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsistencyViolation {
    /// The label of the first formula of the conflicting pair.
    pub formula: String,
    /// The label of the second formula of the conflicting pair.
    pub conflicting: String,
    /// `true` if the conflict only appears in the strict closure of the axioms,
    /// `false` if two axioms conflict directly.
    pub derived: bool,
}

/// Computes the closure of the axioms under the strict rules, returned as
/// formula ids.
///
/// A formula belongs to the closure if it is an axiom or if some strict rule
/// concludes it from formulas of the closure.
pub fn strict_closure(theory: &StructuredTheory) -> Vec<usize> {
    let n_formulas = theory.language().len();
    let axioms = theory.iter_axioms().map(|f| f.id()).collect::<Vec<_>>();
    let (closure, _) = monotone_fixpoint(n_formulas, |current| {
        let mut next = vec![false; n_formulas];
        for a in &axioms {
            next[*a] = true;
        }
        for rule in theory.iter_rules() {
            if rule.kind() == RuleKind::Strict
                && rule.iter_antecedents().all(|a| current[a.id()])
            {
                next[rule.consequent().id()] = true;
            }
        }
        next
    });
    (0..n_formulas).filter(|id| closure[*id]).collect()
}

/// Checks the consistency of the axioms and of their strict closure.
///
/// Two formulas conflict when a contrariness declaration relates them in at
/// least one direction. Direct conflicts between axioms are reported first,
/// then the conflicts that only appear once the strict rules are applied.
pub fn check_axiom_consistency(theory: &StructuredTheory) -> Vec<ConsistencyViolation> {
    let mut violations = Vec::new();
    let axioms = theory.iter_axioms().map(|f| f.id()).collect::<Vec<_>>();
    // self pairs are included: a formula may be declared its own contrary
    for (i, phi) in axioms.iter().enumerate() {
        for psi in &axioms[i..] {
            if theory.in_conflict(*phi, *psi) {
                violations.push(violation(theory, *phi, *psi, false));
            }
        }
    }
    let closure = strict_closure(theory);
    for (i, phi) in closure.iter().enumerate() {
        for psi in &closure[i..] {
            if theory.in_conflict(*phi, *psi)
                && !(axioms.contains(phi) && axioms.contains(psi))
            {
                violations.push(violation(theory, *phi, *psi, true));
            }
        }
    }
    debug!("axiom consistency check found {} violations", violations.len());
    violations
}

fn violation(
    theory: &StructuredTheory,
    phi: usize,
    psi: usize,
    derived: bool,
) -> ConsistencyViolation {
    ConsistencyViolation {
        formula: theory.language().get_formula_by_id(phi).label().to_string(),
        conflicting: theory.language().get_formula_by_id(psi).label().to_string(),
        derived,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::Language;

    #[test]
    fn test_consistent_axioms() {
        let language = Language::new_with_labels(&["p", "q", "¬q"]);
        let mut theory = StructuredTheory::new_with_language(language);
        theory.new_axiom("p").unwrap();
        theory.new_axiom("q").unwrap();
        theory.new_contrary("q", "¬q").unwrap();
        assert!(check_axiom_consistency(&theory).is_empty());
    }

    #[test]
    fn test_directly_conflicting_axioms() {
        let language = Language::new_with_labels(&["p", "q"]);
        let mut theory = StructuredTheory::new_with_language(language);
        theory.new_axiom("p").unwrap();
        theory.new_axiom("q").unwrap();
        theory.new_contrary("p", "q").unwrap();
        let violations = check_axiom_consistency(&theory);
        assert_eq!(1, violations.len());
        assert_eq!(
            ConsistencyViolation {
                formula: "p".to_string(),
                conflicting: "q".to_string(),
                derived: false,
            },
            violations[0]
        );
    }

    #[test]
    fn test_self_contrary_axiom() {
        let language = Language::new_with_labels(&["p"]);
        let mut theory = StructuredTheory::new_with_language(language);
        theory.new_axiom("p").unwrap();
        theory.new_contrary("p", "p").unwrap();
        let violations = check_axiom_consistency(&theory);
        assert_eq!(1, violations.len());
        assert_eq!("p", violations[0].formula);
        assert_eq!("p", violations[0].conflicting);
        assert!(!violations[0].derived);
    }

    #[test]
    fn test_self_contrary_in_strict_closure() {
        let language = Language::new_with_labels(&["p", "q", "r1"]);
        let mut theory = StructuredTheory::new_with_language(language);
        theory.new_axiom("p").unwrap();
        theory.new_contrary("q", "q").unwrap();
        theory.new_strict_rule("r1", &["p"], "q").unwrap();
        let violations = check_axiom_consistency(&theory);
        assert_eq!(1, violations.len());
        assert_eq!("q", violations[0].formula);
        assert!(violations[0].derived);
    }

    #[test]
    fn test_conflict_in_strict_closure() {
        let language = Language::new_with_labels(&["p", "q", "¬q", "r1"]);
        let mut theory = StructuredTheory::new_with_language(language);
        theory.new_axiom("p").unwrap();
        theory.new_axiom("¬q").unwrap();
        theory.new_contrary("q", "¬q").unwrap();
        theory.new_strict_rule("r1", &["p"], "q").unwrap();
        let violations = check_axiom_consistency(&theory);
        assert_eq!(1, violations.len());
        assert!(violations[0].derived);
    }

    #[test]
    fn test_defeasible_rules_do_not_extend_the_closure() {
        let language = Language::new_with_labels(&["p", "q", "¬q", "r1"]);
        let mut theory = StructuredTheory::new_with_language(language);
        theory.new_axiom("p").unwrap();
        theory.new_axiom("¬q").unwrap();
        theory.new_contrary("q", "¬q").unwrap();
        theory.new_defeasible_rule("r1", &["p"], "q").unwrap();
        assert!(check_axiom_consistency(&theory).is_empty());
    }

    #[test]
    fn test_strict_closure_chains() {
        let language = Language::new_with_labels(&["p", "q", "r", "r1", "r2"]);
        let mut theory = StructuredTheory::new_with_language(language);
        theory.new_axiom("p").unwrap();
        theory.new_strict_rule("r1", &["p"], "q").unwrap();
        theory.new_strict_rule("r2", &["q"], "r").unwrap();
        let closure = strict_closure(&theory);
        let labels = closure
            .iter()
            .map(|id| theory.language().get_formula_by_id(*id).label())
            .collect::<Vec<_>>();
        assert_eq!(vec!["p", "q", "r"], labels);
    }
}
