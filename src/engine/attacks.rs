use crate::engine::ArgumentArena;
use crate::theory::{FormulaRole, RuleKind, StructuredTheory};
use log::debug;

/// The kind of an attack, together with its kind-specific target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttackKind {
    /// The attacker concludes a contrary of an ordinary premise or assumption
    /// the target rests on.
    Undermining {
        /// The formula id of the attacked premise.
        premise: usize,
    },
    /// The attacker concludes a contrary of the conclusion of a sub-argument
    /// whose top rule is defeasible.
    Rebutting {
        /// The identifier of the rebutted sub-argument.
        sub_argument: usize,
    },
    /// The attacker concludes a contrary of the identifier of a defeasible rule
    /// applied in the target, denying its applicability.
    Undercutting {
        /// The index of the undercut rule.
        rule: usize,
    },
}

/// An attack between two arguments of an arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attack {
    pub(crate) attacker: usize,
    pub(crate) target: usize,
    pub(crate) kind: AttackKind,
}

impl Attack {
    /// Returns the identifier of the attacking argument.
    pub fn attacker(&self) -> usize {
        self.attacker
    }

    /// Returns the identifier of the attacked argument.
    pub fn target(&self) -> usize {
        self.target
    }

    /// Returns the kind of the attack.
    pub fn kind(&self) -> &AttackKind {
        &self.kind
    }
}

/// Computes all the attacks between the arguments of an arena.
///
/// All ordered pairs of distinct arguments are checked for the three attack
/// kinds. An empty result is not an error; theories without conflicts simply
/// have no attack.
pub fn compute_attacks(arena: &ArgumentArena, theory: &StructuredTheory) -> Vec<Attack> {
    let mut attacks = Vec::new();
    for attacker in arena.iter() {
        for target in arena.iter() {
            if attacker.id() == target.id() {
                continue;
            }
            attacks.append(&mut attacks_between(attacker.id(), target.id(), arena, theory));
        }
    }
    debug!("computed {} attacks over {} arguments", attacks.len(), arena.len());
    attacks
}

/// Computes the attacks from one argument onto another one.
///
/// # Panics
///
/// Panics if one of the identifiers does not refer to an argument of the arena.
pub fn attacks_between(
    attacker_id: usize,
    target_id: usize,
    arena: &ArgumentArena,
    theory: &StructuredTheory,
) -> Vec<Attack> {
    let attacker_conclusion = arena.get_argument_by_id(attacker_id).conclusion_id();
    let target = arena.get_argument_by_id(target_id);
    let mut attacks = Vec::new();
    for premise in target.premise_ids() {
        let role = theory.role(*premise);
        if role != FormulaRole::Premise && role != FormulaRole::Assumption {
            continue;
        }
        if theory.in_conflict(attacker_conclusion, *premise) {
            attacks.push(Attack {
                attacker: attacker_id,
                target: target_id,
                kind: AttackKind::Undermining { premise: *premise },
            });
        }
    }
    for sub_id in arena.sub_tree(target_id) {
        let sub = arena.get_argument_by_id(sub_id);
        let rule_index = match sub.top_rule_index() {
            Some(r) if theory.get_rule_by_id(r).kind() == RuleKind::Defeasible => r,
            _ => continue,
        };
        if theory.in_conflict(attacker_conclusion, sub.conclusion_id()) {
            attacks.push(Attack {
                attacker: attacker_id,
                target: target_id,
                kind: AttackKind::Rebutting { sub_argument: sub_id },
            });
        }
        if theory.in_conflict(attacker_conclusion, theory.get_rule_by_id(rule_index).label_id()) {
            attacks.push(Attack {
                attacker: attacker_id,
                target: target_id,
                kind: AttackKind::Undercutting { rule: rule_index },
            });
        }
    }
    attacks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::construct_arguments;
    use crate::theory::Language;

    fn tweety_theory() -> StructuredTheory {
        let language = Language::new_with_labels(&[
            "bird", "penguin", "flies", "¬flies", "r_fly", "r_nofly",
        ]);
        let mut theory = StructuredTheory::new_with_language(language);
        theory.new_premise("bird").unwrap();
        theory.new_premise("penguin").unwrap();
        theory.new_contrary("flies", "¬flies").unwrap();
        theory.new_contrary("¬flies", "flies").unwrap();
        theory.new_defeasible_rule("r_fly", &["bird"], "flies").unwrap();
        theory
            .new_defeasible_rule("r_nofly", &["penguin"], "¬flies")
            .unwrap();
        theory
    }

    #[test]
    fn test_mutual_rebutting() {
        let theory = tweety_theory();
        let arena = construct_arguments(&theory);
        let attacks = compute_attacks(&arena, &theory);
        assert_eq!(2, attacks.len());
        for attack in &attacks {
            assert!(matches!(attack.kind(), AttackKind::Rebutting { sub_argument } if *sub_argument == attack.target()));
        }
    }

    #[test]
    fn test_undermining_spares_axioms() {
        let language = Language::new_with_labels(&["p", "¬p"]);
        let mut theory = StructuredTheory::new_with_language(language);
        theory.new_axiom("p").unwrap();
        theory.new_premise("¬p").unwrap();
        theory.new_contrary("p", "¬p").unwrap();
        theory.new_contrary("¬p", "p").unwrap();
        let arena = construct_arguments(&theory);
        let attacks = compute_attacks(&arena, &theory);
        // the axiom leaf attacks the premise leaf, never the converse
        assert_eq!(1, attacks.len());
        let p = theory.language().get_formula("p").unwrap().id();
        assert_eq!(p, arena.get_argument_by_id(attacks[0].attacker()).conclusion_id());
        assert!(matches!(attacks[0].kind(), AttackKind::Undermining { .. }));
    }

    #[test]
    fn test_mutual_undermining_of_premises() {
        let language = Language::new_with_labels(&["p", "¬p"]);
        let mut theory = StructuredTheory::new_with_language(language);
        theory.new_premise("p").unwrap();
        theory.new_premise("¬p").unwrap();
        theory.new_contrary("p", "¬p").unwrap();
        theory.new_contrary("¬p", "p").unwrap();
        let arena = construct_arguments(&theory);
        let attacks = compute_attacks(&arena, &theory);
        assert_eq!(2, attacks.len());
    }

    #[test]
    fn test_no_rebut_on_strict_top_rule() {
        let language = Language::new_with_labels(&["p", "q", "¬q", "r1"]);
        let mut theory = StructuredTheory::new_with_language(language);
        theory.new_axiom("p").unwrap();
        theory.new_premise("¬q").unwrap();
        theory.new_contrary("q", "¬q").unwrap();
        theory.new_contrary("¬q", "q").unwrap();
        theory.new_strict_rule("r1", &["p"], "q").unwrap();
        let arena = construct_arguments(&theory);
        let attacks = compute_attacks(&arena, &theory);
        // the strict argument for q attacks the premise ¬q, but cannot be rebutted
        assert_eq!(1, attacks.len());
        assert!(matches!(attacks[0].kind(), AttackKind::Undermining { .. }));
    }

    #[test]
    fn test_undercutting_via_rule_name() {
        let language = Language::new_with_labels(&["bird", "flies", "r_fly", "¬r_fly"]);
        let mut theory = StructuredTheory::new_with_language(language);
        theory.new_premise("bird").unwrap();
        theory.new_premise("¬r_fly").unwrap();
        theory.new_contrary("r_fly", "¬r_fly").unwrap();
        theory.new_defeasible_rule("r_fly", &["bird"], "flies").unwrap();
        let arena = construct_arguments(&theory);
        let attacks = compute_attacks(&arena, &theory);
        assert_eq!(1, attacks.len());
        let rule_index = theory
            .rule_index_of_label(theory.language().get_formula("r_fly").unwrap().id())
            .unwrap();
        assert!(matches!(attacks[0].kind(), AttackKind::Undercutting { rule } if *rule == rule_index));
    }

    #[test]
    fn test_rebut_targets_inner_sub_argument() {
        let language = Language::new_with_labels(&["a", "b", "c", "¬b", "r1", "r2"]);
        let mut theory = StructuredTheory::new_with_language(language);
        theory.new_premise("a").unwrap();
        theory.new_premise("¬b").unwrap();
        theory.new_contrary("b", "¬b").unwrap();
        theory.new_contrary("¬b", "b").unwrap();
        theory.new_defeasible_rule("r1", &["a"], "b").unwrap();
        theory.new_strict_rule("r2", &["b"], "c").unwrap();
        let arena = construct_arguments(&theory);
        let c = theory.language().get_formula("c").unwrap().id();
        let b = theory.language().get_formula("b").unwrap().id();
        let not_b_leaf = {
            let not_b = theory.language().get_formula("¬b").unwrap().id();
            arena.arguments_concluding(not_b)[0]
        };
        let c_arg = arena.arguments_concluding(c)[0];
        let attacks = attacks_between(not_b_leaf, c_arg, &arena, &theory);
        // the strict-topped argument for c is attacked through its defeasible sub-argument for b
        assert_eq!(1, attacks.len());
        let b_arg = arena.arguments_concluding(b)[0];
        assert!(matches!(attacks[0].kind(), AttackKind::Rebutting { sub_argument } if *sub_argument == b_arg));
    }
}
