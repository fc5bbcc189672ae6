use crate::engine::{ArgumentArena, Attack, AttackKind, StructuredArgument};
use crate::theory::{FormulaRole, OrderingStrategy, PreferenceOrdering, StructuredTheory};
use log::debug;
use std::cmp::Ordering;

/// An attack that succeeds given the declared preferences.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Defeat {
    attack: Attack,
    preference_applied: bool,
}

impl Defeat {
    /// Returns the underlying attack.
    pub fn attack(&self) -> &Attack {
        &self.attack
    }

    /// Returns the identifier of the defeating argument.
    pub fn attacker(&self) -> usize {
        self.attack.attacker()
    }

    /// Returns the identifier of the defeated argument.
    pub fn target(&self) -> usize {
        self.attack.target()
    }

    /// Returns `true` if the defeat went through a preference comparison.
    ///
    /// Undercutting attacks and attacks on declared assumptions succeed
    /// unconditionally and are never compared.
    pub fn preference_applied(&self) -> bool {
        self.preference_applied
    }
}

/// Filters a set of attacks, keeping those that succeed as defeats.
///
/// Undercutting attacks always defeat, as do undermining attacks on declared
/// assumptions. Any other attack defeats unless the attacker is strictly less
/// preferred than the attacked argument (or, for rebutting, than the rebutted
/// sub-argument) under the ordering.
pub fn compute_defeats(
    attacks: &[Attack],
    arena: &ArgumentArena,
    theory: &StructuredTheory,
    ordering: &PreferenceOrdering,
) -> Vec<Defeat> {
    let mut defeats = Vec::new();
    for attack in attacks {
        let attacker = arena.get_argument_by_id(attack.attacker());
        match attack.kind() {
            AttackKind::Undercutting { .. } => defeats.push(Defeat {
                attack: attack.clone(),
                preference_applied: false,
            }),
            AttackKind::Undermining { premise } => {
                if theory.role(*premise) == FormulaRole::Assumption {
                    defeats.push(Defeat {
                        attack: attack.clone(),
                        preference_applied: false,
                    });
                } else {
                    let target = arena.get_argument_by_id(attack.target());
                    if !is_strictly_less_preferred(attacker, target, theory, ordering) {
                        defeats.push(Defeat {
                            attack: attack.clone(),
                            preference_applied: true,
                        });
                    }
                }
            }
            AttackKind::Rebutting { sub_argument } => {
                let sub = arena.get_argument_by_id(*sub_argument);
                if !is_strictly_less_preferred(attacker, sub, theory, ordering) {
                    defeats.push(Defeat {
                        attack: attack.clone(),
                        preference_applied: true,
                    });
                }
            }
        }
    }
    debug!("{} of {} attacks succeed as defeats", defeats.len(), attacks.len());
    defeats
}

fn is_strictly_less_preferred(
    attacker: &StructuredArgument,
    target: &StructuredArgument,
    theory: &StructuredTheory,
    ordering: &PreferenceOrdering,
) -> bool {
    // a reasonable ordering never ranks a firm argument below a fallible one
    if !attacker.is_fallible(theory) {
        return false;
    }
    if !target.is_fallible(theory) {
        return true;
    }
    match ordering.strategy() {
        OrderingStrategy::LastLink => last_link_less(attacker, target, theory, ordering),
        OrderingStrategy::WeakestLink => weakest_link_less(attacker, target, theory, ordering),
    }
}

fn last_link_less(
    attacker: &StructuredArgument,
    target: &StructuredArgument,
    theory: &StructuredTheory,
    ordering: &PreferenceOrdering,
) -> bool {
    match (attacker.top_rule_index(), target.top_rule_index()) {
        (Some(r1), Some(r2)) => {
            let rank1 = ordering.rule_rank(theory.get_rule_by_id(r1).label().label());
            let rank2 = ordering.rule_rank(theory.get_rule_by_id(r2).label().label());
            rank1 < rank2
        }
        _ => false,
    }
}

fn weakest_link_less(
    attacker: &StructuredArgument,
    target: &StructuredArgument,
    theory: &StructuredTheory,
    ordering: &PreferenceOrdering,
) -> bool {
    let rule_ranks = |argument: &StructuredArgument| {
        argument
            .defeasible_rule_ids()
            .iter()
            .map(|r| ordering.rule_rank(theory.get_rule_by_id(*r).label().label()))
            .collect::<Vec<usize>>()
    };
    match elitist_comparison(&rule_ranks(attacker), &rule_ranks(target)) {
        Ordering::Less => return true,
        Ordering::Greater => return false,
        Ordering::Equal => {}
    }
    let premise_ranks = |argument: &StructuredArgument| {
        argument
            .premise_ids()
            .iter()
            .filter(|p| {
                let role = theory.role(**p);
                role == FormulaRole::Premise || role == FormulaRole::Assumption
            })
            .map(|p| ordering.premise_rank(theory.language().get_formula_by_id(*p).label()))
            .collect::<Vec<usize>>()
    };
    elitist_comparison(&premise_ranks(attacker), &premise_ranks(target)) == Ordering::Less
}

/// Compares two rank sets by their weakest elements, an empty set being better
/// than any non-empty one.
fn elitist_comparison(ranks1: &[usize], ranks2: &[usize]) -> Ordering {
    if ranks1.is_empty() && ranks2.is_empty() {
        return Ordering::Equal;
    }
    if ranks1.is_empty() {
        return Ordering::Greater;
    }
    if ranks2.is_empty() {
        return Ordering::Less;
    }
    let set1_has_weaker = ranks1.iter().any(|r1| ranks2.iter().all(|r2| r1 < r2));
    let set2_has_weaker = ranks2.iter().any(|r2| ranks1.iter().all(|r1| r2 < r1));
    match (set1_has_weaker, set2_has_weaker) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => {
            let min1 = ranks1.iter().min().copied().unwrap_or(usize::MAX);
            let min2 = ranks2.iter().min().copied().unwrap_or(usize::MAX);
            min1.cmp(&min2)
        }
    }
}
