use std::collections::HashMap;
use strum_macros::{Display, EnumString};

/// The strategy used to lift the preferences over rules and premises to a
/// preference relation over arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
pub enum OrderingStrategy {
    /// Compare arguments by their top rules only.
    ///
    /// Suitable for normative reasoning, where the final inference step is the
    /// critical one.
    #[strum(serialize = "last-link")]
    LastLink,
    /// Compare arguments by their whole sets of defeasible rules, then by their
    /// sets of ordinary premises.
    ///
    /// Suitable for epistemic reasoning, where an argument is only as strong as
    /// its weakest link.
    #[strum(serialize = "weakest-link")]
    WeakestLink,
}

/// Strict preferences over defeasible rules and over ordinary premises.
///
/// Preferences are declared as pairs; each mentioned label receives a rank the
/// first time it appears, dispreferred side first, so that a lower rank means
/// less preferred. Unmentioned labels are maximally ranked and never strictly
/// less preferred than anything.
///
/// # Example
///
/// ```
/// # use sargo::theory::{OrderingStrategy, PreferenceOrdering};
/// let mut ordering = PreferenceOrdering::new(OrderingStrategy::LastLink);
/// ordering.prefer_rule("r_nofly", "r_fly");
/// assert_eq!(OrderingStrategy::LastLink, ordering.strategy());
/// ```
pub struct PreferenceOrdering {
    strategy: OrderingStrategy,
    rule_ranks: HashMap<String, usize>,
    premise_ranks: HashMap<String, usize>,
    next_rule_rank: usize,
    next_premise_rank: usize,
}

impl PreferenceOrdering {
    /// Builds an empty ordering for the given strategy.
    ///
    /// Without any declared preference, no argument is ever strictly less
    /// preferred than another one of the same fallibility class.
    pub fn new(strategy: OrderingStrategy) -> Self {
        PreferenceOrdering {
            strategy,
            rule_ranks: HashMap::new(),
            premise_ranks: HashMap::new(),
            next_rule_rank: 0,
            next_premise_rank: 0,
        }
    }

    /// Returns the lifting strategy of the ordering.
    pub fn strategy(&self) -> OrderingStrategy {
        self.strategy
    }

    /// Declares a strict preference between two defeasible rules, given by their
    /// identifiers.
    pub fn prefer_rule(&mut self, preferred: &str, dispreferred: &str) {
        Self::rank_pair(
            &mut self.rule_ranks,
            &mut self.next_rule_rank,
            preferred,
            dispreferred,
        );
    }

    /// Declares a strict preference between two ordinary premises, given by their
    /// labels.
    pub fn prefer_premise(&mut self, preferred: &str, dispreferred: &str) {
        Self::rank_pair(
            &mut self.premise_ranks,
            &mut self.next_premise_rank,
            preferred,
            dispreferred,
        );
    }

    fn rank_pair(
        ranks: &mut HashMap<String, usize>,
        next_rank: &mut usize,
        preferred: &str,
        dispreferred: &str,
    ) {
        for label in [dispreferred, preferred] {
            if !ranks.contains_key(label) {
                ranks.insert(label.to_string(), *next_rank);
                *next_rank += 1;
            }
        }
    }

    /// Returns the rank of a rule, unmentioned rules being maximally ranked.
    pub(crate) fn rule_rank(&self, label: &str) -> usize {
        self.rule_ranks.get(label).copied().unwrap_or(usize::MAX)
    }

    /// Returns the rank of a premise, unmentioned premises being maximally ranked.
    pub(crate) fn premise_rank(&self, label: &str) -> usize {
        self.premise_ranks.get(label).copied().unwrap_or(usize::MAX)
    }
}
