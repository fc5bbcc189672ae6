use crate::theory::{FormulaRole, RuleKind, StructuredTheory};
use log::debug;
use permutator::CartesianProduct;
use std::collections::HashMap;

/// An argument built from a structured argumentation theory.
///
/// An argument is either a leaf, standing for a knowledge base formula, or the
/// application of a rule to sub-arguments deriving its antecedents. Arguments
/// reference their sub-arguments by their identifiers in the [ArgumentArena]
/// they belong to.
///
/// The premise and defeasible rule sets are derived from the structure at
/// creation time; so is the classification of the argument as firm-and-strict
/// or fallible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructuredArgument {
    id: usize,
    conclusion: usize,
    sub_arguments: Vec<usize>,
    top_rule: Option<usize>,
    premises: Vec<usize>,
    defeasible_rules: Vec<usize>,
}

impl StructuredArgument {
    /// Returns the identifier of the argument in its arena.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Returns the formula id of the conclusion.
    pub fn conclusion_id(&self) -> usize {
        self.conclusion
    }

    /// Returns the identifiers of the direct sub-arguments, in antecedent order.
    pub fn sub_argument_ids(&self) -> &[usize] {
        &self.sub_arguments
    }

    /// Returns the index of the rule applied at the top of the argument, if any.
    pub fn top_rule_index(&self) -> Option<usize> {
        self.top_rule
    }

    /// Returns the formula ids of the premises the argument rests on, sorted.
    pub fn premise_ids(&self) -> &[usize] {
        &self.premises
    }

    /// Returns the indices of the defeasible rules used anywhere in the argument, sorted.
    pub fn defeasible_rule_ids(&self) -> &[usize] {
        &self.defeasible_rules
    }

    /// Returns `true` iff the argument is a knowledge base leaf.
    pub fn is_leaf(&self) -> bool {
        self.top_rule.is_none() && self.sub_arguments.is_empty()
    }

    /// Returns `true` iff the argument uses a defeasible rule or rests on a
    /// premise outside the axioms.
    ///
    /// Fallible arguments can lose against preferences; firm-and-strict ones
    /// are never strictly less preferred than a fallible one.
    pub fn is_fallible(&self, theory: &StructuredTheory) -> bool {
        if !self.defeasible_rules.is_empty() {
            return true;
        }
        self.premises
            .iter()
            .any(|p| theory.role(*p) != FormulaRole::Axiom)
    }
}

/// Handles the arguments built from a structured argumentation theory.
///
/// The arena interns arguments structurally: building twice the same argument
/// yields the same identifier, and sibling arguments share their common
/// sub-arguments.
#[derive(Default)]
pub struct ArgumentArena {
    arguments: Vec<StructuredArgument>,
    structural_index: HashMap<(usize, Option<usize>, Vec<usize>), usize>,
}

impl ArgumentArena {
    /// Builds an empty arena.
    pub fn new() -> Self {
        ArgumentArena::default()
    }

    /// Returns the number of arguments in the arena.
    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    /// Returns `true` iff the arena has no argument.
    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    /// Returns the argument with the corresponding identifier.
    ///
    /// # Panics
    ///
    /// Panics if no argument has the corresponding identifier.
    pub fn get_argument_by_id(&self, id: usize) -> &StructuredArgument {
        &self.arguments[id]
    }

    /// Provides an iterator to the arguments.
    pub fn iter(&self) -> impl Iterator<Item = &StructuredArgument> {
        self.arguments.iter()
    }

    /// Returns the identifiers of the arguments concluding the given formula.
    pub fn arguments_concluding(&self, formula_id: usize) -> Vec<usize> {
        self.arguments
            .iter()
            .filter(|a| a.conclusion == formula_id)
            .map(|a| a.id)
            .collect()
    }

    /// Returns the reflexive-transitive sub-arguments of an argument, the
    /// argument itself first.
    ///
    /// # Panics
    ///
    /// Panics if no argument has the corresponding identifier.
    pub fn sub_tree(&self, id: usize) -> Vec<usize> {
        let mut seen = vec![false; self.arguments.len()];
        let mut result = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if seen[current] {
                continue;
            }
            seen[current] = true;
            result.push(current);
            for sub in &self.arguments[current].sub_arguments {
                stack.push(*sub);
            }
        }
        result
    }

    pub(crate) fn intern_leaf(&mut self, conclusion: usize) -> usize {
        let key = (conclusion, None, Vec::new());
        if let Some(id) = self.structural_index.get(&key) {
            return *id;
        }
        let id = self.arguments.len();
        self.structural_index.insert(key, id);
        self.arguments.push(StructuredArgument {
            id,
            conclusion,
            sub_arguments: Vec::new(),
            top_rule: None,
            premises: vec![conclusion],
            defeasible_rules: Vec::new(),
        });
        id
    }

    pub(crate) fn intern_inference(
        &mut self,
        rule_index: usize,
        sub_arguments: Vec<usize>,
        theory: &StructuredTheory,
    ) -> usize {
        let rule = theory.get_rule_by_id(rule_index);
        let key = (rule.consequent_id(), Some(rule_index), sub_arguments.clone());
        if let Some(id) = self.structural_index.get(&key) {
            return *id;
        }
        let mut premises = Vec::new();
        let mut defeasible_rules = Vec::new();
        for sub in &sub_arguments {
            premises.extend_from_slice(&self.arguments[*sub].premises);
            defeasible_rules.extend_from_slice(&self.arguments[*sub].defeasible_rules);
        }
        if rule.kind() == RuleKind::Defeasible {
            defeasible_rules.push(rule_index);
        }
        premises.sort_unstable();
        premises.dedup();
        defeasible_rules.sort_unstable();
        defeasible_rules.dedup();
        let id = self.arguments.len();
        self.structural_index.insert(key, id);
        self.arguments.push(StructuredArgument {
            id,
            conclusion: rule.consequent_id(),
            sub_arguments,
            top_rule: Some(rule_index),
            premises,
            defeasible_rules,
        });
        id
    }
}

/// Builds all the arguments of a theory.
///
/// The construction is recursive on the formulas; a path of in-progress formulas
/// is threaded through the recursion and a formula appearing twice on the same
/// path cuts the branch, so cyclic rule dependencies are silently unproductive
/// instead of looping. Derivations are cached per formula, except those the
/// cycle guard truncated, which only hold relative to their path; every formula
/// is queried from a fresh root so no argument is lost to a partial result. The
/// arguments for a rule application are the cartesian product of the candidate
/// arguments of its antecedents.
///
/// # Example
///
/// ```
/// # use sargo::engine::construct_arguments;
/// # use sargo::theory::{Language, StructuredTheory};
/// let language = Language::new_with_labels(&["bird", "flies", "r_fly"]);
/// let mut theory = StructuredTheory::new_with_language(language);
/// theory.new_premise("bird").unwrap();
/// theory.new_defeasible_rule("r_fly", &["bird"], "flies").unwrap();
/// let arena = construct_arguments(&theory);
/// assert_eq!(2, arena.len());
/// ```
pub fn construct_arguments(theory: &StructuredTheory) -> ArgumentArena {
    let language_len = theory.language().len();
    let mut rules_for = vec![Vec::new(); language_len];
    for (i, rule) in theory.iter_rules().enumerate() {
        rules_for[rule.consequent_id()].push(i);
    }
    let mut builder = ArgumentBuilder {
        theory,
        arena: ArgumentArena::new(),
        cache: vec![None; language_len],
        rules_for,
    };
    for i in 0..language_len {
        builder.arguments_for(vec![i]);
    }
    debug!(
        "constructed {} arguments over {} formulas",
        builder.arena.len(),
        language_len
    );
    builder.arena
}

struct ArgumentBuilder<'a> {
    theory: &'a StructuredTheory,
    arena: ArgumentArena,
    cache: Vec<Option<Option<Vec<usize>>>>,
    rules_for: Vec<Vec<usize>>,
}

impl<'a> ArgumentBuilder<'a> {
    /// Computes the argument identifiers deriving a formula, given the path of
    /// in-progress formulas, together with a flag telling whether the cycle
    /// guard cut a branch somewhere below.
    ///
    /// A result computed under a cut is relative to the current path and must
    /// not be cached: the same formula explored from another root may derive
    /// more arguments.
    fn arguments_for(&mut self, path: Vec<usize>) -> (Option<Vec<usize>>, bool) {
        let current = *path.last().unwrap();
        if path[0..path.len() - 1].contains(&current) {
            return (None, true);
        }
        if let Some(cached) = &self.cache[current] {
            return (cached.clone(), false);
        }
        let mut truncated = false;
        let mut argument_ids = Vec::new();
        if self.theory.has_knowledge_role(current) {
            argument_ids.push(self.arena.intern_leaf(current));
        }
        let rules = self.rules_for[current].clone();
        for rule_index in rules {
            let theory = self.theory;
            let antecedent_ids = theory.get_rule_by_id(rule_index).antecedent_ids().to_vec();
            if antecedent_ids.is_empty() {
                argument_ids.push(self.arena.intern_inference(rule_index, Vec::new(), theory));
                continue;
            }
            let mut domains = Vec::with_capacity(antecedent_ids.len());
            let mut missing_antecedent = false;
            for antecedent in antecedent_ids {
                let mut path_clone = path.clone();
                path_clone.push(antecedent);
                let (domain, cut) = self.arguments_for(path_clone);
                truncated |= cut;
                match domain {
                    Some(d) => domains.push(d),
                    None => {
                        missing_antecedent = true;
                        break;
                    }
                }
            }
            if missing_antecedent {
                continue;
            }
            let domain_refs = domains.iter().map(|v| v.as_slice()).collect::<Vec<&[usize]>>();
            for combination in domain_refs.as_slice().cart_prod() {
                let sub_ids = combination.iter().map(|x| **x).collect::<Vec<usize>>();
                argument_ids.push(self.arena.intern_inference(rule_index, sub_ids, self.theory));
            }
        }
        let result = if argument_ids.is_empty() {
            None
        } else {
            argument_ids.sort_unstable();
            argument_ids.dedup();
            Some(argument_ids)
        };
        if !truncated {
            self.cache[current] = Some(result.clone());
        }
        (result, truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::Language;

    fn tweety_theory() -> StructuredTheory {
        let language = Language::new_with_labels(&[
            "bird", "penguin", "flies", "¬flies", "r_fly", "r_nofly",
        ]);
        let mut theory = StructuredTheory::new_with_language(language);
        theory.new_premise("bird").unwrap();
        theory.new_premise("penguin").unwrap();
        theory.new_defeasible_rule("r_fly", &["bird"], "flies").unwrap();
        theory
            .new_defeasible_rule("r_nofly", &["penguin"], "¬flies")
            .unwrap();
        theory
    }

    #[test]
    fn test_construct_tweety() {
        let theory = tweety_theory();
        let arena = construct_arguments(&theory);
        assert_eq!(4, arena.len());
        let flies = theory.language().get_formula("flies").unwrap().id();
        let concluding = arena.arguments_concluding(flies);
        assert_eq!(1, concluding.len());
        let arg = arena.get_argument_by_id(concluding[0]);
        assert!(!arg.is_leaf());
        assert_eq!(1, arg.sub_argument_ids().len());
        assert_eq!(1, arg.defeasible_rule_ids().len());
        assert!(arena.get_argument_by_id(arg.sub_argument_ids()[0]).is_leaf());
    }

    #[test]
    fn test_leafs_are_shared() {
        let theory = tweety_theory();
        let mut arena = construct_arguments(&theory);
        let bird = theory.language().get_formula("bird").unwrap().id();
        let leaf = arena.arguments_concluding(bird);
        assert_eq!(1, leaf.len());
        assert_eq!(leaf[0], arena.intern_leaf(bird));
    }

    #[test]
    fn test_cycle_is_unproductive() {
        let language = Language::new_with_labels(&["p", "q", "r1", "r2"]);
        let mut theory = StructuredTheory::new_with_language(language);
        theory.new_strict_rule("r1", &["p"], "q").unwrap();
        theory.new_strict_rule("r2", &["q"], "p").unwrap();
        let arena = construct_arguments(&theory);
        assert!(arena.is_empty());
    }

    #[test]
    fn test_mutual_rules_between_premises() {
        let language = Language::new_with_labels(&["p", "q", "r1", "r2"]);
        let mut theory = StructuredTheory::new_with_language(language);
        theory.new_premise("p").unwrap();
        theory.new_premise("q").unwrap();
        theory.new_strict_rule("r1", &["p"], "q").unwrap();
        theory.new_strict_rule("r2", &["q"], "p").unwrap();
        let arena = construct_arguments(&theory);
        // each formula has its leaf and the rule application on the other leaf
        assert_eq!(4, arena.len());
        let p = theory.language().get_formula("p").unwrap().id();
        let q = theory.language().get_formula("q").unwrap().id();
        assert_eq!(2, arena.arguments_concluding(p).len());
        assert_eq!(2, arena.arguments_concluding(q).len());
    }

    #[test]
    fn test_cycle_with_seed() {
        let language = Language::new_with_labels(&["p", "q", "r1", "r2"]);
        let mut theory = StructuredTheory::new_with_language(language);
        theory.new_axiom("p").unwrap();
        theory.new_strict_rule("r1", &["p"], "q").unwrap();
        theory.new_strict_rule("r2", &["q"], "p").unwrap();
        let arena = construct_arguments(&theory);
        let p = theory.language().get_formula("p").unwrap().id();
        let q = theory.language().get_formula("q").unwrap().id();
        assert_eq!(1, arena.arguments_concluding(p).len());
        assert_eq!(1, arena.arguments_concluding(q).len());
    }

    #[test]
    fn test_multiple_rules_for_conclusion() {
        let language = Language::new_with_labels(&["a", "b", "c", "r1", "r2"]);
        let mut theory = StructuredTheory::new_with_language(language);
        theory.new_premise("a").unwrap();
        theory.new_premise("b").unwrap();
        theory.new_defeasible_rule("r1", &["a"], "c").unwrap();
        theory.new_defeasible_rule("r2", &["b"], "c").unwrap();
        let arena = construct_arguments(&theory);
        let c = theory.language().get_formula("c").unwrap().id();
        assert_eq!(2, arena.arguments_concluding(c).len());
    }

    #[test]
    fn test_cartesian_product_of_antecedents() {
        let language = Language::new_with_labels(&["a", "b", "c", "d", "r1", "r2", "r3"]);
        let mut theory = StructuredTheory::new_with_language(language);
        theory.new_premise("a").unwrap();
        theory.new_premise("b").unwrap();
        theory.new_premise("c").unwrap();
        theory.new_defeasible_rule("r1", &["a"], "b").unwrap();
        theory.new_strict_rule("r2", &["b", "c"], "d").unwrap();
        let arena = construct_arguments(&theory);
        let d = theory.language().get_formula("d").unwrap().id();
        // b is derivable both as a premise and through r1
        assert_eq!(2, arena.arguments_concluding(d).len());
    }

    #[test]
    fn test_sub_tree() {
        let theory = tweety_theory();
        let arena = construct_arguments(&theory);
        let flies = theory.language().get_formula("flies").unwrap().id();
        let top = arena.arguments_concluding(flies)[0];
        let subs = arena.sub_tree(top);
        assert_eq!(2, subs.len());
        assert_eq!(top, subs[0]);
    }

    #[test]
    fn test_fallibility() {
        let language = Language::new_with_labels(&["a", "b", "c", "r1"]);
        let mut theory = StructuredTheory::new_with_language(language);
        theory.new_axiom("a").unwrap();
        theory.new_premise("b").unwrap();
        theory.new_strict_rule("r1", &["a"], "c").unwrap();
        let arena = construct_arguments(&theory);
        let a = theory.language().get_formula("a").unwrap().id();
        let b = theory.language().get_formula("b").unwrap().id();
        let c = theory.language().get_formula("c").unwrap().id();
        let leaf_a = arena.get_argument_by_id(arena.arguments_concluding(a)[0]);
        let leaf_b = arena.get_argument_by_id(arena.arguments_concluding(b)[0]);
        let strict_c = arena.get_argument_by_id(arena.arguments_concluding(c)[0]);
        assert!(!leaf_a.is_fallible(&theory));
        assert!(leaf_b.is_fallible(&theory));
        assert!(!strict_c.is_fallible(&theory));
    }
}
