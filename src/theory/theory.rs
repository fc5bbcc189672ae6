use crate::theory::negate;
use crate::theory::rule::RuleIds;
use crate::theory::{Formula, Language, Rule, RuleKind, RuleSpec};
use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FormulaRole {
    None,
    Axiom,
    Premise,
    Assumption,
}

/// Handles an ASPIC+ argumentation theory.
///
/// [StructuredTheory] objects hold a language, a contrariness relation over it,
/// the knowledge base roles of the formulas (axioms, ordinary premises and
/// assumptions) and the strict and defeasible rules built on top of the language.
/// Such a theory is initialized with its language; roles, contraries and rules are
/// defined after with dedicated methods ensuring the constraints on them (each
/// label must belong to the language, a formula has at most one role, ...).
///
/// The contrariness relation is directed: declaring `contrary` as a contrary of
/// `of` does not declare the converse. Use [StructuredTheory::add_classical_negation]
/// to populate symmetric negation pairs for the whole language.
///
/// # Example
///
/// ```
/// # use sargo::theory::{Language, StructuredTheory};
/// let language = Language::new_with_labels(&["bird", "flies", "¬flies", "r_fly"]);
/// let mut theory = StructuredTheory::new_with_language(language);
/// theory.new_premise("bird").unwrap();
/// theory.new_contrary("flies", "¬flies").unwrap();
/// theory.new_contrary("¬flies", "flies").unwrap();
/// theory.new_defeasible_rule("r_fly", &["bird"], "flies").unwrap();
/// ```
pub struct StructuredTheory {
    language: Language,
    roles: Vec<FormulaRole>,
    contraries: Vec<Vec<usize>>,
    rules: Vec<RuleIds>,
    rule_of_label: HashMap<usize, usize>,
}

impl StructuredTheory {
    /// Builds a theory given its associated language.
    pub fn new_with_language(language: Language) -> Self {
        let language_len = language.len();
        StructuredTheory {
            language,
            roles: vec![FormulaRole::None; language_len],
            contraries: vec![Vec::new(); language_len],
            rules: Vec::new(),
            rule_of_label: HashMap::new(),
        }
    }

    /// Adds a formula to the language of the theory, returning its id.
    ///
    /// If the label is already present, the existing formula id is returned.
    pub fn new_formula(&mut self, label: &str) -> usize {
        let id = self.language.new_formula(label);
        if id == self.roles.len() {
            self.roles.push(FormulaRole::None);
            self.contraries.push(Vec::new());
        }
        id
    }

    /// Sets a language formula as an axiom (a member of Kn).
    ///
    /// Axioms cannot be undermined. An error is returned if the label does not
    /// belong to the language or if the formula already has a knowledge base role.
    pub fn new_axiom(&mut self, label: &str) -> Result<()> {
        self.set_role(label, FormulaRole::Axiom)
    }

    /// Sets a language formula as an ordinary premise (a member of Kp).
    ///
    /// An error is returned if the label does not belong to the language or if the
    /// formula already has a knowledge base role.
    pub fn new_premise(&mut self, label: &str) -> Result<()> {
        self.set_role(label, FormulaRole::Premise)
    }

    /// Sets a language formula as an assumption (a member of Ka).
    ///
    /// Undermining an assumption always succeeds as a defeat, whatever the
    /// preferences. An error is returned if the label does not belong to the
    /// language or if the formula already has a knowledge base role.
    pub fn new_assumption(&mut self, label: &str) -> Result<()> {
        self.set_role(label, FormulaRole::Assumption)
    }

    fn set_role(&mut self, label: &str, role: FormulaRole) -> Result<()> {
        let context = || format!("cannot set a knowledge base role for {:?}", label);
        let id = self.language.get_formula(label).with_context(context)?.id();
        if self.roles[id] != FormulaRole::None {
            return Err(anyhow!(
                "formula already has a knowledge base role: {}",
                label
            ));
        }
        self.roles[id] = role;
        Ok(())
    }

    /// Declares a formula as a contrary of another one.
    ///
    /// The declaration is directed: `contrary` becomes a member of the contraries
    /// of `of`, nothing more. Both labels must belong to the language.
    pub fn new_contrary(&mut self, of: &str, contrary: &str) -> Result<()> {
        let context = || format!("cannot set {:?} as a contrary of {:?}", contrary, of);
        let of_id = self.language.get_formula(of).with_context(context)?.id();
        let contrary_id = self
            .language
            .get_formula(contrary)
            .with_context(context)?
            .id();
        if !self.contraries[of_id].contains(&contrary_id) {
            self.contraries[of_id].push(contrary_id);
        }
        Ok(())
    }

    /// Declares the symbolic negation of each formula as its contradictory.
    ///
    /// For each formula `φ` of the language that does not start with the negation
    /// sign, the formula `¬φ` is interned (if needed) and both directions of the
    /// contrariness relation are declared.
    pub fn add_classical_negation(&mut self) {
        let labels = self
            .language
            .iter()
            .filter(|f| !f.label().starts_with('¬'))
            .map(|f| (f.id(), f.label().to_string()))
            .collect::<Vec<_>>();
        for (id, label) in labels {
            let negated_id = self.new_formula(&negate(&label));
            if !self.contraries[id].contains(&negated_id) {
                self.contraries[id].push(negated_id);
            }
            if !self.contraries[negated_id].contains(&id) {
                self.contraries[negated_id].push(id);
            }
        }
    }

    /// Adds a strict rule to the theory.
    ///
    /// The rule identifier, the antecedents and the consequent are given by their
    /// labels, which must all belong to the language. An error is also returned if
    /// the identifier already names a rule.
    pub fn new_strict_rule(
        &mut self,
        label: &str,
        antecedents: &[&str],
        consequent: &str,
    ) -> Result<()> {
        self.new_rule(label, antecedents, consequent, RuleKind::Strict)
    }

    /// Adds a defeasible rule to the theory.
    ///
    /// The rule identifier, the antecedents and the consequent are given by their
    /// labels, which must all belong to the language. An error is also returned if
    /// the identifier already names a rule.
    pub fn new_defeasible_rule(
        &mut self,
        label: &str,
        antecedents: &[&str],
        consequent: &str,
    ) -> Result<()> {
        self.new_rule(label, antecedents, consequent, RuleKind::Defeasible)
    }

    fn new_rule(
        &mut self,
        label: &str,
        antecedents: &[&str],
        consequent: &str,
        kind: RuleKind,
    ) -> Result<()> {
        let context = || {
            format!(
                "cannot add the rule {:?} with {:?} as antecedents and {:?} as consequent",
                label, antecedents, consequent
            )
        };
        let label_id = self.language.get_formula(label).with_context(context)?.id();
        if self.rule_of_label.contains_key(&label_id) {
            return Err(anyhow!("identifier already names a rule: {}", label));
        }
        let mut antecedent_ids = Vec::with_capacity(antecedents.len());
        for a in antecedents {
            antecedent_ids.push(self.language.get_formula(a).with_context(context)?.id());
        }
        let consequent_id = self
            .language
            .get_formula(consequent)
            .with_context(context)?
            .id();
        self.rule_of_label.insert(label_id, self.rules.len());
        self.rules.push(RuleIds {
            label: label_id,
            antecedents: antecedent_ids,
            consequent: consequent_id,
            kind,
        });
        Ok(())
    }

    /// Adds a rule from its string-level specification, interning the formulas
    /// that are not part of the language yet.
    ///
    /// An error is returned if the identifier already names a rule.
    pub fn new_rule_from_spec(&mut self, spec: &RuleSpec) -> Result<()> {
        self.new_formula(&spec.id);
        for a in &spec.antecedents {
            self.new_formula(a);
        }
        self.new_formula(&spec.consequent);
        let antecedents = spec.antecedents.iter().map(|a| a.as_str()).collect::<Vec<_>>();
        self.new_rule(&spec.id, &antecedents, &spec.consequent, spec.kind)
    }

    /// Returns the number of rules of the theory.
    pub fn n_rules(&self) -> usize {
        self.rules.len()
    }

    /// Returns the rule at the given index.
    ///
    /// # Panics
    ///
    /// Panics if the provided index does not refer to an existing rule.
    pub fn get_rule_by_id(&self, index: usize) -> Rule {
        Rule {
            ids: &self.rules[index],
            language: &self.language,
        }
    }

    /// Provides an iterator to the rules.
    pub fn iter_rules(&self) -> impl Iterator<Item = Rule> + '_ {
        (0..self.rules.len()).map(|i| self.get_rule_by_id(i))
    }

    /// Returns the rules of the theory as string-level specifications.
    pub fn rule_specs(&self) -> Vec<RuleSpec> {
        self.iter_rules().map(|r| r.to_spec()).collect()
    }

    /// Returns the index of the rule named by a formula, if any.
    pub(crate) fn rule_index_of_label(&self, label_id: usize) -> Option<usize> {
        self.rule_of_label.get(&label_id).copied()
    }

    /// Returns the underlying language.
    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Returns `true` iff the provided formula (given by its label) is an axiom.
    ///
    /// An error is returned if the label does not belong to the language.
    pub fn is_axiom(&self, label: &str) -> Result<bool> {
        Ok(self.role_of(label)? == FormulaRole::Axiom)
    }

    /// Returns `true` iff the provided formula (given by its label) is an ordinary premise.
    ///
    /// An error is returned if the label does not belong to the language.
    pub fn is_premise(&self, label: &str) -> Result<bool> {
        Ok(self.role_of(label)? == FormulaRole::Premise)
    }

    /// Returns `true` iff the provided formula (given by its label) is an assumption.
    ///
    /// An error is returned if the label does not belong to the language.
    pub fn is_assumption(&self, label: &str) -> Result<bool> {
        Ok(self.role_of(label)? == FormulaRole::Assumption)
    }

    fn role_of(&self, label: &str) -> Result<FormulaRole> {
        let id = self
            .language
            .get_formula(label)
            .context("cannot get the knowledge base role of the formula")?
            .id();
        Ok(self.roles[id])
    }

    pub(crate) fn role(&self, id: usize) -> FormulaRole {
        self.roles[id]
    }

    /// Returns `true` iff the formula belongs to the knowledge base (Kn, Kp or Ka).
    pub(crate) fn has_knowledge_role(&self, id: usize) -> bool {
        self.roles[id] != FormulaRole::None
    }

    /// Provides an iterator to the axioms of the theory.
    pub fn iter_axioms(&self) -> impl Iterator<Item = &Formula> + '_ {
        self.iter_role(FormulaRole::Axiom)
    }

    /// Provides an iterator to the ordinary premises of the theory.
    pub fn iter_premises(&self) -> impl Iterator<Item = &Formula> + '_ {
        self.iter_role(FormulaRole::Premise)
    }

    /// Provides an iterator to the assumptions of the theory.
    pub fn iter_assumptions(&self) -> impl Iterator<Item = &Formula> + '_ {
        self.iter_role(FormulaRole::Assumption)
    }

    fn iter_role(&self, role: FormulaRole) -> impl Iterator<Item = &Formula> + '_ {
        self.roles
            .iter()
            .enumerate()
            .filter(move |(_, r)| **r == role)
            .map(|(i, _)| self.language.get_formula_by_id(i))
    }

    /// Returns `true` iff the two formulas (given by their labels) are in conflict,
    /// i.e. a contrariness declaration exists in at least one direction.
    ///
    /// An error is returned if one of the labels does not belong to the language.
    pub fn are_in_conflict(&self, phi: &str, psi: &str) -> Result<bool> {
        let context = || format!("cannot check the conflict between {:?} and {:?}", phi, psi);
        let phi_id = self.language.get_formula(phi).with_context(context)?.id();
        let psi_id = self.language.get_formula(psi).with_context(context)?.id();
        Ok(self.in_conflict(phi_id, psi_id))
    }

    pub(crate) fn in_conflict(&self, phi: usize, psi: usize) -> bool {
        self.contraries[phi].contains(&psi) || self.contraries[psi].contains(&phi)
    }

    pub(crate) fn contrary_ids(&self, id: usize) -> &[usize] {
        &self.contraries[id]
    }

    /// Returns a formula in conflict with the given one, interning its symbolic
    /// negation when no contrary has been declared.
    ///
    /// The first declared contrary is preferred. When the negation must be
    /// interned, the contradictory pair is declared in both directions so that
    /// later conflict checks see it.
    pub(crate) fn contrary_or_negation(&mut self, id: usize) -> usize {
        if let Some(c) = self.contraries[id].first() {
            return *c;
        }
        let label = self.language.get_formula_by_id(id).label().to_string();
        let negated_id = self.new_formula(&negate(&label));
        self.contraries[id].push(negated_id);
        if !self.contraries[negated_id].contains(&id) {
            self.contraries[negated_id].push(id);
        }
        negated_id
    }
}
