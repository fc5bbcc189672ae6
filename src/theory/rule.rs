use crate::theory::Formula;
use crate::theory::Language;

/// The kind of an inference rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleKind {
    /// A rule whose conclusion cannot be questioned once its antecedents hold.
    Strict,
    /// A rule that holds in the typical case and may be undercut or rebutted.
    Defeasible,
}

pub(crate) struct RuleIds {
    pub(crate) label: usize,
    pub(crate) antecedents: Vec<usize>,
    pub(crate) consequent: usize,
    pub(crate) kind: RuleKind,
}

/// A rule of a structured argumentation theory.
///
/// The rule identifier is itself a formula of the language, so that the
/// applicability of the rule can be denied by concluding its contrary.
pub struct Rule<'a> {
    pub(crate) ids: &'a RuleIds,
    pub(crate) language: &'a Language,
}

impl<'a> Rule<'a> {
    /// Returns the formula naming the rule.
    pub fn label(&self) -> &Formula {
        self.language.get_formula_by_id(self.ids.label)
    }

    /// Returns the kind of the rule.
    pub fn kind(&self) -> RuleKind {
        self.ids.kind
    }

    /// Returns the consequent of the rule.
    pub fn consequent(&self) -> &Formula {
        self.language.get_formula_by_id(self.ids.consequent)
    }

    /// Returns an iterator to the antecedents of the rule, in declaration order.
    pub fn iter_antecedents(&self) -> impl Iterator<Item = &Formula> + '_ {
        self.ids
            .antecedents
            .iter()
            .map(|i| self.language.get_formula_by_id(*i))
    }

    pub(crate) fn label_id(&self) -> usize {
        self.ids.label
    }

    pub(crate) fn antecedent_ids(&self) -> &[usize] {
        &self.ids.antecedents
    }

    pub(crate) fn consequent_id(&self) -> usize {
        self.ids.consequent
    }

    /// Returns the rule as an owned, string-level [RuleSpec].
    pub fn to_spec(&self) -> RuleSpec {
        RuleSpec {
            id: self.label().label().to_string(),
            antecedents: self
                .iter_antecedents()
                .map(|f| f.label().to_string())
                .collect(),
            consequent: self.consequent().label().to_string(),
            kind: self.ids.kind,
        }
    }
}

/// An owned, string-level description of a rule.
///
/// [RuleSpec] values stand on their own, outside any theory. They are the
/// currency of the transposition closure operations, which may produce rules
/// over formulas that are not interned anywhere yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleSpec {
    /// The rule identifier.
    pub id: String,
    /// The antecedent formulas, in order.
    pub antecedents: Vec<String>,
    /// The consequent formula.
    pub consequent: String,
    /// The kind of the rule.
    pub kind: RuleKind,
}

impl RuleSpec {
    /// Builds a strict rule specification.
    pub fn strict(id: &str, antecedents: &[&str], consequent: &str) -> Self {
        Self::new(id, antecedents, consequent, RuleKind::Strict)
    }

    /// Builds a defeasible rule specification.
    pub fn defeasible(id: &str, antecedents: &[&str], consequent: &str) -> Self {
        Self::new(id, antecedents, consequent, RuleKind::Defeasible)
    }

    fn new(id: &str, antecedents: &[&str], consequent: &str, kind: RuleKind) -> Self {
        RuleSpec {
            id: id.to_string(),
            antecedents: antecedents.iter().map(|a| a.to_string()).collect(),
            consequent: consequent.to_string(),
            kind,
        }
    }
}
