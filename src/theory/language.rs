use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::fmt::Display;

/// Handles a formula of the language.
///
/// Each formula has a label and an identifier which are unique in a language.
/// This uniqueness condition imposes formulas are made from [Language] objects, and not directly by the [Formula] struct.
///
/// Formulas are plain text labels; the engine never looks inside them, except for
/// the symbolic negation helper which recognizes a leading negation sign.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Formula {
    id: usize,
    label: String,
}

impl Formula {
    /// Returns the label of the formula.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the id of the formula.
    pub fn id(&self) -> usize {
        self.id
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Handles the formulas that may be used in a structured argumentation theory.
///
/// Rule identifiers are part of the language too, since attacking the applicability
/// of a rule requires a formula standing for it.
///
/// # Example
///
/// ```
/// # use sargo::theory::Language;
/// let language = Language::new_with_labels(&["bird", "flies", "¬flies"]);
/// for (i, f) in language.iter().enumerate() {
///     assert_eq!(i, language.get_formula(f.label()).unwrap().id());
///     assert_eq!(f, language.get_formula_by_id(i));
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Language {
    formulas: Vec<Formula>,
    label_to_id: HashMap<String, usize>,
}

impl Language {
    /// Builds a new language given the labels of the formulas.
    ///
    /// Each formula will be assigned an id equal to its index in the provided slice of labels.
    /// If a label appears multiple times, the first occurrence is the only one that is considered.
    pub fn new_with_labels(labels: &[&str]) -> Self {
        let mut language = Language::default();
        for l in labels {
            language.new_formula(l);
        }
        language
    }

    /// Adds a formula to the language, returning its id.
    ///
    /// If the label is already present, the existing formula id is returned and
    /// nothing is added.
    ///
    /// # Example
    ///
    /// ```
    /// # use sargo::theory::Language;
    /// let mut language = Language::new_with_labels(&["a", "b"]);
    /// assert_eq!(2, language.new_formula("c"));
    /// assert_eq!(2, language.new_formula("c"));
    /// assert_eq!(3, language.len());
    /// ```
    pub fn new_formula(&mut self, label: &str) -> usize {
        if let Some(id) = self.label_to_id.get(label) {
            return *id;
        }
        let id = self.formulas.len();
        self.formulas.push(Formula {
            id,
            label: label.to_string(),
        });
        self.label_to_id.insert(label.to_string(), id);
        id
    }

    /// Returns the number of formulas in the language.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    /// Returns `true` iff the language has no formula.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    /// Returns the formula associated with a label.
    ///
    /// An error is returned if no formula corresponds to the provided label.
    pub fn get_formula(&self, label: &str) -> Result<&Formula> {
        self.label_to_id
            .get(label)
            .map(|i| &self.formulas[*i])
            .ok_or_else(|| anyhow!("no such formula: {}", label))
    }

    /// Returns the formula with the corresponding identifier.
    ///
    /// # Panics
    ///
    /// Panics if no formula has the corresponding identifier.
    pub fn get_formula_by_id(&self, id: usize) -> &Formula {
        &self.formulas[id]
    }

    /// Returns `true` iff a formula with the provided label exists.
    pub fn contains(&self, label: &str) -> bool {
        self.label_to_id.contains_key(label)
    }

    /// Provides an iterator to the formulas.
    pub fn iter(&self) -> impl Iterator<Item = &Formula> {
        self.formulas.iter()
    }
}
