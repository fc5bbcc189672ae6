//! A module containing the material needed to describe ASPIC+ argumentation theories.

mod language;
pub use language::Formula;
pub use language::Language;

mod negation;
pub use negation::negate;

mod preferences;
pub use preferences::OrderingStrategy;
pub use preferences::PreferenceOrdering;

mod rule;
pub use rule::Rule;
pub use rule::RuleKind;
pub use rule::RuleSpec;

mod theory;
pub(crate) use theory::FormulaRole;
pub use theory::StructuredTheory;
