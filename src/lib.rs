//! Sargo is a Structured ARGumentation engine implementing the ASPIC+ framework.
//!
//! The crate is split in three layers:
//!
//! * [`theory`] holds the static material: the language of formulas, the
//!   contrariness relation, the knowledge base roles (axioms, ordinary
//!   premises, assumptions), the strict and defeasible rules, and the
//!   preference orderings;
//! * [`engine`] builds arguments from a theory, computes the attack and
//!   defeat relations, and evaluates acceptance under grounded semantics;
//! * [`postulates`] checks the rationality postulates a theory must satisfy
//!   (axiom consistency, well-formedness of contraries, closure of the
//!   strict rules under transposition).

#![warn(missing_docs)]

pub mod engine;

pub mod postulates;

pub mod theory;

pub(crate) mod utils;
