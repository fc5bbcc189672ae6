//! A module containing the material needed to check the rationality postulates
//! on a theory.

mod consistency;
pub use consistency::check_axiom_consistency;
pub use consistency::strict_closure;
pub use consistency::ConsistencyViolation;

mod transposition;
pub use transposition::apply_transposition_closure;
pub use transposition::close_under_transposition;
pub use transposition::generate_transpositions;
pub use transposition::validate_transposition_closure;
pub use transposition::MissingTransposition;
pub use transposition::TranspositionValidation;

mod well_formedness;
pub use well_formedness::check_well_formedness;
pub use well_formedness::WellFormednessIssue;
pub use well_formedness::WellFormednessViolation;
