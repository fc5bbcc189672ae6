//! Miscellaneous components used in the library.

mod fixpoint;
pub(crate) use fixpoint::monotone_fixpoint;
