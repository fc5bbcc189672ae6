//! A module containing the material needed to build and evaluate arguments from a theory.

mod analysis;
pub use analysis::analyze;
pub use analysis::analyze_with_arena;
pub use analysis::AnalysisStats;
pub use analysis::TheoryAnalysis;

mod arguments;
pub use arguments::construct_arguments;
pub use arguments::ArgumentArena;
pub use arguments::StructuredArgument;

mod attacks;
pub use attacks::compute_attacks;
pub use attacks::attacks_between;
pub use attacks::Attack;
pub use attacks::AttackKind;

mod critical_questions;
pub use critical_questions::project_critical_question;
pub use critical_questions::projection_report;
pub use critical_questions::successful_attacks;
pub use critical_questions::ChallengeScope;
pub use critical_questions::CqProjection;
pub use critical_questions::CriticalQuestion;

mod defeats;
pub use defeats::compute_defeats;
pub use defeats::Defeat;

mod semantics;
pub use semantics::grounded_labelling;
pub use semantics::GroundedLabelling;
pub use semantics::JustificationStatus;
