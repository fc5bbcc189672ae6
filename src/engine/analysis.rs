use crate::engine::{
    compute_attacks, compute_defeats, construct_arguments, grounded_labelling, ArgumentArena,
    Attack, Defeat, GroundedLabelling, JustificationStatus,
};
use crate::theory::{PreferenceOrdering, StructuredTheory};
use log::info;

/// The result of the full evaluation pipeline applied to a theory.
pub struct TheoryAnalysis {
    arena: ArgumentArena,
    attacks: Vec<Attack>,
    defeats: Vec<Defeat>,
    labelling: GroundedLabelling,
}

impl TheoryAnalysis {
    /// Returns the constructed arguments.
    pub fn arena(&self) -> &ArgumentArena {
        &self.arena
    }

    /// Returns the attacks between the arguments.
    pub fn attacks(&self) -> &[Attack] {
        &self.attacks
    }

    /// Returns the attacks that succeeded as defeats.
    pub fn defeats(&self) -> &[Defeat] {
        &self.defeats
    }

    /// Returns the grounded labelling of the arguments.
    pub fn labelling(&self) -> &GroundedLabelling {
        &self.labelling
    }

    /// Returns the status of a formula, given as the best status of the
    /// arguments concluding it, or `None` if no argument concludes it.
    pub fn status_of_formula(&self, formula_id: usize) -> Option<JustificationStatus> {
        let mut best = None;
        for argument in self.arena.arguments_concluding(formula_id) {
            let status = self.labelling.status_of(argument);
            best = Some(match (best, status) {
                (_, JustificationStatus::In) | (Some(JustificationStatus::In), _) => {
                    JustificationStatus::In
                }
                (_, JustificationStatus::Undecided)
                | (Some(JustificationStatus::Undecided), _) => JustificationStatus::Undecided,
                _ => JustificationStatus::Out,
            });
        }
        best
    }

    /// Returns the size figures of the analysis.
    pub fn stats(&self) -> AnalysisStats {
        let (n_in, n_out, n_undecided) = self.labelling.counts();
        AnalysisStats {
            n_arguments: self.arena.len(),
            n_attacks: self.attacks.len(),
            n_defeats: self.defeats.len(),
            n_in,
            n_out,
            n_undecided,
            iterations: self.labelling.iterations(),
        }
    }
}

/// Size figures describing an analysis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnalysisStats {
    /// The number of constructed arguments.
    pub n_arguments: usize,
    /// The number of attacks.
    pub n_attacks: usize,
    /// The number of attacks that succeeded as defeats.
    pub n_defeats: usize,
    /// The number of accepted arguments.
    pub n_in: usize,
    /// The number of defeated arguments.
    pub n_out: usize,
    /// The number of undecided arguments.
    pub n_undecided: usize,
    /// The number of rounds needed to reach the grounded fixpoint.
    pub iterations: usize,
}

/// Evaluates a theory under the grounded semantics.
///
/// The pipeline constructs the arguments, computes the attacks between them,
/// filters the attacks through the preference ordering and labels the
/// surviving graph.
pub fn analyze(theory: &StructuredTheory, ordering: &PreferenceOrdering) -> TheoryAnalysis {
    let arena = construct_arguments(theory);
    let attacks = compute_attacks(&arena, theory);
    analyze_with_arena(arena, attacks, theory, ordering)
}

/// Evaluates an already built argument arena, typically after critical
/// questions added synthesized counter-arguments and attacks.
pub fn analyze_with_arena(
    arena: ArgumentArena,
    attacks: Vec<Attack>,
    theory: &StructuredTheory,
    ordering: &PreferenceOrdering,
) -> TheoryAnalysis {
    let defeats = compute_defeats(&attacks, &arena, theory, ordering);
    let labelling = grounded_labelling(arena.len(), &defeats);
    let (n_in, n_out, n_undecided) = labelling.counts();
    info!(
        "analyzed {} arguments ({} attacks, {} defeats): {} in, {} out, {} undecided",
        arena.len(),
        attacks.len(),
        defeats.len(),
        n_in,
        n_out,
        n_undecided
    );
    TheoryAnalysis {
        arena,
        attacks,
        defeats,
        labelling,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{
        project_critical_question, successful_attacks, ChallengeScope, CriticalQuestion,
    };
    use crate::theory::{Language, OrderingStrategy};

    fn tweety_theory() -> StructuredTheory {
        let language = Language::new_with_labels(&[
            "bird", "penguin", "flies", "¬flies", "r_fly", "r_nofly",
        ]);
        let mut theory = StructuredTheory::new_with_language(language);
        theory.new_premise("bird").unwrap();
        theory.new_premise("penguin").unwrap();
        theory.new_contrary("flies", "¬flies").unwrap();
        theory.new_contrary("¬flies", "flies").unwrap();
        theory.new_defeasible_rule("r_fly", &["bird"], "flies").unwrap();
        theory
            .new_defeasible_rule("r_nofly", &["penguin"], "¬flies")
            .unwrap();
        theory
    }

    #[test]
    fn test_analyze_tweety() {
        let theory = tweety_theory();
        let mut ordering = PreferenceOrdering::new(OrderingStrategy::LastLink);
        ordering.prefer_rule("r_nofly", "r_fly");
        let analysis = analyze(&theory, &ordering);
        let stats = analysis.stats();
        assert_eq!(4, stats.n_arguments);
        assert_eq!(2, stats.n_attacks);
        assert_eq!(1, stats.n_defeats);
        let flies = theory.language().get_formula("flies").unwrap().id();
        let not_flies = theory.language().get_formula("¬flies").unwrap().id();
        assert_eq!(
            Some(JustificationStatus::Out),
            analysis.status_of_formula(flies)
        );
        assert_eq!(
            Some(JustificationStatus::In),
            analysis.status_of_formula(not_flies)
        );
    }

    #[test]
    fn test_status_of_unconcluded_formula() {
        let theory = tweety_theory();
        let ordering = PreferenceOrdering::new(OrderingStrategy::LastLink);
        let analysis = analyze(&theory, &ordering);
        let r_fly = theory.language().get_formula("r_fly").unwrap().id();
        assert_eq!(None, analysis.status_of_formula(r_fly));
    }

    #[test]
    fn test_analyze_with_projected_questions() {
        let mut theory = tweety_theory();
        let mut arena = construct_arguments(&theory);
        let mut attacks = compute_attacks(&arena, &theory);
        let flies = theory.language().get_formula("flies").unwrap().id();
        let target = arena.arguments_concluding(flies)[0];
        let cq = CriticalQuestion::new(
            "cq_exception",
            "Does an exception apply?",
            ChallengeScope::Inference,
        );
        let projections =
            vec![project_critical_question(&cq, target, &mut arena, &mut theory)];
        attacks.append(&mut successful_attacks(&projections));
        let ordering = PreferenceOrdering::new(OrderingStrategy::LastLink);
        let analysis = analyze_with_arena(arena, attacks, &theory, &ordering);
        // the undercut always defeats, so flies can no longer stay undecided
        assert_eq!(
            Some(JustificationStatus::Out),
            analysis.status_of_formula(flies)
        );
    }
}
