use crate::engine::{ArgumentArena, Attack, AttackKind};
use crate::theory::{FormulaRole, RuleKind, StructuredTheory};
use log::debug;
use strum_macros::{Display, EnumString};

/// The part of an argument a critical question challenges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
pub enum ChallengeScope {
    /// The question doubts one of the ordinary premises.
    #[strum(serialize = "premise")]
    Premise,
    /// The question doubts the applicability of a defeasible inference step.
    #[strum(serialize = "inference")]
    Inference,
    /// The question doubts the conclusion itself.
    #[strum(serialize = "conclusion")]
    Conclusion,
}

/// A critical question attached to an argumentation scheme instance.
///
/// Posing the question against an argument projects it onto a synthesized
/// counter-argument and an attack of the matching kind.
#[derive(Clone, Debug)]
pub struct CriticalQuestion {
    key: String,
    text: String,
    scope: ChallengeScope,
    premise_index: Option<usize>,
    rule_label: Option<String>,
}

impl CriticalQuestion {
    /// Builds a new critical question with the given key, display text and scope.
    pub fn new(key: &str, text: &str, scope: ChallengeScope) -> Self {
        CriticalQuestion {
            key: key.to_string(),
            text: text.to_string(),
            scope,
            premise_index: None,
            rule_label: None,
        }
    }

    /// Points the question at the premise with the given index instead of the
    /// first one.
    pub fn with_premise_index(mut self, index: usize) -> Self {
        self.premise_index = Some(index);
        self
    }

    /// Points the question at the defeasible rule with the given identifier
    /// instead of the top rule.
    pub fn with_rule_label(mut self, label: &str) -> Self {
        self.rule_label = Some(label.to_string());
        self
    }

    /// Returns the key of the question.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the display text of the question.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the scope of the question.
    pub fn scope(&self) -> ChallengeScope {
        self.scope
    }
}

/// The result of projecting a critical question onto an argument.
///
/// A failed projection carries no attack but a reason; failure is part of the
/// normal workflow, not an error.
#[derive(Clone, Debug)]
pub struct CqProjection {
    question: String,
    target: usize,
    attacker: Option<usize>,
    attack: Option<Attack>,
    reason: String,
}

impl CqProjection {
    /// Returns the key of the projected question.
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Returns the identifier of the challenged argument.
    pub fn target(&self) -> usize {
        self.target
    }

    /// Returns the identifier of the synthesized counter-argument, if any.
    pub fn attacker(&self) -> Option<usize> {
        self.attacker
    }

    /// Returns the projected attack, if the projection succeeded.
    pub fn attack(&self) -> Option<&Attack> {
        self.attack.as_ref()
    }

    /// Returns `true` if the question projected onto an attack.
    pub fn is_successful(&self) -> bool {
        self.attack.is_some()
    }

    /// Returns the reason explaining the outcome of the projection.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    fn failure(question: &CriticalQuestion, target: usize, reason: String) -> Self {
        CqProjection {
            question: question.key.clone(),
            target,
            attacker: None,
            attack: None,
            reason,
        }
    }
}

/// Projects a critical question onto an argument of the arena.
///
/// The counter-argument is synthesized as a new leaf concluding the relevant
/// contrary, interning the contrary into the language when no contrary was
/// declared. The arena and the theory are grown accordingly.
///
/// # Panics
///
/// Panics if the identifier does not refer to an argument of the arena.
pub fn project_critical_question(
    question: &CriticalQuestion,
    target_id: usize,
    arena: &mut ArgumentArena,
    theory: &mut StructuredTheory,
) -> CqProjection {
    let projection = match question.scope {
        ChallengeScope::Premise => project_on_premise(question, target_id, arena, theory),
        ChallengeScope::Inference => project_on_inference(question, target_id, arena, theory),
        ChallengeScope::Conclusion => project_on_conclusion(question, target_id, arena, theory),
    };
    debug!(
        "critical question {} against argument {}: {}",
        question.key, target_id, projection.reason
    );
    projection
}

fn project_on_premise(
    question: &CriticalQuestion,
    target_id: usize,
    arena: &mut ArgumentArena,
    theory: &mut StructuredTheory,
) -> CqProjection {
    let premises = arena.get_argument_by_id(target_id).premise_ids().to_vec();
    let index = question.premise_index.unwrap_or(0);
    let premise = match premises.get(index) {
        Some(p) => *p,
        None => {
            return CqProjection::failure(
                question,
                target_id,
                format!("the argument has no premise at index {}", index),
            )
        }
    };
    let label = theory.language().get_formula_by_id(premise).label().to_string();
    if theory.role(premise) != FormulaRole::Premise {
        return CqProjection::failure(
            question,
            target_id,
            format!("{} is not an ordinary premise", label),
        );
    }
    let contrary = theory.contrary_or_negation(premise);
    let attacker = arena.intern_leaf(contrary);
    let attack = Attack {
        attacker,
        target: target_id,
        kind: AttackKind::Undermining { premise },
    };
    CqProjection {
        question: question.key.clone(),
        target: target_id,
        attacker: Some(attacker),
        attack: Some(attack),
        reason: format!("undermines the premise {}", label),
    }
}

fn project_on_inference(
    question: &CriticalQuestion,
    target_id: usize,
    arena: &mut ArgumentArena,
    theory: &mut StructuredTheory,
) -> CqProjection {
    let target = arena.get_argument_by_id(target_id);
    let defeasible_rules = target.defeasible_rule_ids().to_vec();
    let top_rule = target.top_rule_index();
    if defeasible_rules.is_empty() {
        return CqProjection::failure(
            question,
            target_id,
            "the argument has no defeasible rule to undercut".to_string(),
        );
    }
    let rule_index = match &question.rule_label {
        Some(label) => match defeasible_rules
            .iter()
            .find(|r| theory.get_rule_by_id(**r).label().label() == label)
        {
            Some(r) => *r,
            None => {
                return CqProjection::failure(
                    question,
                    target_id,
                    format!("the argument does not apply the defeasible rule {}", label),
                )
            }
        },
        None => top_rule
            .filter(|r| theory.get_rule_by_id(*r).kind() == RuleKind::Defeasible)
            .unwrap_or(defeasible_rules[0]),
    };
    let rule_formula = theory.get_rule_by_id(rule_index).label_id();
    let label = theory.get_rule_by_id(rule_index).label().label().to_string();
    let contrary = theory.contrary_or_negation(rule_formula);
    let attacker = arena.intern_leaf(contrary);
    let attack = Attack {
        attacker,
        target: target_id,
        kind: AttackKind::Undercutting { rule: rule_index },
    };
    CqProjection {
        question: question.key.clone(),
        target: target_id,
        attacker: Some(attacker),
        attack: Some(attack),
        reason: format!("undercuts the rule {}", label),
    }
}

fn project_on_conclusion(
    question: &CriticalQuestion,
    target_id: usize,
    arena: &mut ArgumentArena,
    theory: &mut StructuredTheory,
) -> CqProjection {
    let target = arena.get_argument_by_id(target_id);
    let conclusion = target.conclusion_id();
    if target.defeasible_rule_ids().is_empty() {
        return CqProjection::failure(
            question,
            target_id,
            "a strict argument cannot be rebutted".to_string(),
        );
    }
    let label = theory.language().get_formula_by_id(conclusion).label().to_string();
    let contrary = theory.contrary_or_negation(conclusion);
    let attacker = arena.intern_leaf(contrary);
    let attack = Attack {
        attacker,
        target: target_id,
        kind: AttackKind::Rebutting {
            sub_argument: target_id,
        },
    };
    CqProjection {
        question: question.key.clone(),
        target: target_id,
        attacker: Some(attacker),
        attack: Some(attack),
        reason: format!("rebuts the conclusion {}", label),
    }
}

/// Extracts the attacks of the successful projections.
pub fn successful_attacks(projections: &[CqProjection]) -> Vec<Attack> {
    projections
        .iter()
        .filter_map(|p| p.attack.clone())
        .collect()
}

/// Renders a textual report of a batch of projections.
pub fn projection_report(projections: &[CqProjection]) -> String {
    let successful = projections.iter().filter(|p| p.is_successful()).count();
    let mut report = format!(
        "{}/{} critical questions projected onto attacks",
        successful,
        projections.len()
    );
    for projection in projections.iter().filter(|p| !p.is_successful()) {
        report.push_str(&format!(
            "\n{} against argument {}: {}",
            projection.question, projection.target, projection.reason
        ));
    }
    report
}
