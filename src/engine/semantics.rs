use crate::engine::Defeat;
use crate::utils::monotone_fixpoint;
use strum_macros::{Display, EnumString};

/// The justification status of an argument under the grounded semantics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
pub enum JustificationStatus {
    /// The argument belongs to the grounded extension.
    #[strum(serialize = "in")]
    In,
    /// The argument is defeated by the grounded extension.
    #[strum(serialize = "out")]
    Out,
    /// The argument is neither accepted nor defeated.
    #[strum(serialize = "undecided")]
    Undecided,
}

/// The grounded labelling of a set of arguments.
pub struct GroundedLabelling {
    statuses: Vec<JustificationStatus>,
    iterations: usize,
}

impl GroundedLabelling {
    /// Returns the status of an argument.
    ///
    /// # Panics
    ///
    /// Panics if the identifier does not refer to a labelled argument.
    pub fn status_of(&self, argument_id: usize) -> JustificationStatus {
        self.statuses[argument_id]
    }

    /// Returns the number of rounds the characteristic function was applied.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Iterates over the statuses, in argument identifier order.
    pub fn iter(&self) -> impl Iterator<Item = JustificationStatus> + '_ {
        self.statuses.iter().copied()
    }

    /// Returns the number of arguments labelled with each status, as a triple
    /// following the order of the enumeration.
    pub fn counts(&self) -> (usize, usize, usize) {
        self.statuses.iter().fold((0, 0, 0), |acc, s| match s {
            JustificationStatus::In => (acc.0 + 1, acc.1, acc.2),
            JustificationStatus::Out => (acc.0, acc.1 + 1, acc.2),
            JustificationStatus::Undecided => (acc.0, acc.1, acc.2 + 1),
        })
    }
}

/// Computes the grounded labelling of a set of arguments given the defeats
/// between them.
///
/// The accepted arguments form the least fixpoint of the characteristic
/// function; an argument is accepted as soon as all of its defeaters are
/// defeated by already accepted arguments. Defeated arguments are labelled out,
/// the remaining ones undecided.
pub fn grounded_labelling(n_arguments: usize, defeats: &[Defeat]) -> GroundedLabelling {
    let mut defeaters_of = vec![Vec::new(); n_arguments];
    for defeat in defeats {
        defeaters_of[defeat.target()].push(defeat.attacker());
    }
    let defeated_by = |accepted: &[bool]| {
        let mut out = vec![false; n_arguments];
        for defeat in defeats {
            if accepted[defeat.attacker()] {
                out[defeat.target()] = true;
            }
        }
        out
    };
    let (accepted, iterations) = monotone_fixpoint(n_arguments, |current| {
        let out = defeated_by(current);
        (0..n_arguments)
            .map(|id| defeaters_of[id].iter().all(|d| out[*d]))
            .collect()
    });
    let out = defeated_by(&accepted);
    let statuses = (0..n_arguments)
        .map(|id| {
            if accepted[id] {
                JustificationStatus::In
            } else if out[id] {
                JustificationStatus::Out
            } else {
                JustificationStatus::Undecided
            }
        })
        .collect();
    GroundedLabelling {
        statuses,
        iterations,
    }
}
