use log::debug;

/// Computes the least fixpoint of a monotone step function over a finite domain.
///
/// The domain elements are the indices from 0 to `domain_len - 1`; a set over the
/// domain is given as a membership vector. Starting from the empty set, the step
/// function is applied until the set is stable.
///
/// The caller must provide a monotone step function (adding elements to the input
/// never removes elements from the output), which guarantees termination after at
/// most `domain_len + 1` applications.
pub(crate) fn monotone_fixpoint<F>(domain_len: usize, mut step: F) -> (Vec<bool>, usize)
where
    F: FnMut(&[bool]) -> Vec<bool>,
{
    let mut current = vec![false; domain_len];
    let mut rounds = 0;
    loop {
        let next = step(&current);
        rounds += 1;
        if next == current {
            debug!("fixpoint reached after {} rounds", rounds);
            return (current, rounds);
        }
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_domain() {
        let (fix, rounds) = monotone_fixpoint(0, |_| vec![]);
        assert!(fix.is_empty());
        assert_eq!(1, rounds);
    }

    #[test]
    fn test_chain_closure() {
        // successor closure: 0 is in, i+1 joins when i is in
        let (fix, rounds) = monotone_fixpoint(4, |current| {
            let mut next = current.to_vec();
            next[0] = true;
            for i in 1..4 {
                if current[i - 1] {
                    next[i] = true;
                }
            }
            next
        });
        assert_eq!(vec![true; 4], fix);
        assert_eq!(5, rounds);
    }

    #[test]
    fn test_stable_from_start() {
        let (fix, rounds) = monotone_fixpoint(3, |current| current.to_vec());
        assert_eq!(vec![false; 3], fix);
        assert_eq!(1, rounds);
    }

    #[test]
    fn test_one_more_round_adds_nothing() {
        let step = |current: &[bool]| {
            let mut next = current.to_vec();
            next[0] = true;
            if current[0] {
                next[2] = true;
            }
            next
        };
        let (fix, _) = monotone_fixpoint(3, step);
        assert_eq!(fix, step(&fix));
    }
}
