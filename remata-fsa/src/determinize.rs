//! Subset construction.

use std::collections::{BTreeSet, HashMap};

use crate::{Automaton, StateId, MAX_CODE_POINT};

/// Returns an equivalent deterministic automaton: no epsilon edges, and
/// per-state transitions sorted and disjoint.
///
/// Each subset of source states becomes one output state. Transition labels
/// are split at every range boundary occurring in the subset, so every
/// emitted range maps to a constant destination subset.
pub fn determinize(a: Automaton) -> Automaton {
    if a.is_deterministic() {
        return a;
    }

    let mut initial = BTreeSet::from([0]);
    a.close_epsilon(&mut initial);

    let mut result = Automaton::empty();
    result.states[0].accept = accepts_any(&a, &initial);
    let mut subsets: HashMap<BTreeSet<StateId>, StateId> = HashMap::new();
    let mut work = vec![(initial.clone(), 0)];
    subsets.insert(initial, 0);

    let mut points = Vec::new();
    while let Some((subset, id)) = work.pop() {
        // Boundaries: every range start, and the point after every range
        // end. Between two consecutive boundaries the reachable subset is
        // constant.
        points.clear();
        for &s in &subset {
            for t in &a.states[s].transitions {
                points.push(t.min);
                if t.max < MAX_CODE_POINT {
                    points.push(t.max + 1);
                }
            }
        }
        points.sort_unstable();
        points.dedup();

        for (i, &min) in points.iter().enumerate() {
            let max = match points.get(i + 1) {
                Some(&next) => next - 1,
                None => MAX_CODE_POINT,
            };
            let mut dest = BTreeSet::new();
            for &s in &subset {
                for t in &a.states[s].transitions {
                    if t.min <= min && min <= t.max {
                        dest.insert(t.to);
                    }
                }
            }
            if dest.is_empty() {
                continue;
            }
            a.close_epsilon(&mut dest);
            let to = match subsets.get(&dest) {
                Some(&to) => to,
                None => {
                    let to = result.add_state(accepts_any(&a, &dest));
                    work.push((dest.clone(), to));
                    subsets.insert(dest, to);
                    to
                }
            };
            result.add_transition(id, min, max, to);
        }
    }

    result.set_deterministic(true);
    result
}

fn accepts_any(a: &Automaton, subset: &BTreeSet<StateId>) -> bool {
    subset.iter().any(|&s| a.states[s].accept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops;

    #[test]
    fn removes_epsilons_and_preserves_language() {
        let nfa = ops::union(vec![
            Automaton::literal("ab"),
            Automaton::literal("ac"),
            Automaton::char_range('x', 'z'),
        ]);
        assert!(nfa.is_deterministic() == false);

        let dfa = determinize(nfa);
        assert!(dfa.is_deterministic());
        assert!(dfa.accepts("ab") && dfa.accepts("ac") && dfa.accepts("y"));
        assert!(dfa.accepts("a") == false);
        assert!(dfa.accepts("w") == false);
    }

    #[test]
    fn splits_overlapping_ranges() {
        let nfa = ops::union(vec![
            Automaton::char_range('a', 'm'),
            Automaton::char_range('g', 'z'),
        ]);
        let dfa = determinize(nfa);
        for s in &dfa.states {
            let mut sorted = s.transitions.clone();
            sorted.sort_by_key(|t| t.min);
            for pair in sorted.windows(2) {
                assert!(pair[0].max < pair[1].min);
            }
        }
        assert!(dfa.accepts("a") && dfa.accepts("j") && dfa.accepts("z"));
    }

    #[test]
    fn deterministic_input_is_returned_unchanged() {
        let dfa = Automaton::literal("abc");
        let before = dfa.state_count();
        let dfa = determinize(dfa);
        assert_eq!(dfa.state_count(), before);
    }

    #[test]
    fn empty_language_stays_empty() {
        let dfa = determinize(ops::union(vec![Automaton::empty(), Automaton::empty()]));
        assert!(dfa.accepts("") == false);
        assert!(dfa.accepts("a") == false);
    }
}
