/*!
Finite-state automata over Unicode code points.

An [`Automaton`] is a set of states connected by transitions labelled with
inclusive code point ranges. State `0` is always the initial state. Epsilon
transitions may appear while an automaton is being composed by the
[`ops`] combinators; [`ops::determinize`] eliminates them and
[`ops::minimize`] produces the canonical minimal form with no transitions
to dead states.

## Example
```
use remata_fsa::{ops, Automaton};

let a = ops::union(vec![Automaton::literal("ab"), Automaton::literal("cd")]);
let a = ops::minimize(a);
assert!(a.accepts("ab"));
assert!(a.accepts("cd"));
assert!(a.accepts("ad") == false);
```

The alphabet is `0..=0x10FFFF`. The surrogate range is carried inertly:
no `char` fed to [`Automaton::accepts`] can land in it, so range arithmetic
(complement in particular) never needs to special-case the gap.
*/

use std::collections::BTreeSet;

mod determinize;
mod minimize;
pub mod ops;
mod primitives;

/// Index of a state in its [`Automaton`].
pub type StateId = usize;

/// Lowest code point of the alphabet.
pub const MIN_CODE_POINT: u32 = 0;
/// Highest code point of the alphabet.
pub const MAX_CODE_POINT: u32 = 0x10FFFF;

/// A transition on an inclusive code point range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Transition {
    pub min: u32,
    pub max: u32,
    pub to: StateId,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct State {
    pub accept: bool,
    /// Range transitions. Sorted and disjoint iff the automaton is
    /// deterministic.
    pub transitions: Vec<Transition>,
    /// Transient epsilon edges, only present between composition and
    /// determinization.
    pub epsilons: Vec<StateId>,
}

/// A finite-state automaton over Unicode code points.
///
/// State `0` is the initial state. `Clone` is a deep copy: two clones share
/// no state whatsoever.
#[derive(Debug, Clone)]
pub struct Automaton {
    pub(crate) states: Vec<State>,
    deterministic: bool,
}

impl Automaton {
    /// The automaton of the empty language: a single non-accepting state.
    pub fn empty() -> Self {
        Automaton {
            states: vec![State::default()],
            deterministic: true,
        }
    }

    /// The automaton accepting exactly the empty string.
    pub fn empty_string() -> Self {
        let mut a = Self::empty();
        a.states[0].accept = true;
        a
    }

    /// Whether this automaton is known to be deterministic: no epsilon
    /// edges, and per-state transitions sorted and disjoint.
    pub fn is_deterministic(&self) -> bool {
        self.deterministic
    }

    /// Number of states, counting unreachable ones.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Tests `input` for membership by state-set simulation, so it works
    /// on deterministic and nondeterministic automata alike.
    pub fn accepts(&self, input: &str) -> bool {
        let mut current: BTreeSet<StateId> = BTreeSet::from([0]);
        self.close_epsilon(&mut current);
        for c in input.chars() {
            let cp = c as u32;
            let mut next = BTreeSet::new();
            for &s in &current {
                for t in &self.states[s].transitions {
                    if t.min <= cp && cp <= t.max {
                        next.insert(t.to);
                    }
                }
            }
            if next.is_empty() {
                return false;
            }
            self.close_epsilon(&mut next);
            current = next;
        }
        current.iter().any(|&s| self.states[s].accept)
    }

    pub(crate) fn add_state(&mut self, accept: bool) -> StateId {
        self.states.push(State {
            accept,
            ..State::default()
        });
        self.states.len() - 1
    }

    pub(crate) fn add_transition(&mut self, from: StateId, min: u32, max: u32, to: StateId) {
        debug_assert!(min <= max && max <= MAX_CODE_POINT);
        self.states[from].transitions.push(Transition { min, max, to });
    }

    pub(crate) fn add_epsilon(&mut self, from: StateId, to: StateId) {
        self.states[from].epsilons.push(to);
        self.deterministic = false;
    }

    pub(crate) fn set_deterministic(&mut self, deterministic: bool) {
        self.deterministic = deterministic;
    }

    /// Copies `other`'s states onto the end of `self`, rewriting its state
    /// ids. Returns the id `other`'s initial state ended up at.
    pub(crate) fn append(&mut self, other: Automaton) -> StateId {
        // The appended states may carry epsilon edges even if the caller
        // adds none of its own.
        self.deterministic = self.deterministic && other.deterministic;
        let offset = self.states.len();
        for mut s in other.states {
            for t in &mut s.transitions {
                t.to += offset;
            }
            for e in &mut s.epsilons {
                *e += offset;
            }
            self.states.push(s);
        }
        offset
    }

    /// Extends `set` with everything reachable over epsilon edges.
    pub(crate) fn close_epsilon(&self, set: &mut BTreeSet<StateId>) {
        let mut stack: Vec<StateId> = set.iter().copied().collect();
        while let Some(s) = stack.pop() {
            for &e in &self.states[s].epsilons {
                if set.insert(e) {
                    stack.push(e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_accepts_nothing() {
        let a = Automaton::empty();
        assert!(a.accepts("") == false);
        assert!(a.accepts("a") == false);
    }

    #[test]
    fn empty_string_accepts_only_empty() {
        let a = Automaton::empty_string();
        assert!(a.accepts(""));
        assert!(a.accepts("a") == false);
    }

    #[test]
    fn epsilon_closure_is_transitive() {
        let mut a = Automaton::empty();
        let s1 = a.add_state(false);
        let s2 = a.add_state(true);
        a.add_epsilon(0, s1);
        a.add_epsilon(s1, s2);

        let mut set = BTreeSet::from([0]);
        a.close_epsilon(&mut set);
        assert_eq!(set, BTreeSet::from([0, s1, s2]));
        assert!(a.accepts(""));
    }

    #[test]
    fn simulation_follows_ranges() {
        let mut a = Automaton::empty();
        let s1 = a.add_state(true);
        a.add_transition(0, 'a' as u32, 'z' as u32, s1);
        assert!(a.accepts("m"));
        assert!(a.accepts("A") == false);
        assert!(a.accepts("mm") == false);
    }
}
