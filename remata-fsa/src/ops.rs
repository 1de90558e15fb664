//! The Kleene operations: union, concatenation, optional, repetition,
//! intersection and complement, plus [`determinize`] and [`minimize`].
//!
//! Combinators take their operands by value. Composition may introduce
//! epsilon edges; [`determinize`] (and therefore [`minimize`]) removes
//! them again. Callers that need a canonical result run [`minimize`] last.

use std::collections::HashMap;

use crate::{Automaton, StateId, MAX_CODE_POINT};

pub use crate::{determinize::determinize, minimize::minimize};

/// Accepts a string iff any operand accepts it. An empty operand list
/// yields the empty language.
pub fn union(operands: Vec<Automaton>) -> Automaton {
    let mut result = Automaton::empty();
    for a in operands {
        let initial = result.append(a);
        result.add_epsilon(0, initial);
    }
    result
}

/// Accepts the concatenations `s1 s2 … sn` with each `si` accepted by the
/// i-th operand. An empty operand list yields the empty-string automaton.
pub fn concatenate(operands: Vec<Automaton>) -> Automaton {
    let mut operands = operands.into_iter();
    let Some(mut result) = operands.next() else {
        return Automaton::empty_string();
    };
    for a in operands {
        let initial = result.append(a);
        // Every accepting state built so far hands over to the appended
        // operand instead of accepting.
        for s in 0..initial {
            if result.states[s].accept {
                result.states[s].accept = false;
                result.add_epsilon(s, initial);
            }
        }
    }
    result
}

/// Accepts what `a` accepts, and the empty string.
pub fn optional(a: Automaton) -> Automaton {
    let mut result = Automaton::empty_string();
    let initial = result.append(a);
    result.add_epsilon(0, initial);
    result
}

/// Kleene star: zero or more strings of `a`, concatenated.
pub fn repeat(a: Automaton) -> Automaton {
    let mut result = Automaton::empty_string();
    let initial = result.append(a);
    result.add_epsilon(0, initial);
    for s in initial..result.states.len() {
        if result.states[s].accept {
            result.add_epsilon(s, 0);
        }
    }
    result
}

/// `min` or more strings of `a`, concatenated.
pub fn repeat_min(a: Automaton, min: u32) -> Automaton {
    let mut operands = Vec::with_capacity(min as usize + 1);
    for _ in 0..min {
        operands.push(a.clone());
    }
    operands.push(repeat(a));
    concatenate(operands)
}

/// Between `min` and `max` strings of `a`, concatenated.
///
/// `max < min` yields the empty language; `min == max == 0` yields the
/// empty-string automaton.
pub fn repeat_range(a: Automaton, min: u32, max: u32) -> Automaton {
    if max < min {
        return Automaton::empty();
    }
    let mut operands = Vec::with_capacity(max as usize);
    for _ in 0..min {
        operands.push(a.clone());
    }
    for _ in min..max {
        operands.push(optional(a.clone()));
    }
    concatenate(operands)
}

/// Accepts a string iff both operands accept it, by product construction
/// over the determinized operands.
pub fn intersection(a: Automaton, b: Automaton) -> Automaton {
    let a = determinize(a);
    let b = determinize(b);

    let mut result = Automaton::empty();
    result.states[0].accept = a.states[0].accept && b.states[0].accept;
    let mut pairs: HashMap<(StateId, StateId), StateId> = HashMap::from([((0, 0), 0)]);
    let mut work = vec![(0, 0, 0)];

    while let Some((s1, s2, id)) = work.pop() {
        for t1 in &a.states[s1].transitions {
            for t2 in &b.states[s2].transitions {
                let min = t1.min.max(t2.min);
                let max = t1.max.min(t2.max);
                if min > max {
                    continue;
                }
                let to = match pairs.get(&(t1.to, t2.to)) {
                    Some(&to) => to,
                    None => {
                        let to = result
                            .add_state(a.states[t1.to].accept && b.states[t2.to].accept);
                        pairs.insert((t1.to, t2.to), to);
                        work.push((t1.to, t2.to, to));
                        to
                    }
                };
                result.add_transition(id, min, max, to);
            }
        }
    }
    // Pairwise overlaps of two deterministic transition sets are disjoint.
    result.set_deterministic(true);
    result
}

/// Accepts exactly the strings `a` rejects.
///
/// Determinizes, totalizes with a sink over the whole alphabet, and flips
/// acceptance. The caller minimizes if dead states matter.
pub fn complement(a: Automaton) -> Automaton {
    let mut d = determinize(a);
    totalize(&mut d);
    for s in &mut d.states {
        s.accept = !s.accept;
    }
    d
}

/// Gives every state an outgoing transition for every code point, routing
/// uncovered ranges to a fresh sink state.
fn totalize(d: &mut Automaton) {
    let sink = d.add_state(false);
    d.add_transition(sink, 0, MAX_CODE_POINT, sink);
    for s in 0..sink {
        let mut transitions = std::mem::take(&mut d.states[s].transitions);
        transitions.sort_by_key(|t| t.min);
        let mut filled = Vec::with_capacity(transitions.len() * 2);
        let mut next = 0;
        for t in transitions {
            if t.min > next {
                filled.push(crate::Transition {
                    min: next,
                    max: t.min - 1,
                    to: sink,
                });
            }
            next = t.max + 1;
            filled.push(t);
        }
        if next <= MAX_CODE_POINT {
            filled.push(crate::Transition {
                min: next,
                max: MAX_CODE_POINT,
                to: sink,
            });
        }
        d.states[s].transitions = filled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_of_literals() {
        let a = union(vec![Automaton::literal("ab"), Automaton::literal("cd")]);
        assert!(a.accepts("ab") && a.accepts("cd"));
        assert!(a.accepts("ad") == false);
        assert!(a.accepts("") == false);
    }

    #[test]
    fn union_of_nothing() {
        let a = union(Vec::new());
        assert!(a.accepts("") == false);
    }

    #[test]
    fn concatenation() {
        let a = concatenate(vec![
            Automaton::literal("ab"),
            Automaton::char('c'),
            Automaton::literal("de"),
        ]);
        assert!(a.accepts("abcde"));
        assert!(a.accepts("abde") == false);

        assert!(concatenate(Vec::new()).accepts(""));
    }

    #[test]
    fn concatenation_with_empty_language() {
        let a = concatenate(vec![Automaton::literal("a"), Automaton::empty()]);
        assert!(a.accepts("a") == false);
        assert!(a.accepts("") == false);
    }

    #[test]
    fn optional_accepts_empty() {
        let a = optional(Automaton::literal("ab"));
        assert!(a.accepts("") && a.accepts("ab"));
        assert!(a.accepts("abab") == false);
    }

    #[test]
    fn star() {
        let a = repeat(Automaton::literal("ab"));
        assert!(a.accepts("") && a.accepts("ab") && a.accepts("ababab"));
        assert!(a.accepts("aba") == false);
    }

    #[test]
    fn repeat_with_minimum() {
        let a = repeat_min(Automaton::char('a'), 2);
        assert!(a.accepts("aa") && a.accepts("aaaa"));
        assert!(a.accepts("a") == false);

        let a = repeat_min(Automaton::char('a'), 0);
        assert!(a.accepts("") && a.accepts("aaa"));
    }

    #[test]
    fn repeat_bounded() {
        let a = repeat_range(Automaton::char('a'), 1, 3);
        assert!(a.accepts("a") && a.accepts("aa") && a.accepts("aaa"));
        assert!(a.accepts("") == false);
        assert!(a.accepts("aaaa") == false);
    }

    #[test]
    fn repeat_zero_zero_is_empty_string() {
        let a = repeat_range(Automaton::char('a'), 0, 0);
        assert!(a.accepts(""));
        assert!(a.accepts("a") == false);
    }

    #[test]
    fn repeat_reversed_bounds_is_empty_language() {
        let a = repeat_range(Automaton::char('a'), 3, 1);
        assert!(a.accepts("") == false);
        assert!(a.accepts("a") == false);
        assert!(a.accepts("aa") == false);
    }

    #[test]
    fn intersection_of_overlapping_ranges() {
        let a = intersection(Automaton::char_range('a', 'm'), Automaton::char_range('g', 'z'));
        assert!(a.accepts("g") && a.accepts("j") && a.accepts("m"));
        assert!(a.accepts("f") == false);
        assert!(a.accepts("n") == false);
    }

    #[test]
    fn intersection_disjoint_is_empty() {
        let a = intersection(Automaton::literal("ab"), Automaton::literal("cd"));
        assert!(a.accepts("ab") == false);
        assert!(a.accepts("cd") == false);
    }

    #[test]
    fn complement_of_literal() {
        let a = complement(Automaton::literal("a"));
        assert!(a.accepts("a") == false);
        assert!(a.accepts(""));
        assert!(a.accepts("b"));
        assert!(a.accepts("aa"));
        assert!(a.accepts("𝕊"));
    }

    #[test]
    fn complement_twice_restores_language() {
        let a = complement(complement(Automaton::literal("ab")));
        assert!(a.accepts("ab"));
        assert!(a.accepts("") == false);
        assert!(a.accepts("abc") == false);
    }

    #[test]
    fn complement_of_empty_is_any_string() {
        let a = complement(Automaton::empty());
        assert!(a.accepts("") && a.accepts("anything"));
    }
}
