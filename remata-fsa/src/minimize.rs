//! DFA minimization: trimming plus Moore partition refinement.

use std::collections::HashMap;

use crate::{determinize::determinize, Automaton, StateId};

/// Returns the canonical minimal deterministic automaton for `a`'s
/// language: determinized, with unreachable and dead states removed (the
/// initial state always survives) and language-equivalent states merged.
///
/// The result carries no transitions to dead states; the empty language
/// minimizes to a single transition-free state.
pub fn minimize(a: Automaton) -> Automaton {
    let d = determinize(a);
    let trimmed = trim(d);
    refine(trimmed)
}

/// Drops states that are unreachable from the initial state or cannot
/// reach an accepting state, along with every transition into them.
fn trim(d: Automaton) -> Automaton {
    let n = d.states.len();

    let mut reachable = vec![false; n];
    let mut stack = vec![0];
    reachable[0] = true;
    while let Some(s) = stack.pop() {
        for t in &d.states[s].transitions {
            if !reachable[t.to] {
                reachable[t.to] = true;
                stack.push(t.to);
            }
        }
    }

    let mut incoming: Vec<Vec<StateId>> = vec![Vec::new(); n];
    for (s, state) in d.states.iter().enumerate() {
        for t in &state.transitions {
            incoming[t.to].push(s);
        }
    }
    let mut live = vec![false; n];
    let mut stack: Vec<StateId> = (0..n)
        .filter(|&s| reachable[s] && d.states[s].accept)
        .collect();
    for &s in &stack {
        live[s] = true;
    }
    while let Some(s) = stack.pop() {
        for &p in &incoming[s] {
            if reachable[p] && !live[p] {
                live[p] = true;
                stack.push(p);
            }
        }
    }

    let keep = |s: StateId| s == 0 || (reachable[s] && live[s]);
    let mut renumber = vec![usize::MAX; n];
    let mut kept = Vec::new();
    for s in 0..n {
        if keep(s) {
            renumber[s] = kept.len();
            kept.push(s);
        }
    }

    let mut result = Automaton::empty();
    result.states.clear();
    for &s in &kept {
        let mut state = d.states[s].clone();
        state.transitions.retain(|t| keep(t.to));
        for t in &mut state.transitions {
            t.to = renumber[t.to];
        }
        result.states.push(state);
    }
    result.set_deterministic(true);
    result
}

type Signature = Vec<(u32, u32, usize)>;

/// Moore refinement: states start partitioned by acceptance and split while
/// any two class members disagree on the class some range leads to.
fn refine(d: Automaton) -> Automaton {
    let n = d.states.len();
    let has_accept = d.states.iter().any(|s| s.accept);
    let has_reject = d.states.iter().any(|s| !s.accept);
    let (mut class_of, mut classes): (Vec<usize>, usize) = if has_accept && has_reject {
        (d.states.iter().map(|s| s.accept as usize).collect(), 2)
    } else {
        (vec![0; n], 1)
    };

    loop {
        let mut groups: HashMap<(usize, Signature), Vec<StateId>> = HashMap::new();
        for s in 0..n {
            groups
                .entry((class_of[s], signature(&d, s, &class_of)))
                .or_default()
                .push(s);
        }
        if groups.len() == classes {
            break;
        }
        classes = groups.len();
        for (next_class, (_, members)) in groups.into_iter().enumerate() {
            for s in members {
                class_of[s] = next_class;
            }
        }
    }

    // Rebuild one state per class, the initial state's class first. Class
    // ids are contiguous in 0..classes here.
    let mut order = vec![usize::MAX; classes];
    let mut representatives = Vec::with_capacity(classes);
    for s in 0..n {
        let c = class_of[s];
        if order[c] == usize::MAX {
            order[c] = representatives.len();
            representatives.push(s);
        }
    }

    let mut result = Automaton::empty();
    result.states.clear();
    for &rep in &representatives {
        let id = result.add_state(d.states[rep].accept);
        for (min, max, class) in signature(&d, rep, &class_of) {
            result.add_transition(id, min, max, order[class]);
        }
    }
    result.set_deterministic(true);
    result
}

/// The state's transition function as (range, class) entries, sorted and
/// with adjacent same-class ranges merged, so equal functions compare equal.
fn signature(d: &Automaton, s: StateId, class_of: &[usize]) -> Signature {
    let mut sig: Signature = d.states[s]
        .transitions
        .iter()
        .map(|t| (t.min, t.max, class_of[t.to]))
        .collect();
    sig.sort_unstable();
    let mut merged: Signature = Vec::with_capacity(sig.len());
    for (min, max, class) in sig {
        match merged.last_mut() {
            Some(last) if last.1 + 1 == min && last.2 == class => last.1 = max,
            _ => merged.push((min, max, class)),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops;

    #[test]
    fn merges_equivalent_branches() {
        // (ab|cb) — after 'a' and after 'c' the residual language is {b},
        // so those states merge.
        let a = minimize(ops::union(vec![
            Automaton::literal("ab"),
            Automaton::literal("cb"),
        ]));
        assert!(a.accepts("ab") && a.accepts("cb"));
        assert!(a.accepts("a") == false);
        // initial, shared middle, accept
        assert_eq!(a.state_count(), 3);
    }

    #[test]
    fn empty_language_is_one_state() {
        let a = minimize(ops::intersection(
            Automaton::literal("a"),
            Automaton::literal("b"),
        ));
        assert_eq!(a.state_count(), 1);
        assert!(a.accepts("") == false);
    }

    #[test]
    fn any_string_is_one_state() {
        let a = minimize(ops::repeat(Automaton::any_char()));
        assert_eq!(a.state_count(), 1);
        assert!(a.accepts("") && a.accepts("xyz"));
    }

    #[test]
    fn drops_dead_states_of_complement() {
        let a = minimize(ops::complement(Automaton::literal("a")));
        assert_eq!(a.state_count(), 3);
        assert!(a.accepts("") && a.accepts("b") && a.accepts("aa"));
        assert!(a.accepts("a") == false);
    }

    #[test]
    fn idempotent() {
        let once = minimize(ops::union(vec![
            Automaton::literal("ab"),
            Automaton::char_range('a', 'z'),
        ]));
        let twice = minimize(once.clone());
        assert_eq!(once.state_count(), twice.state_count());
        assert!(twice.accepts("ab") && twice.accepts("q"));
    }

    #[test]
    fn star_of_char_is_one_state() {
        let a = minimize(ops::repeat(Automaton::char('a')));
        assert_eq!(a.state_count(), 1);
        assert!(a.accepts("") && a.accepts("aaa"));
        assert!(a.accepts("b") == false);
    }
}
