/*!
An extended regular-expression compiler producing minimal deterministic
automata.

## Features
- The classical core: union, concatenation, `?` `*` `+` `{n,m}`
  repetition, character classes, quoted literals and grouping.
- Six independently switchable extensions ([`SyntaxFlags`]): intersection
  (`&`), complement (`~`), the empty language (`#`), any-string (`@`),
  named automata (`<identifier>`) and numeric intervals (`<min-max>`).
- A canonical pretty printer: every [`Pattern`] prints to a form that
  reparses to the same language.
- Compilation through [`remata-fsa`](fsa): each construct lowers to an
  automaton construction, minimized along the way, so the result is a
  minimal deterministic automaton with no transitions to dead states.

## Usage
```
use remata::Pattern;

let pattern = Pattern::new("(ab|cd)*")?;
let automaton = pattern.compile().call()?;
assert!(automaton.accepts("abcdab"));
assert!(automaton.accepts("abc") == false);
# Ok::<(), Box<dyn std::error::Error>>(())
```

Extensions compose with the core:
```
use remata::Pattern;

// Strings of lowercase letters that do not contain "ab".
let pattern = Pattern::new("[a-z]*&~(@\"ab\"@)")?;
let automaton = pattern.compile().call()?;
assert!(automaton.accepts("azb"));
assert!(automaton.accepts("xaby") == false);
# Ok::<(), Box<dyn std::error::Error>>(())
```

Syntax and flag details live in [`syntax`]; resolution of `<name>`
references in [`compile`].
*/

pub mod compile;
pub mod syntax;

mod pattern;

pub use pattern::Pattern;
pub use syntax::SyntaxFlags;

pub use remata_fsa as fsa;

#[cfg(test)]
mod tests {
    use super::*;

    /// Print, reparse under ALL flags, and compare the two compiled
    /// languages on a set of probes.
    fn assert_round_trip(source: &str, probes: &[&str]) {
        let pattern = Pattern::new(source).unwrap();
        let reparsed = Pattern::new(&pattern.to_string()).unwrap();
        let before = pattern.compile().call().unwrap();
        let after = reparsed.compile().call().unwrap();
        for probe in probes {
            assert_eq!(
                before.accepts(probe),
                after.accepts(probe),
                "{source} vs {} on {probe:?}",
                pattern
            );
        }
    }

    #[test]
    fn print_parse_round_trip() {
        assert_round_trip("a|b", &["a", "b", "c", ""]);
        assert_round_trip("ab*c", &["ac", "abc", "abbbc", "abcc"]);
        assert_round_trip("[a-z]+", &["q", "quux", "Q", ""]);
        assert_round_trip("[^ab]", &["a", "c", "", "cc"]);
        assert_round_trip("~(ab)", &["ab", "a", "", "abc"]);
        assert_round_trip("(a|b){2,3}", &["", "a", "ba", "aab", "abab"]);
        assert_round_trip("<5-12>", &["4", "5", "12", "13", "05"]);
        assert_round_trip("<05-12>", &["04", "05", "12", "5"]);
        assert_round_trip("a&.", &["a", "b", ""]);
        assert_round_trip("#|a", &["a", "", "b"]);
        assert_round_trip("@", &["", "whatever"]);
        assert_round_trip("\"a|b\"", &["a|b", "a", "b"]);
        assert_round_trip("𝕊.", &["𝕊x", "𝕊", "xx"]);
    }

    #[test]
    fn complement_matches_complemented_compile() {
        // ~a and the complement of a's automaton accept the same strings.
        let complemented = Pattern::with_flags("~a", SyntaxFlags::COMPLEMENT)
            .unwrap()
            .compile()
            .call()
            .unwrap();
        let direct = fsa::ops::complement(
            Pattern::new("a").unwrap().compile().call().unwrap(),
        );
        for probe in ["", "a", "b", "aa", "ab"] {
            assert_eq!(complemented.accepts(probe), direct.accepts(probe), "{probe}");
        }
    }

    #[test]
    fn flag_gated_input_is_literal_without_the_flag() {
        let strict = Pattern::new("a&b").unwrap();
        let plain = Pattern::with_flags("a&b", SyntaxFlags::empty()).unwrap();
        let strict = strict.compile().call().unwrap();
        let plain = plain.compile().call().unwrap();
        assert!(strict.accepts("a&b") == false);
        assert!(plain.accepts("a&b"));
        assert!(plain.accepts("a") == false);
    }

    #[test]
    fn empty_pattern_accepts_the_empty_string() {
        let automaton = Pattern::new("").unwrap().compile().call().unwrap();
        assert!(automaton.accepts(""));
        assert!(automaton.accepts("a") == false);

        let grouped = Pattern::new("()").unwrap().compile().call().unwrap();
        assert!(grouped.accepts(""));
        assert!(grouped.accepts("a") == false);
    }
}
