use std::collections::{BTreeSet, HashMap};
use std::fmt;

use bon::bon;
use remata_fsa::Automaton;

use crate::compile::{self, AutomatonProvider, CompileError};
use crate::syntax::{parse, Ast, ParseError, SyntaxFlags};

/// A parsed extended regular expression.
///
/// Parsing happens up front; a `Pattern` is immutable and can be printed,
/// inspected and compiled any number of times.
///
/// ## Example
/// ```
/// use remata::Pattern;
///
/// let pattern = Pattern::new("(ab|cd)*e{2,}")?;
/// let automaton = pattern.compile().call()?;
/// assert!(automaton.accepts("abcdee"));
/// assert!(automaton.accepts("ee"));
/// assert!(automaton.accepts("abe") == false);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// With named automata:
/// ```
/// use std::collections::HashMap;
/// use remata::{fsa::Automaton, Pattern};
///
/// let pattern = Pattern::new("<digit>+")?;
/// assert_eq!(pattern.identifiers().into_iter().collect::<Vec<_>>(), ["digit"]);
///
/// let bindings = HashMap::from([("digit".to_owned(), Automaton::char_range('0', '9'))]);
/// let automaton = pattern.compile().automata(&bindings).call()?;
/// assert!(automaton.accepts("2024"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    flags: SyntaxFlags,
    ast: Ast,
}

impl Pattern {
    /// Parses `source` with every optional production enabled.
    pub fn new(source: &str) -> Result<Self, ParseError> {
        Self::with_flags(source, SyntaxFlags::ALL)
    }

    /// Parses `source` accepting only the productions `flags` enables.
    pub fn with_flags(source: &str, flags: SyntaxFlags) -> Result<Self, ParseError> {
        let ast = parse(source, flags)?;
        Ok(Pattern {
            source: source.to_owned(),
            flags,
            ast,
        })
    }

    /// The source string this pattern was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The flag set the pattern was parsed under.
    pub fn flags(&self) -> SyntaxFlags {
        self.flags
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    pub fn into_ast(self) -> Ast {
        self.ast
    }

    /// Every name referenced through `<name>`, in sorted order.
    pub fn identifiers(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.ast.collect_identifiers(&mut names);
        names
    }
}

#[bon]
impl Pattern {
    /// Compiles the pattern into a deterministic automaton.
    ///
    /// Named references are resolved from `automata` first, then from
    /// `provider`; both are optional. The result of every non-leaf
    /// construction is minimized along the way.
    ///
    /// ```
    /// use remata::Pattern;
    ///
    /// let automaton = Pattern::new("[0-9]{2}:[0-9]{2}")?.compile().call()?;
    /// assert!(automaton.accepts("09:41"));
    /// assert!(automaton.accepts("9:41") == false);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[builder]
    pub fn compile(
        &self,
        /// Automata bound by name, consulted first. The bound automata are
        /// cloned on use; later mutations of the map cannot affect
        /// previously compiled results.
        automata: Option<&HashMap<String, Automaton>>,
        /// Fallback source for names absent from `automata`.
        provider: Option<&dyn AutomatonProvider>,
    ) -> Result<Automaton, CompileError> {
        compile::lower(&self.ast, automata, provider)
    }
}

impl fmt::Display for Pattern {
    /// The canonical surface form; see [`Ast`]'s `Display`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.ast.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_form() {
        assert_eq!(Pattern::new("a|b").unwrap().to_string(), r"(\a|\b)");
        assert_eq!(Pattern::new("abc").unwrap().to_string(), "\"abc\"");
    }

    #[test]
    fn accessors() {
        let pattern = Pattern::with_flags("a<b", SyntaxFlags::empty()).unwrap();
        assert_eq!(pattern.source(), "a<b");
        assert_eq!(pattern.flags(), SyntaxFlags::empty());
        assert_eq!(pattern.ast(), &Ast::literal("a<b"));
    }

    #[test]
    fn identifiers_are_sorted_and_deduplicated() {
        let pattern = Pattern::new("<b><a><b>").unwrap();
        assert_eq!(
            pattern.identifiers().into_iter().collect::<Vec<_>>(),
            ["a", "b"]
        );
        assert!(Pattern::new("abc").unwrap().identifiers().is_empty());
    }

    #[test]
    fn compile_without_sources() {
        let automaton = Pattern::new("a+b").unwrap().compile().call().unwrap();
        assert!(automaton.accepts("ab") && automaton.accepts("aaab"));
        assert!(automaton.accepts("b") == false);
    }

    #[test]
    fn compile_reports_missing_names() {
        let err = Pattern::new("<nope>").unwrap().compile().call().unwrap_err();
        assert_eq!(err.to_string(), "<nope> not found");
    }
}
