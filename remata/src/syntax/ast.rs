//! The abstract syntax tree and its canonical printer.

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;

/// A parsed expression.
///
/// Nodes are built bottom-up through the associated constructor functions
/// and immutable afterwards. [`Ast::concat`] fuses adjacent literal runs,
/// so `ab*c` carries `Literal` leaves rather than chains of `Char`s; the
/// other constructors wrap without normalization.
///
/// The [`Display`](fmt::Display) impl renders the canonical surface form,
/// which reparses (under [`SyntaxFlags::ALL`](super::SyntaxFlags::ALL)) to
/// an expression with the same language, though not necessarily the same
/// tree shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    /// `l|r`
    Union(Box<Ast>, Box<Ast>),
    /// `lr`
    Concat(Box<Ast>, Box<Ast>),
    /// `l&r`
    Intersection(Box<Ast>, Box<Ast>),
    /// `e?`
    Optional(Box<Ast>),
    /// `e*`
    Repeat(Box<Ast>),
    /// `e{min,}`
    RepeatMin(Box<Ast>, u32),
    /// `e{min,max}`
    RepeatRange(Box<Ast>, u32, u32),
    /// `~e`
    Complement(Box<Ast>),
    /// A single character.
    Char(char),
    /// `[from-to]`, inclusive.
    CharRange(char, char),
    /// `.`
    AnyChar,
    /// `#` — the empty language.
    Empty,
    /// A literal string.
    Literal(String),
    /// `@` — every string.
    AnyString,
    /// `<name>` — an externally supplied automaton.
    Named(String),
    /// `<min-max>` — decimal values in `min..=max`, zero-padded to
    /// `digits` when `digits > 0`.
    Interval { min: u32, max: u32, digits: u32 },
}

impl Ast {
    pub fn union(lhs: Ast, rhs: Ast) -> Ast {
        Ast::Union(Box::new(lhs), Box::new(rhs))
    }

    /// Concatenation, fusing adjacent literal runs: two literal operands
    /// merge into one `Literal`, and a literal meeting the literal end of
    /// an existing concatenation is folded into it.
    pub fn concat(lhs: Ast, rhs: Ast) -> Ast {
        match (lhs, rhs) {
            (Ast::Concat(a, b), r) if b.is_literal() && r.is_literal() => {
                Ast::Concat(a, Box::new(Self::concat(*b, r)))
            }
            (l, Ast::Concat(a, b)) if l.is_literal() && a.is_literal() => {
                Ast::Concat(Box::new(Self::concat(l, *a)), b)
            }
            (l, r) if l.is_literal() && r.is_literal() => {
                let mut text = l.into_literal_text();
                text.push_str(&r.into_literal_text());
                Ast::Literal(text)
            }
            (l, r) => Ast::Concat(Box::new(l), Box::new(r)),
        }
    }

    pub fn intersection(lhs: Ast, rhs: Ast) -> Ast {
        Ast::Intersection(Box::new(lhs), Box::new(rhs))
    }

    pub fn optional(sub: Ast) -> Ast {
        Ast::Optional(Box::new(sub))
    }

    pub fn repeat(sub: Ast) -> Ast {
        Ast::Repeat(Box::new(sub))
    }

    pub fn repeat_min(sub: Ast, min: u32) -> Ast {
        Ast::RepeatMin(Box::new(sub), min)
    }

    pub fn repeat_range(sub: Ast, min: u32, max: u32) -> Ast {
        Ast::RepeatRange(Box::new(sub), min, max)
    }

    pub fn complement(sub: Ast) -> Ast {
        Ast::Complement(Box::new(sub))
    }

    pub fn char(c: char) -> Ast {
        Ast::Char(c)
    }

    /// Fails when `from > to`.
    pub fn char_range(from: char, to: char) -> Result<Ast, RangeError> {
        if from > to {
            return Err(RangeError { from, to });
        }
        Ok(Ast::CharRange(from, to))
    }

    pub fn any_char() -> Ast {
        Ast::AnyChar
    }

    pub fn empty() -> Ast {
        Ast::Empty
    }

    pub fn literal(text: impl Into<String>) -> Ast {
        Ast::Literal(text.into())
    }

    pub fn any_string() -> Ast {
        Ast::AnyString
    }

    pub fn named(name: impl Into<String>) -> Ast {
        Ast::Named(name.into())
    }

    /// The caller has already ordered the bounds and fixed the width.
    pub fn interval(min: u32, max: u32, digits: u32) -> Ast {
        debug_assert!(min <= max);
        Ast::Interval { min, max, digits }
    }

    /// Adds every name referenced by a [`Named`](Ast::Named) node anywhere
    /// in this tree to `into`.
    pub fn collect_identifiers(&self, into: &mut BTreeSet<String>) {
        match self {
            Ast::Union(l, r) | Ast::Concat(l, r) | Ast::Intersection(l, r) => {
                l.collect_identifiers(into);
                r.collect_identifiers(into);
            }
            Ast::Optional(e)
            | Ast::Repeat(e)
            | Ast::RepeatMin(e, _)
            | Ast::RepeatRange(e, _, _)
            | Ast::Complement(e) => e.collect_identifiers(into),
            Ast::Named(name) => {
                into.insert(name.clone());
            }
            Ast::Char(_)
            | Ast::CharRange(_, _)
            | Ast::AnyChar
            | Ast::Empty
            | Ast::Literal(_)
            | Ast::AnyString
            | Ast::Interval { .. } => {}
        }
    }

    fn is_literal(&self) -> bool {
        matches!(self, Ast::Char(_) | Ast::Literal(_))
    }

    fn into_literal_text(self) -> String {
        match self {
            Ast::Char(c) => c.to_string(),
            Ast::Literal(s) => s,
            _ => unreachable!("checked by is_literal"),
        }
    }
}

impl fmt::Display for Ast {
    /// The canonical surface form.
    ///
    /// Operators always parenthesize their operands, `Char` is always
    /// escaped, and `Literal` contents are emitted verbatim between
    /// quotes — a literal containing `"` (only constructible
    /// programmatically, never by the parser) therefore does not reparse.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ast::Union(l, r) => write!(f, "({l}|{r})"),
            Ast::Concat(l, r) => write!(f, "{l}{r}"),
            Ast::Intersection(l, r) => write!(f, "({l}&{r})"),
            Ast::Optional(e) => write!(f, "({e})?"),
            Ast::Repeat(e) => write!(f, "({e})*"),
            Ast::RepeatMin(e, min) => write!(f, "({e}){{{min},}}"),
            Ast::RepeatRange(e, min, max) => write!(f, "({e}){{{min},{max}}}"),
            Ast::Complement(e) => write!(f, "~({e})"),
            Ast::Char(c) => write!(f, "\\{c}"),
            Ast::CharRange(from, to) => write!(f, "[\\{from}-\\{to}]"),
            Ast::AnyChar => f.write_str("."),
            Ast::Empty => f.write_str("#"),
            Ast::Literal(s) => write!(f, "\"{s}\""),
            Ast::AnyString => f.write_str("@"),
            Ast::Named(name) => write!(f, "<{name}>"),
            Ast::Interval { min, max, digits } => {
                let width = *digits as usize;
                write!(f, "<{min:0width$}-{max:0width$}>")
            }
        }
    }
}

/// A character range whose bounds were reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeError {
    pub from: char,
    pub to: char,
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid range: from ({}) cannot be > to ({})",
            self.from as u32, self.to as u32
        )
    }
}

impl Error for RangeError {}
