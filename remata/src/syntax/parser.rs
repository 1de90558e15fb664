//! Recursive-descent parser for the extended regular-expression syntax.
//!
//! One method per precedence level, lowest binding first:
//!
//! ```text
//! union    ::= inter ('|' union)?
//! inter    ::= concat ('&' inter)?            -- INTERSECTION
//! concat   ::= repeat concat?                 -- implicit
//! repeat   ::= compl ('?' | '*' | '+' | '{' n (',' m?)? '}')*
//! compl    ::= '~' compl | charclass          -- COMPLEMENT
//! charclass::= '[' '^'? item+ ']' | simple
//! simple   ::= '.' | '#' | '@' | '"'…'"' | '('…')' | '<'…'>' | charexp
//! charexp  ::= '\' any | any-non-reserved
//! ```
//!
//! A character is reserved when it has syntactic meaning at the current
//! flag level; gated characters (`&`, `~`, `#`, `@`, `<`, `>`) stop being
//! reserved when their production is disabled and then match themselves.
//!
//! The cursor walks whole code points; error positions are code point
//! indices into the source.

use std::error::Error;
use std::fmt;

use crate::syntax::{Ast, SyntaxFlags};

/// Parses `source` into an [`Ast`], accepting exactly the productions
/// `flags` enables. The whole input must be consumed.
///
/// The empty source parses to the empty-string literal.
///
/// ## Example
/// ```
/// use remata::{syntax::parse, SyntaxFlags};
///
/// let ast = parse("a|b", SyntaxFlags::ALL).unwrap();
/// assert_eq!(ast.to_string(), r"(\a|\b)");
///
/// let err = parse("a|", SyntaxFlags::ALL).unwrap_err();
/// assert_eq!(err.to_string(), "unexpected end-of-string");
/// ```
pub fn parse(source: &str, flags: SyntaxFlags) -> Result<Ast, ParseError> {
    if source.is_empty() {
        return Ok(Ast::literal(""));
    }
    let mut parser = Parser {
        chars: source.chars().collect(),
        pos: 0,
        flags,
    };
    let ast = parser.union()?;
    if parser.more() {
        return Err(parser.error(ParseErrorKind::EndExpected));
    }
    Ok(ast)
}

/// A syntax error, carrying the code point index it was detected at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    kind: ParseErrorKind,
    pos: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseErrorKind {
    /// Trailing input after a complete expression.
    EndExpected,
    /// Input ended inside a construct.
    UnexpectedEnd,
    /// `{` not followed by a decimal integer, or one too large.
    IntegerExpected,
    /// A specific closing character was required.
    Expected(char),
    /// Malformed `<…>` interval contents.
    IntervalSyntax,
    /// `<…->…>` contents where an identifier was required.
    IllegalIdentifier,
    /// A class range with reversed bounds.
    InvalidRange { from: char, to: char },
    /// An unescaped reserved character outside its syntactic position.
    Unexpected(char),
}

impl ParseError {
    /// Code point index at which the failure was detected.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseErrorKind::EndExpected => {
                write!(f, "end-of-string expected at position {}", self.pos)
            }
            ParseErrorKind::UnexpectedEnd => f.write_str("unexpected end-of-string"),
            ParseErrorKind::IntegerExpected => {
                write!(f, "integer expected at position {}", self.pos)
            }
            ParseErrorKind::Expected(c) => {
                write!(f, "expected '{c}' at position {}", self.pos)
            }
            ParseErrorKind::IntervalSyntax => {
                write!(f, "interval syntax error at position {}", self.pos)
            }
            ParseErrorKind::IllegalIdentifier => {
                write!(f, "illegal identifier at position {}", self.pos)
            }
            ParseErrorKind::InvalidRange { from, to } => write!(
                f,
                "invalid range: from ({}) cannot be > to ({})",
                from as u32, to as u32
            ),
            ParseErrorKind::Unexpected(c) => {
                write!(f, "unexpected character '{c}' at position {}", self.pos)
            }
        }
    }
}

impl Error for ParseError {}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    flags: SyntaxFlags,
}

impl Parser {
    fn union(&mut self) -> Result<Ast, ParseError> {
        let lhs = self.inter()?;
        if self.eat('|') {
            Ok(Ast::union(lhs, self.union()?))
        } else {
            Ok(lhs)
        }
    }

    fn inter(&mut self) -> Result<Ast, ParseError> {
        let lhs = self.concat()?;
        if self.check(SyntaxFlags::INTERSECTION) && self.eat('&') {
            Ok(Ast::intersection(lhs, self.inter()?))
        } else {
            Ok(lhs)
        }
    }

    fn concat(&mut self) -> Result<Ast, ParseError> {
        let lhs = self.repeat()?;
        // Another term follows unless the next character closes a group,
        // starts a union branch, or (with INTERSECTION) an intersection.
        let more = match self.peek() {
            None | Some(')' | '|') => false,
            Some('&') => !self.check(SyntaxFlags::INTERSECTION),
            Some(_) => true,
        };
        if more {
            Ok(Ast::concat(lhs, self.concat()?))
        } else {
            Ok(lhs)
        }
    }

    fn repeat(&mut self) -> Result<Ast, ParseError> {
        let mut sub = self.compl()?;
        loop {
            sub = match self.peek() {
                Some('?') => {
                    self.pos += 1;
                    Ast::optional(sub)
                }
                Some('*') => {
                    self.pos += 1;
                    Ast::repeat(sub)
                }
                Some('+') => {
                    self.pos += 1;
                    Ast::repeat_min(sub, 1)
                }
                Some('{') => {
                    self.pos += 1;
                    self.counted_repeat(sub)?
                }
                _ => return Ok(sub),
            };
        }
    }

    /// `{n}`, `{n,}` or `{n,m}`; the opening brace is already consumed.
    fn counted_repeat(&mut self, sub: Ast) -> Result<Ast, ParseError> {
        let min = self.decimal()?;
        let node = if self.eat(',') {
            match self.optional_decimal()? {
                Some(max) => Ast::repeat_range(sub, min, max),
                None => Ast::repeat_min(sub, min),
            }
        } else {
            Ast::repeat_range(sub, min, min)
        };
        if !self.eat('}') {
            return Err(self.error(ParseErrorKind::Expected('}')));
        }
        Ok(node)
    }

    fn compl(&mut self) -> Result<Ast, ParseError> {
        if self.check(SyntaxFlags::COMPLEMENT) && self.eat('~') {
            Ok(Ast::complement(self.compl()?))
        } else {
            self.charclass()
        }
    }

    fn charclass(&mut self) -> Result<Ast, ParseError> {
        if !self.eat('[') {
            return self.simple();
        }
        let negate = self.eat('^');
        let mut class = self.class_item()?;
        while self.more() && self.peek() != Some(']') {
            class = Ast::union(class, self.class_item()?);
        }
        if !self.eat(']') {
            return Err(self.error(ParseErrorKind::Expected(']')));
        }
        if negate {
            // [^…] is everything one character long outside the class.
            Ok(Ast::intersection(Ast::any_char(), Ast::complement(class)))
        } else {
            Ok(class)
        }
    }

    /// One class member: a character, or an inclusive range.
    fn class_item(&mut self) -> Result<Ast, ParseError> {
        let from = self.charexp()?;
        if self.eat('-') {
            let to = self.charexp()?;
            Ast::char_range(from, to)
                .map_err(|_| self.error(ParseErrorKind::InvalidRange { from, to }))
        } else {
            Ok(Ast::char(from))
        }
    }

    fn simple(&mut self) -> Result<Ast, ParseError> {
        match self.peek() {
            Some('.') => {
                self.pos += 1;
                Ok(Ast::any_char())
            }
            Some('#') if self.check(SyntaxFlags::EMPTY) => {
                self.pos += 1;
                Ok(Ast::empty())
            }
            Some('@') if self.check(SyntaxFlags::ANYSTRING) => {
                self.pos += 1;
                Ok(Ast::any_string())
            }
            Some('"') => {
                self.pos += 1;
                self.quoted()
            }
            Some('(') => {
                self.pos += 1;
                if self.eat(')') {
                    return Ok(Ast::literal(""));
                }
                let sub = self.union()?;
                if !self.eat(')') {
                    return Err(self.error(ParseErrorKind::Expected(')')));
                }
                Ok(sub)
            }
            Some('<')
                if self.check(SyntaxFlags::AUTOMATON) || self.check(SyntaxFlags::INTERVAL) =>
            {
                self.pos += 1;
                self.angle()
            }
            _ => Ok(Ast::char(self.charexp()?)),
        }
    }

    /// Contents of `"…"`, verbatim; no escapes apply inside.
    fn quoted(&mut self) -> Result<Ast, ParseError> {
        let start = self.pos;
        while self.more() && self.peek() != Some('"') {
            self.pos += 1;
        }
        if !self.eat('"') {
            return Err(self.error(ParseErrorKind::Expected('"')));
        }
        let text: String = self.chars[start..self.pos - 1].iter().collect();
        Ok(Ast::literal(text))
    }

    /// Contents of `<…>`: a named-automaton reference, or a numeric
    /// interval when exactly one interior `-` is present. The opening
    /// angle is already consumed.
    fn angle(&mut self) -> Result<Ast, ParseError> {
        let start = self.pos;
        while self.more() && self.peek() != Some('>') {
            self.pos += 1;
        }
        if !self.eat('>') {
            return Err(self.error(ParseErrorKind::Expected('>')));
        }
        let text: String = self.chars[start..self.pos - 1].iter().collect();
        let at = self.pos - 1;

        let Some(dash) = text.find('-') else {
            if !self.check(SyntaxFlags::AUTOMATON) {
                return Err(ParseError {
                    kind: ParseErrorKind::IntervalSyntax,
                    pos: at,
                });
            }
            return Ok(Ast::named(text));
        };
        if !self.check(SyntaxFlags::INTERVAL) {
            return Err(ParseError {
                kind: ParseErrorKind::IllegalIdentifier,
                pos: at,
            });
        }

        let interval_error = ParseError {
            kind: ParseErrorKind::IntervalSyntax,
            pos: at,
        };
        let (low, high) = (&text[..dash], &text[dash + 1..]);
        if low.is_empty() || high.is_empty() || high.contains('-') {
            return Err(interval_error);
        }
        let (Ok(m), Ok(n)) = (low.parse::<u32>(), high.parse::<u32>()) else {
            return Err(interval_error);
        };
        let digits = if low.len() == high.len() { low.len() as u32 } else { 0 };
        let (min, max) = if m > n { (n, m) } else { (m, n) };
        Ok(Ast::interval(min, max, digits))
    }

    /// `\c` for any `c`, or a bare non-reserved code point. The backslash
    /// carries no meaning beyond suppressing the next character's.
    fn charexp(&mut self) -> Result<char, ParseError> {
        if self.eat('\\') {
            return self.next();
        }
        match self.peek() {
            Some(c) if !self.is_reserved(c) => {
                self.pos += 1;
                Ok(c)
            }
            Some(c) => Err(self.error(ParseErrorKind::Unexpected(c))),
            None => Err(self.error(ParseErrorKind::UnexpectedEnd)),
        }
    }

    /// Whether `c` carries syntactic meaning at the current flag level.
    fn is_reserved(&self, c: char) -> bool {
        match c {
            '|' | '?' | '*' | '+' | '{' | '}' | '(' | ')' | '[' | ']' | '^' | '-' | '.' | '"'
            | '\\' => true,
            '&' => self.check(SyntaxFlags::INTERSECTION),
            '~' => self.check(SyntaxFlags::COMPLEMENT),
            '#' => self.check(SyntaxFlags::EMPTY),
            '@' => self.check(SyntaxFlags::ANYSTRING),
            '<' | '>' => {
                self.check(SyntaxFlags::AUTOMATON) || self.check(SyntaxFlags::INTERVAL)
            }
            _ => false,
        }
    }

    /// Decimal run, at least one digit, `u32` range.
    fn decimal(&mut self) -> Result<u32, ParseError> {
        match self.optional_decimal()? {
            Some(value) => Ok(value),
            None => Err(self.error(ParseErrorKind::IntegerExpected)),
        }
    }

    /// Like [`Self::decimal`], but an absent digit run is `None`.
    /// A run too large for `u32` is reported where the run starts.
    fn optional_decimal(&mut self) -> Result<Option<u32>, ParseError> {
        let start = self.pos;
        while matches!(self.peek(), Some('0'..='9')) {
            self.pos += 1;
        }
        if start == self.pos {
            return Ok(None);
        }
        let digits: String = self.chars[start..self.pos].iter().collect();
        match digits.parse::<u32>() {
            Ok(value) => Ok(Some(value)),
            Err(_) => Err(ParseError {
                kind: ParseErrorKind::IntegerExpected,
                pos: start,
            }),
        }
    }

    fn check(&self, flag: SyntaxFlags) -> bool {
        self.flags.contains(flag)
    }

    fn more(&self) -> bool {
        self.pos < self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn next(&mut self) -> Result<char, ParseError> {
        let Some(c) = self.peek() else {
            return Err(self.error(ParseErrorKind::UnexpectedEnd));
        };
        self.pos += 1;
        Ok(c)
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError {
            kind,
            pos: self.pos,
        }
    }
}
