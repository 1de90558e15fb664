/*!
The surface syntax: an extended regular-expression language parsed into an
[`Ast`].

On top of the classical union/concatenation/repetition core, six optional
productions can be enabled independently through [`SyntaxFlags`]:
intersection (`&`), complement (`~`), the empty language (`#`), any-string
(`@`), named automata (`<identifier>`) and numeric intervals (`<min-max>`).

### Grammar

From lowest to highest binding:

<pre class="rust">
union       ::=  inter ('|' union)?
inter       ::=  concat ('&' inter)?          with INTERSECTION
concat      ::=  repeat concat?               implicit
repeat      ::=  compl ('?' | '*' | '+' | '{' n (',' m?)? '}')*
compl       ::=  '~' compl                    with COMPLEMENT
              |  charclass
charclass   ::=  '[' '^'? item+ ']'
              |  simple
item        ::=  charexp ('-' charexp)?
simple      ::=  '.'
              |  '#'                          with EMPTY
              |  '@'                          with ANYSTRING
              |  '"' any-but-quote* '"'
              |  '(' union? ')'
              |  '<' identifier '>'           with AUTOMATON
              |  '<' n '-' m '>'              with INTERVAL
              |  charexp
charexp     ::=  '\' any | any-non-reserved
</pre>

### Matching one character

<pre class="rust">
.          any single character
\c         the character c, however reserved
[abc]      a, b or c
[a-z0]     any character in a..=z, or 0
[^a-z]     any single character outside a..=z
</pre>

Inside `[...]` adjacent items are implicitly unioned and `-` between two
character expressions denotes an inclusive range. A leading `^` negates the
class against the any-character language. Reserved characters keep their
meaning inside classes and must still be escaped.

### Composites and repetitions

<pre class="rust">
x|y        x or y
xy         x followed by y
x&y        both x and y                       with INTERSECTION
~x         any string that is not x           with COMPLEMENT
x?         zero or one x
x*         zero or more x
x+         one or more x
x{n}       exactly n x
x{n,}      n or more x
x{n,m}     between n and m x
</pre>

Repetition operators stack left to right: `a*?` is `(a*)?`.

### Literals and leaves

<pre class="rust">
"abc"      the string abc, verbatim; no escapes apply inside quotes
()         the empty string
#          the empty language                 with EMPTY
@          any string                         with ANYSTRING
&lt;name&gt;     the automaton bound to name        with AUTOMATON
&lt;5-12&gt;     decimal values 5..=12              with INTERVAL
&lt;05-12&gt;    decimal values 5..=12, width 2     with INTERVAL
</pre>

An interval whose bounds are entered reversed is reordered. When both bound
literals have the same width the matched strings are zero-padded to it,
otherwise only canonical representations match.

### Escaping

`\` makes the following code point literal, whatever it is. There are no
character-class escapes (`\d`, `\n`, …): the backslash only suppresses
syntactic meaning. At the [`ALL`](SyntaxFlags::ALL) flag level the reserved
characters are:

<pre class="rust">
| & ? * + { } ( ) [ ] ^ - . # @ " &lt; &gt; ~ \
</pre>

Characters gated behind a disabled flag are not reserved and match
themselves: with [`EMPTY`](SyntaxFlags::EMPTY) cleared, `#` is an ordinary
character.

## Example
```
use remata::{syntax::parse, SyntaxFlags};

let ast = parse("(ab|cd)*", SyntaxFlags::ALL).unwrap();
assert_eq!(ast.to_string(), r#"(("ab"|"cd"))*"#);

// '&' is only an operator when INTERSECTION is enabled.
assert!(parse("a&b", SyntaxFlags::ALL).is_err() == false);
let plain = parse("a&b", SyntaxFlags::empty()).unwrap();
assert_eq!(plain.to_string(), r#""a&b""#);
```
*/

use bitflags::bitflags;

mod ast;
mod parser;

pub use ast::{Ast, RangeError};
pub use parser::{parse, ParseError};

bitflags! {
    /// Selects which optional productions the parser accepts.
    ///
    /// The classical core (union, concatenation, repetition, classes,
    /// quoted literals, grouping) is always available; each flag admits one
    /// extension. [`SyntaxFlags::ALL`] enables everything,
    /// [`SyntaxFlags::empty()`] nothing beyond the core.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SyntaxFlags: u8 {
        /// `&` intersects two expressions.
        const INTERSECTION = 1 << 0;
        /// `~` complements an expression.
        const COMPLEMENT = 1 << 1;
        /// `#` denotes the empty language.
        const EMPTY = 1 << 2;
        /// `@` denotes the language of all strings.
        const ANYSTRING = 1 << 3;
        /// `<identifier>` references an externally supplied automaton.
        const AUTOMATON = 1 << 4;
        /// `<min-max>` denotes a numeric interval.
        const INTERVAL = 1 << 5;
        /// Every optional production.
        const ALL = Self::INTERSECTION.bits()
            | Self::COMPLEMENT.bits()
            | Self::EMPTY.bits()
            | Self::ANYSTRING.bits()
            | Self::AUTOMATON.bits()
            | Self::INTERVAL.bits();
    }
}

impl Default for SyntaxFlags {
    fn default() -> Self {
        Self::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_covers_each_flag() {
        for flag in [
            SyntaxFlags::INTERSECTION,
            SyntaxFlags::COMPLEMENT,
            SyntaxFlags::EMPTY,
            SyntaxFlags::ANYSTRING,
            SyntaxFlags::AUTOMATON,
            SyntaxFlags::INTERVAL,
        ] {
            assert!(SyntaxFlags::ALL.contains(flag));
            assert!(SyntaxFlags::empty().contains(flag) == false);
        }
    }

    #[test]
    fn default_is_all() {
        assert_eq!(SyntaxFlags::default(), SyntaxFlags::ALL);
    }
}
