/*!
Lowering: translates an [`Ast`] into an [`Automaton`].

Every node maps onto one automaton-library construction; after each
non-leaf construction the intermediate result is minimized, so compilation
cost tracks the size of the *minimal* intermediate languages rather than
the syntax. `Union` and `Concat` spines are flattened into a single
variadic combinator call first — lowering `a|b|c|d` minimizes once, not
once per `|`.

Named references (`<name>`) are resolved from an optional map, then an
optional [`AutomatonProvider`], in that order. Resolved automata are
cloned before use: mutating the caller's map afterwards never corrupts a
compiled result.
*/

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::io;

use remata_fsa::{ops, Automaton};

use crate::syntax::Ast;

/// Supplies automata for `<name>` references that are not in the caller's
/// map. Implementations may hit storage; failures surface as
/// [`CompileError::Provider`].
pub trait AutomatonProvider {
    fn get(&self, name: &str) -> io::Result<Automaton>;
}

/// A `<name>` reference could not be lowered.
#[derive(Debug)]
pub enum CompileError {
    /// The name was absent from the map and no provider was supplied.
    NotFound { name: String },
    /// The provider failed while resolving the name.
    Provider { name: String, source: io::Error },
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::NotFound { name } => write!(f, "<{name}> not found"),
            CompileError::Provider { name, source } => {
                write!(f, "resolving <{name}>: {source}")
            }
        }
    }
}

impl Error for CompileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CompileError::NotFound { .. } => None,
            CompileError::Provider { source, .. } => Some(source),
        }
    }
}

pub(crate) fn lower(
    ast: &Ast,
    automata: Option<&HashMap<String, Automaton>>,
    provider: Option<&dyn AutomatonProvider>,
) -> Result<Automaton, CompileError> {
    let resolver = Resolver { automata, provider };
    lower_node(ast, &resolver)
}

struct Resolver<'a> {
    automata: Option<&'a HashMap<String, Automaton>>,
    provider: Option<&'a dyn AutomatonProvider>,
}

impl Resolver<'_> {
    fn resolve(&self, name: &str) -> Result<Automaton, CompileError> {
        if let Some(found) = self.automata.and_then(|map| map.get(name)) {
            return Ok(found.clone());
        }
        match self.provider {
            Some(provider) => provider.get(name).map_err(|source| CompileError::Provider {
                name: name.to_owned(),
                source,
            }),
            None => Err(CompileError::NotFound {
                name: name.to_owned(),
            }),
        }
    }
}

fn lower_node(ast: &Ast, resolver: &Resolver<'_>) -> Result<Automaton, CompileError> {
    Ok(match ast {
        Ast::Union(_, _) => {
            let mut parts = Vec::new();
            flatten(ast, union_arms, &mut parts, resolver)?;
            ops::minimize(ops::union(parts))
        }
        Ast::Concat(_, _) => {
            let mut parts = Vec::new();
            flatten(ast, concat_arms, &mut parts, resolver)?;
            ops::minimize(ops::concatenate(parts))
        }
        Ast::Intersection(l, r) => ops::minimize(ops::intersection(
            lower_node(l, resolver)?,
            lower_node(r, resolver)?,
        )),
        Ast::Optional(e) => ops::minimize(ops::optional(lower_node(e, resolver)?)),
        Ast::Repeat(e) => ops::minimize(ops::repeat(lower_node(e, resolver)?)),
        Ast::RepeatMin(e, min) => {
            ops::minimize(ops::repeat_min(lower_node(e, resolver)?, *min))
        }
        Ast::RepeatRange(e, min, max) => {
            ops::minimize(ops::repeat_range(lower_node(e, resolver)?, *min, *max))
        }
        Ast::Complement(e) => ops::minimize(ops::complement(lower_node(e, resolver)?)),
        Ast::Char(c) => Automaton::char(*c),
        Ast::CharRange(from, to) => Automaton::char_range(*from, *to),
        Ast::AnyChar => Automaton::any_char(),
        Ast::Empty => Automaton::empty(),
        Ast::Literal(s) => Automaton::literal(s),
        Ast::AnyString => Automaton::any_string(),
        Ast::Named(name) => resolver.resolve(name)?,
        Ast::Interval { min, max, digits } => Automaton::decimal_interval(*min, *max, *digits),
    })
}

/// Lowers every leaf of a same-variant spine into `parts`, left to right.
fn flatten(
    ast: &Ast,
    arms: fn(&Ast) -> Option<(&Ast, &Ast)>,
    parts: &mut Vec<Automaton>,
    resolver: &Resolver<'_>,
) -> Result<(), CompileError> {
    match arms(ast) {
        Some((l, r)) => {
            flatten(l, arms, parts, resolver)?;
            flatten(r, arms, parts, resolver)
        }
        None => {
            parts.push(lower_node(ast, resolver)?);
            Ok(())
        }
    }
}

fn union_arms(ast: &Ast) -> Option<(&Ast, &Ast)> {
    match ast {
        Ast::Union(l, r) => Some((l, r)),
        _ => None,
    }
}

fn concat_arms(ast: &Ast) -> Option<(&Ast, &Ast)> {
    match ast {
        Ast::Concat(l, r) => Some((l, r)),
        _ => None,
    }
}
