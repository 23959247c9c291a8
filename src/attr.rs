use std::fmt;

use winnow::prelude::*;
use winnow::ascii::{space0, space1};
use winnow::combinator::{alt, separated};
use winnow::token::one_of;

use crate::ast::GraphId;
use crate::error::{ParseContext, PResult};
use crate::parser::{bare_word, graph_id};

/// One `key=value` pair inside a bracketed attribute list.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub name: String,
    pub value: GraphId,
}

/// An ordered `[key=value, ...]` list attached to a graph, node or
/// edge. Order is preserved and duplicates are kept.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttrList(pub Vec<Attr>);

impl AttrList {
    pub fn new() -> Self {
        AttrList(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn push(&mut self, name: &str, value: GraphId) {
        self.0.push(Attr {
            name: name.to_string(),
            value,
        });
    }

    /// Appends every pair of `other`, keeping encounter order.
    pub fn extend(&mut self, other: AttrList) {
        self.0.extend(other.0);
    }
}

impl fmt::Display for AttrList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, attr) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", attr.name, attr.value)?;
        }
        write!(f, "]")
    }
}

pub(crate) fn attr_list(input: &mut &str) -> PResult<AttrList> {
    attr_list_body
        .context(ParseContext::Invalid("attribute list"))
        .parse_next(input)
}

fn attr_list_body(input: &mut &str) -> PResult<AttrList> {
    '['.parse_next(input)?;
    space0.parse_next(input)?;
    let attrs: Vec<Attr> = separated(0.., attr, list_sep).parse_next(input)?;
    space0.parse_next(input)?;
    ']'.parse_next(input)?;
    Ok(AttrList(attrs))
}

fn attr(input: &mut &str) -> PResult<Attr> {
    let name = bare_word.parse_next(input)?;
    space0.parse_next(input)?;
    '='.parse_next(input)?;
    space0.parse_next(input)?;
    let value = graph_id.parse_next(input)?;
    Ok(Attr {
        name: name.to_string(),
        value,
    })
}

// DOT separates pairs with commas, semicolons or plain whitespace.
fn list_sep(input: &mut &str) -> PResult<()> {
    alt(((space0, one_of([',', ';']), space0).void(), space1.void())).parse_next(input)
}
