pub mod ast;
pub mod attr;
pub mod error;
pub mod parser;
pub mod renderer;

pub use ast::{DotEdge, DotGraph, DotNode, GraphId};
pub use attr::{Attr, AttrList};
pub use error::{ErrorKind, ParseError};
pub use parser::parse_dot_graph;
pub use renderer::render;

/// Parses DOT text and prints it back, normalized.
pub fn reformat(input: &str) -> Result<String, ParseError> {
    let graph = parse_dot_graph(input)?;
    Ok(render(&graph))
}
