use std::fmt;

use crate::attr::AttrList;

/// A graph identifier in one of the four DOT spellings.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphId {
    Bare(String),
    Number(f64),
    Quoted(String),
    Html(String),
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphId::Bare(word) => write!(f, "{word}"),
            GraphId::Number(value) => write!(f, "{value}"),
            GraphId::Quoted(text) => write!(f, "\"{text}\""),
            GraphId::Html(text) => write!(f, "<{text}>"),
        }
    }
}

/// A node statement or a nested cluster. Clusters own their elements
/// and may nest to any depth; the parser only ever produces the `Node`
/// case, clusters are built programmatically.
#[derive(Debug, Clone, PartialEq)]
pub enum DotNode {
    Node {
        id: u64,
        attributes: AttrList,
    },
    Cluster {
        id: String,
        attributes: AttrList,
        elements: Vec<DotNode>,
    },
}

/// One connection between two nodes. `directed` follows the operator
/// the edge was written with, not the owning graph's flag.
#[derive(Debug, Clone, PartialEq)]
pub struct DotEdge {
    pub head: u64,
    pub tail: u64,
    pub attributes: AttrList,
    pub directed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DotGraph {
    pub strict: bool,
    pub directed: bool,
    pub id: Option<GraphId>,
    pub attributes: AttrList,
    pub nodes: Vec<DotNode>,
    pub edges: Vec<DotEdge>,
}

impl DotGraph {
    /// Returns the graph with its id replaced.
    pub fn set_id(mut self, id: GraphId) -> DotGraph {
        self.id = Some(id);
        self
    }

    /// Returns the graph with the strict flag forced on.
    pub fn make_strict(mut self) -> DotGraph {
        self.strict = true;
        self
    }
}
