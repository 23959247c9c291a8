use winnow::prelude::*;
use winnow::ascii::{digit1, float, line_ending, multispace0, space0, space1, till_line_ending};
use winnow::combinator::{alt, delimited, opt, preceded, repeat, terminated};
use winnow::token::{any, one_of, take_while};

use crate::ast::{DotEdge, DotGraph, DotNode, GraphId};
use crate::attr::{attr_list, AttrList};
use crate::error::{ParseContext, ParseError, PResult};

/// Parses a complete DOT document. The body grammar is a fixed
/// forward-only sequence: default statements, then all nodes, then all
/// edges. Anything after the closing brace is ignored.
pub fn parse_dot_graph(input: &str) -> Result<DotGraph, ParseError> {
    let mut rest = input;
    dot_graph(&mut rest).map_err(ParseError::from_grammar)
}

impl std::str::FromStr for GraphId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rest = s;
        let id = graph_id(&mut rest).map_err(ParseError::from_grammar)?;
        if !rest.is_empty() {
            return Err(ParseError::syntax(format!(
                "trailing input after identifier: `{rest}`"
            )));
        }
        Ok(id)
    }
}

fn dot_graph(input: &mut &str) -> PResult<DotGraph> {
    dot_graph_body
        .context(ParseContext::Invalid("DotGraph"))
        .parse_next(input)
}

fn dot_graph_body(input: &mut &str) -> PResult<DotGraph> {
    // header
    multispace0.parse_next(input)?;
    let strict = opt(terminated("strict", space1)).parse_next(input)?.is_some();
    let directed = alt(("digraph".value(true), "graph".value(false)))
        .context(ParseContext::Expected("`digraph` or `graph`"))
        .parse_next(input)?;
    let id = opt(preceded(space1, graph_id)).parse_next(input)?;
    space1.parse_next(input)?;
    '{'.context(ParseContext::Expected("`{`")).parse_next(input)?;
    skip_line(input)?;

    // default attribute statements; only `graph [...]` lists are kept
    let defaults: Vec<Option<AttrList>> = repeat(0.., default_stmt).parse_next(input)?;
    let mut attributes = AttrList::new();
    for list in defaults.into_iter().flatten() {
        attributes.extend(list);
    }

    // all nodes, then all edges, then the closing brace
    let nodes: Vec<DotNode> = repeat(1.., node_line)
        .context(ParseContext::AtLeastOne("node statement"))
        .parse_next(input)?;
    let edges: Vec<DotEdge> = repeat(1.., edge_line)
        .context(ParseContext::AtLeastOne("edge statement"))
        .parse_next(input)?;
    multispace0.parse_next(input)?;
    '}'.context(ParseContext::Expected("`}`")).parse_next(input)?;

    Ok(DotGraph {
        strict,
        directed,
        id,
        attributes,
        nodes,
        edges,
    })
}

fn default_stmt(input: &mut &str) -> PResult<Option<AttrList>> {
    multispace0.parse_next(input)?;
    alt((
        preceded("edge", skip_line).map(|_| None),
        preceded("node", skip_line).map(|_| None),
        graph_defaults.map(Some),
    ))
    .parse_next(input)
}

fn graph_defaults(input: &mut &str) -> PResult<AttrList> {
    "graph".parse_next(input)?;
    space1.parse_next(input)?;
    let attrs = attr_list(input)?;
    skip_line(input)?;
    Ok(attrs)
}

fn node_line(input: &mut &str) -> PResult<DotNode> {
    multispace0.parse_next(input)?;
    let node = node_stmt.parse_next(input)?;
    skip_line(input)?;
    Ok(node)
}

fn node_stmt(input: &mut &str) -> PResult<DotNode> {
    node_stmt_body
        .context(ParseContext::Invalid("DotNode"))
        .parse_next(input)
}

fn node_stmt_body(input: &mut &str) -> PResult<DotNode> {
    let id = integer(input)?;
    let attributes = opt(preceded(space1, attr_list)).parse_next(input)?;
    ';'.context(ParseContext::Expected("`;`")).parse_next(input)?;
    Ok(DotNode::Node {
        id,
        attributes: attributes.unwrap_or_default(),
    })
}

fn edge_line(input: &mut &str) -> PResult<DotEdge> {
    multispace0.parse_next(input)?;
    let edge = edge_stmt.parse_next(input)?;
    skip_line(input)?;
    Ok(edge)
}

fn edge_stmt(input: &mut &str) -> PResult<DotEdge> {
    edge_stmt_body
        .context(ParseContext::Invalid("DotEdge"))
        .parse_next(input)
}

fn edge_stmt_body(input: &mut &str) -> PResult<DotEdge> {
    space0.parse_next(input)?;
    let head = integer(input)?;
    space1.parse_next(input)?;
    let directed = edge_op(input)?;
    space1.parse_next(input)?;
    let tail = integer(input)?;
    let attributes = opt(preceded(space1, attr_list)).parse_next(input)?;
    ';'.context(ParseContext::Expected("`;`")).parse_next(input)?;
    Ok(DotEdge {
        head,
        tail,
        attributes: attributes.unwrap_or_default(),
        directed,
    })
}

fn edge_op(input: &mut &str) -> PResult<bool> {
    alt(("->".value(true), "--".value(false))).parse_next(input)
}

/// The four identifier spellings, tried in order; the first match wins
/// and later alternatives are never revisited.
pub(crate) fn graph_id(input: &mut &str) -> PResult<GraphId> {
    alt((
        bare_word.map(|word: &str| GraphId::Bare(word.to_string())),
        number.map(GraphId::Number),
        quoted_string.map(GraphId::Quoted),
        html_label.map(GraphId::Html),
    ))
    .context(ParseContext::Invalid("GraphID"))
    .parse_next(input)
}

// A DOT ID: alphabetic or underscore first, alphanumerics after. A
// digit-leading token falls through to the numeric alternative.
pub(crate) fn bare_word<'s>(input: &mut &'s str) -> PResult<&'s str> {
    (
        one_of(|c: char| c.is_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)
}

fn number(input: &mut &str) -> PResult<f64> {
    float.parse_next(input)
}

fn quoted_string(input: &mut &str) -> PResult<String> {
    delimited('"', quoted_body, '"')
        .map(|text: &str| text.to_string())
        .parse_next(input)
}

// Escape sequences stay as written; printing re-emits them verbatim.
fn quoted_body<'s>(input: &mut &'s str) -> PResult<&'s str> {
    repeat(
        0..,
        alt((
            ('\\', any).void(),
            take_while(1.., |c: char| c != '"' && c != '\\').void(),
        )),
    )
    .map(|()| ())
    .take()
    .parse_next(input)
}

// `<...>` with balanced angle brackets, so markup inside the label
// keeps its own tags.
fn html_label(input: &mut &str) -> PResult<String> {
    '<'.parse_next(input)?;
    let rest = *input;
    let mut depth = 1usize;
    for (i, c) in rest.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    *input = &rest[i + 1..];
                    return Ok(rest[..i].to_string());
                }
            }
            _ => {}
        }
    }
    Err(winnow::error::ParserError::from_input(input))
}

fn integer(input: &mut &str) -> PResult<u64> {
    digit1
        .parse_to()
        .context(ParseContext::Expected("integer"))
        .parse_next(input)
}

fn skip_line(input: &mut &str) -> PResult<()> {
    (till_line_ending, opt(line_ending)).void().parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    // --- graph_id ---

    #[test]
    fn parse_bare_identifier() {
        let mut input = "alpha rest";
        assert_eq!(
            graph_id(&mut input).unwrap(),
            GraphId::Bare("alpha".to_string())
        );
        assert_eq!(input, " rest");
    }

    #[test]
    fn parse_bare_identifier_with_underscore_and_digits() {
        let mut input = "_n42;";
        assert_eq!(
            graph_id(&mut input).unwrap(),
            GraphId::Bare("_n42".to_string())
        );
        assert_eq!(input, ";");
    }

    #[test]
    fn digit_leading_token_is_a_number_not_a_bare_word() {
        let mut input = "42";
        assert_eq!(graph_id(&mut input).unwrap(), GraphId::Number(42.0));
        assert_eq!(input, "");
    }

    #[test]
    fn parse_fractional_number() {
        let mut input = "3.25 {";
        assert_eq!(graph_id(&mut input).unwrap(), GraphId::Number(3.25));
        assert_eq!(input, " {");
    }

    #[test]
    fn parse_negative_number() {
        let mut input = "-2";
        assert_eq!(graph_id(&mut input).unwrap(), GraphId::Number(-2.0));
    }

    #[test]
    fn parse_quoted_string() {
        let mut input = "\"hello world\" rest";
        assert_eq!(
            graph_id(&mut input).unwrap(),
            GraphId::Quoted("hello world".to_string())
        );
        assert_eq!(input, " rest");
    }

    #[test]
    fn parse_quoted_string_with_escaped_quote() {
        let mut input = "\"a\\\"b\"";
        assert_eq!(
            graph_id(&mut input).unwrap(),
            GraphId::Quoted("a\\\"b".to_string())
        );
        assert_eq!(input, "");
    }

    #[test]
    fn parse_empty_quoted_string() {
        let mut input = "\"\"";
        assert_eq!(graph_id(&mut input).unwrap(), GraphId::Quoted(String::new()));
    }

    #[test]
    fn parse_html_label() {
        let mut input = "<plain> rest";
        assert_eq!(
            graph_id(&mut input).unwrap(),
            GraphId::Html("plain".to_string())
        );
        assert_eq!(input, " rest");
    }

    #[test]
    fn parse_html_label_with_nested_tags() {
        let mut input = "<<b>bold</b>>;";
        assert_eq!(
            graph_id(&mut input).unwrap(),
            GraphId::Html("<b>bold</b>".to_string())
        );
        assert_eq!(input, ";");
    }

    #[test]
    fn unbalanced_html_label_is_rejected() {
        let mut input = "<<b>oops";
        assert!(graph_id(&mut input).is_err());
    }

    #[test]
    fn no_alternative_reports_graph_id() {
        let mut input = "{";
        let err = graph_id(&mut input).unwrap_err();
        let err = ParseError::from_grammar(err);
        assert!(err.to_string().contains("Not a valid GraphID"), "{err}");
    }

    // --- integer / edge_op ---

    #[test]
    fn parse_integer_leaves_rest() {
        let mut input = "17 -> 3;";
        assert_eq!(integer(&mut input).unwrap(), 17);
        assert_eq!(input, " -> 3;");
    }

    #[test]
    fn parse_integer_rejects_word() {
        let mut input = "abc";
        assert!(integer(&mut input).is_err());
    }

    #[test]
    fn parse_edge_operators() {
        let mut input = "-> 2";
        assert!(edge_op(&mut input).unwrap());
        let mut input = "-- 2";
        assert!(!edge_op(&mut input).unwrap());
    }

    // --- node_stmt ---

    #[test]
    fn parse_node_without_attributes() {
        let mut input = "1;";
        assert_eq!(
            node_stmt(&mut input).unwrap(),
            DotNode::Node {
                id: 1,
                attributes: AttrList::new(),
            }
        );
        assert_eq!(input, "");
    }

    #[test]
    fn parse_node_with_attributes() {
        let mut input = "2 [color=red];";
        match node_stmt(&mut input).unwrap() {
            DotNode::Node { id, attributes } => {
                assert_eq!(id, 2);
                assert_eq!(attributes.len(), 1);
            }
            other => panic!("expected Node, got {other:?}"),
        }
    }

    #[test]
    fn node_without_terminator_is_rejected() {
        let mut input = "1";
        let err = ParseError::from_grammar(node_stmt(&mut input).unwrap_err());
        assert!(err.to_string().contains("Not a valid DotNode"), "{err}");
    }

    #[test]
    fn node_with_word_id_is_rejected() {
        let mut input = "alpha;";
        assert!(node_stmt(&mut input).is_err());
    }

    // --- edge_stmt ---

    #[test]
    fn parse_directed_edge() {
        let mut input = "1 -> 2;";
        let edge = edge_stmt(&mut input).unwrap();
        assert_eq!(edge.head, 1);
        assert_eq!(edge.tail, 2);
        assert!(edge.directed);
        assert!(edge.attributes.is_empty());
    }

    #[test]
    fn parse_undirected_edge() {
        let mut input = "3 -- 4;";
        let edge = edge_stmt(&mut input).unwrap();
        assert_eq!((edge.head, edge.tail), (3, 4));
        assert!(!edge.directed);
    }

    #[test]
    fn parse_edge_with_attributes() {
        let mut input = "1 -> 2 [weight=5];";
        let edge = edge_stmt(&mut input).unwrap();
        assert_eq!(edge.attributes.len(), 1);
        assert_eq!(input, "");
    }

    #[test]
    fn edge_without_tail_is_rejected() {
        let mut input = "1 -> ;";
        let err = ParseError::from_grammar(edge_stmt(&mut input).unwrap_err());
        assert!(err.to_string().contains("Not a valid DotEdge"), "{err}");
    }

    #[test]
    fn edge_with_unknown_operator_is_rejected() {
        let mut input = "1 => 2;";
        assert!(edge_stmt(&mut input).is_err());
    }

    // --- dot_graph ---

    #[test]
    fn parse_minimal_digraph() {
        let graph = parse_dot_graph("digraph {\n\t1;\n\t1 -> 1;\n}\n").unwrap();
        assert!(graph.directed);
        assert!(!graph.strict);
        assert_eq!(graph.id, None);
        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.edges.len(), 1);
    }

    #[test]
    fn parse_strict_named_graph() {
        let graph = parse_dot_graph("strict graph net {\n\t1;\n\t1 -- 2;\n}\n").unwrap();
        assert!(graph.strict);
        assert!(!graph.directed);
        assert_eq!(graph.id, Some(GraphId::Bare("net".to_string())));
    }

    #[test]
    fn graph_statements_accumulate_attributes_in_order() {
        let input = "digraph {\n\
                     \tgraph [label=x];\n\
                     \tgraph [rankdir=LR];\n\
                     \t1;\n\
                     \t1 -> 1;\n\
                     }\n";
        let graph = parse_dot_graph(input).unwrap();
        assert_eq!(graph.attributes.len(), 2);
        assert_eq!(graph.attributes.0[0].name, "label");
        assert_eq!(graph.attributes.0[1].name, "rankdir");
    }

    #[test]
    fn node_and_edge_defaults_are_discarded() {
        let input = "digraph {\n\
                     \tnode [shape=box];\n\
                     \tedge [color=red];\n\
                     \t1;\n\
                     \t1 -> 1;\n\
                     }\n";
        let graph = parse_dot_graph(input).unwrap();
        assert!(graph.attributes.is_empty());
        assert_eq!(graph.nodes.len(), 1);
    }

    #[test]
    fn zero_nodes_is_an_arity_failure() {
        let err = parse_dot_graph("digraph g { }\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Arity);
        let message = err.to_string();
        assert!(message.contains("at least one node statement"), "{message}");
        assert!(message.contains("Not a valid DotGraph"), "{message}");
    }

    #[test]
    fn zero_edges_is_an_arity_failure() {
        let err = parse_dot_graph("digraph g {\n\t1;\n}\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Arity);
        assert!(err.to_string().contains("at least one edge statement"));
    }

    #[test]
    fn missing_brace_is_a_syntax_failure() {
        let err = parse_dot_graph("digraph g\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert!(err.to_string().contains("Not a valid DotGraph"));
    }

    #[test]
    fn trailing_input_after_close_is_ignored() {
        let graph = parse_dot_graph("graph {\n\t1;\n\t1 -- 1;\n}\ntrailing\n").unwrap();
        assert_eq!(graph.nodes.len(), 1);
    }

    // --- GraphId::from_str ---

    #[test]
    fn graph_id_from_str_parses_whole_input() {
        assert_eq!("G".parse::<GraphId>().unwrap(), GraphId::Bare("G".to_string()));
        assert_eq!("7".parse::<GraphId>().unwrap(), GraphId::Number(7.0));
        assert_eq!(
            "\"a b\"".parse::<GraphId>().unwrap(),
            GraphId::Quoted("a b".to_string())
        );
    }

    #[test]
    fn graph_id_from_str_rejects_trailing_input() {
        assert!("G extra".parse::<GraphId>().is_err());
    }
}
