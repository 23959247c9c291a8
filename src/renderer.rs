use crate::ast::{DotEdge, DotGraph, DotNode};

/// Prints a graph as DOT text: header line, optional graph-attribute
/// line, nodes, edges, closing brace, one trailing newline.
pub fn render(graph: &DotGraph) -> String {
    let mut lines: Vec<String> = Vec::new();

    let mut header = String::new();
    if graph.strict {
        header.push_str("strict ");
    }
    header.push_str(if graph.directed { "digraph" } else { "graph" });
    if let Some(id) = &graph.id {
        header.push(' ');
        header.push_str(&id.to_string());
    }
    header.push_str(" {");
    lines.push(header);

    if !graph.attributes.is_empty() {
        lines.push(format!("\tgraph {};", graph.attributes));
    }
    for node in &graph.nodes {
        for line in render_node(node).lines() {
            lines.push(format!("\t{line}"));
        }
    }
    for edge in &graph.edges {
        lines.push(render_edge(edge));
    }
    lines.push("}".to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

// Clusters recurse; every line of a nested element gains one tab
// relative to its parent, at any depth.
fn render_node(node: &DotNode) -> String {
    match node {
        DotNode::Node { id, attributes } => {
            if attributes.is_empty() {
                format!("{id};")
            } else {
                format!("{id} {attributes};")
            }
        }
        DotNode::Cluster {
            id,
            attributes,
            elements,
        } => {
            let mut lines = vec![format!("subgraph cluster_{id} {{")];
            if !attributes.is_empty() {
                lines.push(format!("\tgraph {attributes};"));
            }
            for element in elements {
                for line in render_node(element).lines() {
                    lines.push(format!("\t{line}"));
                }
            }
            lines.push("}".to_string());
            lines.join("\n")
        }
    }
}

fn render_edge(edge: &DotEdge) -> String {
    let op = if edge.directed { "->" } else { "--" };
    if edge.attributes.is_empty() {
        format!("\t{} {op} {};", edge.head, edge.tail)
    } else {
        format!("\t{} {op} {} {};", edge.head, edge.tail, edge.attributes)
    }
}
