use std::io::Read;

use clap::Parser;

use dotfmt::{parse_dot_graph, render, GraphId};

#[derive(Parser)]
#[command(name = "dotfmt", about = "Parse Graphviz DOT files and print them back, normalized")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    file: Option<std::path::PathBuf>,

    /// Validate only; print nothing on success
    #[arg(long)]
    check: bool,

    /// Force the strict graph variant on output
    #[arg(long)]
    strict: bool,

    /// Replace the graph id on output
    #[arg(long)]
    id: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let input = match cli.file {
        Some(path) => std::fs::read_to_string(&path).unwrap_or_else(|e| {
            eprintln!("ERROR: failed to read {}: {e}", path.display());
            std::process::exit(1);
        }),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).unwrap_or_else(|e| {
                eprintln!("ERROR: failed to read stdin: {e}");
                std::process::exit(1);
            });
            buf
        }
    };

    let mut graph = match parse_dot_graph(&input) {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("ERROR: {e}");
            std::process::exit(1);
        }
    };

    if cli.strict {
        graph = graph.make_strict();
    }
    if let Some(id) = cli.id {
        let id = id.parse::<GraphId>().unwrap_or_else(|e| {
            eprintln!("ERROR: invalid graph id: {e}");
            std::process::exit(1);
        });
        graph = graph.set_id(id);
    }

    if !cli.check {
        print!("{}", render(&graph));
    }
}
