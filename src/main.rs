//! Lineage CLI
//!
//! Usage:
//!   lineage [OPTIONS] [FILE]
//!
//! Reads a TOML chart document, computes the layout and prints one placement
//! per line (`id  x  y  width  height`). `--debug` dumps the generation tree
//! with coordinates to stderr.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;

use lineage::{layout, Chart, ChartDoc, FamilyTree, LayoutConfig, NodeId};

#[derive(Parser)]
#[command(name = "lineage")]
#[command(about = "Layout engine for kinship charts")]
struct Cli {
    /// Chart document (TOML); reads from stdin if not provided
    input: Option<PathBuf>,

    /// Dump the generation tree with coordinates to stderr
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Interactive invocation without a file: show the intro instead of
    // waiting on a terminal read.
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let doc = match ChartDoc::from_str(&source) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let chart = match Chart::from_document(&doc) {
        Ok(chart) => chart,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.debug {
        eprintln!("=== Chart Debug ===");
        if let Some(root) = chart.tree().root() {
            debug_dump(chart.tree(), chart.config(), root, 0);
        }
        eprintln!("===================");
    }

    for p in chart.placements() {
        println!(
            "{}\t{:.1}\t{:.1}\t{:.1}\t{:.1}",
            p.id, p.x, p.y, p.width, p.height
        );
    }
}

/// Print a node with its spouses, then recurse into the effective children,
/// mirroring the order a renderer would draw them in.
fn debug_dump(tree: &FamilyTree, config: &LayoutConfig, id: NodeId, depth: usize) {
    let indent = "  ".repeat(depth);
    let node = tree.node(id);
    let (x, y) = layout::position(tree, id, config);
    eprintln!(
        "{}[{}] x={:.1} y={:.1} span={:.1}",
        indent,
        node.id(),
        x,
        y,
        layout::span(tree, id, config)
    );
    for spouse in node.spouses() {
        let partner = tree.node(*spouse);
        let (sx, sy) = layout::position(tree, *spouse, config);
        eprintln!("{}  ({}) x={:.1} y={:.1}", indent, partner.id(), sx, sy);
    }
    for child in tree.children_of(id) {
        debug_dump(tree, config, child, depth + 1);
    }
}

fn print_intro() {
    println!(
        r#"Lineage - layout engine for kinship charts

USAGE:
    lineage [OPTIONS] [FILE]
    cat chart.toml | lineage

OPTIONS:
    -d, --debug    Dump the generation tree with coordinates to stderr
    -h, --help     Print help

INPUT:
    A TOML document with an [options] table plus [[individual]] entries:

        [options]
        orient = "top"
        align = "center"

        [[individual]]
        id = "ada"
        name = "Ada"

        [[individual]]
        id = "bea"
        parent = "ada"

    Each placement is printed as 'id  x  y  width  height', one per line."#
    );
}
