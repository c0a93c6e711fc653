use std::io;

use anyhow::{Context, Result};
use itertools::Itertools;

use corvid::read_digraph;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut graph =
        read_digraph(io::stdin().lock()).context("reading `n m` edge list from stdin")?;

    let Some(source) = graph.vertices().min() else {
        println!("empty graph");
        return Ok(());
    };

    let tree = graph.bfs(source)?;
    println!("bfs from {source}:");
    for (v, attrs) in tree.iter() {
        match (attrs.distance, attrs.parent) {
            (Some(d), Some(p)) => println!("  {v}: distance {d}, parent {p}"),
            (Some(d), None) => println!("  {v}: distance {d}"),
            _ => println!("  {v}: unreachable"),
        }
    }

    let forest = graph.dfs(true);
    println!("dfs:");
    for (v, attrs) in forest.iter() {
        match attrs.parent {
            Some(p) => println!(
                "  {v}: discovered {}, finished {}, parent {p}",
                attrs.discovery, attrs.finish
            ),
            None => println!(
                "  {v}: discovered {}, finished {}",
                attrs.discovery, attrs.finish
            ),
        }
    }

    println!("topological order: {}", graph.ordering().iter().join(" "));
    Ok(())
}
