//! Line-based ingestion of the `n m` edge-list format.
//!
//! The stream carries two integers `n m` (vertex count, edge count) followed
//! by `m` pairs `u v`, one directed edge each. Vertices are implicitly
//! numbered `1..=n` and created before any edge is added. Tokens are split on
//! arbitrary whitespace, so line boundaries carry no meaning.
//!
//! The reader performs no endpoint validation of its own: an edge referencing
//! an id outside `1..=n` surfaces as the [`DigraphError::UnknownVertex`]
//! failure propagated from [`Digraph::add_edge`].

use std::io::BufRead;
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

use crate::digraph::{Digraph, DigraphError};

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("i/o failure while reading graph: {0}")]
    Io(#[from] std::io::Error),
    #[error("truncated input: missing {0}")]
    Truncated(&'static str),
    #[error("malformed integer in graph input: {0}")]
    ParseInt(#[from] ParseIntError),
    #[error(transparent)]
    Graph(#[from] DigraphError),
}

/// Reads a graph in the `n m` edge-list format from any buffered reader.
pub fn read_digraph<R: BufRead>(mut reader: R) -> Result<Digraph, ReadError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_digraph(&input)
}

fn parse_digraph(input: &str) -> Result<Digraph, ReadError> {
    let mut tokens = input.split_whitespace();
    let n: u64 = next_token(&mut tokens, "vertex count")?.parse()?;
    let m: u64 = next_token(&mut tokens, "edge count")?.parse()?;

    let mut graph = Digraph::new();
    for id in 1..=n {
        graph.add_vertex(id)?;
    }
    for _ in 0..m {
        let u: u64 = next_token(&mut tokens, "edge source")?.parse()?;
        let v: u64 = next_token(&mut tokens, "edge target")?.parse()?;
        graph.add_edge(u, v)?;
    }
    Ok(graph)
}

fn next_token<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    expected: &'static str,
) -> Result<&'a str, ReadError> {
    tokens.next().ok_or(ReadError::Truncated(expected))
}

impl FromStr for Digraph {
    type Err = ReadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_digraph(s)
    }
}
