use serde::Deserialize;
use winnow::prelude::*;
use winnow::ascii::{float, space0};
use winnow::combinator::{opt, preceded};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayoutResult {
    #[serde(default)]
    pub objects: Vec<LayoutObject>,
    #[serde(default)]
    pub edges: Vec<LayoutEdge>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayoutObject {
    #[serde(default)]
    pub name: String,
    pub pos: Option<String>,
    pub shape: Option<String>,
    pub label: Option<String>,
    #[serde(default)]
    pub objects: Vec<LayoutObject>,
    // Indices into the top-level object list of the nodes a container holds.
    #[serde(default)]
    pub nodes: Vec<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayoutEdge {
    pub tail: usize,
    pub head: usize,
    pub style: Option<String>,
    pub label: Option<String>,
    pub xlabel: Option<String>,
}

impl LayoutResult {
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

impl LayoutObject {
    pub fn is_container(&self) -> bool {
        self.name.starts_with("cluster") || self.name.starts_with("subgraph")
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty() || self.name.starts_with('%')
    }
}

pub fn parse_point(text: &str) -> Result<(f64, f64)> {
    point
        .parse(text.trim())
        .map_err(|_| Error::Position(text.to_string()))
}

fn point(input: &mut &str) -> winnow::Result<(f64, f64)> {
    let x: f64 = float.parse_next(input)?;
    let y: f64 = preceded((space0, ',', space0), float).parse_next(input)?;
    opt('!').parse_next(input)?;
    Ok((x, y))
}
