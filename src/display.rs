use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::classify::{NodeKind, classify};
use crate::engine::{Layout, LayoutEngine, OutputFormat};
use crate::error::{Error, Result};
use crate::layout_json::{LayoutObject, LayoutResult, parse_point};

pub const DEFAULT_SCALE: f64 = 1.5;

// Graphviz's "no custom label" placeholder.
const NAME_PLACEHOLDER: &str = "\\N";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayGraph {
    pub nodes: Vec<DisplayNode>,
    pub edges: Vec<DisplayEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub position: Position,
    pub data: NodeData,
    pub parent_node: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeData {
    pub label: String,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub animated: bool,
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub style: EdgeStyle,
    pub data: EdgeData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
    pub stroke: &'static str,
    pub stroke_width: u32,
    pub stroke_dasharray: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeData {
    pub is_dashed: bool,
}

impl DisplayEdge {
    pub fn new(source: &str, target: &str, dashed: bool, label: Option<String>) -> Self {
        DisplayEdge {
            id: format!("e_{source}_{target}"),
            source: source.to_string(),
            target: target.to_string(),
            animated: true,
            label,
            kind: "smoothstep",
            style: EdgeStyle {
                stroke: "#555",
                stroke_width: 2,
                stroke_dasharray: if dashed { "5,5" } else { "0" },
            },
            data: EdgeData { is_dashed: dashed },
        }
    }

    pub fn is_dashed(&self) -> bool {
        self.data.is_dashed
    }
}

pub fn layout_to_display(
    engine: &dyn LayoutEngine,
    source: &str,
    scale: f64,
) -> Result<DisplayGraph> {
    let json = engine.pipe(source, Layout::Dot, OutputFormat::Json)?;
    let layout = LayoutResult::from_json(&json)?;
    convert(&layout, scale)
}

pub fn convert(layout: &LayoutResult, scale: f64) -> Result<DisplayGraph> {
    let membership = container_membership(&layout.objects);

    let mut nodes = Vec::new();
    for (index, obj) in layout.objects.iter().enumerate() {
        let parent = membership.get(&index).map(String::as_str);
        collect_nodes(obj, parent, scale, &mut nodes)?;
    }

    let node_ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();

    let mut edges = Vec::with_capacity(layout.edges.len());
    for (i, edge) in layout.edges.iter().enumerate() {
        let source = endpoint(layout, &node_ids, i, edge.tail)?;
        let target = endpoint(layout, &node_ids, i, edge.head)?;
        let dashed = matches!(edge.style.as_deref(), Some("dashed" | "dotted"));
        let label = [&edge.label, &edge.xlabel]
            .into_iter()
            .flatten()
            .find(|l| !l.is_empty())
            .map(|l| unescape_newlines(l));
        edges.push(DisplayEdge::new(source, target, dashed, label));
    }

    Ok(DisplayGraph { nodes, edges })
}

fn endpoint<'a>(
    layout: &'a LayoutResult,
    node_ids: &HashSet<&str>,
    edge: usize,
    index: usize,
) -> Result<&'a str> {
    layout
        .objects
        .get(index)
        .map(|obj| obj.name.as_str())
        .filter(|name| node_ids.contains(name))
        .ok_or(Error::MissingEndpoint { edge, index })
}

fn collect_nodes(
    obj: &LayoutObject,
    parent: Option<&str>,
    scale: f64,
    out: &mut Vec<DisplayNode>,
) -> Result<()> {
    if obj.is_container() {
        for child in &obj.objects {
            collect_nodes(child, Some(obj.name.as_str()), scale, out)?;
        }
        return Ok(());
    }
    if obj.is_anonymous() {
        return Ok(());
    }

    let (x, y) = match &obj.pos {
        Some(pos) => parse_point(pos)?,
        None => (0.0, 0.0),
    };

    let label = match obj.label.as_deref() {
        Some(l) if l != NAME_PLACEHOLDER && !l.trim().is_empty() => unescape_newlines(l),
        _ => obj.name.clone(),
    };
    let class = classify(&label, obj.shape.as_deref());

    out.push(DisplayNode {
        id: obj.name.clone(),
        kind: class.kind,
        position: project(x, y, scale),
        data: NodeData {
            label,
            icon: class.icon.map(str::to_string),
        },
        parent_node: parent.map(str::to_string),
    });
    Ok(())
}

// Engine y grows upward, the editor's grows downward.
pub fn project(x: f64, y: f64, scale: f64) -> Position {
    Position {
        x: x * scale,
        y: -y * scale,
    }
}

// Map top-level object index -> innermost container listing it in `nodes`.
fn container_membership(objects: &[LayoutObject]) -> HashMap<usize, String> {
    let mut best: HashMap<usize, (usize, &str)> = HashMap::new();
    for container in objects.iter().filter(|o| o.is_container()) {
        let size = container.nodes.len();
        for &index in &container.nodes {
            let entry = best.entry(index).or_insert((size, container.name.as_str()));
            if size < entry.0 {
                *entry = (size, container.name.as_str());
            }
        }
    }
    best.into_iter()
        .map(|(index, (_, name))| (index, name.to_string()))
        .collect()
}

fn unescape_newlines(s: &str) -> String {
    s.replace("\\n", "\n")
}
