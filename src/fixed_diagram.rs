use std::collections::HashSet;

use crate::dot_writer::DotWriter;
use crate::error::{Error, Result};

pub type Attr = (&'static str, &'static str);

/// A hand-placed diagram animated one flow at a time. Every node carries a
/// pinned coordinate, so the engine only draws it.
#[derive(Debug, Clone)]
pub struct FixedDiagram {
    pub name: &'static str,
    pub title: Banner,
    pub graph_attrs: Vec<Attr>,
    pub node_look: NodeLook,
    pub nodes: Vec<FixedNode>,
    pub flows: Vec<Flow>,
    pub theme: EdgeTheme,
    pub fps: f64,
    pub output: &'static str,
    pub background: [u8; 3],
}

#[derive(Debug, Clone)]
pub struct Banner {
    pub text: &'static str,
    pub pos: (f64, f64),
    pub font_size: u32,
}

#[derive(Debug, Clone)]
pub struct NodeLook {
    pub style: &'static str,
    pub width: &'static str,
    pub height: &'static str,
}

#[derive(Debug, Clone)]
pub struct FixedNode {
    pub id: &'static str,
    pub label: &'static str,
    pub pos: (f64, f64),
    pub shape: &'static str,
    pub fill: &'static str,
    pub border: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Flow {
    pub from: &'static str,
    pub to: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone)]
pub struct EdgeTheme {
    pub active: EdgeLook,
    pub inactive: EdgeLook,
    pub font_size: u32,
    pub padding: &'static str,
}

#[derive(Debug, Clone)]
pub struct EdgeLook {
    pub style: &'static str,
    pub color: &'static str,
    pub penwidth: &'static str,
    pub fontcolor: &'static str,
    pub fontname: &'static str,
}

pub fn pin((x, y): (f64, f64)) -> String {
    format!("{x},{y}!")
}

impl FixedDiagram {
    pub fn frame_count(&self) -> usize {
        self.flows.len()
    }

    pub fn validate(&self) -> Result<()> {
        let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id).collect();
        for flow in &self.flows {
            for end in [flow.from, flow.to] {
                if !ids.contains(end) {
                    return Err(Error::UnknownFlowNode(end.to_string()));
                }
            }
        }
        Ok(())
    }

    pub fn frame_source(&self, active: usize) -> String {
        let mut w = DotWriter::digraph(self.name);
        w.defaults("graph", &self.graph_attrs);

        let title_pos = pin(self.title.pos);
        let title_size = self.title.font_size.to_string();
        w.node(
            "header",
            &[
                ("label", self.title.text),
                ("pos", title_pos.as_str()),
                ("shape", "none"),
                ("fontcolor", "#FFFFFF"),
                ("fontname", "Helvetica-Bold"),
                ("fontsize", title_size.as_str()),
            ],
        );

        for node in &self.nodes {
            let pos = pin(node.pos);
            w.node(
                node.id,
                &[
                    ("label", node.label),
                    ("shape", node.shape),
                    ("style", self.node_look.style),
                    ("fillcolor", node.fill),
                    ("color", node.border),
                    ("fontcolor", "#FFFFFF"),
                    ("pos", pos.as_str()),
                    ("width", self.node_look.width),
                    ("height", self.node_look.height),
                    ("fontname", "Helvetica-Bold"),
                    ("fontsize", "10"),
                    ("penwidth", "2"),
                ],
            );
        }

        let font_size = self.theme.font_size.to_string();
        for (i, flow) in self.flows.iter().enumerate() {
            let look = if i == active {
                &self.theme.active
            } else {
                &self.theme.inactive
            };
            let xlabel = format!("{pad}{}{pad}", flow.label, pad = self.theme.padding);
            w.edge(
                flow.from,
                flow.to,
                &[
                    ("xlabel", xlabel.as_str()),
                    ("style", look.style),
                    ("color", look.color),
                    ("penwidth", look.penwidth),
                    ("fontcolor", look.fontcolor),
                    ("fontname", look.fontname),
                    ("fontsize", font_size.as_str()),
                ],
            );
        }

        w.finish()
    }
}

#[derive(Debug, Clone)]
pub struct ClusteredDiagram {
    pub name: &'static str,
    pub graph_attrs: Vec<Attr>,
    pub node_defaults: Vec<Attr>,
    pub edge_defaults: Vec<Attr>,
    pub clusters: Vec<Cluster>,
    pub nodes: Vec<ClusterNode>,
    pub links: Vec<Link>,
    pub output: &'static str,
}

#[derive(Debug, Clone)]
pub struct Cluster {
    pub id: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub nodes: Vec<ClusterNode>,
}

#[derive(Debug, Clone)]
pub struct ClusterNode {
    pub id: &'static str,
    pub label: &'static str,
    pub fill: &'static str,
    pub extra: Vec<Attr>,
}

#[derive(Debug, Clone)]
pub struct Link {
    pub from: &'static str,
    pub to: &'static str,
    pub label: Option<&'static str>,
    pub dashed: bool,
}

impl ClusteredDiagram {
    pub fn source(&self) -> String {
        let mut w = DotWriter::digraph(self.name);
        w.defaults("graph", &self.graph_attrs);
        w.defaults("node", &self.node_defaults);
        w.defaults("edge", &self.edge_defaults);

        for cluster in &self.clusters {
            w.subgraph(cluster.id);
            w.defaults("graph", &[("label", cluster.label), ("color", cluster.color)]);
            for node in &cluster.nodes {
                write_cluster_node(&mut w, node);
            }
            w.close();
        }
        for node in &self.nodes {
            write_cluster_node(&mut w, node);
        }

        for link in &self.links {
            let mut attrs: Vec<(&str, &str)> = Vec::new();
            if let Some(label) = link.label {
                attrs.push(("label", label));
            }
            if link.dashed {
                attrs.push(("style", "dashed"));
            }
            w.edge(link.from, link.to, &attrs);
        }

        w.finish()
    }
}

fn write_cluster_node(w: &mut DotWriter, node: &ClusterNode) {
    let mut attrs: Vec<(&str, &str)> = vec![("label", node.label), ("fillcolor", node.fill)];
    attrs.extend(node.extra.iter().copied());
    w.node(node.id, &attrs);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn look(style: &'static str, color: &'static str) -> EdgeLook {
        EdgeLook {
            style,
            color,
            penwidth: "1.0",
            fontcolor: color,
            fontname: "Helvetica",
        }
    }

    fn sample() -> FixedDiagram {
        FixedDiagram {
            name: "sample",
            title: Banner {
                text: "SAMPLE",
                pos: (5.0, 20.0),
                font_size: 20,
            },
            graph_attrs: vec![("bgcolor", "#121212")],
            node_look: NodeLook {
                style: "filled",
                width: "1.0",
                height: "1.0",
            },
            nodes: vec![
                FixedNode {
                    id: "a",
                    label: "A\nnode",
                    pos: (0.0, 10.0),
                    shape: "rect",
                    fill: "#000000",
                    border: "#FFFFFF",
                },
                FixedNode {
                    id: "b",
                    label: "B",
                    pos: (10.0, 10.0),
                    shape: "cylinder",
                    fill: "#000000",
                    border: "#FFFFFF",
                },
            ],
            flows: vec![
                Flow { from: "a", to: "b", label: "1. write" },
                Flow { from: "b", to: "a", label: "2. ack" },
            ],
            theme: EdgeTheme {
                active: look("solid", "#00E5FF"),
                inactive: look("dashed", "#2A2A2A"),
                font_size: 11,
                padding: " ",
            },
            fps: 1.0,
            output: "sample.gif",
            background: [18, 18, 18],
        }
    }

    #[test]
    fn pin_formats_coordinates() {
        assert_eq!(pin((0.0, 40.0)), "0,40!");
        assert_eq!(pin((2.5, 3.0)), "2.5,3!");
    }

    #[test]
    fn frame_pins_every_node() {
        let src = sample().frame_source(0);
        assert!(src.contains(r#""a" [label="A\nnode" shape="rect""#));
        assert!(src.contains(r#"pos="0,10!""#));
        assert!(src.contains(r#"pos="10,10!""#));
        assert!(src.contains(r#""header" [label="SAMPLE" pos="5,20!""#));
    }

    #[test]
    fn only_active_flow_is_highlighted() {
        let src = sample().frame_source(1);
        let edges: Vec<&str> = src.lines().filter(|l| l.contains("->")).collect();
        assert_eq!(edges.len(), 2);
        assert!(edges[0].contains(r##"color="#2A2A2A""##));
        assert!(edges[0].contains(r#"xlabel=" 1. write ""#));
        assert!(edges[1].contains(r##"style="solid" color="#00E5FF""##));
    }

    #[test]
    fn frame_count_matches_flows() {
        assert_eq!(sample().frame_count(), 2);
    }

    #[test]
    fn validate_rejects_unknown_flow_node() {
        let mut d = sample();
        d.flows.push(Flow { from: "a", to: "ghost", label: "x" });
        assert!(matches!(d.validate(), Err(Error::UnknownFlowNode(id)) if id == "ghost"));
    }

    #[test]
    fn clustered_source_groups_nodes() {
        let d = ClusteredDiagram {
            name: "grouped",
            graph_attrs: vec![("rankdir", "TB")],
            node_defaults: vec![("style", "filled")],
            edge_defaults: vec![],
            clusters: vec![Cluster {
                id: "cluster_core",
                label: "Core",
                color: "white",
                nodes: vec![ClusterNode {
                    id: "x",
                    label: "X",
                    fill: "#1e293b",
                    extra: vec![],
                }],
            }],
            nodes: vec![ClusterNode {
                id: "y",
                label: "Y",
                fill: "#991b1b",
                extra: vec![("shape", "doubleoctagon")],
            }],
            links: vec![Link {
                from: "x",
                to: "y",
                label: Some("loop"),
                dashed: true,
            }],
            output: "grouped.png",
        };
        let src = d.source();
        assert!(src.contains("subgraph \"cluster_core\" {"));
        assert!(src.contains("    \"x\" [label=\"X\" fillcolor=\"#1e293b\"]"));
        assert!(src.contains("\"y\" [label=\"Y\" fillcolor=\"#991b1b\" shape=\"doubleoctagon\"]"));
        assert!(src.contains("\"x\" -> \"y\" [label=\"loop\" style=\"dashed\"]"));
    }
}
