use std::collections::HashSet;
use std::sync::Mutex;

use pretty_assertions::assert_eq;

use archgen::classify::NodeKind;
use archgen::display::{DEFAULT_SCALE, Position, convert};
use archgen::engine::{Layout, LayoutEngine, OutputFormat};
use archgen::layout_json::LayoutResult;
use archgen::{Error, Result, convert_dot};

/// Stands in for Graphviz: remembers the DOT it was given and replies with
/// canned `-Tjson` output.
struct CannedEngine {
    json: &'static str,
    seen: Mutex<Vec<(String, Layout, OutputFormat)>>,
}

impl CannedEngine {
    fn new(json: &'static str) -> Self {
        Self {
            json,
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl LayoutEngine for CannedEngine {
    fn pipe(&self, source: &str, layout: Layout, format: OutputFormat) -> Result<Vec<u8>> {
        self.seen
            .lock()
            .unwrap()
            .push((source.to_string(), layout, format));
        Ok(self.json.as_bytes().to_vec())
    }
}

const TWO_NODES: &str = r#"{
    "name": "G", "directed": true, "strict": true, "bb": "0,0,54,108",
    "objects": [
        {"_gvid": 0, "name": "a", "label": "\\N", "pos": "27,90", "shape": "ellipse"},
        {"_gvid": 1, "name": "b", "label": "\\N", "pos": "27,18", "shape": "ellipse"}
    ],
    "edges": [{"_gvid": 0, "tail": 0, "head": 1, "pos": "e,27,36.104 27,71.697 27,63.983 27,54.712 27,46.112"}]
}"#;

const CLUSTERED: &str = r#"{
    "name": "G",
    "objects": [
        {"_gvid": 0, "name": "cluster_storage", "label": "Storage", "bb": "8,8,200,90", "nodes": [3, 4]},
        {"_gvid": 1, "name": "user", "label": "User", "pos": "100,300", "shape": "circle"},
        {"_gvid": 2, "name": "api", "label": "Shortening Service", "pos": "100,200", "shape": "circle"},
        {"_gvid": 3, "name": "cache", "label": "Redis\\nCache", "pos": "50,50", "shape": "cylinder"},
        {"_gvid": 4, "name": "urls", "label": "URL Store", "pos": "150,50", "shape": "cylinder"}
    ],
    "edges": [
        {"_gvid": 0, "tail": 1, "head": 2, "style": "solid", "label": "POST /shorten"},
        {"_gvid": 1, "tail": 2, "head": 3, "style": "dashed", "xlabel": "warm"},
        {"_gvid": 2, "tail": 2, "head": 4}
    ]
}"#;

// =============================================================================
// End-to-end
// =============================================================================

#[test]
fn url_shortener_two_nodes_one_edge() {
    let engine = CannedEngine::new(TWO_NODES);
    let graph = convert_dot(&engine, "graph G { a--b }", DEFAULT_SCALE).unwrap();

    let seen = engine.seen.lock().unwrap();
    assert_eq!(
        seen.as_slice(),
        &[(
            "strict digraph G { a->b }".to_string(),
            Layout::Dot,
            OutputFormat::Json
        )]
    );

    let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.edges[0].source, "a");
    assert_eq!(graph.edges[0].target, "b");
    assert!(!graph.edges[0].is_dashed());
    assert_eq!(graph.edges[0].label, None);
}

#[test]
fn bad_tail_index_fails_whole_conversion() {
    let engine = CannedEngine::new(
        r#"{"objects": [{"name": "a", "pos": "0,0"}], "edges": [{"tail": 7, "head": 0}]}"#,
    );
    let err = convert_dot(&engine, "digraph { a }", DEFAULT_SCALE).unwrap_err();
    assert!(matches!(err, Error::MissingEndpoint { edge: 0, index: 7 }), "got {err:?}");
}

#[test]
fn malformed_layout_json_fails() {
    let engine = CannedEngine::new("Error: syntax error in line 1");
    let err = convert_dot(&engine, "digraph { a }", DEFAULT_SCALE).unwrap_err();
    assert!(matches!(err, Error::LayoutJson(_)), "got {err:?}");
}

// =============================================================================
// Conversion properties
// =============================================================================

#[test]
fn round_trip_counts() {
    let layout = LayoutResult::from_json(CLUSTERED.as_bytes()).unwrap();
    let graph = convert(&layout, DEFAULT_SCALE).unwrap();

    // five objects, one of them a cluster
    assert_eq!(graph.nodes.len(), 4);
    assert_eq!(graph.edges.len(), 3);

    let ids: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids.len(), graph.nodes.len(), "node ids are unique");
    for e in &graph.edges {
        assert!(ids.contains(e.source.as_str()));
        assert!(ids.contains(e.target.as_str()));
    }
}

#[test]
fn classification() {
    let layout = LayoutResult::from_json(CLUSTERED.as_bytes()).unwrap();
    let graph = convert(&layout, DEFAULT_SCALE).unwrap();
    let kinds: Vec<(&str, NodeKind, Option<&str>)> = graph
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), n.kind, n.data.icon.as_deref()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("user", NodeKind::Image, Some("user")),
            ("api", NodeKind::Diamond, None),
            ("cache", NodeKind::Image, Some("redis")),
            ("urls", NodeKind::Database, None),
        ]
    );
}

#[test]
fn cluster_members_tagged_with_parent() {
    let layout = LayoutResult::from_json(CLUSTERED.as_bytes()).unwrap();
    let graph = convert(&layout, DEFAULT_SCALE).unwrap();
    let parents: Vec<Option<&str>> = graph
        .nodes
        .iter()
        .map(|n| n.parent_node.as_deref())
        .collect();
    assert_eq!(
        parents,
        vec![None, None, Some("cluster_storage"), Some("cluster_storage")]
    );
}

#[test]
fn nested_container_objects_flattened() {
    let layout = LayoutResult::from_json(
        br#"{
            "objects": [
                {"name": "cluster_edge", "objects": [
                    {"name": "cdn", "pos": "1,1"},
                    {"name": "cluster_inner", "objects": [{"name": "waf", "pos": "2,2"}]}
                ]},
                {"name": "origin", "pos": "3,3"}
            ],
            "edges": [{"tail": 1, "head": 0}]
        }"#,
    )
    .unwrap();
    // edge indices point at the top-level list; index 0 is a container
    assert!(matches!(
        convert(&layout, DEFAULT_SCALE),
        Err(Error::MissingEndpoint { edge: 0, index: 0 })
    ));

    let mut layout = layout;
    layout.edges.clear();
    let graph = convert(&layout, DEFAULT_SCALE).unwrap();
    let flat: Vec<(&str, Option<&str>)> = graph
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), n.parent_node.as_deref()))
        .collect();
    assert_eq!(
        flat,
        vec![
            ("cdn", Some("cluster_edge")),
            ("waf", Some("cluster_inner")),
            ("origin", None),
        ]
    );
}

#[test]
fn coordinates_scaled_and_flipped() {
    let layout = LayoutResult::from_json(
        br#"{"objects": [{"name": "n", "pos": "10,20"}], "edges": []}"#,
    )
    .unwrap();
    let graph = convert(&layout, 1.5).unwrap();
    assert_eq!(graph.nodes[0].position, Position { x: 15.0, y: -30.0 });

    let graph = convert(&layout, 2.0).unwrap();
    assert_eq!(graph.nodes[0].position, Position { x: 20.0, y: -40.0 });
}

#[test]
fn edge_labels_and_dashes() {
    let layout = LayoutResult::from_json(CLUSTERED.as_bytes()).unwrap();
    let graph = convert(&layout, DEFAULT_SCALE).unwrap();
    let edges: Vec<(&str, bool, Option<&str>)> = graph
        .edges
        .iter()
        .map(|e| (e.id.as_str(), e.is_dashed(), e.label.as_deref()))
        .collect();
    assert_eq!(
        edges,
        vec![
            ("e_user_api", false, Some("POST /shorten")),
            ("e_api_cache", true, Some("warm")),
            ("e_api_urls", false, None),
        ]
    );
}

#[test]
fn response_json_shape() {
    let engine = CannedEngine::new(TWO_NODES);
    let graph = convert_dot(&engine, "digraph { a -> b }", DEFAULT_SCALE).unwrap();
    let json = serde_json::to_value(&graph).unwrap();
    assert_eq!(json["nodes"][0]["type"], "circle");
    assert_eq!(json["nodes"][0]["position"]["x"], 40.5);
    assert_eq!(json["nodes"][0]["position"]["y"], -135.0);
    assert_eq!(json["nodes"][0]["data"]["label"], "a");
    assert_eq!(json["edges"][0]["source"], "a");
    assert_eq!(json["edges"][0]["data"]["isDashed"], false);
    assert_eq!(json["edges"][0]["style"]["strokeDasharray"], "0");
}
