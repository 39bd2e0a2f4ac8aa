use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    #[serde(rename = "default")]
    Default,
    #[serde(rename = "diamond")]
    Diamond,
    #[serde(rename = "circle")]
    Circle,
    #[serde(rename = "database")]
    Database,
    #[serde(rename = "triangle")]
    Triangle,
    #[serde(rename = "imageNode")]
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: NodeKind,
    pub icon: Option<&'static str>,
}

/// Label keyword -> icon. Checked in order; the first keyword contained in
/// the lower-cased label wins.
pub const ICON_RULES: &[(&str, &str)] = &[
    ("mysql", "mysql"),
    ("cassandra", "cassandra"),
    ("postgres", "postgres"),
    ("mongo", "mongo"),
    ("redis", "redis"),
    ("kafka", "kafka"),
    ("rabbit", "rabbitmq"),
    ("docker", "docker"),
    ("k8s", "kubernetes"),
    ("react", "react"),
    ("python", "python"),
    ("user", "user"),
    ("aws", "aws"),
    ("ec2", "server"),
    ("lb", "load-balancer"),
];

/// Graphviz shape -> display kind. Shapes not listed map to `Default`.
pub const SHAPE_RULES: &[(&str, NodeKind)] = &[
    ("diamond", NodeKind::Diamond),
    ("Mdiamond", NodeKind::Diamond),
    ("triangle", NodeKind::Triangle),
    ("box", NodeKind::Default),
    ("rect", NodeKind::Default),
    ("rectangle", NodeKind::Default),
    ("circle", NodeKind::Circle),
    ("doublecircle", NodeKind::Circle),
    ("oval", NodeKind::Circle),
    ("ellipse", NodeKind::Circle),
    ("cylinder", NodeKind::Database),
    ("note", NodeKind::Default),
];

pub fn icon_for(label: &str) -> Option<&'static str> {
    let lower = label.to_lowercase();
    ICON_RULES
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|&(_, icon)| icon)
}

pub fn kind_for_shape(shape: Option<&str>) -> NodeKind {
    shape
        .and_then(|shape| SHAPE_RULES.iter().find(|(name, _)| *name == shape))
        .map(|&(_, kind)| kind)
        .unwrap_or(NodeKind::Default)
}

pub fn classify(label: &str, shape: Option<&str>) -> Classification {
    if let Some(icon) = icon_for(label) {
        return Classification {
            kind: NodeKind::Image,
            icon: Some(icon),
        };
    }

    let mut kind = kind_for_shape(shape);
    // services are drawn as diamonds even when laid out as circles
    if kind == NodeKind::Circle && label.to_lowercase().contains("service") {
        kind = NodeKind::Diamond;
    }
    Classification { kind, icon: None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redis_label_is_icon_regardless_of_shape() {
        for shape in [None, Some("cylinder"), Some("circle"), Some("diamond")] {
            let c = classify("Redis Cache", shape);
            assert_eq!(c.kind, NodeKind::Image);
            assert_eq!(c.icon, Some("redis"));
        }
    }

    #[test]
    fn icon_rules_first_match_wins() {
        // "mysql" is listed before "user"
        assert_eq!(icon_for("MySQL user table"), Some("mysql"));
        // "user" is listed before "lb"
        assert_eq!(icon_for("user lb"), Some("user"));
    }

    #[test]
    fn icon_aliases() {
        assert_eq!(icon_for("RabbitMQ"), Some("rabbitmq"));
        assert_eq!(icon_for("k8s cluster"), Some("kubernetes"));
        assert_eq!(icon_for("EC2 fleet"), Some("server"));
        assert_eq!(icon_for("Public LB"), Some("load-balancer"));
    }

    #[test]
    fn no_icon_for_plain_label() {
        assert_eq!(icon_for("Gateway"), None);
    }

    #[test]
    fn shape_table() {
        assert_eq!(kind_for_shape(Some("cylinder")), NodeKind::Database);
        assert_eq!(kind_for_shape(Some("Mdiamond")), NodeKind::Diamond);
        assert_eq!(kind_for_shape(Some("doublecircle")), NodeKind::Circle);
        assert_eq!(kind_for_shape(Some("ellipse")), NodeKind::Circle);
        assert_eq!(kind_for_shape(Some("note")), NodeKind::Default);
        assert_eq!(kind_for_shape(Some("triangle")), NodeKind::Triangle);
    }

    #[test]
    fn unknown_or_missing_shape_is_default() {
        assert_eq!(kind_for_shape(Some("hexagon")), NodeKind::Default);
        assert_eq!(kind_for_shape(None), NodeKind::Default);
    }

    #[test]
    fn circle_service_becomes_diamond() {
        let c = classify("Shortening Service", Some("circle"));
        assert_eq!(c.kind, NodeKind::Diamond);
        assert_eq!(c.icon, None);
    }

    #[test]
    fn service_override_only_applies_to_circles() {
        assert_eq!(classify("Shortening Service", Some("box")).kind, NodeKind::Default);
        assert_eq!(classify("Gateway", Some("circle")).kind, NodeKind::Circle);
    }

    #[test]
    fn kinds_serialize_as_editor_types() {
        assert_eq!(serde_json::to_string(&NodeKind::Image).unwrap(), "\"imageNode\"");
        assert_eq!(serde_json::to_string(&NodeKind::Database).unwrap(), "\"database\"");
    }
}
