use crate::fixed_diagram::{
    Banner, Cluster, ClusterNode, ClusteredDiagram, EdgeLook, EdgeTheme, FixedDiagram, FixedNode,
    Flow, Link, NodeLook,
};

const BACKGROUND: [u8; 3] = [18, 18, 18];
const HIGHLIGHT: &str = "#00E5FF";

fn node(
    id: &'static str,
    label: &'static str,
    pos: (f64, f64),
    shape: &'static str,
    fill: &'static str,
    border: &'static str,
) -> FixedNode {
    FixedNode {
        id,
        label,
        pos,
        shape,
        fill,
        border,
    }
}

fn flows(table: &[(&'static str, &'static str, &'static str)]) -> Vec<Flow> {
    table
        .iter()
        .map(|&(from, to, label)| Flow { from, to, label })
        .collect()
}

fn uber_theme(inactive_color: &'static str, inactive_font: &'static str, active_pen: &'static str) -> EdgeTheme {
    EdgeTheme {
        active: EdgeLook {
            style: "dashed",
            color: HIGHLIGHT,
            penwidth: active_pen,
            fontcolor: HIGHLIGHT,
            fontname: "Helvetica-Bold",
        },
        inactive: EdgeLook {
            style: "dashed",
            color: inactive_color,
            penwidth: "1.5",
            fontcolor: inactive_font,
            fontname: "Helvetica-Bold",
        },
        font_size: 10,
        padding: " ",
    }
}

pub fn dns_hld() -> FixedDiagram {
    FixedDiagram {
        name: "dns_hld",
        title: Banner {
            text: "HLD OF DNS: ENTERPRISE SERVICE MESH PIPELINE",
            pos: (30.0, 65.0),
            font_size: 32,
        },
        graph_attrs: vec![
            ("bgcolor", "#121212"),
            ("splines", "ortho"),
            ("esep", "0.1"),
            ("sep", "0.1"),
            ("overlap", "false"),
        ],
        node_look: NodeLook {
            style: "filled",
            width: "1.8",
            height: "1.0",
        },
        nodes: vec![
            node("client", "Client\nBrowser", (0.0, 40.0), "rect", "#1A237E", "#5C6BC0"),
            node("cdn", "CDN Edge\n(PoP)", (10.0, 40.0), "hexagon", "#311B92", "#7E57C2"),
            node("waf", "Cloud\nWAF", (20.0, 40.0), "pentagon", "#004D40", "#26A69A"),
            node("api_gw", "API Gateway\n(OIDC)", (30.0, 40.0), "trapezium", "#BF360C", "#FF7043"),
            node("glb", "GLB\n(Anycast)", (40.0, 40.0), "diamond", "#1B5E20", "#66BB6A"),
            node("resolver", "Recursive\nResolver", (50.0, 40.0), "rect", "#4A148C", "#AB47BC"),
            node("root", "Root DNS (.)", (60.0, 55.0), "component", "#B71C1C", "#EF5350"),
            node("tld", "TLD DNS (.com)", (60.0, 40.0), "component", "#B71C1C", "#EF5350"),
            node("auth", "Auth DNS\n(Primary)", (60.0, 25.0), "component", "#B71C1C", "#EF5350"),
            node("db_primary", "Zone DB\n(Reg A)", (75.0, 25.0), "cylinder", "#212121", "#9E9E9E"),
            node("db_replica", "Zone DB\n(Reg B)", (75.0, 10.0), "cylinder", "#212121", "#9E9E9E"),
            node("service_a", "Service A\n(Mesh)", (0.0, 25.0), "rect", "#37474F", "#90A4AE"),
            node("service_b", "Service B\n(Mesh)", (10.0, 25.0), "rect", "#37474F", "#90A4AE"),
            node("redis", "Redis Cluster", (0.0, 10.0), "cylinder", "#880E4F", "#EC407A"),
            node("kafka", "Kafka Stream", (10.0, 10.0), "cds", "#263238", "#00B0FF"),
            node("monitor", "Observability", (30.0, 25.0), "note", "#263238", "#90A4AE"),
        ],
        flows: flows(&[
            ("db_primary", "db_replica", "1. Global DB Sync"),
            ("client", "cdn", "2. User HTTPS Request"),
            ("cdn", "waf", "3. Threat Filtering"),
            ("waf", "api_gw", "4. API Ingress"),
            ("api_gw", "api_gw", "5. OIDC Auth"),
            ("api_gw", "glb", "6. DNS Ingress"),
            ("glb", "resolver", "7. Forward Resolver"),
            ("resolver", "root", "8. Query Root"),
            ("root", "tld", "9. Refer TLD"),
            ("tld", "auth", "10. Refer Auth"),
            ("auth", "db_primary", "11. Shard Lookup"),
            ("db_primary", "auth", "12. Record Found"),
            ("auth", "resolver", "13. Auth Answer"),
            ("resolver", "client", "14. IP Delivery"),
            ("client", "service_a", "15. mTLS Conn"),
            ("service_a", "service_b", "16. Service Mesh"),
            ("service_b", "redis", "17. App Cache Hit"),
            ("redis", "service_b", "18. Data Return"),
            ("service_b", "service_a", "19. Mesh Response"),
            ("service_a", "kafka", "20. Async Trace"),
            ("kafka", "monitor", "21. Metric Consumption"),
            ("service_a", "api_gw", "22. Proxy Handover"),
            ("api_gw", "client", "23. Payload Delivery"),
            ("client", "cdn", "24. Edge Caching"),
            ("cdn", "client", "25. Finish (HIT)"),
        ]),
        theme: EdgeTheme {
            active: EdgeLook {
                style: "solid",
                color: HIGHLIGHT,
                penwidth: "5.0",
                fontcolor: HIGHLIGHT,
                fontname: "Helvetica-Bold",
            },
            inactive: EdgeLook {
                style: "dashed",
                color: "#2A2A2A",
                penwidth: "1.0",
                fontcolor: "#444444",
                fontname: "Helvetica",
            },
            font_size: 11,
            padding: "  ",
        },
        fps: 1.2,
        output: "dns_hld_flow.gif",
        background: BACKGROUND,
    }
}

pub fn uber_hld() -> FixedDiagram {
    FixedDiagram {
        name: "uber_hld",
        title: Banner {
            text: "UBER HLD: SYSTEM DISPATCH & MATCHING FLOW",
            pos: (15.0, 47.0),
            font_size: 30,
        },
        graph_attrs: vec![
            ("bgcolor", "#121212"),
            ("splines", "polyline"),
            ("overlap", "false"),
            ("dpi", "72"),
        ],
        node_look: NodeLook {
            style: "filled,bold",
            width: "2.2",
            height: "1.2",
        },
        nodes: vec![
            node("rider", "Rider App\n(Mobile)", (0.0, 40.0), "rect", "#000000", "#FFFFFF"),
            node("driver", "Driver App\n(Mobile)", (30.0, 40.0), "rect", "#000000", "#FFFFFF"),
            node("api_gw", "API Gateway\n(Envoy)", (15.0, 30.0), "trapezium", "#263238", "#FFFFFF"),
            node("ws_gw", "WebSocket GW\n(Push)", (25.0, 30.0), "hexagon", "#1A237E", "#FFFFFF"),
            node("demand", "Demand Srv\n(Matching)", (0.0, 20.0), "rect", "#0D47A1", "#FFFFFF"),
            node("supply", "Supply Srv\n(Tracking)", (10.0, 20.0), "rect", "#1B5E20", "#FFFFFF"),
            node("geospatial", "H3 Index\n(Geo-Sharding)", (20.0, 20.0), "diamond", "#4A148C", "#FFFFFF"),
            node("payments", "Payment Srv\n(Stripe/Braintree)", (30.0, 20.0), "rect", "#B71C1C", "#FFFFFF"),
            node("kafka", "Kafka Cluster\n(Event Stream)", (15.0, 5.0), "cds", "#BF360C", "#FFFFFF"),
            node("redis", "Redis\n(Driver Locations)", (5.0, 5.0), "cylinder", "#880E4F", "#FFFFFF"),
            node("cassandra", "Cassandra\n(Trip History)", (25.0, 5.0), "cylinder", "#212121", "#FFFFFF"),
        ],
        flows: flows(&[
            ("driver", "ws_gw", "1. GPS Update (WS)"),
            ("ws_gw", "redis", "2. Update Location"),
            ("rider", "api_gw", "3. Request Ride"),
            ("api_gw", "demand", "4. Initiate Trip"),
            ("demand", "geospatial", "5. Query Nearby Drivers"),
            ("geospatial", "redis", "6. Fetch Geo-IDs"),
            ("demand", "ws_gw", "7. Notify Best Driver"),
            ("ws_gw", "driver", "8. Dispatch Offer"),
            ("driver", "ws_gw", "9. Accept Trip"),
            ("ws_gw", "demand", "10. Confirm Match"),
            ("demand", "ws_gw", "11. Notify Rider"),
            ("ws_gw", "rider", "12. Driver Arriving"),
            ("demand", "kafka", "13. Trip Started Event"),
            ("kafka", "cassandra", "14. Persistence"),
            ("payments", "api_gw", "15. Authorize Hold"),
            ("rider", "driver", "16. Real-time mTLS sync"),
        ]),
        theme: uber_theme("#2D2D2D", "#546E7A", "6.0"),
        fps: 1.0,
        output: "uber_hld_advanced.gif",
        background: BACKGROUND,
    }
}

pub fn uber_lld() -> FixedDiagram {
    FixedDiagram {
        name: "uber_lld",
        title: Banner {
            text: "UBER LLD: COMPONENT LOGIC & DESIGN PATTERNS",
            pos: (15.0, 48.0),
            font_size: 28,
        },
        graph_attrs: vec![
            ("bgcolor", "#121212"),
            ("splines", "polyline"),
            ("overlap", "false"),
            ("dpi", "72"),
        ],
        node_look: NodeLook {
            style: "filled,bold",
            width: "2.4",
            height: "1.3",
        },
        nodes: vec![
            node("rider_loc", "RiderLocation\n(Lat/Long Object)", (0.0, 40.0), "rect", "#1A237E", "#FFFFFF"),
            node("driver_loc", "DriverLocation\n(Lat/Long Object)", (30.0, 40.0), "rect", "#1B5E20", "#FFFFFF"),
            node("ws_session", "WSSessionManager\n(Observer Pattern)", (15.0, 30.0), "hexagon", "#263238", "#FFFFFF"),
            node("match_eng", "MatchEngine\n(Strategy Pattern)", (0.0, 20.0), "diamond", "#0D47A1", "#FFFFFF"),
            node("trip_mgr", "TripManager\n(State Machine)", (10.0, 20.0), "rect", "#4A148C", "#FFFFFF"),
            node("geo_shard", "SpatialIndex\n(H3Hexagon Logic)", (20.0, 20.0), "parallelogram", "#004D40", "#FFFFFF"),
            node("ledger", "PaymentGateway\n(Command Pattern)", (30.0, 20.0), "rect", "#B71C1C", "#FFFFFF"),
            node("redis_geo", "RedisGeo\n(ZSET / GeoHash)", (5.0, 5.0), "cylinder", "#880E4F", "#FFFFFF"),
            node("kafka_log", "KafkaEventBus\n(Producer/Consumer)", (15.0, 5.0), "cds", "#BF360C", "#FFFFFF"),
            node("db_trip", "CassandraStorage\n(Trip Schema)", (25.0, 5.0), "cylinder", "#212121", "#FFFFFF"),
        ],
        flows: flows(&[
            ("driver_loc", "ws_session", "1. LocationStream(ID, Lat, Lng)"),
            ("ws_session", "redis_geo", "2. GEOADD(DriverSet, Lng, Lat, ID)"),
            ("rider_loc", "match_eng", "3. requestRide(User, PickUp, Drop)"),
            ("match_eng", "geo_shard", "4. getNearbyCells(H3Index)"),
            ("geo_shard", "redis_geo", "5. GEORADIUS(PickUp, 5km)"),
            ("redis_geo", "match_eng", "6. return CandidateList[]"),
            ("match_eng", "match_eng", "7. executeStrategy(FastestArrival)"),
            ("match_eng", "trip_mgr", "8. createTrip(TripID, Rider, Driver)"),
            ("trip_mgr", "ws_session", "9. pushMatchNotification()"),
            ("ws_session", "driver_loc", "10. notifyDriver(Accept/Decline)"),
            ("trip_mgr", "trip_mgr", "11. updateState(EN_ROUTE)"),
            ("trip_mgr", "kafka_log", "12. publishTripStarted()"),
            ("kafka_log", "db_trip", "13. persistInitialSnapshot()"),
            ("trip_mgr", "ledger", "14. authorizePayment(Amount)"),
            ("ledger", "trip_mgr", "15. paymentStatus(SUCCESS)"),
        ]),
        theme: uber_theme("#333333", "#607D8B", "7.0"),
        fps: 1.0,
        output: "uber_lld_advanced.gif",
        background: BACKGROUND,
    }
}

fn member(id: &'static str, label: &'static str, fill: &'static str) -> ClusterNode {
    ClusterNode {
        id,
        label,
        fill,
        extra: Vec::new(),
    }
}

fn layer(
    id: &'static str,
    label: &'static str,
    fill: &'static str,
    nodes: [(&'static str, &'static str); 3],
) -> Cluster {
    Cluster {
        id,
        label,
        color: "white",
        nodes: nodes
            .into_iter()
            .map(|(node_id, node_label)| member(node_id, node_label, fill))
            .collect(),
    }
}

fn link(from: &'static str, to: &'static str) -> Link {
    Link {
        from,
        to,
        label: None,
        dashed: false,
    }
}

fn feedback(from: &'static str, to: &'static str, label: &'static str) -> Link {
    Link {
        from,
        to,
        label: Some(label),
        dashed: true,
    }
}

pub fn influencer_lld() -> ClusteredDiagram {
    ClusteredDiagram {
        name: "LinkedIn_Influencer_LLD",
        graph_attrs: vec![
            ("rankdir", "TB"),
            ("bgcolor", "#0b0f1a"),
            ("fontcolor", "white"),
            ("fontsize", "12"),
            ("label", "LinkedIn Influencer (LLD Architecture)"),
            ("labelloc", "t"),
        ],
        node_defaults: vec![
            ("fontcolor", "white"),
            ("style", "filled"),
            ("color", "white"),
            ("penwidth", "2"),
        ],
        edge_defaults: vec![
            ("color", "white"),
            ("penwidth", "2.5"),
            ("arrowsize", "1.5"),
            ("fontcolor", "white"),
        ],
        clusters: vec![
            layer(
                "cluster_identity",
                "Personal Identity Layer",
                "#1e293b",
                [
                    ("Vision", "Vision\nTech + Community"),
                    ("Values", "Core Values\nAuthenticity & Growth"),
                    ("Consistency", "Consistency\nDiscipline & Presence"),
                ],
            ),
            layer(
                "cluster_content",
                "Content Creation Engine",
                "#312e81",
                [
                    ("Ideas", "Idea Generation\nExperience + Trends"),
                    ("Content", "Content Creation\nPosts | Insights"),
                    ("Storytelling", "Clear Storytelling"),
                ],
            ),
            layer(
                "cluster_distribution",
                "Distribution & Reach",
                "#064e3b",
                [
                    ("Timing", "Posting Strategy\nTiming & Frequency"),
                    ("LinkedIn", "LinkedIn Algorithm"),
                    ("Visibility", "Audience Visibility"),
                ],
            ),
            layer(
                "cluster_community",
                "Community & Trust",
                "#7c2d12",
                [
                    ("Engagement", "Engagement\nComments | DMs"),
                    ("Trust", "Trust Building"),
                    ("Community", "Developer Community"),
                ],
            ),
            layer(
                "cluster_impact",
                "Influence & Impact",
                "#4c1d95",
                [
                    ("Authority", "Thought Leadership"),
                    ("Opportunities", "Opportunities\nTalks | Projects"),
                    ("Growth", "Personal + Community Growth"),
                ],
            ),
        ],
        nodes: vec![ClusterNode {
            id: "Influencer",
            label: "LinkedIn Influencer\n(Value × Trust × Consistency)",
            fill: "#991b1b",
            extra: vec![("shape", "doubleoctagon"), ("penwidth", "3")],
        }],
        links: vec![
            link("Vision", "Values"),
            link("Values", "Consistency"),
            link("Consistency", "Ideas"),
            link("Ideas", "Content"),
            link("Content", "Storytelling"),
            link("Storytelling", "Timing"),
            link("Timing", "LinkedIn"),
            link("LinkedIn", "Visibility"),
            link("Visibility", "Engagement"),
            link("Engagement", "Trust"),
            link("Trust", "Community"),
            link("Community", "Authority"),
            link("Authority", "Opportunities"),
            link("Opportunities", "Growth"),
            link("Growth", "Influencer"),
            feedback("Engagement", "Ideas", "Audience Feedback"),
            feedback("Trust", "Storytelling", "Authenticity Loop"),
            feedback("Growth", "Vision", "Purpose Reinforcement"),
            feedback("LinkedIn", "Content", "Algorithm Signals"),
        ],
        output: "influencer_lld.png",
    }
}
