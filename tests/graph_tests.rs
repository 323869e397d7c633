use waygraph::error::Error;
use waygraph::graph::{Edge, Graph, Node};
use waygraph::point::Point3;

fn node(x: f64, y: f64, z: f64) -> Node {
    Node::new(Point3::new(x, y, z), ())
}

#[test]
fn ut_graph_add_node() {
    let a = node(0.0, 0.0, 0.0);
    let b = node(1.0, 0.0, 0.0);

    let mut g = Graph::new();

    assert!(g.is_empty());
    assert!(g.add_node(&a));
    assert!(g.add_node(&b));
    assert!(!g.add_node(&a));
    assert_eq!(g.node_count(), 2);
    assert!(g.contains_node(&a));

    // A distinct node at the same position is a different member.
    let twin = node(0.0, 0.0, 0.0);
    assert!(!g.contains_node(&twin));
    assert!(g.add_node(&twin));
    assert_eq!(g.node_count(), 3);
}

#[test]
fn ut_graph_add_edge_requires_membership() {
    let a = node(0.0, 0.0, 0.0);
    let b = node(1.0, 0.0, 0.0);
    let outsider = node(9.0, 0.0, 0.0);

    let mut g = Graph::new();
    g.add_node(&a);
    g.add_node(&b);

    let e = Edge::new(&a, &b);
    assert_eq!(g.add_edge(&e), Ok(true));
    assert_eq!(g.add_edge(&e), Ok(false));
    assert_eq!(g.edge_count(), 1);

    let stray = Edge::new(&a, &outsider);
    assert_eq!(g.add_edge(&stray), Err(Error::EndpointNotMember));
    assert_eq!(g.connect(&a, &outsider, 1.0).err(), Some(Error::EndpointNotMember));
    assert_eq!(g.edge_count(), 1);
}

#[test]
fn ut_graph_connect() {
    let a = node(0.0, 0.0, 0.0);
    let b = node(1.0, 0.0, 0.0);

    let mut g = Graph::new();
    g.add_node(&a);
    g.add_node(&b);

    let e = g.connect(&a, &b, 2.0).unwrap();

    // The edge is in the container and in both adjacency lists.
    assert!(g.contains_edge(&e));
    assert!(Edge::same_identity(&a.edge_to(&b).unwrap(), &e));
    assert!(Edge::same_identity(&b.edge_from(&a).unwrap(), &e));
    assert_eq!(e.cost(), 2.0);

    assert!(g.connect(&a, &b, -1.0).is_err());
    assert_eq!(g.edge_count(), 1);
}

#[test]
fn ut_graph_connect_both() {
    let a = node(0.0, 0.0, 0.0);
    let b = node(1.0, 0.0, 0.0);

    let mut g = Graph::new();
    g.add_node(&a);
    g.add_node(&b);

    let (forward, backward) = g.connect_both(&a, &b, 1.5).unwrap();

    assert_eq!(g.edge_count(), 2);
    assert!(Node::same_identity(&forward.source(), &a));
    assert!(Node::same_identity(&backward.source(), &b));
    assert_eq!(forward.weight(), 1.5);
    assert_eq!(backward.weight(), 1.5);
}

#[test]
fn ut_graph_remove_node() {
    let a = node(0.0, 0.0, 0.0);
    let b = node(1.0, 0.0, 0.0);
    let c = node(2.0, 0.0, 0.0);

    let mut g = Graph::new();
    g.add_node(&a);
    g.add_node(&b);
    g.add_node(&c);
    g.connect(&a, &b, 1.0).unwrap();
    g.connect(&b, &c, 1.0).unwrap();
    g.connect(&c, &a, 1.0).unwrap();

    assert!(g.remove_node(&b));
    assert!(!g.remove_node(&b));

    assert_eq!(g.node_count(), 2);
    assert_eq!(g.edge_count(), 1);
    for edge in g.edges() {
        assert!(!Node::same_identity(&edge.source(), &b));
        assert!(!Node::same_identity(&edge.target(), &b));
    }
    assert_eq!(a.out_degree(), 0);
    assert_eq!(c.in_degree(), 0);
    assert!(a.edge_to(&b).is_none());
    assert!(c.edge_from(&b).is_none());
}

#[test]
fn ut_graph_remove_edge() {
    let a = node(0.0, 0.0, 0.0);
    let b = node(1.0, 0.0, 0.0);

    let mut g = Graph::new();
    g.add_node(&a);
    g.add_node(&b);
    let first = g.connect(&a, &b, 1.0).unwrap();
    let second = g.connect(&a, &b, 2.0).unwrap();

    assert!(g.remove_edge(&first));
    assert!(!g.remove_edge(&first));

    // The parallel edge survives in the container and the adjacency lists.
    assert_eq!(g.edge_count(), 1);
    assert_eq!(a.out_degree(), 1);
    assert_eq!(b.in_degree(), 1);
    assert!(Edge::same_identity(&a.edge_to(&b).unwrap(), &second));
}

#[test]
fn ut_graph_clear() {
    let a = node(0.0, 0.0, 0.0);
    let b = node(1.0, 0.0, 0.0);

    let mut g = Graph::new();
    g.add_node(&a);
    g.add_node(&b);
    g.connect(&a, &b, 1.0).unwrap();

    g.clear();

    assert!(g.is_empty());
    assert_eq!(g.edge_count(), 0);
    // Adjacency lists are not the container's to clear.
    assert_eq!(a.out_degree(), 1);
}

#[test]
fn ut_graph_bounding_box() {
    let mut g = Graph::new();

    assert_eq!(g.bounding_box().err(), Some(Error::EmptyGraph));

    g.add_node(&node(-1.0, 2.0, 0.0));
    g.add_node(&node(3.0, -4.0, 5.0));

    let bounds = g.bounding_box().unwrap();
    assert_eq!(bounds.min, Point3::new(-1.0, -4.0, 0.0));
    assert_eq!(bounds.max, Point3::new(3.0, 2.0, 5.0));
}

#[test]
fn ut_graph_closest_node() {
    let a = node(0.0, 0.0, 0.0);
    let b = node(2.0, 0.0, 0.0);
    let c = node(2.1, 0.0, 0.0);

    let mut g = Graph::new();
    g.add_node(&a);
    g.add_node(&b);
    g.add_node(&c);

    let (closest, distance) = g.closest_node(Point3::new(1.9, 0.0, 0.0), false).unwrap();
    assert!(Node::same_identity(&closest, &b));
    assert!((distance - 0.1).abs() < 1e-12);

    b.set_passable(false);
    let (closest, _) = g.closest_node(Point3::new(1.9, 0.0, 0.0), true).unwrap();
    assert!(Node::same_identity(&closest, &c));

    // Without the filter the impassable node still wins.
    let (closest, _) = g.closest_node(Point3::new(1.9, 0.0, 0.0), false).unwrap();
    assert!(Node::same_identity(&closest, &b));

    assert!(Graph::<()>::new().closest_node(Point3::new(0.0, 0.0, 0.0), false).is_none());
}

#[test]
fn ut_graph_closest_node_tie_is_first_inserted() {
    let a = node(1.0, 0.0, 0.0);
    let b = node(-1.0, 0.0, 0.0);

    let mut g = Graph::new();
    g.add_node(&a);
    g.add_node(&b);

    let (closest, _) = g.closest_node(Point3::new(0.0, 0.0, 0.0), false).unwrap();
    assert!(Node::same_identity(&closest, &a));
}

#[test]
fn ut_graph_closest_edge_measures_infinite_line() {
    let a = node(0.0, 0.0, 0.0);
    let b = node(1.0, 0.0, 0.0);
    let c = node(0.0, 10.0, 0.0);
    let d = node(1.0, 10.0, 0.0);

    let mut g = Graph::new();
    for n in [&a, &b, &c, &d] {
        g.add_node(n);
    }
    let low = g.connect(&a, &b, 1.0).unwrap();
    let high = g.connect(&c, &d, 1.0).unwrap();

    // The probe sits far beyond b along the x axis; the carrying line of
    // a->b still passes within 1.0 of it even though the foot of the
    // perpendicular is outside the segment.
    let probe = Point3::new(5.0, 1.0, 0.0);
    let (closest, distance) = g.closest_edge(probe, false).unwrap();
    assert!(Edge::same_identity(&closest, &low));
    assert!((distance - 1.0).abs() < 1e-12);

    low.set_passable(false);
    let (closest, distance) = g.closest_edge(probe, true).unwrap();
    assert!(Edge::same_identity(&closest, &high));
    assert!((distance - 9.0).abs() < 1e-12);
}

#[test]
fn ut_graph_serde_roundtrip() {
    let a = Node::new(Point3::new(0.0, 0.0, 0.0), "start".to_string());
    let b = Node::new(Point3::new(1.0, 2.0, 3.0), "mid".to_string());
    let c = Node::new(Point3::new(4.0, 0.0, 0.0), "end".to_string());

    let mut g = Graph::new();
    for n in [&a, &b, &c] {
        g.add_node(n);
    }
    g.connect(&a, &b, 2.0).unwrap();
    let bc = g.connect(&b, &c, 0.5).unwrap();
    bc.set_passable(false);
    c.set_passable(false);

    let json = serde_json::to_string(&g).unwrap();
    let restored: Graph<String> = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.node_count(), 3);
    assert_eq!(restored.edge_count(), 2);
    assert_eq!(restored[0].payload(), "start");
    assert_eq!(restored[1].position(), Point3::new(1.0, 2.0, 3.0));
    assert!(!restored[2].passable());

    let edge = restored[0].edge_to(&restored[1]).unwrap();
    assert_eq!(edge.weight(), 2.0);
    assert!(edge.passable());
    assert_eq!(
        edge.length(),
        Point3::new(0.0, 0.0, 0.0).distance(Point3::new(1.0, 2.0, 3.0))
    );

    let edge = restored[1].edge_to(&restored[2]).unwrap();
    assert!(!edge.passable());
    assert!(restored.contains_edge(&edge));
}

#[test]
fn ut_graph_serde_rejects_dangling_edge() {
    let json = r#"[[[[0.0,0.0,0.0],true,null]],[[0,7,1.0,true]]]"#;
    let restored: Result<Graph<Option<i32>>, _> = serde_json::from_str(json);
    assert!(restored.is_err());
}

#[test]
fn ut_graph_random_stress() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(7);
    let mut g = Graph::new();
    let mut nodes = Vec::new();

    for _ in 0..100 {
        let n = node(
            rng.gen_range(-50.0..50.0),
            rng.gen_range(-50.0..50.0),
            rng.gen_range(-50.0..50.0),
        );
        assert!(g.add_node(&n));
        nodes.push(n);
    }
    for _ in 0..300 {
        let u = nodes[rng.gen_range(0..nodes.len())].clone();
        let v = nodes[rng.gen_range(0..nodes.len())].clone();
        g.connect(&u, &v, rng.gen_range(0.0..10.0)).unwrap();
    }

    assert_eq!(g.node_count(), 100);
    assert_eq!(g.edge_count(), 300);

    // Every container edge is present in both endpoint adjacency lists.
    for edge in g.edges() {
        assert!(edge.source().iter_out().any(|e| Edge::same_identity(&e, edge)));
        assert!(edge.target().iter_in().any(|e| Edge::same_identity(&e, edge)));
    }

    for n in nodes.iter().take(10) {
        assert!(g.remove_node(n));
        for edge in g.edges() {
            assert!(!Node::same_identity(&edge.source(), n));
            assert!(!Node::same_identity(&edge.target(), n));
        }
    }
    assert_eq!(g.node_count(), 90);
    assert!(g.bounding_box().is_ok());
}
