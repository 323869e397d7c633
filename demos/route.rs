// # Route planning over a waypoint network
//
// This example builds a small 3D waypoint network for a two-floor building,
// connects the waypoints with corridors and a stairwell, and asks the
// search engine for the cheapest route between two rooms.

use anyhow::Result;

use waygraph::{Astar, Graph, Node, Point3};

fn main() -> Result<()> {
    // Waypoints carry a human-readable name as their payload. The library
    // never looks at it; it is returned as-is when we print the route.
    let waypoints = [
        ("lobby", Point3::new(0.0, 0.0, 0.0)),
        ("hall-west", Point3::new(5.0, 0.0, 0.0)),
        ("hall-east", Point3::new(10.0, 0.0, 0.0)),
        ("stairs-down", Point3::new(10.0, 2.0, 0.0)),
        ("stairs-up", Point3::new(10.0, 2.0, 3.0)),
        ("hall-upper", Point3::new(5.0, 2.0, 3.0)),
        ("archive", Point3::new(0.0, 2.0, 3.0)),
    ];

    let mut g = Graph::new();
    let nodes: Vec<Node<&str>> = waypoints
        .iter()
        .map(|(name, position)| Node::new(*position, *name))
        .collect();
    for node in &nodes {
        g.add_node(node);
    }

    // Corridors are walkable in both directions. The stairwell is slow, so
    // its edges carry a higher weight per metre.
    g.connect_both(&nodes[0], &nodes[1], 1.0)?;
    g.connect_both(&nodes[1], &nodes[2], 1.0)?;
    g.connect_both(&nodes[2], &nodes[3], 1.0)?;
    g.connect_both(&nodes[3], &nodes[4], 2.5)?;
    g.connect_both(&nodes[4], &nodes[5], 1.0)?;
    g.connect_both(&nodes[5], &nodes[6], 1.0)?;

    // Pick endpoints by proximity, the way a map click would.
    let (start, _) = g
        .closest_node(Point3::new(0.5, 0.1, 0.0), true)
        .expect("graph is not empty");
    let (goal, _) = g
        .closest_node(Point3::new(0.2, 2.0, 2.8), true)
        .expect("graph is not empty");

    let mut search = Astar::new();
    search.set_balance(0.5)?;

    if search.search_path(&start, &goal) {
        let path = search.path_nodes()?.expect("path was found");
        let (hops, cost) = search.path_info()?.expect("path was found");
        println!("route from {} to {}:", start.payload(), goal.payload());
        for node in &path {
            println!("  {:>12}  at {}", node.payload(), node.position());
        }
        println!("{} hops, total cost {:.2}", hops, cost);
    } else {
        println!("no route from {} to {}", start.payload(), goal.payload());
    }

    Ok(())
}
