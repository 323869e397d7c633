// # Driving a search one expansion at a time
//
// The stepwise API advances the search a single expansion per call and
// lets the caller look at the frontier in between, which is what an
// editor or debugger overlay would render.

use anyhow::Result;

use waygraph::{Astar, Graph, Node, Point3};

fn main() -> Result<()> {
    // A 5x5 grid with a wall through the middle; the search has to flow
    // around it.
    let n = 5;
    let mut g = Graph::new();
    let mut nodes = Vec::new();
    for y in 0..n {
        for x in 0..n {
            let node = Node::new(Point3::new(x as f64, y as f64, 0.0), ());
            g.add_node(&node);
            nodes.push(node);
        }
    }
    for y in 0..n {
        for x in 0..n {
            let i = y * n + x;
            if x + 1 < n {
                g.connect_both(&nodes[i], &nodes[i + 1], 1.0)?;
            }
            if y + 1 < n {
                g.connect_both(&nodes[i], &nodes[i + n], 1.0)?;
            }
        }
    }
    for y in 0..n - 1 {
        nodes[y * n + 2].set_passable(false);
    }

    let start = nodes[0].clone();
    let goal = nodes[n * n - 1].clone();

    let mut search = Astar::new();
    search.initialize(&start, &goal);

    while search.next_step()? {
        let best = search
            .open_tracks()
            .into_iter()
            .next()
            .map(|chain| format!("{}", chain.last().unwrap()))
            .unwrap_or_default();
        println!(
            "step {:>2}: open {:>2}, closed {:>2}, best frontier node {}",
            search.step_count().unwrap(),
            search.open_len(),
            search.closed_len(),
            best,
        );
    }

    if search.path_found() {
        let points = search.path_points()?.expect("path was found");
        let route: Vec<String> = points.iter().map(|p| format!("{}", p)).collect();
        println!("route: {}", route.join(" -> "));
    } else {
        println!("no route");
    }

    Ok(())
}
