use std::rc::Rc;

use crate::graph::{Edge, Node};
use crate::point::Point3;

/// A path prefix from the start of a search to some frontier node, recorded
/// as a back-linked chain of reference-counted records. Extending a track
/// shares the whole prefix, so the frontier costs no more than one record
/// per entry; once a search ends, only the chain reachable from the winning
/// track stays alive.
pub(crate) struct Track<S> {
    end: Node<S>,
    prev: Option<Rc<Track<S>>>,
    via: Option<Edge<S>>,
    cost: f64,
    edges_from_start: usize,
}

impl<S> Track<S> {
    /// The zero-cost track a search is seeded with.
    pub(crate) fn start(node: &Node<S>) -> Self {
        Track {
            end: node.clone(),
            prev: None,
            via: None,
            cost: 0.0,
            edges_from_start: 0,
        }
    }

    /// The track one edge longer than `prev`, ending at `edge`'s target.
    pub(crate) fn extend(prev: &Rc<Track<S>>, edge: &Edge<S>) -> Self {
        Track {
            end: edge.target(),
            cost: prev.cost + edge.cost(),
            edges_from_start: prev.edges_from_start + 1,
            via: Some(edge.clone()),
            prev: Some(Rc::clone(prev)),
        }
    }

    pub(crate) fn end(&self) -> &Node<S> {
        &self.end
    }

    pub(crate) fn cost(&self) -> f64 {
        self.cost
    }

    pub(crate) fn edges_from_start(&self) -> usize {
        self.edges_from_start
    }

    /// The node sequence from the start to this track's end.
    pub(crate) fn nodes(&self) -> Vec<Node<S>> {
        let mut nodes = Vec::with_capacity(self.edges_from_start + 1);
        let mut current = Some(self);
        while let Some(track) = current {
            nodes.push(track.end.clone());
            current = track.prev.as_deref();
        }
        nodes.reverse();
        nodes
    }

    /// The edge sequence from the start to this track's end.
    pub(crate) fn edges(&self) -> Vec<Edge<S>> {
        let mut edges = Vec::with_capacity(self.edges_from_start);
        let mut current = Some(self);
        while let Some(track) = current {
            if let Some(edge) = &track.via {
                edges.push(edge.clone());
            }
            current = track.prev.as_deref();
        }
        edges.reverse();
        edges
    }

    /// The coordinate sequence from the start to this track's end.
    pub(crate) fn points(&self) -> Vec<Point3> {
        self.nodes().iter().map(|node| node.position()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ut_track_chain() {
        let a = Node::new(Point3::new(0.0, 0.0, 0.0), ());
        let b = Node::new(Point3::new(1.0, 0.0, 0.0), ());
        let c = Node::new(Point3::new(1.0, 1.0, 0.0), ());
        let ab = Edge::new(&a, &b);
        let bc = Edge::new(&b, &c);

        let start = Rc::new(Track::start(&a));
        let middle = Rc::new(Track::extend(&start, &ab));
        let leaf = Track::extend(&middle, &bc);

        assert_eq!(start.edges_from_start(), 0);
        assert_eq!(start.cost(), 0.0);
        assert_eq!(leaf.edges_from_start(), 2);
        assert_eq!(leaf.cost(), 2.0);

        let nodes = leaf.nodes();
        assert_eq!(nodes.len(), 3);
        assert!(Node::same_identity(&nodes[0], &a));
        assert!(Node::same_identity(&nodes[1], &b));
        assert!(Node::same_identity(&nodes[2], &c));

        let edges = leaf.edges();
        assert_eq!(edges.len(), 2);
        assert!(Edge::same_identity(&edges[0], &ab));
        assert!(Edge::same_identity(&edges[1], &bc));

        assert_eq!(leaf.points()[2], Point3::new(1.0, 1.0, 0.0));
    }
}
