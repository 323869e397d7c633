//! Directed graph embedded in 3D space.
//!
//! A [`Graph`] owns an insertion-ordered collection of [`Node`]s and
//! [`Edge`]s. Nodes are connected smart pointers and can be built and wired
//! up before or after they are added to a container; the container
//! contributes ownership, membership checks and spatial queries.
//!
//! # Examples
//!
//! ```
//! use waygraph::graph::{Graph, Node};
//! use waygraph::point::Point3;
//!
//! let a = Node::new(Point3::new(0.0, 0.0, 0.0), ());
//! let b = Node::new(Point3::new(1.0, 0.0, 0.0), ());
//!
//! let mut g = Graph::new();
//! g.add_node(&a);
//! g.add_node(&b);
//! g.connect(&a, &b, 1.0).unwrap();
//!
//! let (closest, distance) = g.closest_node(Point3::new(0.9, 0.2, 0.0), false).unwrap();
//!
//! assert!(Node::same_identity(&closest, &b));
//! assert!(distance < 0.5);
//! ```

pub mod node;

mod graph_serde;

use std::ops::Index;

use crate::error::Error;
use crate::point::{BoundingBox, Point3};

pub use node::{Edge, Node};

/// A container that owns nodes and edges.
///
/// Both sequences preserve insertion order and hold each instance at most
/// once (handle identity; two distinct edges between the same endpoints are
/// fine). Every edge in the container has both endpoints in the container:
/// [`Graph::add_edge`] and [`Graph::connect`] enforce this, and
/// [`Graph::remove_node`] sweeps incident edges to maintain it.
pub struct Graph<S = ()> {
    nodes: Vec<Node<S>>,
    edges: Vec<Edge<S>>,
}

impl<S> Graph<S> {
    pub fn new() -> Self {
        Graph { nodes: Vec::new(), edges: Vec::new() }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The nodes in insertion order.
    pub fn nodes(&self) -> &[Node<S>] {
        &self.nodes
    }

    /// The edges in insertion order.
    pub fn edges(&self) -> &[Edge<S>] {
        &self.edges
    }

    pub fn contains_node(&self, node: &Node<S>) -> bool {
        self.nodes.iter().any(|n| Node::same_identity(n, node))
    }

    pub fn contains_edge(&self, edge: &Edge<S>) -> bool {
        self.edges.iter().any(|e| Edge::same_identity(e, edge))
    }

    /// Insert a node. Returns false when the instance is already a member.
    ///
    /// # Examples
    ///
    /// ```
    /// use waygraph::graph::{Graph, Node};
    /// use waygraph::point::Point3;
    ///
    /// let n = Node::new(Point3::new(0.0, 0.0, 0.0), ());
    /// let mut g = Graph::new();
    ///
    /// assert!(g.add_node(&n));
    /// assert!(!g.add_node(&n));
    /// ```
    pub fn add_node(&mut self, node: &Node<S>) -> bool {
        if self.contains_node(node) {
            return false;
        }
        self.nodes.push(node.clone());
        true
    }

    /// Insert an externally constructed edge. Fails when either endpoint is
    /// not a member; returns false when the instance is already present.
    pub fn add_edge(&mut self, edge: &Edge<S>) -> Result<bool, Error> {
        if !self.contains_node(&edge.source()) || !self.contains_node(&edge.target()) {
            return Err(Error::EndpointNotMember);
        }
        if self.contains_edge(edge) {
            return Ok(false);
        }
        self.edges.push(edge.clone());
        Ok(true)
    }

    /// Create an edge from `source` to `target` with the given weight and
    /// insert it.
    ///
    /// # Examples
    ///
    /// ```
    /// use waygraph::graph::{Graph, Node};
    /// use waygraph::point::Point3;
    ///
    /// let a = Node::new(Point3::new(0.0, 0.0, 0.0), ());
    /// let b = Node::new(Point3::new(2.0, 0.0, 0.0), ());
    ///
    /// let mut g = Graph::new();
    /// g.add_node(&a);
    /// g.add_node(&b);
    ///
    /// let e = g.connect(&a, &b, 0.5).unwrap();
    ///
    /// assert_eq!(e.cost(), 1.0);
    /// assert!(g.connect(&a, &b, -1.0).is_err());
    /// ```
    pub fn connect(&mut self, source: &Node<S>, target: &Node<S>, weight: f64) -> Result<Edge<S>, Error> {
        if !self.contains_node(source) || !self.contains_node(target) {
            return Err(Error::EndpointNotMember);
        }
        let edge = Edge::with_weight(source, target, weight)?;
        self.edges.push(edge.clone());
        Ok(edge)
    }

    /// Create and insert two opposing edges of equal weight.
    pub fn connect_both(
        &mut self,
        u: &Node<S>,
        v: &Node<S>,
        weight: f64,
    ) -> Result<(Edge<S>, Edge<S>), Error> {
        let forward = self.connect(u, v, weight)?;
        let backward = self.connect(v, u, weight)?;
        Ok((forward, backward))
    }

    /// Remove a node together with every incident edge, both from this
    /// container and from the opposite endpoints' adjacency lists. Returns
    /// false when the node is not a member.
    pub fn remove_node(&mut self, node: &Node<S>) -> bool {
        let index = match self.nodes.iter().position(|n| Node::same_identity(n, node)) {
            Some(index) => index,
            None => return false,
        };
        self.edges.retain(|edge| {
            !Node::same_identity(&edge.source(), node) && !Node::same_identity(&edge.target(), node)
        });
        node.isolate();
        self.nodes.remove(index);
        true
    }

    /// Remove one edge instance from this container and from both
    /// endpoints' adjacency lists. Returns false when it is not a member.
    pub fn remove_edge(&mut self, edge: &Edge<S>) -> bool {
        let index = match self.edges.iter().position(|e| Edge::same_identity(e, edge)) {
            Some(index) => index,
            None => return false,
        };
        self.edges.remove(index);
        edge.source().adjacent().borrow_mut().remove_edge(edge);
        edge.target().adjacent().borrow_mut().remove_edge(edge);
        true
    }

    /// Empty both sequences. Adjacency lists of the removed nodes are left
    /// as they are; a caller discarding the graph discards those too.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    /// The axis-aligned box spanning all node positions.
    pub fn bounding_box(&self) -> Result<BoundingBox, Error> {
        Node::bounding_box(&self.nodes).map_err(|_| Error::EmptyGraph)
    }

    /// The node closest to `point` (Euclidean) and its distance. With
    /// `passable_only`, impassable nodes are skipped. Ties resolve to the
    /// first node in insertion order; `None` when no candidate exists.
    pub fn closest_node(&self, point: Point3, passable_only: bool) -> Option<(Node<S>, f64)> {
        let mut best: Option<(Node<S>, f64)> = None;
        for node in &self.nodes {
            if passable_only && !node.passable() {
                continue;
            }
            let distance = node.position().distance(point);
            if best.as_ref().map_or(true, |(_, d)| distance < *d) {
                best = Some((node.clone(), distance));
            }
        }
        best
    }

    /// The edge whose carrying line passes closest to `point`, and that
    /// distance. The distance is measured to the projection of `point` onto
    /// the infinite line through the endpoints, so the foot of the
    /// perpendicular may fall outside the segment itself. With
    /// `passable_only`, impassable edges are skipped.
    pub fn closest_edge(&self, point: Point3, passable_only: bool) -> Option<(Edge<S>, f64)> {
        let mut best: Option<(Edge<S>, f64)> = None;
        for edge in &self.edges {
            if passable_only && !edge.passable() {
                continue;
            }
            let foot = point.project_on_line(edge.source().position(), edge.target().position());
            let distance = point.distance(foot);
            if best.as_ref().map_or(true, |(_, d)| distance < *d) {
                best = Some((edge.clone(), distance));
            }
        }
        best
    }
}

impl<S> Default for Graph<S> {
    fn default() -> Self {
        Graph::new()
    }
}

impl<S> Index<usize> for Graph<S> {
    type Output = Node<S>;

    fn index(&self, index: usize) -> &Node<S> {
        &self.nodes[index]
    }
}
