use std::{
    cell::{Cell, RefCell},
    fmt,
    hash::{Hash, Hasher},
    rc::{Rc, Weak},
};

use crate::error::Error;
use crate::point::{BoundingBox, Point3};

//==== Node ===================================================================

/// A vertex in 3D space.
///
/// A node is a smart pointer containing a position, a passability flag, an
/// opaque payload and two insertion-ordered adjacency lists ("outbound" and
/// "inbound"). Nodes can be created individually and connected with
/// [`Edge::new`]; a [`Graph`](crate::graph::Graph) container is only needed
/// for ownership and spatial queries.
///
/// Cloning a node clones the handle, not the vertex. Two notions of
/// equality exist: [`Node::same_identity`] compares handles, while the
/// `PartialEq`/`Hash` implementations compare positions. Adjacency and the
/// search engine always use identity.
///
/// # Examples
///
/// ```
/// use waygraph::graph::{Edge, Node};
/// use waygraph::point::Point3;
///
/// let a = Node::new(Point3::new(0.0, 0.0, 0.0), "a");
/// let b = Node::new(Point3::new(1.0, 0.0, 0.0), "b");
///
/// let e = Edge::new(&a, &b);
///
/// assert!(Node::same_identity(&e.source(), &a));
/// assert_eq!(e.length(), 1.0);
/// assert_eq!(a.payload(), &"a");
/// ```
pub struct Node<S = ()> {
    inner: Rc<NodeInner<S>>,
}

struct NodeInner<S> {
    position: Cell<Point3>,
    passable: Cell<bool>,
    payload: S,
    edges: RefCell<Adjacent<S>>,
}

impl<S> Node<S> {
    /// Create a new, unconnected node at `position`. The payload is stored
    /// as-is and never inspected by the library.
    pub fn new(position: Point3, payload: S) -> Self {
        Node {
            inner: Rc::new(NodeInner {
                position: Cell::new(position),
                passable: Cell::new(true),
                payload,
                edges: RefCell::new(Adjacent::new()),
            }),
        }
    }

    pub fn position(&self) -> Point3 {
        self.inner.position.get()
    }

    /// Move the node. The cached length of every incident edge is
    /// invalidated so the next [`Edge::length`] call reflects the new
    /// position.
    ///
    /// # Examples
    ///
    /// ```
    /// use waygraph::graph::{Edge, Node};
    /// use waygraph::point::Point3;
    ///
    /// let a = Node::new(Point3::new(0.0, 0.0, 0.0), ());
    /// let b = Node::new(Point3::new(1.0, 0.0, 0.0), ());
    /// let e = Edge::new(&a, &b);
    ///
    /// assert_eq!(e.length(), 1.0);
    ///
    /// b.set_position(Point3::new(3.0, 0.0, 0.0));
    ///
    /// assert_eq!(e.length(), 3.0);
    /// ```
    pub fn set_position(&self, position: Point3) {
        {
            let adjacent = self.inner.edges.borrow();
            for edge in adjacent.outbound().iter().chain(adjacent.inbound().iter()) {
                edge.invalidate_length();
            }
        }
        self.inner.position.set(position);
    }

    pub fn payload(&self) -> &S {
        &self.inner.payload
    }

    pub fn passable(&self) -> bool {
        self.inner.passable.get()
    }

    /// Set the node's passability and cascade the flag to every incident
    /// edge. The reverse does not hold: flipping an edge's flag leaves its
    /// endpoints untouched.
    pub fn set_passable(&self, passable: bool) {
        {
            let adjacent = self.inner.edges.borrow();
            for edge in adjacent.outbound().iter().chain(adjacent.inbound().iter()) {
                edge.set_passable(passable);
            }
        }
        self.inner.passable.set(passable);
    }

    /// The first outbound edge whose target is `other` (handle identity),
    /// in insertion order.
    pub fn edge_to(&self, other: &Node<S>) -> Option<Edge<S>> {
        self.inner
            .edges
            .borrow()
            .outbound()
            .iter()
            .find(|edge| Node::same_identity(&edge.target(), other))
            .cloned()
    }

    /// The first inbound edge whose source is `other` (handle identity).
    pub fn edge_from(&self, other: &Node<S>) -> Option<Edge<S>> {
        self.inner
            .edges
            .borrow()
            .inbound()
            .iter()
            .find(|edge| Node::same_identity(&edge.source(), other))
            .cloned()
    }

    /// Targets of the outbound edges, in insertion order.
    pub fn successors(&self) -> Vec<Node<S>> {
        self.inner
            .edges
            .borrow()
            .outbound()
            .iter()
            .map(|edge| edge.target())
            .collect()
    }

    /// Sources of the inbound edges, in insertion order.
    pub fn predecessors(&self) -> Vec<Node<S>> {
        self.inner
            .edges
            .borrow()
            .inbound()
            .iter()
            .map(|edge| edge.source())
            .collect()
    }

    /// The node itself followed by its successors and predecessors. Nodes
    /// connected in both directions appear once per connection.
    pub fn neighborhood(&self) -> Vec<Node<S>> {
        let mut nodes = vec![self.clone()];
        nodes.extend(self.successors());
        nodes.extend(self.predecessors());
        nodes
    }

    /// Disconnect the node from all of its neighbours: incident edges are
    /// removed from the opposite endpoints' adjacency lists and both of the
    /// node's own lists are cleared. A [`Graph`](crate::graph::Graph)
    /// holding those edges keeps them in its edge list;
    /// [`Graph::remove_node`](crate::graph::Graph::remove_node) is the
    /// operation that sweeps both.
    pub fn isolate(&self) {
        let (outbound, inbound) = {
            let adjacent = self.inner.edges.borrow();
            (adjacent.outbound().to_vec(), adjacent.inbound().to_vec())
        };
        for edge in outbound {
            let target = edge.target();
            if !Node::same_identity(&target, self) {
                target.inner.edges.borrow_mut().remove_inbound(self);
            }
        }
        for edge in inbound {
            let source = edge.source();
            if !Node::same_identity(&source, self) {
                source.inner.edges.borrow_mut().remove_outbound(self);
            }
        }
        let mut adjacent = self.inner.edges.borrow_mut();
        adjacent.clear_outbound();
        adjacent.clear_inbound();
    }

    pub fn out_degree(&self) -> usize {
        self.inner.edges.borrow().outbound().len()
    }

    pub fn in_degree(&self) -> usize {
        self.inner.edges.borrow().inbound().len()
    }

    /// Iterate over the outbound edges in insertion order.
    pub fn iter_out(&self) -> NodeOutIterator<S> {
        NodeOutIterator { node: self, position: 0 }
    }

    /// Iterate over the inbound edges in insertion order.
    pub fn iter_in(&self) -> NodeInIterator<S> {
        NodeInIterator { node: self, position: 0 }
    }

    /// True when `a` and `b` are handles to the same vertex.
    pub fn same_identity(a: &Node<S>, b: &Node<S>) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }

    //==== Geometry ===========================================================

    pub fn euclidean_distance(u: &Node<S>, v: &Node<S>) -> f64 {
        u.position().distance(v.position())
    }

    pub fn squared_euclidean_distance(u: &Node<S>, v: &Node<S>) -> f64 {
        u.position().squared_distance(v.position())
    }

    pub fn manhattan_distance(u: &Node<S>, v: &Node<S>) -> f64 {
        u.position().manhattan_distance(v.position())
    }

    pub fn chebyshev_distance(u: &Node<S>, v: &Node<S>) -> f64 {
        u.position().chebyshev_distance(v.position())
    }

    /// The axis-aligned box spanning the positions of `nodes`.
    ///
    /// # Examples
    ///
    /// ```
    /// use waygraph::graph::Node;
    /// use waygraph::point::Point3;
    ///
    /// let nodes = vec![
    ///     Node::new(Point3::new(-1.0, 0.0, 2.0), ()),
    ///     Node::new(Point3::new(4.0, -3.0, 0.0), ()),
    /// ];
    ///
    /// let bounds = Node::bounding_box(&nodes).unwrap();
    ///
    /// assert_eq!(bounds.min, Point3::new(-1.0, -3.0, 0.0));
    /// assert_eq!(bounds.max, Point3::new(4.0, 0.0, 2.0));
    /// ```
    pub fn bounding_box(nodes: &[Node<S>]) -> Result<BoundingBox, Error> {
        let mut nodes = nodes.iter();
        let first = nodes.next().ok_or(Error::EmptyCollection)?;
        let mut bounds = BoundingBox::at(first.position());
        for node in nodes {
            bounds.expand(node.position());
        }
        Ok(bounds)
    }

    //==== Private Methods ====================================================

    fn downgrade(&self) -> WeakNode<S> {
        WeakNode { inner: Rc::downgrade(&self.inner) }
    }

    /// Stable address of the vertex, used as an identity key by the search
    /// engine and the serializer. Only meaningful while a handle is alive.
    pub(crate) fn id(&self) -> usize {
        Rc::as_ptr(&self.inner) as *const () as usize
    }
}

impl<S> Clone for Node<S> {
    fn clone(&self) -> Self {
        Node { inner: Rc::clone(&self.inner) }
    }
}

/// Position equality. Two distinct vertices at the same position compare
/// equal; use [`Node::same_identity`] for handle comparison.
impl<S> PartialEq for Node<S> {
    fn eq(&self, other: &Self) -> bool {
        self.position() == other.position()
    }
}

impl<S> Eq for Node<S> {}

impl<S> Hash for Node<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.position().hash(state);
    }
}

impl<S> fmt::Debug for Node<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Node")
            .field("position", &self.position())
            .field("passable", &self.passable())
            .field("out_degree", &self.out_degree())
            .field("in_degree", &self.in_degree())
            .finish()
    }
}

impl<S> fmt::Display for Node<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.position())
    }
}

//==== Node: Weak =============================================================

struct WeakNode<S> {
    inner: Weak<NodeInner<S>>,
}

impl<S> WeakNode<S> {
    fn upgrade(&self) -> Option<Node<S>> {
        self.inner.upgrade().map(|inner| Node { inner })
    }
}

impl<S> Clone for WeakNode<S> {
    fn clone(&self) -> Self {
        WeakNode { inner: Weak::clone(&self.inner) }
    }
}

//==== Node: Iterators ========================================================

pub struct NodeOutIterator<'a, S> {
    node: &'a Node<S>,
    position: usize,
}

impl<'a, S> Iterator for NodeOutIterator<'a, S> {
    type Item = Edge<S>;

    fn next(&mut self) -> Option<Edge<S>> {
        let adjacent = self.node.inner.edges.borrow();
        let edge = adjacent.outbound().get(self.position).cloned();
        if edge.is_some() {
            self.position += 1;
        }
        edge
    }
}

pub struct NodeInIterator<'a, S> {
    node: &'a Node<S>,
    position: usize,
}

impl<'a, S> Iterator for NodeInIterator<'a, S> {
    type Item = Edge<S>;

    fn next(&mut self) -> Option<Edge<S>> {
        let adjacent = self.node.inner.edges.borrow();
        let edge = adjacent.inbound().get(self.position).cloned();
        if edge.is_some() {
            self.position += 1;
        }
        edge
    }
}

impl<'a, S> IntoIterator for &'a Node<S> {
    type Item = Edge<S>;
    type IntoIter = NodeOutIterator<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        NodeOutIterator { node: self, position: 0 }
    }
}

//==== Edge ===================================================================

/// A directed edge between two nodes.
///
/// An edge is a shared handle: constructing one wires it into the source's
/// outbound list and the target's inbound list, and every clone refers to
/// the same underlying edge. Endpoint references are weak, so an edge never
/// keeps its endpoints alive.
///
/// The edge's scalar consumed by the search is [`Edge::cost`], the product
/// of its weight and its Euclidean length. The length is computed lazily
/// and cached; moving an endpoint or changing the weight invalidates the
/// cache. Self-loops are permitted and have zero length.
pub struct Edge<S = ()> {
    inner: Rc<EdgeInner<S>>,
}

struct EdgeInner<S> {
    source: WeakNode<S>,
    target: WeakNode<S>,
    weight: Cell<f64>,
    length: Cell<Option<f64>>,
    passable: Cell<bool>,
}

impl<S> Edge<S> {
    /// Create an edge from `source` to `target` with weight 1.0 and wire it
    /// into both adjacency lists.
    pub fn new(source: &Node<S>, target: &Node<S>) -> Edge<S> {
        Edge::build(source, target, 1.0)
    }

    /// Like [`Edge::new`] with an explicit weight. Rejects negative weights
    /// before any wiring happens.
    pub fn with_weight(source: &Node<S>, target: &Node<S>, weight: f64) -> Result<Edge<S>, Error> {
        if !(weight >= 0.0) {
            return Err(Error::NegativeWeight(weight));
        }
        Ok(Edge::build(source, target, weight))
    }

    fn build(source: &Node<S>, target: &Node<S>, weight: f64) -> Edge<S> {
        let edge = Edge {
            inner: Rc::new(EdgeInner {
                source: source.downgrade(),
                target: target.downgrade(),
                weight: Cell::new(weight),
                length: Cell::new(None),
                passable: Cell::new(true),
            }),
        };
        source.inner.edges.borrow_mut().push_outbound(edge.clone());
        target.inner.edges.borrow_mut().push_inbound(edge.clone());
        edge
    }

    pub fn source(&self) -> Node<S> {
        self.inner.source.upgrade().unwrap()
    }

    pub fn target(&self) -> Node<S> {
        self.inner.target.upgrade().unwrap()
    }

    /// Euclidean distance between the endpoint positions, cached until an
    /// endpoint moves or the weight changes.
    pub fn length(&self) -> f64 {
        match self.inner.length.get() {
            Some(length) => length,
            None => {
                let length = Node::euclidean_distance(&self.source(), &self.target());
                self.inner.length.set(Some(length));
                length
            }
        }
    }

    /// `weight × length`, the scalar the search engine accumulates. Always
    /// non-negative.
    pub fn cost(&self) -> f64 {
        self.weight() * self.length()
    }

    pub fn weight(&self) -> f64 {
        self.inner.weight.get()
    }

    /// Set the edge weight. Rejects negative values; invalidates the cached
    /// length.
    pub fn set_weight(&self, weight: f64) -> Result<(), Error> {
        if !(weight >= 0.0) {
            return Err(Error::NegativeWeight(weight));
        }
        self.inner.weight.set(weight);
        self.invalidate_length();
        Ok(())
    }

    pub fn passable(&self) -> bool {
        self.inner.passable.get()
    }

    /// Set the edge's passability. Local to the edge; endpoints are not
    /// affected.
    pub fn set_passable(&self, passable: bool) {
        self.inner.passable.set(passable);
    }

    /// Mark the cached length stale. Called automatically by
    /// [`Node::set_position`] and [`Edge::set_weight`].
    pub fn invalidate_length(&self) {
        self.inner.length.set(None);
    }

    /// True when `a` and `b` are handles to the same edge.
    pub fn same_identity(a: &Edge<S>, b: &Edge<S>) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }
}

impl<S> Clone for Edge<S> {
    fn clone(&self) -> Self {
        Edge { inner: Rc::clone(&self.inner) }
    }
}

impl<S> fmt::Debug for Edge<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Edge")
            .field("source", &self.source().position())
            .field("target", &self.target().position())
            .field("weight", &self.weight())
            .field("passable", &self.passable())
            .finish()
    }
}

//==== Adjacency List =========================================================

pub(crate) struct Adjacent<S> {
    outbound: Vec<Edge<S>>,
    inbound: Vec<Edge<S>>,
}

impl<S> Adjacent<S> {
    fn new() -> Self {
        Adjacent { outbound: Vec::new(), inbound: Vec::new() }
    }

    pub(crate) fn outbound(&self) -> &[Edge<S>] {
        &self.outbound
    }

    pub(crate) fn inbound(&self) -> &[Edge<S>] {
        &self.inbound
    }

    fn push_outbound(&mut self, edge: Edge<S>) {
        self.outbound.push(edge);
    }

    fn push_inbound(&mut self, edge: Edge<S>) {
        self.inbound.push(edge);
    }

    /// Remove every outbound edge whose target is `node`.
    fn remove_outbound(&mut self, node: &Node<S>) {
        self.outbound
            .retain(|edge| !Node::same_identity(&edge.target(), node));
    }

    /// Remove every inbound edge whose source is `node`.
    fn remove_inbound(&mut self, node: &Node<S>) {
        self.inbound
            .retain(|edge| !Node::same_identity(&edge.source(), node));
    }

    /// Remove one specific edge instance from both lists.
    pub(crate) fn remove_edge(&mut self, edge: &Edge<S>) {
        self.outbound.retain(|e| !Edge::same_identity(e, edge));
        self.inbound.retain(|e| !Edge::same_identity(e, edge));
    }

    fn clear_outbound(&mut self) {
        self.outbound.clear();
    }

    fn clear_inbound(&mut self) {
        self.inbound.clear();
    }
}

impl<S> Node<S> {
    /// Shared access to the adjacency lists for the container operations.
    pub(crate) fn adjacent(&self) -> &RefCell<Adjacent<S>> {
        &self.inner.edges
    }
}
