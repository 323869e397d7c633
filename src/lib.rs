//! # Waygraph
//!
//! Waygraph is a directed-graph library embedded in 3D Euclidean space.
//! Nodes are connected smart pointers carrying a position, a passability
//! flag and an opaque payload; edges derive their cost from geometry
//! (weight × Euclidean length, cached lazily). On top of the data model
//! sits a tunable best-first search engine whose frontier ordering
//! interpolates between pure Dijkstra and pure greedy best-first, with
//! classical A* in the middle.
//!
//! # Examples
//!
//! ```
//! use waygraph::{Astar, Graph, Node, Point3};
//!
//! // A diamond: two routes from a to d, the upper one much cheaper.
//! let a = Node::new(Point3::new(0.0, 0.0, 0.0), ());
//! let b = Node::new(Point3::new(1.0, 1.0, 0.0), ());
//! let c = Node::new(Point3::new(1.0, -1.0, 0.0), ());
//! let d = Node::new(Point3::new(2.0, 0.0, 0.0), ());
//!
//! let mut g = Graph::new();
//! for node in [&a, &b, &c, &d] {
//!     g.add_node(node);
//! }
//! g.connect(&a, &b, 1.0).unwrap();
//! g.connect(&a, &c, 1.0).unwrap();
//! g.connect(&b, &d, 1.0).unwrap();
//! g.connect(&c, &d, 100.0).unwrap();
//!
//! let mut search = Astar::new();
//!
//! assert!(search.search_path(&a, &d));
//!
//! let path = search.path_nodes().unwrap().unwrap();
//!
//! assert_eq!(path.len(), 3);
//! assert!(Node::same_identity(&path[1], &b));
//! ```

pub mod astar;
pub mod error;
pub mod graph;
pub mod point;

pub use astar::{Astar, Heuristic};
pub use error::Error;
pub use graph::{Edge, Graph, Node};
pub use point::{BoundingBox, Point3};
