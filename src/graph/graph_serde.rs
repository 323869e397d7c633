use std::marker::PhantomData;

use ahash::AHashMap;
use serde::{
    de::{self, Visitor},
    ser::{Error as _, Serialize, SerializeTuple, Serializer},
    Deserialize,
};

use super::{Graph, Node};
use crate::point::Point3;

// A graph serializes as a (nodes, edges) tuple. Nodes carry their position,
// passability and payload; edges refer to their endpoints by index into the
// node list and carry weight and passability. Cached edge lengths are
// transient and recomputed on demand after deserialization.

impl<S> Serialize for Graph<S>
where
    S: Serialize,
{
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        let mut index = AHashMap::with_capacity(self.node_count());
        let mut nodes = Vec::with_capacity(self.node_count());
        for (i, node) in self.nodes().iter().enumerate() {
            index.insert(node.id(), i);
            nodes.push((node.position(), node.passable(), node.payload()));
        }

        let mut edges = Vec::with_capacity(self.edge_count());
        for edge in self.edges() {
            let source = *index
                .get(&edge.source().id())
                .ok_or_else(|| Ser::Error::custom("edge source is not a member of the graph"))?;
            let target = *index
                .get(&edge.target().id())
                .ok_or_else(|| Ser::Error::custom("edge target is not a member of the graph"))?;
            edges.push((source, target, edge.weight(), edge.passable()));
        }

        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&nodes)?;
        tuple.serialize_element(&edges)?;
        tuple.end()
    }
}

impl<'de, S> Deserialize<'de> for Graph<S>
where
    S: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct GraphVisitor<S> {
            _phantom: PhantomData<S>,
        }

        impl<'de, S> Visitor<'de> for GraphVisitor<S>
        where
            S: Deserialize<'de>,
        {
            type Value = Graph<S>;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("node and edge lists")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let nodes: Vec<(Point3, bool, S)> = seq.next_element()?.unwrap_or_default();
                let edges: Vec<(usize, usize, f64, bool)> = seq.next_element()?.unwrap_or_default();

                let mut g = Graph::new();

                for (position, passable, payload) in nodes {
                    let node = Node::new(position, payload);
                    node.set_passable(passable);
                    g.add_node(&node);
                }

                for (source, target, weight, passable) in edges {
                    let u = g.nodes().get(source).cloned().ok_or_else(|| {
                        de::Error::custom(format!("edge references missing node {}", source))
                    })?;
                    let v = g.nodes().get(target).cloned().ok_or_else(|| {
                        de::Error::custom(format!("edge references missing node {}", target))
                    })?;
                    let edge = g.connect(&u, &v, weight).map_err(de::Error::custom)?;
                    edge.set_passable(passable);
                }

                Ok(g)
            }
        }

        deserializer.deserialize_seq(GraphVisitor { _phantom: PhantomData })
    }
}
