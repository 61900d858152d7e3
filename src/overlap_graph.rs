
/*!
The contig overlap graph: vertex properties plus an oriented adjacency with edge distances.
A negative edge distance is the number of overlapping bases between the two contig sequences.
Every edge `u -> v` implies its mirror `~v -> ~u`, so only one direction is stored in the
serialized form and both are indexed in memory.

The serialized form is line based. A vertex line has three bare integers
(`id length coverage`); an edge line has two oriented node tokens and a distance
(`0+ 1- -24`). Blank lines and lines starting with '#' are ignored.

# Example usage
```rust
use gap_con::contig_node::ContigNode;
use gap_con::overlap_graph::{ContigProperties, OverlapGraph};

let mut graph = OverlapGraph::new();
graph.add_vertex(0, ContigProperties::new(100, 10));
graph.add_vertex(1, ContigProperties::new(200, 20));
graph.add_edge(ContigNode::forward(0), ContigNode::forward(1), -24);

// the mirror edge is indexed automatically
assert_eq!(graph.out_edges(ContigNode::reverse(1)).len(), 1);
assert_eq!(graph.distance(ContigNode::forward(0), ContigNode::forward(1)), Some(-24));
```
*/

use rustc_hash::FxHashMap as HashMap;
use simple_error::bail;
use std::io::{BufRead, Write};

use crate::contig_node::ContigNode;

/// Length and coverage of a contig or a path of contigs.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ContigProperties {
    /// Sequence length in bases
    pub length: usize,
    /// Depth/confidence weight
    pub coverage: u64
}

impl ContigProperties {
    pub fn new(length: usize, coverage: u64) -> ContigProperties {
        ContigProperties {
            length,
            coverage
        }
    }
}

/// A directed, distance-annotated edge out of an oriented contig node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Overlap {
    /// The oriented node this edge points at
    pub target: ContigNode,
    /// Distance between the two contigs; negative values are overlapping bases
    pub distance: i64
}

/// The contig overlap graph.
#[derive(Clone, Debug, Default)]
pub struct OverlapGraph {
    /// Vertex properties by contig id
    properties: HashMap<u32, ContigProperties>,
    /// Vertex ids in insertion order, for deterministic re-emission
    vertex_order: Vec<u32>,
    /// Out-edges per oriented node, including mirrored edges
    adjacency: HashMap<ContigNode, Vec<Overlap>>,
    /// Edges as explicitly added, for deterministic re-emission
    edges: Vec<(ContigNode, ContigNode, i64)>
}

impl OverlapGraph {
    pub fn new() -> OverlapGraph {
        Default::default()
    }

    /// Adds a vertex with the given id. Re-adding an id replaces its properties.
    pub fn add_vertex(&mut self, id: u32, properties: ContigProperties) {
        if self.properties.insert(id, properties).is_none() {
            self.vertex_order.push(id);
        }
    }

    /// Adds the edge `u -> v` and indexes its mirror `~v -> ~u`.
    /// # Arguments
    /// * `u` - the oriented source node
    /// * `v` - the oriented target node
    /// * `distance` - the edge distance; negative values are overlapping bases
    pub fn add_edge(&mut self, u: ContigNode, v: ContigNode, distance: i64) {
        self.edges.push((u, v, distance));
        self.adjacency.entry(u).or_default().push(Overlap { target: v, distance });
        let (mu, mv) = (v.complement(), u.complement());
        if (mu, mv) != (u, v) {
            self.adjacency.entry(mu).or_default().push(Overlap { target: mv, distance });
        }
    }

    /// Returns the out-edges of an oriented node.
    pub fn out_edges(&self, node: ContigNode) -> &[Overlap] {
        self.adjacency.get(&node).map_or(&[], |edges| edges.as_slice())
    }

    /// Returns the distance of the edge `u -> v`, if present.
    pub fn distance(&self, u: ContigNode, v: ContigNode) -> Option<i64> {
        self.out_edges(u).iter()
            .find(|overlap| overlap.target == v)
            .map(|overlap| overlap.distance)
    }

    /// Returns the properties of a contig, if the vertex exists.
    pub fn properties(&self, id: u32) -> Option<ContigProperties> {
        self.properties.get(&id).copied()
    }

    pub fn num_vertices(&self) -> usize {
        self.vertex_order.len()
    }

    /// Returns the summed properties of the concrete nodes of a path.
    pub fn path_properties(&self, path: &[ContigNode]) -> ContigProperties {
        let mut total = ContigProperties::default();
        for node in path.iter() {
            if let Some(id) = node.contig_id() {
                if let Some(properties) = self.properties(id) {
                    total.length += properties.length;
                    total.coverage += properties.coverage;
                }
            }
        }
        total
    }

    /// Parses a graph from its serialized adjacency form.
    /// # Errors
    /// * if a line is neither a valid vertex line nor a valid edge line
    /// * if an edge references an unknown vertex
    pub fn from_reader<R: BufRead>(reader: R) -> Result<OverlapGraph, Box<dyn std::error::Error>> {
        let mut graph = OverlapGraph::new();
        for result in reader.lines() {
            let line = result?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = trimmed.split_whitespace().collect();
            if fields.len() != 3 {
                bail!("malformed graph line `{}'", trimmed);
            }
            if let Ok(id) = fields[0].parse::<u32>() {
                // vertex line: id length coverage
                let length: usize = fields[1].parse()?;
                let coverage: u64 = fields[2].parse()?;
                graph.add_vertex(id, ContigProperties::new(length, coverage));
            } else {
                // edge line: u v distance
                let u: ContigNode = fields[0].parse()?;
                let v: ContigNode = fields[1].parse()?;
                let distance: i64 = fields[2].parse()?;
                for node in [u, v] {
                    match node.contig_id() {
                        Some(id) if graph.properties(id).is_some() => {}
                        _ => bail!("edge `{}' references unknown vertex `{}'", trimmed, node)
                    };
                }
                graph.add_edge(u, v, distance);
            }
        }
        Ok(graph)
    }

    /// Writes the graph in its serialized adjacency form.
    pub fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for &id in self.vertex_order.iter() {
            let properties = self.properties[&id];
            writeln!(writer, "{} {} {}", id, properties.length, properties.coverage)?;
        }
        for &(u, v, distance) in self.edges.iter() {
            writeln!(writer, "{} {} {}", u, v, distance)?;
        }
        Ok(())
    }
}
