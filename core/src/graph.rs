//! The capability a search requires of a graph.

use std::hash::Hash;

/// A directed graph with weighted edges, as seen by a search.
///
/// The search never mutates a graph and never retains anything it returns
/// beyond the lifetime of a query.
///
/// The outgoing edges of a vertex are enumerated lazily. Whatever resources
/// the enumeration holds are released when the returned iterator is dropped,
/// which a search does before expanding the next vertex, whether the
/// enumeration ran to completion or was abandoned due to an error.
pub trait DirectedGraph {
    type Vertex: Eq + Hash + Clone;
    type Edge;
    type Cost;

    /// The error raised by a failing graph (or heuristic). Graphs that
    /// cannot fail use [`std::convert::Infallible`].
    type Error;

    /// The enumeration of the outgoing edges of a vertex.
    type Edges<'a>: Iterator<Item = Result<Self::Edge, Self::Error>>
    where
        Self: 'a;

    fn outgoing_edges(&self, v: &Self::Vertex) -> Result<Self::Edges<'_>, Self::Error>;

    fn start_vertex(&self, e: &Self::Edge) -> Self::Vertex;

    fn end_vertex(&self, e: &Self::Edge) -> Self::Vertex;

    fn cost(&self, e: &Self::Edge) -> Self::Cost;
}
