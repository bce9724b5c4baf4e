//! The result of a successful search.

use crate::error::{Result, RouteError};

/// A path through a graph: the vertices `v0 .. vn` visited in order,
/// the edges `e1 .. en` taken, where `ei` leads from `v(i-1)` to `vi`,
/// and the total cost of those edges.
///
/// A route always contains at least one vertex and exactly one vertex
/// more than it has edges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route<V, E, C> {
    vertices: Vec<V>,
    edges: Vec<E>,
    total_cost: C,
}

impl<V, E, C> Route<V, E, C> {
    /// Assemble a route, checking its shape. Whether the edges actually
    /// connect the vertices is up to the caller.
    pub fn new(vertices: Vec<V>, edges: Vec<E>, total_cost: C) -> Result<Route<V, E, C>> {
        if vertices.is_empty() {
            return Err(RouteError::Empty)
        }
        if vertices.len() != edges.len() + 1 {
            return Err(RouteError::LengthMismatch {
                vertices: vertices.len(),
                edges: edges.len(),
            })
        }
        Ok(Route { vertices, edges, total_cost })
    }

    pub(crate) fn from_parts(vertices: Vec<V>, edges: Vec<E>, total_cost: C) -> Route<V, E, C> {
        debug_assert_eq!(vertices.len(), edges.len() + 1);
        Route { vertices, edges, total_cost }
    }

    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    pub fn edges(&self) -> &[E] {
        &self.edges
    }

    pub fn total_cost(&self) -> &C {
        &self.total_cost
    }

    pub fn start(&self) -> &V {
        &self.vertices[0]
    }

    pub fn end(&self) -> &V {
        &self.vertices[self.vertices.len() - 1]
    }

    /// The number of edges, i.e. steps, along the route.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the route stays at its start vertex.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn into_parts(self) -> (Vec<V>, Vec<E>, C) {
        (self.vertices, self.edges, self.total_cost)
    }
}
