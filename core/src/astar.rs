//! A* search for a cheapest route between two vertices of a graph.

use crate::cost::{CostAlgebra, NaturalCosts};
use crate::graph::DirectedGraph;
use crate::queue::PairingHeap;
use crate::route::Route;

use tracing::{debug, debug_span, trace};

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::convert::Infallible;

/// Bounds on the work a single search may do. The default is unbounded.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchLimits<C> {
    /// Vertices whose path cost from the start would exceed this bound
    /// are not considered reachable.
    pub max_cost: Option<C>,
    /// The number of vertices the search may expand before giving up.
    pub max_expansions: Option<usize>,
}

impl<C> SearchLimits<C> {
    pub fn unbounded() -> SearchLimits<C> {
        SearchLimits { max_cost: None, max_expansions: None }
    }

    pub fn with_max_cost(mut self, max_cost: C) -> SearchLimits<C> {
        self.max_cost = Some(max_cost);
        self
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> SearchLimits<C> {
        self.max_expansions = Some(max_expansions);
        self
    }
}

impl<C> Default for SearchLimits<C> {
    fn default() -> SearchLimits<C> {
        SearchLimits::unbounded()
    }
}

/// Counters describing the work done by a search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Vertices whose outgoing edges were enumerated.
    pub expanded: usize,
    /// Neighbours offered to the open queue.
    pub offered: usize,
    /// Offers that discovered a vertex or lowered its estimate.
    pub improved: usize,
    /// Edges leading back to an already expanded vertex.
    pub skipped_visited: usize,
}

impl SearchStats {
    fn report(&self, outcome: &str) {
        debug!(
            outcome = outcome,
            expanded = self.expanded,
            offered = self.offered,
            improved = self.improved,
            skipped_visited = self.skipped_visited,
            "search finished"
        );
    }
}

type RouteOf<G> = Route<
    <G as DirectedGraph>::Vertex,
    <G as DirectedGraph>::Edge,
    <G as DirectedGraph>::Cost,
>;

/// Search for a cheapest route from `start` to `end`.
///
/// The `heuristic` estimates the remaining cost from a vertex to `end`.
/// For the route to be a cheapest one, the heuristic must be admissible,
/// i.e. never overestimate, and should be consistent, i.e. `h(u) <= c + h(v)`
/// for every edge `u -> v` of cost `c`. A heuristic that is constantly
/// zero turns the search into Dijkstra's algorithm.
///
/// Returns `Ok(None)` if `end` is not reachable from `start`. Errors
/// raised by the graph or the heuristic abort the search and are
/// returned unchanged; the edge enumeration in progress is dropped first.
pub fn try_find_route<G, H, A>(
    start: G::Vertex,
    end: G::Vertex,
    graph: &G,
    heuristic: H,
    costs: &A,
) -> Result<Option<RouteOf<G>>, G::Error>
where
    G: DirectedGraph,
    H: FnMut(&G::Vertex, &G::Vertex) -> Result<G::Cost, G::Error>,
    A: CostAlgebra<G::Cost>,
{
    try_find_route_within(start, end, graph, heuristic, costs, &SearchLimits::unbounded())
}

/// Like [`try_find_route`], subject to the given limits. A search that
/// hits `max_expansions` reports no route.
pub fn try_find_route_within<G, H, A>(
    start: G::Vertex,
    end: G::Vertex,
    graph: &G,
    heuristic: H,
    costs: &A,
    limits: &SearchLimits<G::Cost>,
) -> Result<Option<RouteOf<G>>, G::Error>
where
    G: DirectedGraph,
    H: FnMut(&G::Vertex, &G::Vertex) -> Result<G::Cost, G::Error>,
    A: CostAlgebra<G::Cost>,
{
    try_find_route_with_stats(start, end, graph, heuristic, costs, limits).map(|(route, _)| route)
}

/// Like [`try_find_route_within`], also returning the work done.
pub fn try_find_route_with_stats<G, H, A>(
    start: G::Vertex,
    end: G::Vertex,
    graph: &G,
    mut heuristic: H,
    costs: &A,
    limits: &SearchLimits<G::Cost>,
) -> Result<(Option<RouteOf<G>>, SearchStats), G::Error>
where
    G: DirectedGraph,
    H: FnMut(&G::Vertex, &G::Vertex) -> Result<G::Cost, G::Error>,
    A: CostAlgebra<G::Cost>,
{
    let span = debug_span!("astar");
    let _enter = span.enter();

    let mut stats     = SearchStats::default();
    let mut visited   = HashSet::new();
    let mut open      = PairingHeap::with_comparator(|a: &G::Cost, b: &G::Cost| costs.compare(a, b));
    let mut came_from = HashMap::new();
    let mut g_scores  = HashMap::new();

    let estimate = heuristic(&start, &end)?;
    open.offer(start.clone(), estimate);
    g_scores.insert(start.clone(), costs.zero());

    while let Some(current) = open.poll() {
        if current == end {
            stats.report("found");
            return Ok((reconstruct(graph, &start, current, came_from, g_scores), stats))
        }
        if limits.max_expansions.map_or(false, |max| stats.expanded >= max) {
            stats.report("expansion limit");
            return Ok((None, stats))
        }
        // Expanded vertices are never relaxed again, so their g-score
        // is no longer needed.
        let g = match g_scores.remove(&current) {
            Some(g) => g,
            None => unreachable!("polled vertex without g-score"),
        };
        stats.expanded += 1;
        trace!(expanded = stats.expanded, open = open.len(), "expanding");
        visited.insert(current.clone());

        for edge in graph.outgoing_edges(&current)? {
            let edge = edge?;
            let neighbour = graph.end_vertex(&edge);
            if visited.contains(&neighbour) {
                stats.skipped_visited += 1;
                continue
            }
            let tentative = costs.add(&g, &graph.cost(&edge));
            if let Some(max) = &limits.max_cost {
                if costs.compare(&tentative, max) == Ordering::Greater {
                    continue
                }
            }
            let estimate = costs.add(&tentative, &heuristic(&neighbour, &end)?);
            stats.offered += 1;
            if open.offer(neighbour.clone(), estimate) {
                stats.improved += 1;
                came_from.insert(neighbour.clone(), edge);
                g_scores.insert(neighbour, tentative);
            }
        }
    }

    stats.report("exhausted");
    Ok((None, stats))
}

/// Follow the recorded predecessor edges back from `end` to `start`.
fn reconstruct<G: DirectedGraph>(
    graph: &G,
    start: &G::Vertex,
    end: G::Vertex,
    mut came_from: HashMap<G::Vertex, G::Edge>,
    mut g_scores: HashMap<G::Vertex, G::Cost>,
) -> Option<RouteOf<G>> {
    let total_cost = g_scores.remove(&end)?;
    let mut vertices = Vec::new();
    let mut edges = Vec::new();
    let mut v = end;
    while &v != start {
        let e = came_from.remove(&v)?;
        let prev = graph.start_vertex(&e);
        vertices.push(v);
        edges.push(e);
        v = prev;
    }
    vertices.push(v);
    vertices.reverse();
    edges.reverse();
    Some(Route::from_parts(vertices, edges, total_cost))
}

fn infallible<T>(r: Result<T, Infallible>) -> T {
    match r {
        Ok(t) => t,
        Err(never) => match never {},
    }
}

/// Search for a cheapest route in a graph that cannot fail.
/// See [`try_find_route`].
pub fn find_route<G, H, A>(
    start: G::Vertex,
    end: G::Vertex,
    graph: &G,
    heuristic: H,
    costs: &A,
) -> Option<RouteOf<G>>
where
    G: DirectedGraph<Error = Infallible>,
    H: FnMut(&G::Vertex, &G::Vertex) -> G::Cost,
    A: CostAlgebra<G::Cost>,
{
    find_route_within(start, end, graph, heuristic, costs, &SearchLimits::unbounded())
}

/// Like [`find_route`], subject to the given limits.
pub fn find_route_within<G, H, A>(
    start: G::Vertex,
    end: G::Vertex,
    graph: &G,
    heuristic: H,
    costs: &A,
    limits: &SearchLimits<G::Cost>,
) -> Option<RouteOf<G>>
where
    G: DirectedGraph<Error = Infallible>,
    H: FnMut(&G::Vertex, &G::Vertex) -> G::Cost,
    A: CostAlgebra<G::Cost>,
{
    find_route_with_stats(start, end, graph, heuristic, costs, limits).0
}

/// Like [`find_route_within`], also returning the work done.
pub fn find_route_with_stats<G, H, A>(
    start: G::Vertex,
    end: G::Vertex,
    graph: &G,
    mut heuristic: H,
    costs: &A,
    limits: &SearchLimits<G::Cost>,
) -> (Option<RouteOf<G>>, SearchStats)
where
    G: DirectedGraph<Error = Infallible>,
    H: FnMut(&G::Vertex, &G::Vertex) -> G::Cost,
    A: CostAlgebra<G::Cost>,
{
    infallible(try_find_route_with_stats(
        start,
        end,
        graph,
        |v: &G::Vertex, goal: &G::Vertex| Ok(heuristic(v, goal)),
        costs,
        limits,
    ))
}

/// [`find_route`] with `f64` costs in their natural order.
pub fn find_f64_route<G, H>(
    start: G::Vertex,
    end: G::Vertex,
    graph: &G,
    heuristic: H,
) -> Option<RouteOf<G>>
where
    G: DirectedGraph<Cost = f64, Error = Infallible>,
    H: FnMut(&G::Vertex, &G::Vertex) -> f64,
{
    find_route(start, end, graph, heuristic, &NaturalCosts::<f64>::new())
}

/// [`find_route`] with `i64` costs in their natural order.
pub fn find_i64_route<G, H>(
    start: G::Vertex,
    end: G::Vertex,
    graph: &G,
    heuristic: H,
) -> Option<RouteOf<G>>
where
    G: DirectedGraph<Cost = i64, Error = Infallible>,
    H: FnMut(&G::Vertex, &G::Vertex) -> i64,
{
    find_route(start, end, graph, heuristic, &NaturalCosts::<i64>::new())
}

/// [`find_route`] with `i32` costs in their natural order.
pub fn find_i32_route<G, H>(
    start: G::Vertex,
    end: G::Vertex,
    graph: &G,
    heuristic: H,
) -> Option<RouteOf<G>>
where
    G: DirectedGraph<Cost = i32, Error = Infallible>,
    H: FnMut(&G::Vertex, &G::Vertex) -> i32,
{
    find_route(start, end, graph, heuristic, &NaturalCosts::<i32>::new())
}
