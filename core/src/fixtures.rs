//! Graphs for testing searches.

use crate::graph::DirectedGraph;
use crate::route::Route;

use quickcheck::{Arbitrary, Gen};
use rand::Rng;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::convert::Infallible;
use std::hash::Hash;
use std::slice;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("graph unavailable at {0}")]
pub struct Unavailable(pub String);

/// A directed edge of a [`Digraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link<V, C> {
    pub from: V,
    pub to: V,
    pub cost: C,
}

/// An adjacency-list graph that records how it is used: the number of
/// enumerations of the outgoing edges of every vertex and the number of
/// enumerations still alive.
pub struct Digraph<V, C> {
    links: HashMap<V, Vec<Link<V, C>>>,
    enumerated: RefCell<HashMap<V, usize>>,
    live: Cell<usize>,
    broken: Option<V>,
}

impl<V, C> Digraph<V, C>
where
    V: Eq + Hash + Clone,
    C: Clone,
{
    pub fn new(links: &[(V, V, C)]) -> Digraph<V, C> {
        let mut adj: HashMap<V, Vec<Link<V, C>>> = HashMap::new();
        for (from, to, cost) in links {
            adj.entry(from.clone()).or_insert_with(Vec::new).push(Link {
                from: from.clone(),
                to: to.clone(),
                cost: cost.clone(),
            });
        }
        Digraph {
            links: adj,
            enumerated: RefCell::new(HashMap::new()),
            live: Cell::new(0),
            broken: None,
        }
    }

    /// Let the enumeration of the outgoing edges of `v` fail after
    /// yielding its first edge.
    pub fn break_at(mut self, v: V) -> Digraph<V, C> {
        self.broken = Some(v);
        self
    }

    /// How often the outgoing edges of `v` were enumerated.
    pub fn enumerations(&self, v: &V) -> usize {
        self.enumerated.borrow().get(v).cloned().unwrap_or(0)
    }

    pub fn total_enumerations(&self) -> usize {
        self.enumerated.borrow().values().sum()
    }

    /// The number of enumerations that have not been released.
    pub fn live_enumerations(&self) -> usize {
        self.live.get()
    }
}

pub struct Links<'a, V, C> {
    iter: slice::Iter<'a, Link<V, C>>,
    live: &'a Cell<usize>,
    broken: bool,
    yielded: usize,
}

impl<'a, V, C> Iterator for Links<'a, V, C>
where
    V: Clone + std::fmt::Debug,
    C: Clone,
{
    type Item = Result<Link<V, C>, Unavailable>;

    fn next(&mut self) -> Option<Self::Item> {
        let link = self.iter.next()?;
        self.yielded += 1;
        if self.broken && self.yielded > 1 {
            return Some(Err(Unavailable(format!("{:?}", link.from))))
        }
        Some(Ok(link.clone()))
    }
}

impl<'a, V, C> Drop for Links<'a, V, C> {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

impl<V, C> DirectedGraph for Digraph<V, C>
where
    V: Eq + Hash + Clone + std::fmt::Debug,
    C: Clone,
{
    type Vertex = V;
    type Edge = Link<V, C>;
    type Cost = C;
    type Error = Unavailable;
    type Edges<'a> = Links<'a, V, C> where Self: 'a;

    fn outgoing_edges(&self, v: &V) -> Result<Links<'_, V, C>, Unavailable> {
        *self.enumerated.borrow_mut().entry(v.clone()).or_insert(0) += 1;
        self.live.set(self.live.get() + 1);
        let links = self.links.get(v).map_or(&[][..], |l| &l[..]);
        Ok(Links {
            iter: links.iter(),
            live: &self.live,
            broken: self.broken.as_ref() == Some(v),
            yielded: 0,
        })
    }

    fn start_vertex(&self, e: &Link<V, C>) -> V {
        e.from.clone()
    }

    fn end_vertex(&self, e: &Link<V, C>) -> V {
        e.to.clone()
    }

    fn cost(&self, e: &Link<V, C>) -> C {
        e.cost.clone()
    }
}

/// A view of a [`Digraph`] without failures, for searches that require
/// an infallible graph.
pub struct Reliable<'g, V, C>(pub &'g Digraph<V, C>);

pub struct ReliableLinks<'a, V, C>(Links<'a, V, C>);

impl<'a, V, C> Iterator for ReliableLinks<'a, V, C>
where
    V: Clone + std::fmt::Debug,
    C: Clone,
{
    type Item = Result<Link<V, C>, Infallible>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|r| match r {
            Ok(link) => Ok(link),
            Err(e) => panic!("{}", e),
        })
    }
}

impl<'g, V, C> DirectedGraph for Reliable<'g, V, C>
where
    V: Eq + Hash + Clone + std::fmt::Debug,
    C: Clone,
{
    type Vertex = V;
    type Edge = Link<V, C>;
    type Cost = C;
    type Error = Infallible;
    type Edges<'a> = ReliableLinks<'a, V, C> where Self: 'a;

    fn outgoing_edges(&self, v: &V) -> Result<ReliableLinks<'_, V, C>, Infallible> {
        match self.0.outgoing_edges(v) {
            Ok(links) => Ok(ReliableLinks(links)),
            Err(e) => panic!("{}", e),
        }
    }

    fn start_vertex(&self, e: &Link<V, C>) -> V {
        e.from.clone()
    }

    fn end_vertex(&self, e: &Link<V, C>) -> V {
        e.to.clone()
    }

    fn cost(&self, e: &Link<V, C>) -> C {
        e.cost.clone()
    }
}

/// Check that a route is a connected path of links from `start` to
/// `end`, returning the sum of its link costs.
pub fn walk<V, C>(route: &Route<V, Link<V, C>, C>, start: &V, end: &V) -> Option<i64>
where
    V: PartialEq,
    C: Copy + Into<i64>,
{
    let vs = route.vertices();
    let es = route.edges();
    if vs.len() != es.len() + 1 || vs.first() != Some(start) || vs.last() != Some(end) {
        return None
    }
    let mut sum = 0;
    for (i, e) in es.iter().enumerate() {
        if e.from != vs[i] || e.to != vs[i + 1] {
            return None
        }
        sum += e.cost.into();
    }
    Some(sum)
}

/// Offsets of the six neighbours of a hexagon in axial coordinates.
const AXIAL_DIRECTIONS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

/// A step between adjacent hexagons in axial coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub from: (i32, i32),
    pub to: (i32, i32),
    pub cost: u32,
}

/// A hexagonal map of the given radius around the origin. Entering a
/// hexagon costs its terrain cost, which is at least 1, so that the
/// hexagonal distance is a consistent heuristic.
pub struct HexMap {
    radius: i32,
    terrain: HashMap<(i32, i32), u32>,
}

impl HexMap {
    pub fn random<R: Rng>(radius: i32, rng: &mut R) -> HexMap {
        let mut terrain = HashMap::new();
        for q in -radius..=radius {
            for r in -radius..=radius {
                if HexMap::distance((0, 0), (q, r)) <= radius as u32 {
                    // Cost 0 marks impassable terrain.
                    let cost = if rng.gen_range(0, 8) == 0 { 0 } else { rng.gen_range(1, 6) };
                    terrain.insert((q, r), cost);
                }
            }
        }
        HexMap { radius, terrain }
    }

    pub fn distance(a: (i32, i32), b: (i32, i32)) -> u32 {
        let (dq, dr) = (a.0 - b.0, a.1 - b.1);
        ((dq.abs() + dr.abs() + (dq + dr).abs()) / 2) as u32
    }

    pub fn corner(&self) -> (i32, i32) {
        (self.radius, -self.radius)
    }
}

impl DirectedGraph for HexMap {
    type Vertex = (i32, i32);
    type Edge = Step;
    type Cost = u32;
    type Error = Infallible;
    type Edges<'a> = std::vec::IntoIter<Result<Step, Infallible>>;

    fn outgoing_edges(&self, v: &(i32, i32)) -> Result<Self::Edges<'_>, Infallible> {
        let from = *v;
        let steps = AXIAL_DIRECTIONS
            .iter()
            .map(|(dq, dr)| (from.0 + dq, from.1 + dr))
            .filter_map(|to| match self.terrain.get(&to) {
                Some(&cost) if cost > 0 => Some(Ok(Step { from, to, cost })),
                _ => None,
            })
            .collect::<Vec<_>>();
        Ok(steps.into_iter())
    }

    fn start_vertex(&self, e: &Step) -> (i32, i32) {
        e.from
    }

    fn end_vertex(&self, e: &Step) -> (i32, i32) {
        e.to
    }

    fn cost(&self, e: &Step) -> u32 {
        e.cost
    }
}

/// A small random graph with vertices `0 .. n` and non-negative costs.
#[derive(Clone, Debug)]
pub struct RandomGraph {
    pub n: u8,
    pub links: Vec<(u8, u8, i64)>,
}

impl Arbitrary for RandomGraph {
    fn arbitrary<G: Gen>(g: &mut G) -> RandomGraph {
        let n = g.gen_range(1, 12);
        let m = g.gen_range(0, 4 * n as usize);
        let links = (0..m)
            .map(|_| (g.gen_range(0, n), g.gen_range(0, n), g.gen_range(0, 20)))
            .collect();
        RandomGraph { n, links }
    }
}

impl RandomGraph {
    pub fn digraph(&self) -> Digraph<u8, i64> {
        Digraph::new(&self.links)
    }

    /// Shortest distances from `from` to every vertex (Bellman-Ford).
    pub fn distances_from(&self, from: u8) -> HashMap<u8, i64> {
        let mut dist = HashMap::new();
        dist.insert(from, 0);
        for _ in 0..self.n {
            for &(u, v, c) in &self.links {
                if let Some(&du) = dist.get(&u) {
                    let better = dist.get(&v).map_or(true, |&dv| du + c < dv);
                    if better {
                        dist.insert(v, du + c);
                    }
                }
            }
        }
        dist
    }

    /// A consistent, admissible heuristic towards `end`: half the exact
    /// remaining distance, and a large constant where `end` is unreachable.
    pub fn consistent_heuristic(&self, end: u8) -> HashMap<u8, i64> {
        let reversed = RandomGraph {
            n: self.n,
            links: self.links.iter().map(|&(u, v, c)| (v, u, c)).collect(),
        };
        let to_end = reversed.distances_from(end);
        (0..self.n)
            .map(|v| (v, to_end.get(&v).map_or(10_000, |d| d / 2)))
            .collect()
    }
}
