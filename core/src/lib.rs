//! Generic A* route finding over directed, edge-weighted graphs.
//!
//! The graph itself is supplied by the caller through the
//! [`DirectedGraph`](graph::DirectedGraph) trait, costs through a
//! [`CostAlgebra`](cost::CostAlgebra). A successful search yields a
//! [`Route`](route::Route).

pub mod astar;
pub mod cost;
pub mod error;
pub mod graph;
pub mod queue;
pub mod route;

#[cfg(test)]
mod fixtures;

pub use crate::astar::{
    find_f64_route, find_i32_route, find_i64_route, find_route, find_route_with_stats,
    find_route_within, try_find_route, try_find_route_with_stats, try_find_route_within,
    SearchLimits, SearchStats,
};
pub use crate::cost::{CostAlgebra, CostFns, NaturalCosts};
pub use crate::error::{Result, RouteError};
pub use crate::graph::DirectedGraph;
pub use crate::queue::{MinPriorityQueue, PairingHeap};
pub use crate::route::Route;
