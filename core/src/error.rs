use thiserror::Error;

/// Convenient result alias for route construction.
pub type Result<T> = std::result::Result<T, RouteError>;

/// Errors raised when assembling a [`Route`](crate::route::Route) by hand.
///
/// A search never produces these: routes reconstructed from a search
/// satisfy the route invariants by construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// A route must contain at least its start vertex.
    #[error("route has no vertices")]
    Empty,

    /// A route of `n` edges visits exactly `n + 1` vertices.
    #[error("route has {vertices} vertices but {edges} edges")]
    LengthMismatch { vertices: usize, edges: usize },
}
