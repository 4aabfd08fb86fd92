use smallvec::{smallvec, SmallVec};
use crate::game::math::FixedVec2;

/// Waypoints from the start position to the goal, in order.
pub type NavPath = SmallVec<[FixedVec2; 8]>;

/// A path-planning backend.
///
/// Implementations own the navigation data (navmesh, grid, graph...) and
/// answer one question: how to get from `from` to `to`. An empty path means
/// the goal is unreachable.
pub trait PathPlanner: Send + Sync + 'static {
    fn plan(&self, from: FixedVec2, to: FixedVec2) -> NavPath;
}

/// Walk straight at the goal. Used when no navigation data is installed.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectPlanner;

impl PathPlanner for DirectPlanner {
    fn plan(&self, from: FixedVec2, to: FixedVec2) -> NavPath {
        smallvec![from, to]
    }
}

impl<F> PathPlanner for F
where
    F: Fn(FixedVec2, FixedVec2) -> NavPath + Send + Sync + 'static,
{
    fn plan(&self, from: FixedVec2, to: FixedVec2) -> NavPath {
        self(from, to)
    }
}
