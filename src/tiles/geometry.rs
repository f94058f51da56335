//! Path geometry: edge openness plus internal connection groups.
//!
//! Edges are indexed clockwise from the top: 0 = top, 1 = right,
//! 2 = bottom, 3 = left. A connection group is a set of open edges that are
//! joined inside the tile. An edge may be open without belonging to any
//! group; such an edge matches its neighbour for placement but carries no
//! reachability.
//!
//! `Geometry::new` is the only way to build a geometry, so the invariant
//! (every grouped edge is open, no edge in two groups) holds everywhere.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::TileError;

/// One of the four tile sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    /// All directions in index order.
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The side facing this one on a neighbouring tile.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
        }
    }

    /// (row, col) step towards the neighbour on this side.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Top => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Bottom => (1, 0),
            Direction::Left => (0, -1),
        }
    }
}

/// Openness of the four sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Edges([bool; 4]);

impl Edges {
    pub const ALL_OPEN: Edges = Edges([true; 4]);

    #[must_use]
    pub const fn new(edges: [bool; 4]) -> Self {
        Self(edges)
    }

    #[must_use]
    pub const fn is_open(self, dir: Direction) -> bool {
        self.0[dir.index()]
    }

    #[must_use]
    pub fn any_open(self) -> bool {
        self.0.iter().any(|&open| open)
    }

    /// 180° turn: side `i` takes the value of side `(i + 2) % 4`.
    #[must_use]
    pub const fn rotated(self) -> Self {
        let [t, r, b, l] = self.0;
        Self([b, l, t, r])
    }

    #[must_use]
    pub const fn as_array(self) -> [bool; 4] {
        self.0
    }
}

/// Set of edges joined inside a tile, stored as a 4-bit mask.
///
/// Serialized as the list of edge indices, e.g. `[0, 2]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<u8>", try_from = "Vec<u8>")]
pub struct ConnectionGroup(u8);

impl ConnectionGroup {
    /// Build from edge indices.
    pub fn from_indices(indices: &[u8]) -> Result<Self, TileError> {
        let mut bits = 0u8;
        for &i in indices {
            if i >= 4 {
                return Err(TileError::BadEdgeIndex(i as usize));
            }
            bits |= 1 << i;
        }
        Ok(Self(bits))
    }

    #[must_use]
    pub const fn contains(self, dir: Direction) -> bool {
        self.0 & (1 << dir.index()) != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Member directions in index order.
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |&d| self.contains(d))
    }

    /// Every member index mapped through `(i + 2) % 4`.
    #[must_use]
    pub const fn rotated(self) -> Self {
        Self(((self.0 << 2) | (self.0 >> 2)) & 0b1111)
    }

    const fn bits(self) -> u8 {
        self.0
    }
}

impl From<ConnectionGroup> for Vec<u8> {
    fn from(group: ConnectionGroup) -> Self {
        group.directions().map(|d| d.index() as u8).collect()
    }
}

impl TryFrom<Vec<u8>> for ConnectionGroup {
    type Error = TileError;

    fn try_from(indices: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_indices(&indices)
    }
}

/// Validated path geometry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GeometryRepr")]
pub struct Geometry {
    edges: Edges,
    connections: SmallVec<[ConnectionGroup; 2]>,
    dead_end: bool,
}

#[derive(Deserialize)]
struct GeometryRepr {
    edges: Edges,
    connections: Vec<ConnectionGroup>,
    #[allow(dead_code)]
    dead_end: bool,
}

impl TryFrom<GeometryRepr> for Geometry {
    type Error = TileError;

    fn try_from(repr: GeometryRepr) -> Result<Self, Self::Error> {
        Geometry::new(repr.edges, repr.connections)
    }
}

impl Geometry {
    /// Validate and build. Empty groups are dropped; `dead_end` is derived.
    pub fn new(
        edges: Edges,
        groups: impl IntoIterator<Item = ConnectionGroup>,
    ) -> Result<Self, TileError> {
        let mut seen = 0u8;
        let mut connections = SmallVec::new();
        for group in groups.into_iter().filter(|g| !g.is_empty()) {
            for dir in group.directions() {
                if !edges.is_open(dir) {
                    return Err(TileError::ClosedEdgeConnected(dir.index()));
                }
            }
            if seen & group.bits() != 0 {
                let dup = (seen & group.bits()).trailing_zeros() as usize;
                return Err(TileError::EdgeInSeveralGroups(dup));
            }
            seen |= group.bits();
            connections.push(group);
        }
        let dead_end = connections.is_empty() && edges.any_open();
        Ok(Self {
            edges,
            connections,
            dead_end,
        })
    }

    /// Four open sides, all joined.
    #[must_use]
    pub fn cross() -> Self {
        Self {
            edges: Edges::ALL_OPEN,
            connections: SmallVec::from_slice(&[ConnectionGroup(0b1111)]),
            dead_end: false,
        }
    }

    #[must_use]
    pub fn edges(&self) -> Edges {
        self.edges
    }

    #[must_use]
    pub fn connections(&self) -> &[ConnectionGroup] {
        &self.connections
    }

    #[must_use]
    pub fn is_dead_end(&self) -> bool {
        self.dead_end
    }

    #[must_use]
    pub fn is_open(&self, dir: Direction) -> bool {
        self.edges.is_open(dir)
    }

    /// True if `dir` is open and joined to something inside the tile.
    #[must_use]
    pub fn is_connected(&self, dir: Direction) -> bool {
        self.connections.iter().any(|g| g.contains(dir))
    }

    /// The 180° rotation. Validity is preserved, so no re-check is needed.
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            edges: self.edges.rotated(),
            connections: self.connections.iter().map(|g| g.rotated()).collect(),
            dead_end: self.dead_end,
        }
    }
}
