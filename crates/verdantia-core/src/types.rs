//! Shared types used across the Verdantia crates.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Smallest distance an edge is allowed to have.
///
/// Coincident locations would otherwise produce a zero-length edge and a
/// division by zero in deposit and heuristic computations. Large enough
/// that `1 / MIN_DISTANCE` stays far from overflow.
pub const MIN_DISTANCE: f64 = 1e-9;

/// Clamp a raw distance to the representable positive range.
pub fn guard_distance(distance: f64) -> f64 {
    if distance.is_finite() && distance > MIN_DISTANCE {
        distance
    } else {
        MIN_DISTANCE
    }
}

/// Unique identifier for a simulation instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimulationId(pub Uuid);

impl SimulationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SimulationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SimulationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a location on the map (e.g. `"BG1"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocationId(pub String);

impl LocationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for LocationId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A position in the 2D map plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Linear interpolation toward `other`. `t` is clamped to `[0, 1]`.
    pub fn lerp(&self, other: &Position, t: f64) -> Position {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        Position {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

/// A labelled place on the map. Immutable once the simulation starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub position: Position,
}

impl Location {
    pub fn new(id: impl Into<LocationId>, name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position: Position::new(x, y),
        }
    }
}

/// Directed edge key. Pheromone is stored per direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey {
    pub from: LocationId,
    pub to: LocationId,
}

impl EdgeKey {
    pub fn new(from: impl Into<LocationId>, to: impl Into<LocationId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn reversed(&self) -> EdgeKey {
        EdgeKey {
            from: self.to.clone(),
            to: self.from.clone(),
        }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// A directed edge with its fixed Euclidean length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: LocationId,
    pub to: LocationId,
    pub distance: f64,
}

impl Edge {
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.from.clone(), self.to.clone())
    }
}

/// An ordered route from the start location to the goal location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Path(pub Vec<LocationId>);

impl Path {
    pub fn new(stops: Vec<LocationId>) -> Self {
        Self(stops)
    }

    pub fn stops(&self) -> &[LocationId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&LocationId> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&LocationId> {
        self.0.last()
    }

    /// Number of edges traversed by this path.
    pub fn edge_count(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Consecutive directed edges along the path.
    pub fn edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.0
            .windows(2)
            .map(|pair| EdgeKey::new(pair[0].clone(), pair[1].clone()))
    }

    pub fn contains(&self, id: &LocationId) -> bool {
        self.0.contains(id)
    }

    /// Whether the directed hop `from -> to` appears on this path.
    pub fn uses_edge(&self, from: &LocationId, to: &LocationId) -> bool {
        self.0.windows(2).any(|pair| &pair[0] == from && &pair[1] == to)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.0.iter().map(|id| id.as_str()).collect();
        f.write_str(&labels.join(" -> "))
    }
}

/// Read-only view of the pheromone field at one point in time.
///
/// Absent keys read as zero trail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PheromoneSnapshot {
    trails: HashMap<EdgeKey, f64>,
}

impl PheromoneSnapshot {
    pub fn new(trails: HashMap<EdgeKey, f64>) -> Self {
        Self { trails }
    }

    pub fn trail(&self, from: &LocationId, to: &LocationId) -> f64 {
        self.trails
            .get(&EdgeKey::new(from.clone(), to.clone()))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn get(&self, key: &EdgeKey) -> f64 {
        self.trails.get(key).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.trails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EdgeKey, f64)> {
        self.trails.iter().map(|(k, v)| (k, *v))
    }

    /// Strongest trail in the field, or 0.0 if the field is empty.
    pub fn max_trail(&self) -> f64 {
        self.trails.values().copied().fold(0.0, f64::max)
    }

    /// Trail relative to the strongest trail, in `[0, 1]`.
    pub fn normalized(&self, key: &EdgeKey) -> f64 {
        let max = self.max_trail();
        if max <= 0.0 {
            0.0
        } else {
            (self.get(key) / max).clamp(0.0, 1.0)
        }
    }

    pub fn into_inner(self) -> HashMap<EdgeKey, f64> {
        self.trails
    }
}

/// The current tick of the simulation.
pub type Tick = u64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints_are_exact() {
        let a = Position::new(180.0, 1250.0);
        let b = Position::new(870.0, 240.0);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        assert_eq!(a.lerp(&b, 7.0), b);
        assert_eq!(a.lerp(&b, -1.0), a);
    }

    #[test]
    fn guard_distance_replaces_zero() {
        assert_eq!(guard_distance(0.0), MIN_DISTANCE);
        assert_eq!(guard_distance(f64::NAN), MIN_DISTANCE);
        assert_eq!(guard_distance(12.5), 12.5);
    }

    #[test]
    fn path_edges_follow_stop_order() {
        let path = Path::new(vec!["A".into(), "B".into(), "C".into()]);
        let edges: Vec<EdgeKey> = path.edges().collect();
        assert_eq!(edges, vec![EdgeKey::new("A", "B"), EdgeKey::new("B", "C")]);
        assert!(path.uses_edge(&"B".into(), &"C".into()));
        assert!(!path.uses_edge(&"C".into(), &"B".into()));
        assert_eq!(path.to_string(), "A -> B -> C");
    }

    #[test]
    fn snapshot_missing_edge_reads_zero() {
        let mut trails = HashMap::new();
        trails.insert(EdgeKey::new("A", "B"), 2.0);
        trails.insert(EdgeKey::new("B", "A"), 0.5);
        let snap = PheromoneSnapshot::new(trails);
        assert_eq!(snap.trail(&"A".into(), &"C".into()), 0.0);
        assert_eq!(snap.max_trail(), 2.0);
        assert_eq!(snap.normalized(&EdgeKey::new("B", "A")), 0.25);
    }
}
