//! Scene-facing data types for the per-frame visibility pass.
//!
//! Every struct here is a plain value recomputed each frame by the host
//! simulation and consumed synchronously within that frame's render pass.
//! All of them derive Serialize + Deserialize so scenes can round-trip
//! through JSON fixtures in tests and tooling.

use serde::{Deserialize, Serialize};

// -- Geometry ------------------------------------------------------

/// World-space vertex with elevation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex3 {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Vertex3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// An open polyline of world-space vertices. Each consecutive pair of
/// vertices becomes one occluder segment; the polyline is not implicitly
/// closed. Polylines with fewer than 2 vertices produce no segments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstaclePolyline {
    pub vertices: Vec<Vertex3>,
}

impl ObstaclePolyline {
    pub fn new(vertices: Vec<Vertex3>) -> Self {
        Self { vertices }
    }

    /// Lowest elevation among this polyline's vertices, if any.
    pub fn min_elevation(&self) -> Option<f64> {
        self.vertices.iter().map(|v| v.z).fold(None, |acc, z| {
            Some(match acc {
                Some(lo) if lo <= z => lo,
                _ => z,
            })
        })
    }
}

// -- Translucent occluder groups -----------------------------------

/// Tag identifying one translucent partial-occluder group: the elevation
/// band at which it blocks, and how strongly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartialKey {
    pub elevation: f64,
    pub opacity: f64,
}

/// One translucent occluder set (e.g. a band of windows). Fed to its own
/// sweep invocation, separate from the opaque walls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartialOccluderGroup {
    pub key: PartialKey,
    #[serde(default)]
    pub polylines: Vec<ObstaclePolyline>,
}

// -- Color ---------------------------------------------------------

/// Straight-alpha RGBA color, components in [0, 1]. Fog fills using these
/// are alpha-composited, never overwritten, because one screen pixel may
/// receive fog from several slices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "default_alpha")]
    pub a: f64,
}

fn default_alpha() -> f64 {
    1.0
}

impl Color {
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with alpha multiplied by `f` (clamped to [0, 1]).
    /// Used for the softer tint of a partial occluder seen from a
    /// different elevation.
    pub fn with_alpha_scaled(self, f: f64) -> Self {
        Self {
            a: (self.a * f).clamp(0.0, 1.0),
            ..self
        }
    }
}

// -- Camera --------------------------------------------------------

/// Camera state, owned by the host's rendering/camera collaborator and
/// read-only here. `look_z` is the elevation of the ground projection
/// plane; elevations above or below it shift and scale on screen.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub z: f64,
    #[serde(default)]
    pub look_z: f64,
}

// -- Frame input ---------------------------------------------------

/// Everything the host supplies for one frame. Rebuilt from scratch every
/// frame; nothing here persists across frames.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameScene {
    /// Viewpoint world position (the subject whose visibility is computed).
    pub viewpoint_x: f64,
    pub viewpoint_y: f64,
    /// Current elevation of the subject.
    #[serde(default)]
    pub viewpoint_elevation: f64,
    /// Opaque occluders, recomputed per frame from world state.
    #[serde(default)]
    pub obstacles: Vec<ObstaclePolyline>,
    /// Translucent occluder sets, each swept independently.
    #[serde(default)]
    pub partial_groups: Vec<PartialOccluderGroup>,
    /// Elevations at which scene geometry requests drawing this frame.
    #[serde(default)]
    pub draw_elevations: Vec<f64>,
}

impl FrameScene {
    pub fn viewpoint(&self) -> (f64, f64) {
        (self.viewpoint_x, self.viewpoint_y)
    }
}

// -- Tests ---------------------------------------------------------
