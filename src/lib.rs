//! Sightline — per-frame 2D visibility and depth-slice occlusion.
//!
//! Given a viewpoint and the frame's occluder polylines, computes
//! star-shaped visibility polygons by radial sweep and composites the
//! scene in elevation slices: geometry the viewpoint cannot see is
//! clipped out, translucent occluders fog the regions they block, and
//! elevations above or below the camera's look plane shift with a
//! faux-parallax depth scale.
//!
//! Everything runs synchronously inside the caller's frame; the only
//! state carried across frames is buffer capacity inside
//! [`Compositor`] and [`SweepScratch`].

pub mod compositor;
pub mod depth;
pub mod segment;
pub mod sweep;
pub mod types;

pub use compositor::{Compositor, DrawSurface, FogTheme};
pub use segment::{build_segments, Point, Segment};
pub use sweep::{point_in_polygon, polygon_area, visibility_polygon, SweepScratch};
pub use types::{
    Camera, Color, FrameScene, ObstaclePolyline, PartialKey, PartialOccluderGroup, Vertex3,
};
