//! Pseudo-perspective depth projection and elevation slices.
//!
//! Elevations are drawn bottom-up in 0.1-quantized slices; each slice
//! scales screen offsets about the viewpoint's screen anchor by a
//! depth factor, giving a faux-parallax shift for geometry above or
//! below the camera's look plane.

use crate::segment::Point;
use crate::types::Camera;

/// Singularity guard for the depth division. Also bounds the scale
/// factor: `zscale` never exceeds `1.0 / Z_EPSILON` and is never
/// negative, so the drawing backend never sees NaN, infinity, or a
/// sign-flipped transform.
pub const Z_EPSILON: f64 = 1e-4;

/// Elevation quantum for slice enumeration.
pub const SLICE_STEP: f64 = 0.1;

/// Elevation reserved as a "not an actual slice" marker by hosts;
/// never enumerated.
pub const SLICE_SENTINEL: f64 = 1.0;

/// Depth scale factor for elevation `z`: offsets from the viewpoint
/// anchor grow as geometry approaches the camera plane. Results at or
/// past the camera plane collapse to the clamp rather than inverting.
pub fn zscale(camera: &Camera, z: f64) -> f64 {
    let s = (camera.z - camera.look_z) / (camera.z - z + Z_EPSILON);
    if s <= 0.0 {
        1.0 / Z_EPSILON
    } else {
        s.min(1.0 / Z_EPSILON)
    }
}

/// Ground-plane projection of a world point onto the viewport, with
/// the camera position at the viewport center.
pub fn world_to_screen(camera: &Camera, viewport: (f64, f64), p: Point) -> Point {
    (
        (p.0 - camera.x) * camera.scale + viewport.0 / 2.0,
        (p.1 - camera.y) * camera.scale + viewport.1 / 2.0,
    )
}

/// Scale the offset of a projected point from the viewpoint's screen
/// anchor by a slice's depth factor.
pub fn project(anchor: Point, base: Point, zscale: f64) -> Point {
    (
        anchor.0 + (base.0 - anchor.0) * zscale,
        anchor.1 + (base.1 - anchor.1) * zscale,
    )
}

/// Quantize an elevation to its slice key.
pub(crate) fn slice_key(z: f64) -> i64 {
    (z / SLICE_STEP).round() as i64
}

/// Enumerate the frame's elevation slices: the union of the requested
/// draw elevations and synthetic steps from the lowest geometry
/// elevation up to one unit above the viewpoint, quantized to
/// `SLICE_STEP`, de-duplicated, ascending, with the sentinel excluded.
/// Clears and fills the caller-owned buffer.
pub fn collect_slices(
    draw_elevations: &[f64],
    min_elevation: f64,
    viewpoint_elevation: f64,
    out: &mut Vec<f64>,
) {
    out.clear();
    let mut keys: Vec<i64> = draw_elevations.iter().map(|&z| slice_key(z)).collect();
    let hi = slice_key(viewpoint_elevation + 1.0);
    let mut k = slice_key(min_elevation);
    while k <= hi {
        keys.push(k);
        k += 1;
    }
    keys.sort_unstable();
    keys.dedup();
    let sentinel = slice_key(SLICE_SENTINEL);
    out.extend(
        keys.into_iter()
            .filter(|&k| k != sentinel)
            .map(|k| k as f64 * SLICE_STEP),
    );
}
