//! Depth-slice compositor: runs one visibility sweep per occluder
//! group, then renders the scene bottom-up in elevation slices with
//! per-slice clipping and fog fills.
//!
//! The drawing backend and the fog palette are typed seams
//! (`DrawSurface`, `FogTheme`) resolved once per frame; the host's
//! scene drawing is a plain callback invoked inside each slice's clip.

use log::debug;

use crate::depth::{collect_slices, project, slice_key, world_to_screen, zscale};
use crate::segment::{build_segments, Point, Segment};
use crate::sweep::{visibility_polygon, SweepScratch};
use crate::types::{Camera, Color, FrameScene, PartialKey};

/// Drawing backend seam. Clips nest; fills are alpha-composited onto
/// the current surface contents, never overwritten, because one pixel
/// may receive fog from several slices.
pub trait DrawSurface {
    /// Viewport size in screen units.
    fn size(&self) -> (f64, f64);
    /// Push a clip restricting subsequent drawing to the polygon's
    /// interior, intersected with any clip already in effect.
    fn push_clip(&mut self, polygon: &[Point]);
    /// Undo the most recent `push_clip`.
    fn pop_clip(&mut self);
    /// Fill the viewport minus the polygon's interior.
    fn fill_outside(&mut self, polygon: &[Point], color: Color);
}

/// Fog palette seam. The blend curve between elevation, opacity and
/// final tint belongs to the theme, not the compositor.
pub trait FogTheme {
    fn fog_tint(&self, elevation: f64, opacity: f64) -> Color;
}

/// Per-frame render orchestrator. Owns every scratch buffer the
/// pipeline needs so a steady-state frame allocates nothing; only
/// capacity persists between frames.
#[derive(Default)]
pub struct Compositor {
    segments: Vec<Segment>,
    sweep: SweepScratch,
    main_polygon: Vec<Point>,
    partial_keys: Vec<PartialKey>,
    partial_polygons: Vec<Vec<Point>>,
    slices: Vec<f64>,
    screen: Vec<Point>,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render one frame.
    ///
    /// Sweeps the opaque obstacles, then each partial occluder group,
    /// then draws ascending elevation slices: each slice clips to the
    /// opaque visibility polygon scaled by the slice's depth factor,
    /// invokes `draw_scene` for that elevation, and fog-fills the
    /// region each partial group occludes. After the last slice the
    /// area outside the opaque polygon is fog-filled once.
    pub fn render(
        &mut self,
        scene: &FrameScene,
        camera: &Camera,
        surface: &mut dyn DrawSurface,
        theme: &dyn FogTheme,
        draw_scene: &mut dyn FnMut(f64),
    ) {
        let Self {
            segments,
            sweep,
            main_polygon,
            partial_keys,
            partial_polygons,
            slices,
            screen,
        } = self;

        let viewpoint = scene.viewpoint();

        build_segments(viewpoint, &scene.obstacles, segments);
        let obstacle_segments = segments.len();
        visibility_polygon(viewpoint, segments, sweep, main_polygon);

        // One sweep per partial group. A group whose polylines yield no
        // segments contributes nothing this frame.
        partial_keys.clear();
        for group in &scene.partial_groups {
            if !group.polylines.iter().any(|p| p.vertices.len() >= 2) {
                debug!(
                    "skipping partial group at elevation {}: no usable polylines",
                    group.key.elevation
                );
                continue;
            }
            let i = partial_keys.len();
            if partial_polygons.len() == i {
                partial_polygons.push(Vec::new());
            }
            build_segments(viewpoint, &group.polylines, segments);
            visibility_polygon(viewpoint, segments, sweep, &mut partial_polygons[i]);
            partial_keys.push(group.key);
        }
        partial_polygons.truncate(partial_keys.len());

        let min_elevation = frame_min_elevation(scene, partial_keys);
        collect_slices(
            &scene.draw_elevations,
            min_elevation,
            scene.viewpoint_elevation,
            slices,
        );

        debug!(
            "frame: {} obstacle segments, {} partial groups, {} slices",
            obstacle_segments,
            partial_keys.len(),
            slices.len()
        );

        let viewport = surface.size();
        let anchor = world_to_screen(camera, viewport, viewpoint);

        for &slice in slices.iter() {
            let scale = zscale(camera, slice);

            to_screen(camera, viewport, anchor, scale, main_polygon, screen);
            surface.push_clip(screen);

            draw_scene(slice);

            for (key, polygon) in partial_keys.iter().zip(partial_polygons.iter()) {
                let tint = theme.fog_tint(key.elevation, key.opacity);
                // A group seen from its own elevation fogs at full
                // strength; from other slices it reads softer.
                let tint = if slice_key(key.elevation) == slice_key(slice) {
                    tint
                } else {
                    tint.with_alpha_scaled(key.opacity)
                };
                to_screen(camera, viewport, anchor, scale, polygon, screen);
                surface.fill_outside(screen, tint);
            }

            surface.pop_clip();
        }

        // Everything outside the opaque visibility polygon, at the
        // viewpoint's own elevation.
        let scale = zscale(camera, scene.viewpoint_elevation);
        to_screen(camera, viewport, anchor, scale, main_polygon, screen);
        surface.fill_outside(
            screen,
            theme.fog_tint(scene.viewpoint_elevation, 1.0),
        );
    }
}

/// Lowest elevation the frame touches: obstacle vertices, retained
/// partial keys and requested draw elevations. Falls back to the
/// viewpoint's elevation for an empty frame.
fn frame_min_elevation(scene: &FrameScene, partial_keys: &[PartialKey]) -> f64 {
    let mut min: Option<f64> = None;
    let mut fold = |z: f64| {
        min = Some(match min {
            Some(lo) if lo <= z => lo,
            _ => z,
        });
    };
    for poly in &scene.obstacles {
        if let Some(z) = poly.min_elevation() {
            fold(z);
        }
    }
    for key in partial_keys {
        fold(key.elevation);
    }
    for &z in &scene.draw_elevations {
        fold(z);
    }
    min.unwrap_or(scene.viewpoint_elevation)
}

/// World polygon -> screen polygon at one slice's depth scale.
fn to_screen(
    camera: &Camera,
    viewport: (f64, f64),
    anchor: Point,
    scale: f64,
    world: &[Point],
    out: &mut Vec<Point>,
) {
    out.clear();
    out.extend(
        world
            .iter()
            .map(|&p| project(anchor, world_to_screen(camera, viewport, p), scale)),
    );
}

// -- Tests ---------------------------------------------------------
