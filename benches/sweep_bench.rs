//! Criterion benchmarks for the visibility sweep and the full frame pass.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, Criterion};
use sightline::{
    build_segments, visibility_polygon, Camera, Color, Compositor, DrawSurface, FogTheme,
    FrameScene, ObstaclePolyline, Point, SweepScratch, Vertex3,
};

/// Deterministic ring of short walls around the viewpoint; `count`
/// controls the number of occluder segments in the sweep.
fn wall_ring(count: usize, radius: f64) -> Vec<ObstaclePolyline> {
    (0..count)
        .map(|i| {
            let a = (i as f64 / count as f64) * std::f64::consts::TAU;
            let (cx, cy) = (radius * a.cos(), radius * a.sin());
            // Tangential wall piece, not quite touching its neighbors.
            let (tx, ty) = (-a.sin(), a.cos());
            let half = radius * std::f64::consts::PI / count as f64 * 0.8;
            ObstaclePolyline::new(vec![
                Vertex3::new(cx - tx * half, cy - ty * half, 0.0),
                Vertex3::new(cx + tx * half, cy + ty * half, 0.0),
            ])
        })
        .collect()
}

/// A partial-occluder frame scene in the wire format hosts produce.
const FRAME_JSON: &str = r#"{
  "viewpoint_x": 0.0,
  "viewpoint_y": 0.0,
  "viewpoint_elevation": 0.2,
  "obstacles": [
    {"vertices": [
      {"x": 40.0, "y": -25.0}, {"x": 40.0, "y": 0.0}, {"x": 40.0, "y": 25.0}
    ]},
    {"vertices": [
      {"x": -30.0, "y": 10.0}, {"x": -10.0, "y": 35.0}
    ]}
  ],
  "partial_groups": [
    {
      "key": {"elevation": 0.3, "opacity": 0.4},
      "polylines": [
        {"vertices": [
          {"x": 0.0, "y": -40.0, "z": 0.3}, {"x": 25.0, "y": -40.0, "z": 0.3}
        ]}
      ]
    }
  ],
  "draw_elevations": [0.0, 0.3, 0.5]
}"#;

struct NoopSurface;

impl DrawSurface for NoopSurface {
    fn size(&self) -> (f64, f64) {
        (1920.0, 1080.0)
    }
    fn push_clip(&mut self, _polygon: &[Point]) {}
    fn pop_clip(&mut self) {}
    fn fill_outside(&mut self, _polygon: &[Point], _color: Color) {}
}

struct FlatFog;

impl FogTheme for FlatFog {
    fn fog_tint(&self, _elevation: f64, opacity: f64) -> Color {
        Color::rgba(0.1, 0.1, 0.15, opacity * 0.6)
    }
}

fn bench_sweep(c: &mut Criterion) {
    for count in [16, 64, 256] {
        let walls = wall_ring(count, 100.0);
        let viewpoint = (0.0, 0.0);
        let mut segments = Vec::new();
        build_segments(viewpoint, &walls, &mut segments);
        let mut scratch = SweepScratch::new();
        let mut polygon = Vec::new();
        c.bench_function(&format!("sweep_{count}_walls"), |b| {
            b.iter(|| visibility_polygon(viewpoint, &segments, &mut scratch, &mut polygon));
        });
    }
}

fn bench_frame(c: &mut Criterion) {
    let scene: FrameScene = serde_json::from_str(FRAME_JSON).unwrap();
    let camera = Camera {
        x: 0.0,
        y: 0.0,
        scale: 8.0,
        z: 10.0,
        look_z: 0.0,
    };
    let mut compositor = Compositor::new();
    let mut surface = NoopSurface;
    c.bench_function("frame_render", |b| {
        b.iter(|| {
            compositor.render(&scene, &camera, &mut surface, &FlatFog, &mut |_| {});
        });
    });
}

criterion_group!(benches, bench_sweep, bench_frame);
criterion_main!(benches);
