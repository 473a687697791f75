//! Radial sweep visibility solver.
//!
//! Consumes the angle-sorted endpoint events of one occluder group and
//! produces the star-shaped visibility polygon around the viewpoint:
//! every ray from the viewpoint crosses the emitted boundary exactly
//! once. The sweep keeps an ordered list of angularly active segments,
//! nearest first, and emits a boundary patch whenever the front-most
//! segment changes.

use crate::segment::{collect_events, EndpointEvent, Point, Segment, BACKSTOP_HALF_EXTENT};

/// Endpoint nudge used by the in-front predicate to avoid ties at
/// shared vertices between adjacent wall pieces.
const NUDGE: f64 = 0.01;

/// Two emitted patch points closer than this collapse to a zero-width
/// patch and are discarded.
const PATCH_EPSILON: f64 = 1e-9;

/// Reusable buffers for `visibility_polygon`, owned by the caller so
/// nothing hides cross-frame state. Only capacity persists between
/// invocations.
#[derive(Debug, Default)]
pub struct SweepScratch {
    events: Vec<EndpointEvent>,
    open: Vec<usize>,
}

impl SweepScratch {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(256),
            open: Vec::with_capacity(32),
        }
    }
}

/// Compute the visibility polygon for one occluder group.
///
/// `segments` is the per-frame arena from `build_segments` (obstacle
/// segments plus the backstop, so every ray terminates). The result is
/// a closed sequence of boundary point pairs in sweep order, forming a
/// triangle fan around the viewpoint.
///
/// The sweep runs the sorted event list twice: pass 0 only maintains
/// the open list, which primes segments that are already open at angle
/// -pi (their end event sorts before their begin event); pass 1 repeats
/// the bookkeeping and emits boundary patches on front changes.
pub fn visibility_polygon(
    viewpoint: Point,
    segments: &[Segment],
    scratch: &mut SweepScratch,
    result: &mut Vec<Point>,
) {
    let SweepScratch { events, open } = scratch;
    open.clear();
    result.clear();
    collect_events(segments, events);

    let mut begin_angle = 0.0;
    for pass in 0..2 {
        for i in 0..events.len() {
            let ev = events[i];
            let old_front = open.first().copied();

            if ev.begin {
                let seg = &segments[ev.segment];
                let at = open
                    .iter()
                    .position(|&o| in_front_of(seg, &segments[o], viewpoint))
                    .unwrap_or(open.len());
                open.insert(at, ev.segment);
            } else if let Some(at) = open.iter().position(|&o| o == ev.segment) {
                // Absent is a no-op: pass 0 sees the end event of a
                // wrapping segment before its begin event.
                open.remove(at);
            }

            if old_front != open.first().copied() {
                if pass == 1 {
                    emit_patch(
                        viewpoint,
                        begin_angle,
                        ev.angle,
                        old_front.map(|o| &segments[o]),
                        result,
                    );
                }
                begin_angle = ev.angle;
            }
        }
    }
}

/// Intersect the rays at the previous and current sweep angles against
/// the segment that was front-most before the change, appending the two
/// boundary points. Zero-width patches and rays parallel to the segment
/// are discarded.
fn emit_patch(
    viewpoint: Point,
    angle1: f64,
    angle2: f64,
    front: Option<&Segment>,
    out: &mut Vec<Point>,
) {
    let ray1 = (viewpoint.0 + angle1.cos(), viewpoint.1 + angle1.sin());
    let ray2 = (viewpoint.0 + angle2.cos(), viewpoint.1 + angle2.sin());

    let (pa, pb) = match front {
        Some(seg) => {
            let a = line_intersection(seg.p1.pos, seg.p2.pos, viewpoint, ray1);
            let b = line_intersection(seg.p1.pos, seg.p2.pos, viewpoint, ray2);
            match (a, b) {
                (Some(a), Some(b)) => (a, b),
                _ => return,
            }
        }
        // No previous front: terminate on the backstop by construction.
        None => {
            let far = 2.0 * BACKSTOP_HALF_EXTENT;
            (
                (
                    viewpoint.0 + far * angle1.cos(),
                    viewpoint.1 + far * angle1.sin(),
                ),
                (
                    viewpoint.0 + far * angle2.cos(),
                    viewpoint.1 + far * angle2.sin(),
                ),
            )
        }
    };

    if (pa.0 - pb.0).abs() < PATCH_EPSILON && (pa.1 - pb.1).abs() < PATCH_EPSILON {
        return;
    }
    out.push(pa);
    out.push(pb);
}

/// Intersection of the infinite lines through (p1, p2) and (p3, p4).
/// None when the lines are (near) parallel.
fn line_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
    let denom = (p4.1 - p3.1) * (p2.0 - p1.0) - (p4.0 - p3.0) * (p2.1 - p1.1);
    if denom.abs() < 1e-12 {
        return None;
    }
    let s = ((p4.0 - p3.0) * (p1.1 - p3.1) - (p4.1 - p3.1) * (p1.0 - p3.0)) / denom;
    Some((p1.0 + s * (p2.0 - p1.0), p1.1 + s * (p2.1 - p1.1)))
}

/// True if `point` is strictly left of the supporting line of `seg`
/// (oriented p1 -> p2).
fn left_of(seg: &Segment, point: Point) -> bool {
    let cross = (seg.p2.pos.0 - seg.p1.pos.0) * (point.1 - seg.p1.pos.1)
        - (seg.p2.pos.1 - seg.p1.pos.1) * (point.0 - seg.p1.pos.0);
    cross < 0.0
}

fn interpolate(p: Point, q: Point, f: f64) -> Point {
    (p.0 * (1.0 - f) + q.0 * f, p.1 * (1.0 - f) + q.1 * f)
}

/// In-front predicate: true when `a` is nearer to `rel` than `b` over
/// their angular overlap. Each segment's endpoints are sampled nudged
/// slightly toward the other endpoint so shared vertices between
/// adjacent wall pieces do not produce ties. Not a total order for
/// crossing segments; the builder's non-crossing input keeps it
/// transitive in practice.
fn in_front_of(a: &Segment, b: &Segment, rel: Point) -> bool {
    // Samples of b's endpoints against a's line, and vice versa.
    let b1 = left_of(a, interpolate(b.p1.pos, b.p2.pos, NUDGE));
    let b2 = left_of(a, interpolate(b.p2.pos, b.p1.pos, NUDGE));
    let b3 = left_of(a, rel);
    let a1 = left_of(b, interpolate(a.p1.pos, a.p2.pos, NUDGE));
    let a2 = left_of(b, interpolate(a.p2.pos, a.p1.pos, NUDGE));
    let a3 = left_of(b, rel);

    // b entirely beyond a's line from the viewpoint: a occludes b.
    if b1 == b2 && b2 != b3 {
        return true;
    }
    // a entirely on the viewpoint's side of b's line: a is nearer.
    if a1 == a2 && a2 == a3 {
        return true;
    }
    if a1 == a2 && a2 != a3 {
        return false;
    }
    if b1 == b2 && b2 == b3 {
        return false;
    }
    // Intersecting segments: not supported input, pick either.
    false
}

// -- Polygon helpers -----------------------------------------------

/// Compute polygon area using the shoelace formula.
/// Returns positive area regardless of winding order.
pub fn polygon_area(vertices: &[Point]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += vertices[i].0 * vertices[j].1;
        area -= vertices[j].0 * vertices[i].1;
    }
    area.abs() / 2.0
}

/// Ray-casting point-in-polygon test.
pub fn point_in_polygon(px: f64, py: f64, vertices: &[Point]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = vertices[i];
        let (xj, yj) = vertices[j];
        if (yi > py) != (yj > py) {
            let intersect_x = (xj - xi) * (py - yi) / (yj - yi) + xi;
            if px < intersect_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

// -- Tests ---------------------------------------------------------
