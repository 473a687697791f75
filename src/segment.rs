//! Oriented occluder segments and angle-tagged endpoint events.
//!
//! Turns the frame's obstacle polylines, plus a synthetic backstop
//! rectangle, into the flat segment arena the radial sweep consumes.
//! Segments are value data rebuilt every frame; endpoint events refer
//! back to their segment by index into that arena, never by pointer.

use crate::types::ObstaclePolyline;

/// A 2D world- or screen-space point.
pub type Point = (f64, f64);

/// Half-extent of the synthetic backstop rectangle, far larger than any
/// expected world extent. Every sweep ray terminates on the backstop, so
/// the sweep never needs a "no hit" case.
pub const BACKSTOP_HALF_EXTENT: f64 = 1.0e5;

/// One endpoint of an occluder segment, tagged with its polar angle
/// relative to the current viewpoint and whether the sweep enters
/// (`begin`) or exits the segment there.
#[derive(Debug, Clone, Copy)]
pub struct SegEndpoint {
    pub pos: Point,
    pub angle: f64,
    pub begin: bool,
}

/// An oriented occluder segment for one frame's sweep.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    pub p1: SegEndpoint,
    pub p2: SegEndpoint,
    /// Squared distance from the viewpoint to the segment midpoint.
    /// Reserved; the sweep does not read it.
    pub rough_dist: f64,
}

impl Segment {
    /// Build a segment from two world points, computing each endpoint's
    /// angle from the viewpoint and classifying begin/end by the sign of
    /// the angular span `p2 - p1` normalized into `(-pi, pi]`.
    pub fn new(viewpoint: Point, p1: Point, p2: Point) -> Self {
        let (vx, vy) = viewpoint;
        let a1 = (p1.1 - vy).atan2(p1.0 - vx);
        let a2 = (p2.1 - vy).atan2(p2.0 - vx);

        let mut span = a2 - a1;
        if span <= -std::f64::consts::PI {
            span += 2.0 * std::f64::consts::PI;
        }
        if span > std::f64::consts::PI {
            span -= 2.0 * std::f64::consts::PI;
        }
        let begin1 = span > 0.0;

        let mx = (p1.0 + p2.0) / 2.0 - vx;
        let my = (p1.1 + p2.1) / 2.0 - vy;

        Self {
            p1: SegEndpoint {
                pos: p1,
                angle: a1,
                begin: begin1,
            },
            p2: SegEndpoint {
                pos: p2,
                angle: a2,
                begin: !begin1,
            },
            rough_dist: mx * mx + my * my,
        }
    }
}

/// One of a segment's two endpoints, flattened into a sortable sweep
/// event. `segment` indexes into the per-frame segment arena.
#[derive(Debug, Clone, Copy)]
pub struct EndpointEvent {
    pub angle: f64,
    pub begin: bool,
    pub pos: Point,
    pub segment: usize,
}

/// Build the frame's segment arena: one segment per consecutive vertex
/// pair of each polyline (polylines with fewer than 2 vertices are
/// dropped silently), then the four backstop segments. Clears and fills
/// the caller-owned buffer.
pub fn build_segments(viewpoint: Point, polylines: &[ObstaclePolyline], out: &mut Vec<Segment>) {
    out.clear();
    for polyline in polylines {
        for pair in polyline.vertices.windows(2) {
            out.push(Segment::new(
                viewpoint,
                (pair[0].x, pair[0].y),
                (pair[1].x, pair[1].y),
            ));
        }
    }
    push_backstop(viewpoint, out);
}

/// Append the four segments of the backstop rectangle.
fn push_backstop(viewpoint: Point, out: &mut Vec<Segment>) {
    let h = BACKSTOP_HALF_EXTENT;
    let corners = [(-h, -h), (h, -h), (h, h), (-h, h)];
    for i in 0..4 {
        out.push(Segment::new(viewpoint, corners[i], corners[(i + 1) % 4]));
    }
}

/// Flatten segments into endpoint events sorted by angle ascending.
/// At equal angles, `begin` events sort before `end` events so a segment
/// already open at a boundary angle stays open rather than flickering
/// closed; position breaks any remaining tie so the order is total and
/// independent of input permutation.
pub fn collect_events(segments: &[Segment], out: &mut Vec<EndpointEvent>) {
    out.clear();
    for (i, seg) in segments.iter().enumerate() {
        out.push(EndpointEvent {
            angle: seg.p1.angle,
            begin: seg.p1.begin,
            pos: seg.p1.pos,
            segment: i,
        });
        out.push(EndpointEvent {
            angle: seg.p2.angle,
            begin: seg.p2.begin,
            pos: seg.p2.pos,
            segment: i,
        });
    }
    out.sort_unstable_by(|a, b| {
        a.angle
            .partial_cmp(&b.angle)
            .unwrap()
            .then_with(|| b.begin.cmp(&a.begin))
            .then_with(|| a.pos.partial_cmp(&b.pos).unwrap())
    });
}
