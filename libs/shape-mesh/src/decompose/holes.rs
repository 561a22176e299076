//! # Hole Bridging
//!
//! Joins each hole to the outer ring with a pair of coincident bridge
//! edges, turning a holed polygon into one weakly simple ring that ear
//! clipping can consume. Bridge edges carry no material.

use super::Ring;
use glam::DVec2;
use log::warn;
use shape_model::math::{orient2d, winding_number};

/// Splices every hole into `outer`.
///
/// Holes are processed from the rightmost one inwards, each bridged from
/// its rightmost vertex to the nearest visible vertex of the current ring.
pub(crate) fn bridge_holes(outer: Ring, mut holes: Vec<Ring>) -> Ring {
    holes.sort_by(|a, b| rightmost_x(b).total_cmp(&rightmost_x(a)));

    let mut ring = outer;
    for (index, hole) in holes.iter().enumerate() {
        let Some(m) = rightmost_index(hole) else {
            continue;
        };
        let anchor = hole.points[m];
        let blockers = &holes[index..];

        let mut candidates: Vec<usize> = (0..ring.points.len()).collect();
        candidates.sort_by(|&a, &b| {
            ring.points[a]
                .distance_squared(anchor)
                .total_cmp(&ring.points[b].distance_squared(anchor))
        });
        let target = candidates
            .iter()
            .copied()
            .find(|&c| is_visible(anchor, ring.points[c], &ring, blockers))
            .or_else(|| {
                warn!("No visible bridge for hole at {anchor}, using nearest vertex");
                candidates.first().copied()
            });
        if let Some(c) = target {
            ring = splice(&ring, c, hole, m);
        }
    }
    ring
}

fn rightmost_x(ring: &Ring) -> f64 {
    ring.points
        .iter()
        .map(|p| p.x)
        .fold(f64::NEG_INFINITY, f64::max)
}

fn rightmost_index(ring: &Ring) -> Option<usize> {
    (0..ring.points.len()).max_by(|&a, &b| {
        let (pa, pb) = (ring.points[a], ring.points[b]);
        pa.x.total_cmp(&pb.x).then(pa.y.total_cmp(&pb.y))
    })
}

/// Inserts `hole` (starting at its vertex `m`) after ring vertex `c`.
fn splice(ring: &Ring, c: usize, hole: &Ring, m: usize) -> Ring {
    let h = hole.points.len();
    let bridge_from = ring.points[c];
    let anchor = hole.points[m];
    let capacity = ring.points.len() + h + 2;

    let mut points = Vec::with_capacity(capacity);
    let mut materials = Vec::with_capacity(capacity);

    points.extend_from_slice(&ring.points[..=c]);
    materials.extend_from_slice(&ring.materials[..c]);
    materials.push(None);

    for k in 0..h {
        let j = (m + k) % h;
        points.push(hole.points[j]);
        materials.push(hole.materials[j]);
    }

    points.push(anchor);
    materials.push(None);
    points.push(bridge_from);
    materials.push(ring.materials[c]);

    points.extend_from_slice(&ring.points[c + 1..]);
    materials.extend_from_slice(&ring.materials[c + 1..]);

    Ring { points, materials }
}

/// True when the open segment `a..b` crosses no ring edge and runs through
/// the ring's interior outside every remaining hole.
fn is_visible(a: DVec2, b: DVec2, ring: &Ring, holes: &[Ring]) -> bool {
    if a == b {
        return false;
    }
    let blocked = std::iter::once(ring)
        .chain(holes)
        .any(|r| ring_blocks(a, b, &r.points));
    if blocked {
        return false;
    }
    let mid = (a + b) * 0.5;
    winding_number(mid, &ring.points) != 0
        && holes.iter().all(|h| winding_number(mid, &h.points) == 0)
}

fn ring_blocks(a: DVec2, b: DVec2, points: &[DVec2]) -> bool {
    let n = points.len();
    (0..n).any(|i| {
        let (p, q) = (points[i], points[(i + 1) % n]);
        segments_cross(a, b, p, q) || (p != a && p != b && on_open_segment(p, a, b))
    })
}

/// Proper crossing: each segment strictly separates the other's endpoints.
fn segments_cross(a: DVec2, b: DVec2, p: DVec2, q: DVec2) -> bool {
    let o1 = orient2d(a, b, p);
    let o2 = orient2d(a, b, q);
    let o3 = orient2d(p, q, a);
    let o4 = orient2d(p, q, b);
    o1 * o2 < 0.0 && o3 * o4 < 0.0
}

fn on_open_segment(p: DVec2, a: DVec2, b: DVec2) -> bool {
    orient2d(a, b, p) == 0.0 && (p - a).dot(b - a) > 0.0 && (p - b).dot(a - b) > 0.0
}
