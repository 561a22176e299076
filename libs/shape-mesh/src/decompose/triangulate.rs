//! # Ear Clipping
//!
//! Triangulates a counter-clockwise, weakly simple ring. Collinear vertices
//! are kept: they are never clipped as ears themselves, so they end up as
//! corners of the neighbouring triangles and survive into the merged convex
//! polygons.

use glam::DVec2;
use log::warn;
use shape_model::math::orient2d;

/// Returns counter-clockwise index triangles covering the ring.
pub(crate) fn ear_clip(points: &[DVec2]) -> Vec<[usize; 3]> {
    let mut remaining: Vec<usize> = (0..points.len()).collect();
    let mut triangles = Vec::with_capacity(points.len().saturating_sub(2));

    while remaining.len() > 3 {
        let clipped = find_ear(points, &remaining, true)
            .or_else(|| find_ear(points, &remaining, false))
            .map(|k| {
                let (p, c, n) = corners(&remaining, k);
                triangles.push([p, c, n]);
                k
            })
            .or_else(|| find_flat(points, &remaining));

        match clipped {
            Some(k) => {
                remaining.remove(k);
            }
            None => {
                warn!(
                    "Ear clipping stalled with {} of {} vertices left",
                    remaining.len(),
                    points.len()
                );
                return triangles;
            }
        }
    }

    if let [a, b, c] = remaining[..] {
        if orient2d(points[a], points[b], points[c]) > 0.0 {
            triangles.push([a, b, c]);
        }
    }
    triangles
}

fn corners(remaining: &[usize], k: usize) -> (usize, usize, usize) {
    let m = remaining.len();
    (remaining[(k + m - 1) % m], remaining[k], remaining[(k + 1) % m])
}

/// Finds a convex vertex whose triangle contains no other vertex.
///
/// With `strict` set, vertices on the triangle boundary also block the ear.
fn find_ear(points: &[DVec2], remaining: &[usize], strict: bool) -> Option<usize> {
    (0..remaining.len()).find(|&k| {
        let (p, c, n) = corners(remaining, k);
        let (a, b, d) = (points[p], points[c], points[n]);
        if orient2d(a, b, d) <= 0.0 {
            return false;
        }
        !remaining.iter().any(|&i| {
            let v = points[i];
            if v == a || v == b || v == d {
                return false;
            }
            let (o1, o2, o3) = (orient2d(a, b, v), orient2d(b, d, v), orient2d(d, a, v));
            if strict {
                o1 >= 0.0 && o2 >= 0.0 && o3 >= 0.0
            } else {
                o1 > 0.0 && o2 > 0.0 && o3 > 0.0
            }
        })
    })
}

/// Finds a vertex with zero turn, removable without losing area.
fn find_flat(points: &[DVec2], remaining: &[usize]) -> Option<usize> {
    (0..remaining.len()).find(|&k| {
        let (p, c, n) = corners(remaining, k);
        orient2d(points[p], points[c], points[n]) == 0.0
    })
}
