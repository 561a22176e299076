//! # Hertel–Mehlhorn Merge
//!
//! Removes triangulation diagonals whenever the two polygons sharing one
//! would still be convex after the merge. The result has at most four times
//! the optimal number of convex pieces.

use super::Ring;
use crate::polygon::{is_convex, ConvexPolygon2D};
use glam::DVec2;
use std::collections::{HashMap, HashSet};

/// Merges index triangles into convex index polygons.
pub(crate) fn merge_triangles(points: &[DVec2], triangles: &[[usize; 3]]) -> Vec<Vec<usize>> {
    let mut polygons: Vec<Vec<usize>> = triangles.iter().map(|t| t.to_vec()).collect();
    let mut owner: HashMap<(usize, usize), usize> = HashMap::new();
    for (index, polygon) in polygons.iter().enumerate() {
        for (a, b) in directed_edges(polygon) {
            owner.insert((a, b), index);
        }
    }

    let diagonals: Vec<(usize, usize)> = triangles
        .iter()
        .flat_map(|t| directed_edges(t))
        .filter(|&(a, b)| a < b && owner.contains_key(&(b, a)))
        .collect();

    for (a, b) in diagonals {
        let (Some(&i), Some(&j)) = (owner.get(&(a, b)), owner.get(&(b, a))) else {
            continue;
        };
        if i == j {
            continue;
        }
        let Some(merged) = splice(&polygons[i], &polygons[j], a, b) else {
            continue;
        };
        if !is_mergeable(points, &merged) {
            continue;
        }

        owner.remove(&(a, b));
        owner.remove(&(b, a));
        for edge in directed_edges(&merged) {
            owner.insert(edge, i);
        }
        polygons[i] = merged;
        polygons[j].clear();
    }

    polygons.retain(|p| !p.is_empty());
    polygons
}

/// Builds convex polygons from merged index polygons.
///
/// An edge whose reverse also appears in the decomposition is interior and
/// gets no material; every other edge takes the ring material of the edge
/// starting at its first vertex.
pub(crate) fn into_polygons(
    ring: &Ring,
    pieces: &[Vec<usize>],
    front_material: u8,
    back_material: u8,
) -> Vec<ConvexPolygon2D> {
    let key = |p: DVec2| (p.x.to_bits(), p.y.to_bits());
    let edges: HashSet<_> = pieces
        .iter()
        .flat_map(|piece| directed_edges(piece))
        .map(|(a, b)| (key(ring.points[a]), key(ring.points[b])))
        .collect();

    pieces
        .iter()
        .map(|piece| {
            let points = piece.iter().map(|&i| ring.points[i]).collect();
            let materials = directed_edges(piece)
                .map(|(a, b)| {
                    let reverse = (key(ring.points[b]), key(ring.points[a]));
                    if edges.contains(&reverse) {
                        None
                    } else {
                        ring.materials[a]
                    }
                })
                .collect();
            ConvexPolygon2D::new(points, front_material, back_material, materials)
        })
        .collect()
}

fn directed_edges(polygon: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    let n = polygon.len();
    (0..n).map(move |k| (polygon[k], polygon[(k + 1) % n]))
}

/// Joins polygon `first` (containing edge `a -> b`) with `second`
/// (containing `b -> a`) across that edge.
fn splice(first: &[usize], second: &[usize], a: usize, b: usize) -> Option<Vec<usize>> {
    let (n, m) = (first.len(), second.len());
    let start = (0..n).find(|&k| first[k] == a && first[(k + 1) % n] == b)?;
    let other = (0..m).find(|&k| second[k] == b && second[(k + 1) % m] == a)?;

    let mut merged: Vec<usize> = (1..=n).map(|k| first[(start + k) % n]).collect();
    merged.extend((2..m).map(|k| second[(other + k) % m]));
    Some(merged)
}

/// Convex, and no point position repeated.
fn is_mergeable(points: &[DVec2], polygon: &[usize]) -> bool {
    let ring: Vec<DVec2> = polygon.iter().map(|&i| points[i]).collect();
    let mut seen = HashSet::new();
    ring.iter().all(|p| seen.insert((p.x.to_bits(), p.y.to_bits()))) && is_convex(&ring)
}
