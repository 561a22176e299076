//! End-to-end checks from project to mesh, lookup table and tools.

use approx::assert_relative_eq;
use config::constants::{EditorConfig, MATERIAL_COLORS, SIDE_WALL_NORMAL_EPSILON};
use glam::{DVec2, DVec3};
use shape_mesh::{
    calculate_bounds_2d, create_extruded_polygon_mesh, decompose_shapes, mesh_to_grid, BrushTool,
    MaterialTool, Mesh, MeshTriangleLookupTable, MeshViewport, PickTarget, PointerRay,
    ToolContext, TriangleFacing,
};
use shape_model::math::lines_overlap;
use shape_model::{GeneratorKind, Project, SegmentGenerator, SegmentKey, Shape, UndoLog};

// =============================================================================
// FIXTURES
// =============================================================================

fn l_shape() -> Shape {
    Shape::from_points([
        DVec2::new(0.0, 0.0),
        DVec2::new(4.0, 0.0),
        DVec2::new(4.0, 1.0),
        DVec2::new(1.0, 1.0),
        DVec2::new(1.0, 3.0),
        DVec2::new(0.0, 3.0),
    ])
}

fn wavy_square() -> Shape {
    let mut shape = Shape::rectangle(DVec2::new(6.0, 0.0), DVec2::new(10.0, 4.0));
    let ids: Vec<_> = shape.segments().iter().map(|s| s.id()).collect();
    shape.set_generator(ids[0], GeneratorKind::Sine).unwrap();
    shape.set_generator(ids[2], GeneratorKind::Bezier).unwrap();
    shape
}

fn framed_window() -> [Shape; 2] {
    [
        Shape::rectangle(DVec2::new(0.0, 10.0), DVec2::new(10.0, 20.0)),
        Shape::rectangle(DVec2::new(2.0, 12.0), DVec2::new(8.0, 18.0)),
    ]
}

/// 8x8 counter-clockwise square with Repeat on the listed edges, so the
/// teeth point inward.
fn toothed_square(edges: &[usize], pattern: Option<&[DVec2]>) -> Shape {
    let mut shape = Shape::rectangle(DVec2::ZERO, DVec2::splat(8.0));
    let ids: Vec<_> = shape.segments().iter().map(|s| s.id()).collect();
    for &edge in edges {
        shape.set_generator(ids[edge], GeneratorKind::Repeat).unwrap();
        if let (Some(pattern), Some(segment)) = (pattern, shape.segment_mut(ids[edge])) {
            if let SegmentGenerator::Repeat(repeat) = &mut segment.generator {
                repeat.pattern = pattern.to_vec();
            }
        }
    }
    shape
}

fn cap_area(mesh: &Mesh, lookup: &MeshTriangleLookupTable, shape: shape_model::ShapeId) -> f64 {
    lookup
        .cap_triangles(shape, TriangleFacing::Front)
        .into_iter()
        .map(|t| {
            let [a, b, c] = mesh.triangle_vertices(t).unwrap();
            (b - a).cross(c - a).length() * 0.5
        })
        .sum()
}

fn sample_projects() -> Vec<Project> {
    let mut projects = Vec::new();

    let mut rectangle = Project::new();
    rectangle.add_shape(Shape::rectangle(DVec2::ZERO, DVec2::new(3.0, 2.0)));
    projects.push(rectangle);

    let mut mixed = Project::new();
    mixed.add_shape(l_shape());
    mixed.add_shape(wavy_square());
    for shape in framed_window() {
        mixed.add_shape(shape);
    }
    projects.push(mixed);

    projects
}

fn build(project: &Project, depth: f64) -> (Mesh, MeshTriangleLookupTable) {
    let polygons = decompose_shapes(project.shapes());
    let mesh = create_extruded_polygon_mesh(&polygons, depth).unwrap();
    let config = EditorConfig::new(depth, 1e-5, 1.403269e-4).unwrap();
    let lookup = MeshTriangleLookupTable::build(project, &mesh, &config);
    (mesh, lookup)
}

fn centroid(mesh: &Mesh, triangle: usize) -> DVec3 {
    let [a, b, c] = mesh.triangle_vertices(triangle).unwrap();
    (a + b + c) / 3.0
}

// =============================================================================
// MESH
// =============================================================================

#[test]
fn test_rectangle_at_half_depth_has_twelve_triangles() {
    let mut project = Project::new();
    project.add_shape(Shape::rectangle(DVec2::ZERO, DVec2::new(3.0, 2.0)));
    let (mesh, lookup) = build(&project, 0.5);

    assert_eq!(mesh.triangle_count(), 12);
    assert!(mesh.validate());
    let caps = (0..12)
        .filter(|&t| lookup.facing(t) != Some(TriangleFacing::SideWall))
        .count();
    assert_eq!(caps, 4);
}

#[test]
fn test_wall_count_and_wall_normals() {
    let shape = l_shape();
    let segments = shape.len();
    let polygons = decompose_shapes(std::slice::from_ref(&shape));
    let mesh = create_extruded_polygon_mesh(&polygons, 0.5).unwrap();

    let mut walls = 0;
    for t in 0..mesh.triangle_count() {
        let normal = mesh.triangle_normal(t).unwrap();
        if normal.z.abs() < SIDE_WALL_NORMAL_EPSILON {
            walls += 1;
        } else {
            assert_relative_eq!(normal.z.abs(), 1.0, epsilon = 1e-12);
        }
    }
    assert_eq!(walls, 2 * segments);
    assert!(mesh.triangle_count() >= walls + 2 * 4);
}

#[test]
fn test_bounds_are_idempotent() {
    let project = sample_projects().swap_remove(1);
    let mut polygons = decompose_shapes(project.shapes());
    let first = calculate_bounds_2d(&mut polygons).unwrap();
    let second = calculate_bounds_2d(&mut polygons).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.min.x, 0.0);
    assert_eq!(first.max.y, 20.0);
}

// =============================================================================
// LOOKUP
// =============================================================================

#[test]
fn test_every_wall_maps_to_one_overlapping_segment() {
    for project in sample_projects() {
        let (mesh, lookup) = build(&project, 0.5);
        for t in 0..mesh.triangle_count() {
            if lookup.facing(t) != Some(TriangleFacing::SideWall) {
                continue;
            }
            let keys = lookup.segments_for_triangle(t).unwrap();
            assert_eq!(keys.len(), 1, "wall triangle {t}");
            let key = keys[0];

            let corners = mesh.triangle_vertices(t).unwrap().map(mesh_to_grid);
            let (a, b) = [(0, 1), (1, 2), (2, 0)]
                .into_iter()
                .map(|(i, j)| (corners[i], corners[j]))
                .max_by(|x, y| x.0.distance(x.1).total_cmp(&y.0.distance(y.1)))
                .unwrap();

            let shape = project.shape(key.shape).unwrap();
            let overlapping = shape
                .edge_lines(key.segment)
                .unwrap()
                .any(|(p, q)| lines_overlap(a, b, p, q, 1.403269e-4));
            assert!(overlapping, "wall triangle {t} does not lie on {key:?}");
            assert!(lookup.triangles_for_segment(key).unwrap().contains(&t));
        }
    }
}

#[test]
fn test_every_segment_has_walls() {
    for project in sample_projects() {
        let (_, lookup) = build(&project, 0.5);
        for shape in project.shapes() {
            for segment in shape.segments() {
                let key = SegmentKey::new(shape.id(), segment.id());
                let walls = lookup.triangles_for_segment(key).unwrap();
                assert!(walls.len() >= 2 && walls.len() % 2 == 0, "{key:?}");
            }
        }
    }
}

#[test]
fn test_caps_map_to_first_containing_shape() {
    for project in sample_projects() {
        let (mesh, lookup) = build(&project, 0.5);
        for t in 0..mesh.triangle_count() {
            if lookup.facing(t) == Some(TriangleFacing::SideWall) {
                continue;
            }
            let point = mesh_to_grid(centroid(&mesh, t));
            let expected = project
                .shapes()
                .iter()
                .find(|shape| shape.contains_point(point) >= 0)
                .map(|shape| shape.id())
                .unwrap();
            assert_eq!(lookup.shapes_for_triangle(t), Some(&[expected][..]));
        }
    }
}

#[test]
fn test_window_opening_has_no_cap() {
    let mut project = Project::new();
    let [frame, window] = framed_window();
    let frame = project.add_shape(frame);
    project.add_shape(window);
    let (mesh, lookup) = build(&project, 0.5);

    let front: f64 = lookup
        .cap_triangles(frame, TriangleFacing::Front)
        .into_iter()
        .map(|t| {
            let [a, b, c] = mesh.triangle_vertices(t).unwrap();
            (b - a).cross(c - a).length() * 0.5
        })
        .sum();
    assert_relative_eq!(front, 100.0 - 36.0, epsilon = 1e-9);
}

#[test]
fn test_inward_teeth_get_two_walls_per_sub_edge() {
    for edges in [&[0][..], &[0, 2], &[0, 1, 2, 3]] {
        let mut project = Project::new();
        let id = project.add_shape(toothed_square(edges, None));
        let (mesh, lookup) = build(&project, 0.5);

        assert_relative_eq!(
            cap_area(&mesh, &lookup, id),
            64.0 - edges.len() as f64,
            epsilon = 1e-9
        );

        let shape = project.shape(id).unwrap();
        let mut sub_edges = 0;
        for segment in shape.segments() {
            let key = SegmentKey::new(id, segment.id());
            let count = shape
                .edge_lines(segment.id())
                .unwrap()
                .filter(|(a, b)| a != b)
                .count();
            sub_edges += count;
            let walls = lookup.triangles_for_segment(key).unwrap();
            assert_eq!(walls.len(), 2 * count, "{edges:?} {key:?}");
        }

        let walls = (0..mesh.triangle_count())
            .filter(|&t| lookup.facing(t) == Some(TriangleFacing::SideWall))
            .count();
        assert_eq!(walls, 2 * sub_edges);
    }
}

#[test]
fn test_teeth_at_corners_keep_lookup_complete() {
    let corner_teeth = [
        DVec2::new(0.0, 0.5),
        DVec2::new(0.5, 0.5),
        DVec2::new(0.5, 0.0),
    ];
    for (edges, expected) in [(&[0][..], 60.0), (&[0, 2], 56.0), (&[0, 1, 2, 3], 48.0)] {
        let mut project = Project::new();
        let id = project.add_shape(toothed_square(edges, Some(&corner_teeth)));
        let (mesh, lookup) = build(&project, 0.5);

        assert_relative_eq!(cap_area(&mesh, &lookup, id), expected, epsilon = 1e-9);
        for t in 0..mesh.triangle_count() {
            match lookup.facing(t) {
                Some(TriangleFacing::SideWall) => {
                    assert!(lookup.segments_for_triangle(t).is_some(), "{edges:?} wall {t}");
                }
                Some(_) => {
                    assert_eq!(lookup.shapes_for_triangle(t), Some(&[id][..]), "{edges:?} cap {t}");
                }
                None => panic!("{edges:?}: degenerate triangle {t}"),
            }
        }
    }
}

// =============================================================================
// RAYCAST
// =============================================================================

#[test]
fn test_raycast_at_cap_centroid_resolves_to_shape() {
    let mut project = sample_projects().swap_remove(1);
    let mut viewport = MeshViewport::default();
    viewport.rebuild(&mut project).unwrap();
    let mesh = viewport.mesh().unwrap();
    let lookup = viewport.lookup().unwrap();
    let raycast = viewport.raycast_structure().unwrap();

    for t in 0..mesh.triangle_count() {
        if lookup.facing(t) == Some(TriangleFacing::SideWall) {
            continue;
        }
        let normal = mesh.triangle_normal(t).unwrap();
        let target = centroid(mesh, t);
        let hit = raycast.raycast(target + normal, -normal).unwrap();
        assert_eq!(hit.triangle_index, t);
        assert_relative_eq!(hit.distance, 1.0, epsilon = 1e-9);
        assert!(hit.front_facing);
        assert_eq!(lookup.shapes_for_triangle(hit.triangle_index), lookup.shapes_for_triangle(t));
    }
}

// =============================================================================
// VIEWPORT AND TOOLS
// =============================================================================

#[test]
fn test_brush_stroke_recolors_after_refresh() {
    let mut project = Project::new();
    let id = project.add_shape(Shape::rectangle(DVec2::ZERO, DVec2::new(2.0, 2.0)));
    let mut viewport = MeshViewport::default();
    viewport.rebuild(&mut project).unwrap();
    assert!(!viewport.update_mesh_colors(&project).unwrap());

    let mut undo = UndoLog::new();
    let mut brush = BrushTool::new(3).unwrap();
    let ray = PointerRay::from_grid_point(DVec2::new(0.5, 0.25));
    {
        let mut ctx = ToolContext::new(&mut project, &viewport, &mut undo);
        assert!(brush.on_pointer_down(&mut ctx, ray));
        brush.on_pointer_up();
    }
    assert_eq!(project.shape(id).unwrap().front_material, 3);
    assert_eq!(undo.labels().len(), 1);

    assert!(viewport.update_mesh_colors(&project).unwrap());
    let pick = viewport.pick(ray.origin, ray.direction).unwrap();
    let mesh = viewport.mesh().unwrap();
    let colors = mesh.colors().unwrap();
    for v in mesh.triangle(pick.hit.triangle_index).unwrap() {
        assert_eq!(colors[v as usize], MATERIAL_COLORS[3]);
    }
    assert!(matches!(pick.target, PickTarget::Face { shape, .. } if shape == id));
}

#[test]
fn test_rebuild_after_deleting_everything() {
    let mut project = Project::new();
    project.add_shape(Shape::rectangle(DVec2::ZERO, DVec2::ONE));
    let mut viewport = MeshViewport::default();
    viewport.rebuild(&mut project).unwrap();
    assert!(viewport.pick(DVec3::new(0.5, -0.5, -1.0), DVec3::Z).is_some());

    project.select_all();
    project.delete_selection(&mut UndoLog::new());
    assert!(project.is_empty());

    viewport.invalidate();
    assert!(viewport.ensure_built(&mut project).unwrap());
    assert!(viewport.mesh().unwrap().is_empty());
    assert!(viewport.pick(DVec3::new(0.5, -0.5, -1.0), DVec3::Z).is_none());
}

#[test]
fn test_rebuild_repairs_before_meshing() {
    let mut project = Project::new();
    let mut shape = Shape::rectangle(DVec2::ZERO, DVec2::ONE);
    shape.push_segment(DVec2::new(f64::NAN, 0.0));
    project.add_shape(shape);

    let mut viewport = MeshViewport::default();
    let summary = viewport.rebuild(&mut project).unwrap();
    assert_eq!(summary.validation.removed_segments, 1);
    assert_eq!(summary.triangle_count, 12);
}
