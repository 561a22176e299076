//! # Material Tools
//!
//! Pointer-driven tools that inspect and paint materials on the extruded
//! mesh. The set of tools is closed: [`MaterialTool`] is sealed and only
//! [`InspectTool`] and [`BrushTool`] implement it.
//!
//! Tools receive everything through an explicit [`ToolContext`] and never
//! reach for global editor state. Painting changes only materials, so the
//! viewport needs a color refresh afterwards, not a rebuild.

use crate::error::{MeshError, MeshResult};
use crate::extrude::grid_to_mesh;
use crate::viewport::{MeshViewport, PickTarget};
use config::constants::MATERIAL_COUNT;
use glam::{DVec2, DVec3};
use log::debug;
use shape_model::editor::labels;
use shape_model::{Project, UndoRecorder};

// =============================================================================
// INPUT
// =============================================================================

/// Pointer ray in mesh space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerRay {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl PointerRay {
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// Straight-on ray through a grid point, starting in front of the front
    /// cap and looking toward the back cap.
    pub fn from_grid_point(point: DVec2) -> Self {
        Self {
            origin: grid_to_mesh(point, -1.0),
            direction: DVec3::Z,
        }
    }
}

/// Everything a tool may touch while handling one event.
pub struct ToolContext<'a> {
    pub project: &'a mut Project,
    pub viewport: &'a MeshViewport,
    pub undo: &'a mut dyn UndoRecorder,
}

impl<'a> ToolContext<'a> {
    pub fn new(
        project: &'a mut Project,
        viewport: &'a MeshViewport,
        undo: &'a mut dyn UndoRecorder,
    ) -> Self {
        Self {
            project,
            viewport,
            undo,
        }
    }
}

/// What is under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverInfo {
    pub target: PickTarget,
    pub material: u8,
    /// Triangles to outline for the hovered segment wall or face.
    pub highlight: Vec<[DVec3; 3]>,
}

fn hover_at(ctx: &ToolContext<'_>, ray: PointerRay) -> Option<HoverInfo> {
    let pick = ctx.viewport.pick(ray.origin, ray.direction)?;
    Some(HoverInfo {
        target: pick.target,
        material: pick.target.material(&*ctx.project)?,
        highlight: ctx.viewport.highlight_triangles(&pick.target),
    })
}

// =============================================================================
// TOOL TRAIT
// =============================================================================

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::InspectTool {}
    impl Sealed for super::BrushTool {}
}

/// Interface shared by the material tools.
///
/// Event handlers return true when they changed the project.
pub trait MaterialTool: sealed::Sealed {
    /// Display name for the toolbar.
    fn name(&self) -> &str;

    /// Short description / tooltip.
    fn description(&self) -> &str;

    /// Pointer moved, with or without a button held.
    fn on_pointer_move(&mut self, ctx: &mut ToolContext<'_>, ray: PointerRay) -> bool;

    /// Primary button pressed.
    fn on_pointer_down(&mut self, _ctx: &mut ToolContext<'_>, _ray: PointerRay) -> bool {
        false
    }

    /// Primary button released.
    fn on_pointer_up(&mut self) {}

    /// Current hover state, if the pointer is over the mesh.
    fn hover(&self) -> Option<&HoverInfo>;

    /// Drops hover and drag state (tool switch, pointer left the viewport).
    fn reset(&mut self);
}

// =============================================================================
// INSPECT
// =============================================================================

/// Shows the material under the pointer without changing anything.
#[derive(Debug, Clone, Default)]
pub struct InspectTool {
    hover: Option<HoverInfo>,
}

impl InspectTool {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MaterialTool for InspectTool {
    fn name(&self) -> &str {
        "Inspect"
    }

    fn description(&self) -> &str {
        "Show the material of the face or wall under the pointer"
    }

    fn on_pointer_move(&mut self, ctx: &mut ToolContext<'_>, ray: PointerRay) -> bool {
        self.hover = hover_at(ctx, ray);
        false
    }

    fn hover(&self) -> Option<&HoverInfo> {
        self.hover.as_ref()
    }

    fn reset(&mut self) {
        self.hover = None;
    }
}

// =============================================================================
// BRUSH
// =============================================================================

/// Paints one material onto walls and faces while the button is held.
///
/// One undo entry is registered per stroke, before its first change.
#[derive(Debug, Clone)]
pub struct BrushTool {
    material: u8,
    painting: bool,
    stroke_recorded: bool,
    hover: Option<HoverInfo>,
}

impl BrushTool {
    /// # Errors
    ///
    /// [`MeshError::InvalidMaterial`] when `material` is outside the palette.
    pub fn new(material: u8) -> MeshResult<Self> {
        check_material(material)?;
        Ok(Self {
            material,
            painting: false,
            stroke_recorded: false,
            hover: None,
        })
    }

    pub fn material(&self) -> u8 {
        self.material
    }

    /// # Errors
    ///
    /// [`MeshError::InvalidMaterial`] when `material` is outside the palette.
    pub fn set_material(&mut self, material: u8) -> MeshResult<()> {
        check_material(material)?;
        self.material = material;
        Ok(())
    }

    pub fn is_painting(&self) -> bool {
        self.painting
    }

    fn paint(&mut self, ctx: &mut ToolContext<'_>, ray: PointerRay) -> bool {
        self.hover = hover_at(ctx, ray);
        let Some(hover) = self.hover.as_mut() else {
            return false;
        };
        if hover.material == self.material {
            return false;
        }
        if !self.stroke_recorded {
            ctx.undo.register_undo(labels::PAINT_MATERIAL);
            self.stroke_recorded = true;
        }
        let changed = hover.target.set_material(ctx.project, self.material);
        if changed {
            hover.material = self.material;
            debug!("painted material {} onto {:?}", self.material, hover.target);
        }
        changed
    }
}

fn check_material(material: u8) -> MeshResult<()> {
    if (material as usize) < MATERIAL_COUNT {
        Ok(())
    } else {
        Err(MeshError::InvalidMaterial {
            material,
            max: MATERIAL_COUNT - 1,
        })
    }
}

impl MaterialTool for BrushTool {
    fn name(&self) -> &str {
        "Brush"
    }

    fn description(&self) -> &str {
        "Paint the selected material onto faces and walls"
    }

    fn on_pointer_move(&mut self, ctx: &mut ToolContext<'_>, ray: PointerRay) -> bool {
        if self.painting {
            self.paint(ctx, ray)
        } else {
            self.hover = hover_at(ctx, ray);
            false
        }
    }

    fn on_pointer_down(&mut self, ctx: &mut ToolContext<'_>, ray: PointerRay) -> bool {
        self.painting = true;
        self.stroke_recorded = false;
        self.paint(ctx, ray)
    }

    fn on_pointer_up(&mut self) {
        self.painting = false;
        self.stroke_recorded = false;
    }

    fn hover(&self) -> Option<&HoverInfo> {
        self.hover.as_ref()
    }

    fn reset(&mut self) {
        self.on_pointer_up();
        self.hover = None;
    }
}
