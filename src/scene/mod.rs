//! The drawing scene
//!
//! Owns the pixel buffer and at most one live primitive per kind. Every
//! mutation runs to completion and ends with a full clear and redraw, so the
//! buffer always reflects the current geometry when a call returns.

mod construction;
mod primitives;
mod render;

pub use construction::Drag;
pub use primitives::{Construction, Primitive, PrimitiveKind, Shape, Slots};

use crate::clip::Viewport;
use crate::config::Config;
use crate::curves::HermiteAnchor;
use crate::display::{Color, PixelBuffer};
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::input::{PointerButton, PointerEvent};
use crate::raster::{LineAlgorithm, Rasterizer, Style};
use crate::remote::Command;
use crate::transform::{Affine, Angle, Direction};

pub struct Scene {
    buffer: PixelBuffer,
    /// Loaded image drawn under the primitives
    backdrop: Option<PixelBuffer>,
    margin: u32,
    viewport: Viewport,
    background: Color,
    /// Style snapshotted by the next construction
    style: Style,
    armed: Option<PrimitiveKind>,
    drag: Drag,
    slots: Slots,
    hermite_tangent: Point,
    wheel_scale_up: f64,
    wheel_scale_down: f64,
}

fn check_size(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::CanvasSize { width, height });
    }
    Ok(())
}

impl Scene {
    /// Blank canvas with default settings
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::from_config(&Config {
            width,
            height,
            ..Config::default()
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        check_size(config.width, config.height)?;
        let mut buffer = PixelBuffer::with_size(config.width, config.height);
        buffer.clear(config.background);
        Ok(Self {
            buffer,
            backdrop: None,
            margin: config.margin,
            viewport: Viewport::new(config.width, config.height, config.margin),
            background: config.background,
            style: Style::new(config.color, config.algorithm),
            armed: None,
            drag: Drag::Idle,
            slots: Slots::default(),
            hermite_tangent: config.hermite_tangent,
            wheel_scale_up: config.wheel_scale_up,
            wheel_scale_down: config.wheel_scale_down,
        })
    }

    // ------------------------------------------------------------------
    // Canvas
    // ------------------------------------------------------------------

    /// Replace the canvas with a blank one of the given size
    pub fn set_canvas_size(&mut self, width: u32, height: u32) -> Result<()> {
        check_size(width, height)?;
        self.buffer = PixelBuffer::with_size(width, height);
        self.backdrop = None;
        self.viewport = Viewport::new(width, height, self.margin);
        tracing::info!(width, height, "canvas resized");
        self.redraw()
    }

    /// Use decoded RGBA image data as the canvas background
    pub fn load_image(&mut self, width: u32, height: u32, rgba: &[u8]) -> Result<()> {
        check_size(width, height)?;
        let image = PixelBuffer::from_rgba(width, height, rgba)?;
        self.buffer = image.clone();
        self.backdrop = Some(image);
        self.viewport = Viewport::new(width, height, self.margin);
        tracing::info!(width, height, "image loaded");
        self.redraw()
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// BGRA bytes of the current frame
    pub fn pixels(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    /// RGBA copy of the current frame for image encoders
    pub fn to_rgba(&self) -> Vec<u8> {
        self.buffer.to_rgba()
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    // ------------------------------------------------------------------
    // Style and tools
    // ------------------------------------------------------------------

    pub fn style(&self) -> Style {
        self.style
    }

    /// Color for primitives started from now on
    pub fn set_color(&mut self, color: Color) {
        self.style.color = color;
    }

    /// Line algorithm for primitives started from now on
    pub fn set_algorithm(&mut self, algorithm: LineAlgorithm) {
        self.style.algorithm = algorithm;
    }

    /// Route primary clicks to `kind`'s construction
    pub fn arm(&mut self, kind: PrimitiveKind) {
        self.armed = Some(kind);
        self.drag = Drag::Idle;
        tracing::debug!(%kind, "tool armed");
    }

    pub fn disarm(&mut self) {
        if let Some(kind) = self.armed.take() {
            tracing::debug!(%kind, "tool disarmed");
        }
    }

    pub fn armed(&self) -> Option<PrimitiveKind> {
        self.armed
    }

    pub fn primitive(&self, kind: PrimitiveKind) -> Option<&Primitive> {
        self.slots.get(kind)
    }

    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.slots.iter()
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    pub fn handle_event(&mut self, event: &PointerEvent) -> Result<()> {
        match *event {
            PointerEvent::Down { pos, button } => match button {
                PointerButton::Primary => self.on_primary_down(pos),
                PointerButton::Secondary => self.on_secondary_down(pos),
                PointerButton::Middle => Ok(()),
            },
            PointerEvent::Move { pos } => self.on_pointer_move(pos),
            PointerEvent::Up { button, .. } => {
                if button == PointerButton::Primary {
                    self.on_pointer_up();
                }
                Ok(())
            },
            PointerEvent::Scroll { delta } => self.on_scroll(delta),
        }
    }

    /// Wheel scaling of every live primitive; zero delta is ignored
    pub fn on_scroll(&mut self, delta: i32) -> Result<()> {
        let factor = match delta {
            0 => return Ok(()),
            d if d > 0 => self.wheel_scale_up,
            _ => self.wheel_scale_down,
        };
        self.apply_scale(factor, factor)
    }

    // ------------------------------------------------------------------
    // Scene-level transforms
    // ------------------------------------------------------------------

    /// Apply `op` to every live primitive, rebinding its pivot to that
    /// primitive's first point
    fn transform_all(&mut self, op: Affine) {
        for prim in self.slots.iter_mut() {
            let pivot = prim.shape.first_point();
            prim.shape.transform(&op.with_pivot(pivot));
        }
    }

    pub fn apply_translate(&mut self, offset: Point) -> Result<()> {
        self.transform_all(Affine::Translate(offset));
        self.redraw()
    }

    pub fn apply_rotate(&mut self, degrees: f64, direction: Direction) -> Result<()> {
        tracing::info!(degrees, ?direction, "rotate");
        self.transform_all(Affine::Rotate {
            origin: Point::default(),
            angle: Angle::degrees(degrees),
            direction,
        });
        self.redraw()
    }

    pub fn apply_scale(&mut self, sx: f64, sy: f64) -> Result<()> {
        tracing::info!(sx, sy, "scale");
        self.transform_all(Affine::Scale {
            origin: Point::default(),
            sx,
            sy,
        });
        self.redraw()
    }

    pub fn apply_shear(&mut self, factor: f64) -> Result<()> {
        tracing::info!(factor, "shear");
        self.transform_all(Affine::Shear {
            pivot: Point::default(),
            factor,
        });
        self.redraw()
    }

    /// Axis for reflection: edge `edge` (modulo the vertex count) of the
    /// committed polygon
    pub fn reflection_axis(&self, edge: usize) -> Option<(Point, Point)> {
        let prim = self.slots.get(PrimitiveKind::Polygon)?;
        match &prim.shape {
            Shape::Polygon {
                vertices,
                closed: true,
            } if !prim.is_active() => {
                let n = vertices.len() - 1;
                Some((vertices[edge % n], vertices[(edge + 1) % n]))
            },
            _ => None,
        }
    }

    /// Mirror every live primitive across a polygon edge; a no-op without
    /// a committed polygon
    pub fn apply_reflect(&mut self, edge: usize) -> Result<()> {
        let Some((a1, a2)) = self.reflection_axis(edge) else {
            tracing::warn!(edge, "reflect ignored: no committed polygon");
            return Ok(());
        };
        tracing::info!(edge, "reflect");
        self.transform_all(Affine::Reflect { a1, a2 });
        self.redraw()
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    pub fn hermite_anchor(&self, index: usize) -> Option<HermiteAnchor> {
        match &self.slots.get(PrimitiveKind::Hermite)?.shape {
            Shape::Hermite { anchors } => anchors.get(index).copied(),
            _ => None,
        }
    }

    pub fn hermite_anchor_count(&self) -> usize {
        match self.slots.get(PrimitiveKind::Hermite).map(|p| &p.shape) {
            Some(Shape::Hermite { anchors }) => anchors.len(),
            _ => 0,
        }
    }

    /// Replace the tangent of Hermite anchor `index`
    pub fn set_hermite_tangent(&mut self, index: usize, tangent: Point) -> Result<()> {
        let len = self.hermite_anchor_count();
        let anchor = match self.slots.get_mut(PrimitiveKind::Hermite).map(|p| &mut p.shape) {
            Some(Shape::Hermite { anchors }) => anchors.get_mut(index),
            _ => None,
        };
        let Some(anchor) = anchor else {
            return Err(Error::TangentIndex { index, len });
        };
        anchor.tangent = tangent;
        tracing::debug!(index, x = tangent.x, y = tangent.y, "hermite tangent set");
        self.redraw()
    }

    /// Drop every primitive and the loaded image
    pub fn clear_all(&mut self) {
        self.slots.clear();
        self.backdrop = None;
        self.armed = None;
        self.drag = Drag::Idle;
        self.buffer.clear(self.background);
        tracing::info!("scene cleared");
    }

    /// Run a remote command
    pub fn execute(&mut self, command: &Command) -> Result<()> {
        tracing::debug!(?command, "execute");
        match *command {
            Command::Rotate { degrees, direction } => self.apply_rotate(degrees, direction),
            Command::Scale { sx, sy } => self.apply_scale(sx, sy),
            Command::Shear { factor } => self.apply_shear(factor),
            Command::Reflect { edge } => self.apply_reflect(edge),
            Command::Color { color } => {
                self.set_color(color);
                Ok(())
            },
            Command::Algorithm { algorithm } => {
                self.set_algorithm(algorithm);
                Ok(())
            },
            Command::Tool { kind } => {
                match kind {
                    Some(kind) => self.arm(kind),
                    None => self.disarm(),
                }
                Ok(())
            },
            Command::Clear => {
                self.clear_all();
                Ok(())
            },
        }
    }

    /// Clear to the background (or loaded image) and draw every primitive
    pub fn redraw(&mut self) -> Result<()> {
        match &self.backdrop {
            Some(image) => self.buffer.clone_from(image),
            None => self.buffer.clear(self.background),
        }
        let mut ras = Rasterizer::new(&mut self.buffer, self.viewport);
        for prim in self.slots.iter() {
            render::draw_primitive(&mut ras, prim)?;
        }
        tracing::trace!("redraw");
        Ok(())
    }
}
