//! Construction and drag-translation state machines

use super::primitives::{Construction, Primitive, PrimitiveKind, Shape};
use super::Scene;
use crate::curves::HermiteAnchor;
use crate::error::Result;
use crate::geometry::Point;
use crate::transform::Affine;

/// Drag-translation state, independent of construction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Drag {
    #[default]
    Idle,
    /// Primary button held outside construction; `anchor` is the last
    /// pointer position already applied
    Translating { anchor: Point },
}

impl Scene {
    /// Primary button pressed at `pos`
    ///
    /// With a tool armed this feeds that kind's construction machine,
    /// otherwise it starts dragging every live primitive.
    pub fn on_primary_down(&mut self, pos: Point) -> Result<()> {
        let Some(kind) = self.armed else {
            self.drag = Drag::Translating { anchor: pos };
            tracing::debug!(x = pos.x, y = pos.y, "translation started");
            return Ok(());
        };

        let active = self.slots.get(kind).is_some_and(Primitive::is_active);
        if active {
            self.extend(kind, pos);
        } else {
            self.begin(kind, pos);
        }
        self.redraw()
    }

    /// Secondary button pressed: commits an open-ended construction
    pub fn on_secondary_down(&mut self, _pos: Point) -> Result<()> {
        let Some(kind) = self.armed.filter(|k| k.is_open_ended()) else {
            return Ok(());
        };
        if !self.slots.get(kind).is_some_and(Primitive::is_active) {
            return Ok(());
        }
        self.commit(kind);
        self.redraw()
    }

    /// Pointer moved; only matters while translating
    pub fn on_pointer_move(&mut self, pos: Point) -> Result<()> {
        let Drag::Translating { anchor } = self.drag else {
            return Ok(());
        };
        let delta = pos - anchor;
        if delta == Point::default() {
            return Ok(());
        }
        self.drag = Drag::Translating { anchor: pos };
        self.transform_all(Affine::Translate(delta));
        self.redraw()
    }

    /// Primary button released
    pub fn on_pointer_up(&mut self) {
        if self.drag != Drag::Idle {
            tracing::debug!("translation finished");
        }
        self.drag = Drag::Idle;
    }

    pub fn is_translating(&self) -> bool {
        matches!(self.drag, Drag::Translating { .. })
    }

    /// Start a new instance of `kind`, replacing any previous one
    fn begin(&mut self, kind: PrimitiveKind, pos: Point) {
        let shape = match kind {
            PrimitiveKind::Line => Shape::Line {
                start: pos,
                end: None,
            },
            PrimitiveKind::Circle => Shape::Circle {
                center: pos,
                rim: None,
            },
            PrimitiveKind::Polygon => Shape::Polygon {
                vertices: vec![pos],
                closed: false,
            },
            PrimitiveKind::Hermite => Shape::Hermite {
                anchors: vec![HermiteAnchor::new(pos, self.hermite_tangent)],
            },
            PrimitiveKind::Bezier => Shape::Bezier {
                controls: vec![pos],
            },
            PrimitiveKind::Coons => Shape::Coons {
                controls: vec![pos],
            },
        };
        self.slots.replace(Primitive {
            shape,
            style: self.style,
            state: Construction::Active,
        });
        tracing::debug!(%kind, x = pos.x, y = pos.y, "construction started");
    }

    /// Add a point to the active instance of `kind`
    fn extend(&mut self, kind: PrimitiveKind, pos: Point) {
        let tangent = self.hermite_tangent;
        let Some(prim) = self.slots.get_mut(kind) else {
            return;
        };

        let finished = match &mut prim.shape {
            Shape::Line { end, .. } => {
                *end = Some(pos);
                true
            },
            Shape::Circle { rim, .. } => {
                *rim = Some(pos);
                true
            },
            Shape::Polygon { vertices, .. } => {
                vertices.push(pos);
                false
            },
            Shape::Hermite { anchors } => {
                anchors.push(HermiteAnchor::new(pos, tangent));
                false
            },
            Shape::Bezier { controls } | Shape::Coons { controls } => {
                controls.push(pos);
                false
            },
        };

        if finished {
            prim.state = Construction::Idle;
            self.armed = None;
            tracing::debug!(%kind, "construction finished");
        } else {
            tracing::debug!(%kind, points = prim.shape.point_count(), "point added");
        }
    }

    /// Close an open-ended construction and disarm
    fn commit(&mut self, kind: PrimitiveKind) {
        self.armed = None;
        let Some(prim) = self.slots.get_mut(kind) else {
            return;
        };
        prim.state = Construction::Idle;

        if let Shape::Polygon { vertices, closed } = &mut prim.shape {
            match vertices.len() {
                0 | 1 => {
                    self.slots.remove(kind);
                    tracing::debug!("polygon with fewer than 2 points discarded");
                    return;
                },
                2 => {},
                _ => {
                    vertices.push(vertices[0]);
                    *closed = true;
                },
            }
        }
        tracing::debug!(%kind, "construction committed");
    }
}
