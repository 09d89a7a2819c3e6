//! Primitive kinds and the fixed one-per-kind slot table

use crate::curves::HermiteAnchor;
use crate::geometry::Point;
use crate::raster::Style;
use crate::transform::Affine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Line,
    Polygon,
    Circle,
    Hermite,
    Bezier,
    Coons,
}

impl PrimitiveKind {
    pub const ALL: [Self; 6] = [
        Self::Line,
        Self::Polygon,
        Self::Circle,
        Self::Hermite,
        Self::Bezier,
        Self::Coons,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    /// Kinds that keep accepting points until a secondary click commits them
    pub fn is_open_ended(self) -> bool {
        !matches!(self, Self::Line | Self::Circle)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Polygon => "polygon",
            Self::Circle => "circle",
            Self::Hermite => "hermite",
            Self::Bezier => "bezier",
            Self::Coons => "coons",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PrimitiveKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .or(match s.as_str() {
                "poly" => Some(Self::Polygon),
                "bspline" | "b-spline" => Some(Self::Coons),
                _ => None,
            })
            .ok_or_else(|| format!("unknown primitive kind '{}'", s))
    }
}

/// Per-kind construction state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Construction {
    #[default]
    Idle,
    /// Still collecting points
    Active,
}

/// Geometry of one primitive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// `end` is `None` until the second click
    Line { start: Point, end: Option<Point> },
    /// `closed` once the commit appended a copy of the first vertex
    Polygon { vertices: Vec<Point>, closed: bool },
    /// `rim` is `None` until the second click
    Circle { center: Point, rim: Option<Point> },
    Hermite { anchors: Vec<HermiteAnchor> },
    Bezier { controls: Vec<Point> },
    Coons { controls: Vec<Point> },
}

impl Shape {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Line { .. } => PrimitiveKind::Line,
            Self::Polygon { .. } => PrimitiveKind::Polygon,
            Self::Circle { .. } => PrimitiveKind::Circle,
            Self::Hermite { .. } => PrimitiveKind::Hermite,
            Self::Bezier { .. } => PrimitiveKind::Bezier,
            Self::Coons { .. } => PrimitiveKind::Coons,
        }
    }

    /// Pivot for scale, rotate and shear
    pub fn first_point(&self) -> Point {
        match self {
            Self::Line { start, .. } => *start,
            Self::Circle { center, .. } => *center,
            Self::Polygon { vertices, .. } => vertices.first().copied().unwrap_or_default(),
            Self::Hermite { anchors } => anchors.first().map(|a| a.point).unwrap_or_default(),
            Self::Bezier { controls } | Self::Coons { controls } => {
                controls.first().copied().unwrap_or_default()
            },
        }
    }

    /// Number of user-placed points (closing vertex excluded)
    pub fn point_count(&self) -> usize {
        match self {
            Self::Line { end, .. } => 1 + usize::from(end.is_some()),
            Self::Circle { rim, .. } => 1 + usize::from(rim.is_some()),
            Self::Polygon { vertices, closed } => vertices.len() - usize::from(*closed),
            Self::Hermite { anchors } => anchors.len(),
            Self::Bezier { controls } | Self::Coons { controls } => controls.len(),
        }
    }

    /// Apply `op` to every point; Hermite tangents transform as vectors
    pub fn transform(&mut self, op: &Affine) {
        match self {
            Self::Line { start, end } => {
                *start = op.apply(*start);
                if let Some(end) = end {
                    *end = op.apply(*end);
                }
            },
            Self::Circle { center, rim } => {
                *center = op.apply(*center);
                if let Some(rim) = rim {
                    *rim = op.apply(*rim);
                }
            },
            Self::Polygon { vertices, .. } => {
                vertices.iter_mut().for_each(|p| *p = op.apply(*p));
            },
            Self::Hermite { anchors } => {
                for anchor in anchors {
                    anchor.point = op.apply(anchor.point);
                    anchor.tangent = op.apply_vector(anchor.tangent);
                }
            },
            Self::Bezier { controls } | Self::Coons { controls } => {
                controls.iter_mut().for_each(|p| *p = op.apply(*p));
            },
        }
    }
}

/// A live primitive: its geometry, the style it was started with and its
/// construction state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Primitive {
    pub shape: Shape,
    pub style: Style,
    pub state: Construction,
}

impl Primitive {
    pub fn kind(&self) -> PrimitiveKind {
        self.shape.kind()
    }

    pub fn is_active(&self) -> bool {
        self.state == Construction::Active
    }
}

/// At most one live primitive per kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slots {
    slots: [Option<Primitive>; 6],
}

impl Slots {
    pub fn get(&self, kind: PrimitiveKind) -> Option<&Primitive> {
        self.slots[kind.index()].as_ref()
    }

    pub fn get_mut(&mut self, kind: PrimitiveKind) -> Option<&mut Primitive> {
        self.slots[kind.index()].as_mut()
    }

    /// Install `primitive` in its kind's slot, returning the one it replaces
    pub fn replace(&mut self, primitive: Primitive) -> Option<Primitive> {
        self.slots[primitive.kind().index()].replace(primitive)
    }

    pub fn remove(&mut self, kind: PrimitiveKind) -> Option<Primitive> {
        self.slots[kind.index()].take()
    }

    pub fn clear(&mut self) {
        self.slots = Default::default();
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Primitive> {
        self.slots.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Primitive> {
        self.slots.iter_mut().flatten()
    }
}
