use super::primitives::{Primitive, Shape};
use crate::curves;
use crate::error::Result;
use crate::geometry::Point;
use crate::raster::{Rasterizer, Style};

/// Draw one primitive with the style it was started with
pub(super) fn draw_primitive(ras: &mut Rasterizer<'_>, prim: &Primitive) -> Result<()> {
    let style = prim.style;
    match &prim.shape {
        Shape::Line { start, end } => match end {
            Some(end) => ras.draw_line(*start, *end, style),
            None => ras.plot(*start, style.color),
        },
        Shape::Circle { center, rim } => match rim {
            Some(rim) => ras.draw_circle(*center, *rim, style.color),
            None => ras.plot(*center, style.color),
        },
        Shape::Polygon { vertices, closed } => {
            draw_polygon(ras, vertices, *closed && !prim.is_active(), style)?;
        },
        Shape::Hermite { anchors } => {
            for anchor in anchors {
                ras.draw_line(anchor.point, anchor.handle(), style);
            }
            ras.draw_polyline(&curves::hermite(anchors), style);
        },
        Shape::Bezier { controls } => {
            ras.draw_polyline(controls, style);
            ras.draw_polyline(&curves::bezier(controls), style);
        },
        Shape::Coons { controls } => {
            ras.draw_polyline(controls, style);
            ras.draw_polyline(&curves::coons(controls), style);
        },
    }
    Ok(())
}

/// Outline only while open; clipped, filled and outlined once closed
fn draw_polygon(
    ras: &mut Rasterizer<'_>,
    vertices: &[Point],
    closed: bool,
    style: Style,
) -> Result<()> {
    let viewport = ras.viewport();
    if !viewport.contains_any(vertices) {
        return Ok(());
    }
    if !closed {
        ras.draw_polyline(vertices, style);
        return Ok(());
    }

    let clipped = viewport.clip_polygon(vertices);
    ras.fill_polygon(&clipped, style.color)?;
    ras.draw_polyline(&clipped, style);
    Ok(())
}
