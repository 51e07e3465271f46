use plotters::{
    element::DashedPathElement,
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};

use crate::{
    palette,
    scene::{Anchor, ChartScene, Point, Shape},
};

/// Dash and gap length of gridlines, in pixels.
const DASH: i32 = 2;

/// Draws a laid out scene onto any plotters backend.
///
/// Marker annotations have no plotters representation; adapters that support hover
/// text attach them separately.
pub fn draw_scene<'a, T>(
    backend: T,
    scene: &ChartScene,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'a>>
where
    T: 'a + DrawingBackend,
{
    let root = backend.into_drawing_area();
    root.fill(&palette::BACKGROUND)?;

    for shape in &scene.shapes {
        match shape {
            Shape::Line {
                from,
                to,
                color,
                dashed: false,
            } => {
                root.draw(&PathElement::new(
                    vec![from.px(), to.px()],
                    color.stroke_width(1),
                ))?;
            }
            Shape::Line {
                from,
                to,
                color,
                dashed: true,
            } => {
                root.draw(&DashedPathElement::new(
                    vec![from.px(), to.px()],
                    DASH,
                    DASH,
                    color.stroke_width(1),
                ))?;
            }
            Shape::Polyline {
                points,
                color,
                width,
            } => {
                root.draw(&PathElement::new(
                    points.iter().map(Point::px).collect::<Vec<_>>(),
                    color.stroke_width(*width),
                ))?;
            }
            Shape::Marker {
                center,
                radius,
                fill,
                stroke,
                ..
            } => {
                let radius = radius.round() as i32;
                root.draw(&Circle::new(center.px(), radius, fill.filled()))?;
                root.draw(&Circle::new(center.px(), radius, stroke.stroke_width(2)))?;
            }
            Shape::Rect {
                origin,
                width,
                height,
                fill,
            } => {
                if *width <= 0.0 || *height <= 0.0 {
                    continue;
                }
                let corner = Point::new(origin.x + width, origin.y + height);
                root.draw(&Rectangle::new([origin.px(), corner.px()], fill.filled()))?;
            }
            Shape::Text {
                at,
                text,
                anchor,
                size,
                color,
            } => {
                let h_pos = match anchor {
                    Anchor::Start => HPos::Left,
                    Anchor::Middle => HPos::Center,
                    Anchor::End => HPos::Right,
                };
                let style = ("sans-serif", *size as f64)
                    .into_font()
                    .color(color)
                    .pos(Pos::new(h_pos, VPos::Center));
                root.draw(&Text::new(text.clone(), at.px(), style))?;
            }
        }
    }

    root.present()?;
    Ok(())
}
