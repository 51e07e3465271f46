//! Cumulative XP over time.

use itertools::Itertools;

use crate::{
    format::{day_label, grouped, month_label, project_name},
    palette,
    scale::{LinearScale, TimeScale, ValueAxis},
    scene::{Anchor, ChartScene, Point, Shape},
    transform::ProgressionPoint,
};

pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 300;
pub const PADDING: f64 = 80.0;
pub const TICK_STEP: i64 = 100_000;
pub const MAX_TIME_LABELS: usize = 12;
pub const MARKER_RADIUS: f64 = 5.0;
const FONT_SIZE: u32 = 12;

/// Lays out the progression series. Returns `None` for an empty series so callers
/// leave their mount point untouched.
pub fn line_chart_scene(series: &[ProgressionPoint], title: Option<&str>) -> Option<ChartScene> {
    let (first, last) = series
        .iter()
        .map(|point| point.timestamp)
        .minmax()
        .into_option()?;

    let width = WIDTH as f64;
    let height = HEIGHT as f64;
    let left = PADDING;
    let right = width - PADDING;
    let top = PADDING;
    let bottom = height - PADDING;

    let total = series
        .last()
        .map(|point| point.cumulative_amount)
        .unwrap_or_default();
    let axis = ValueAxis::new(total, TICK_STEP);
    let x = TimeScale::new(first, last, left, right);
    let y = LinearScale::new((0.0, axis.max as f64), (bottom, top));

    let mut scene = ChartScene::new(WIDTH, HEIGHT, title);

    scene.push(Shape::Line {
        from: Point::new(left, top),
        to: Point::new(left, bottom),
        color: palette::AXIS,
        dashed: false,
    });
    scene.push(Shape::Line {
        from: Point::new(left, bottom),
        to: Point::new(right, bottom),
        color: palette::AXIS,
        dashed: false,
    });

    for value in axis.ticks() {
        let tick_y = y.map(value as f64);
        scene.push(Shape::Line {
            from: Point::new(left, tick_y),
            to: Point::new(right, tick_y),
            color: palette::GRID,
            dashed: true,
        });
        scene.push(Shape::Text {
            at: Point::new(left - 10.0, tick_y),
            text: grouped(value),
            anchor: Anchor::End,
            size: FONT_SIZE,
            color: palette::TEXT,
        });
    }

    let label_count = series.len().min(MAX_TIME_LABELS);
    for time in x.ticks(label_count) {
        scene.push(Shape::Text {
            at: Point::new(x.map(&time), bottom + 16.0),
            text: month_label(&time),
            anchor: Anchor::Middle,
            size: FONT_SIZE,
            color: palette::TEXT,
        });
    }

    let positions: Vec<Point> = series
        .iter()
        .map(|point| {
            Point::new(
                x.map(&point.timestamp),
                y.map_clamped(point.cumulative_amount as f64),
            )
        })
        .collect();

    scene.push(Shape::Polyline {
        points: positions.clone(),
        color: palette::LINE,
        width: 2,
    });

    for (point, center) in series.iter().zip(positions) {
        scene.push(Shape::Marker {
            center,
            radius: MARKER_RADIUS,
            fill: palette::MARKER,
            stroke: palette::MARKER_STROKE,
            annotation: annotation(point),
        });
    }

    Some(scene)
}

/// Hover text for a marker: `DD/MM/YYYY: project (+amount XP)`.
pub fn annotation(point: &ProgressionPoint) -> String {
    format!(
        "{}: {} ({:+} XP)",
        day_label(&point.timestamp),
        project_name(point.path.as_deref()),
        point.point_amount
    )
}
