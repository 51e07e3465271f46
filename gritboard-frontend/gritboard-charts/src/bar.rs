//! Horizontal skill bars, longest first.

use gritboard_api_types::SkillEntry;

use crate::{
    format::percentage,
    palette,
    scene::{Anchor, ChartScene, Point, Shape},
};

pub const WIDTH: u32 = 800;
pub const BAR_HEIGHT: f64 = 25.0;
pub const GAP: f64 = 10.0;
pub const MAX_HEIGHT: f64 = 600.0;
pub const LABEL_WIDTH: f64 = 100.0;
/// Track width leaves room for the trailing value label.
pub const TRACK_WIDTH: f64 = WIDTH as f64 - 160.0;
/// Levels are percentages.
pub const SCALE_MAX: f64 = 100.0;
const FONT_SIZE: u32 = 13;

/// Sorted copy of `entries`, highest level first. Ties keep their input order and
/// non-finite levels sort as zero.
pub fn sort_by_level(entries: &[SkillEntry]) -> Vec<SkillEntry> {
    let mut sorted: Vec<SkillEntry> = entries
        .iter()
        .map(|entry| SkillEntry {
            category: entry.category.clone(),
            level: if entry.level.is_finite() { entry.level } else { 0.0 },
        })
        .collect();
    sorted.sort_by(|a, b| b.level.total_cmp(&a.level));
    sorted
}

/// Filled share of the track, `0.0..=100.0`.
pub fn fill_percentage(level: f64) -> f64 {
    if level.is_finite() {
        (level / SCALE_MAX * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

pub fn bar_chart_scene(entries: &[SkillEntry], title: Option<&str>) -> Option<ChartScene> {
    if entries.is_empty() {
        return None;
    }
    let sorted = sort_by_level(entries);
    let stride = BAR_HEIGHT + GAP;
    let height = (sorted.len() as f64 * stride).min(MAX_HEIGHT);
    let visible = ((height / stride).floor() as usize).min(sorted.len());

    let mut scene = ChartScene::new(WIDTH, height as u32, title);
    scene.hidden_rows = sorted.len() - visible;
    if scene.hidden_rows > 0 {
        log::warn!(
            "skill chart capped at {MAX_HEIGHT}px, {} of {} rows not drawn",
            scene.hidden_rows,
            sorted.len()
        );
    }

    for (row, entry) in sorted.iter().take(visible).enumerate() {
        let y = row as f64 * stride;
        let middle = y + BAR_HEIGHT / 2.0;
        let filled = fill_percentage(entry.level);
        let filled_width = filled / 100.0 * TRACK_WIDTH;

        scene.push(Shape::Rect {
            origin: Point::new(LABEL_WIDTH, y),
            width: TRACK_WIDTH,
            height: BAR_HEIGHT,
            fill: palette::TRACK,
        });
        scene.push(Shape::Rect {
            origin: Point::new(LABEL_WIDTH, y),
            width: filled_width,
            height: BAR_HEIGHT,
            fill: palette::BAR,
        });
        scene.push(Shape::Text {
            at: Point::new(0.0, middle),
            text: entry.category.clone(),
            anchor: Anchor::Start,
            size: FONT_SIZE,
            color: palette::TEXT,
        });
        scene.push(Shape::Text {
            at: Point::new(LABEL_WIDTH + filled_width + 5.0, middle),
            text: percentage(filled),
            anchor: Anchor::Start,
            size: FONT_SIZE,
            color: palette::TEXT,
        });
    }

    Some(scene)
}
