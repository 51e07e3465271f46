//! Chart layout for the XP dashboard.
//!
//! [`transform`] turns platform records into series, [`line`] and [`bar`] turn series
//! into a [`ChartScene`], and [`draw_scene`] paints a scene on any plotters backend.

pub mod bar;
mod draw;
pub mod format;
pub mod line;
pub mod palette;
pub mod scale;
pub mod scene;
pub mod transform;

pub use draw::draw_scene;
pub use scene::{Anchor, ChartScene, Point, Shape};
pub use transform::{build_progression, skill_entries, PathFilter, ProgressionPoint};

use gritboard_api_types::SkillEntry;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Line,
    Bar,
}

/// Series data for one of the two chart shapes.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartData<'a> {
    Progression(&'a [ProgressionPoint]),
    Skills(&'a [SkillEntry]),
}

impl ChartData<'_> {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartData::Progression(_) => ChartKind::Line,
            ChartData::Skills(_) => ChartKind::Bar,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ChartData::Progression(series) => series.is_empty(),
            ChartData::Skills(entries) => entries.is_empty(),
        }
    }
}

/// Lays out `data`, `None` when there is nothing to draw.
pub fn layout(data: &ChartData<'_>, title: Option<&str>) -> Option<ChartScene> {
    match data {
        ChartData::Progression(series) => line::line_chart_scene(series, title),
        ChartData::Skills(entries) => bar::bar_chart_scene(entries, title),
    }
}
