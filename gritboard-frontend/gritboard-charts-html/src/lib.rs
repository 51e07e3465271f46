use anyhow::{anyhow, Result};
use gritboard_charts::{draw_scene, ChartScene};
use maud::{html, Markup, PreEscaped, Render};
use plotters_svg::SVGBackend;

/// Renders a scene to a standalone `<svg>` document. Markers get a hover `<title>`.
pub fn render_svg(scene: &ChartScene) -> Result<String> {
    let mut buffer = String::new();
    {
        let backend = SVGBackend::with_string(&mut buffer, (scene.width, scene.height));
        draw_scene(backend, scene).map_err(|e| anyhow!("Failed to draw chart: {}", e))?;
    }
    if scene.markers().next().is_some() {
        let close = buffer
            .rfind("</svg>")
            .ok_or_else(|| anyhow!("svg backend produced no closing tag"))?;
        buffer.insert_str(close, &MarkerTitles(scene).render().into_string());
    }
    Ok(buffer)
}

/// Transparent hit areas over each marker carrying its annotation.
struct MarkerTitles<'a>(&'a ChartScene);

impl Render for MarkerTitles<'_> {
    fn render(&self) -> Markup {
        html! {
            g class="markers" {
                @for (center, annotation) in self.0.markers() {
                    circle
                        cx=(format!("{:.1}", center.x))
                        cy=(format!("{:.1}", center.y))
                        r="8"
                        fill="transparent"
                        pointer-events="all"
                    {
                        title { (annotation) }
                    }
                }
            }
        }
    }
}

/// The chart wrapped for a mount point, with the title heading above it.
pub struct Chart<'a> {
    scene: &'a ChartScene,
    svg: String,
}

impl<'a> Chart<'a> {
    pub fn new(scene: &'a ChartScene) -> Result<Self> {
        Ok(Self {
            scene,
            svg: render_svg(scene)?,
        })
    }
}

impl Render for Chart<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="chart-scroll-wrapper" {
                @if let Some(title) = &self.scene.title {
                    h3 class="chart-title" { (title) }
                }
                (PreEscaped(&self.svg))
            }
        }
    }
}

pub fn render_chart(scene: &ChartScene) -> Result<String> {
    Ok(Chart::new(scene)?.render().into_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use gritboard_api_types::SkillEntry;
    use gritboard_charts::{bar::bar_chart_scene, line::line_chart_scene, ProgressionPoint};

    fn point(cumulative: i64, amount: i64, month: u32, path: &str) -> ProgressionPoint {
        ProgressionPoint {
            cumulative_amount: cumulative,
            point_amount: amount,
            timestamp: Utc.with_ymd_and_hms(2024, month, 5, 0, 0, 0).unwrap(),
            path: Some(path.into()),
        }
    }

    #[test]
    fn line_chart_has_hover_titles() {
        let series = vec![
            point(100, 100, 1, "/gritlab/school-curriculum/proj-a"),
            point(300, 200, 2, "/gritlab/school-curriculum/<b>"),
        ];
        let scene = line_chart_scene(&series, Some("XP Progression")).unwrap();
        let svg = render_svg(&scene).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("<title>05/01/2024: proj-a (+100 XP)</title>"));
        assert!(svg.contains("<title>05/02/2024: &lt;b&gt; (+200 XP)</title>"));
        assert!(svg.trim_end().ends_with("</svg>"));

        let html = render_chart(&scene).unwrap();
        assert!(html.starts_with(
            r#"<div class="chart-scroll-wrapper"><h3 class="chart-title">XP Progression</h3>"#
        ));
        assert!(html.ends_with("</div>"));
    }

    #[test]
    fn title_is_escaped() {
        let scene = bar_chart_scene(&[SkillEntry::new("go", 40.0)], Some("A & <B>")).unwrap();
        let html = render_chart(&scene).unwrap();
        assert!(html.contains(r#"<h3 class="chart-title">A &amp; &lt;B&gt;</h3>"#));
    }

    #[test]
    fn bar_chart_has_no_marker_group() {
        let scene = bar_chart_scene(&[SkillEntry::new("go", 40.0)], None).unwrap();
        let html = render_chart(&scene).unwrap();
        assert!(!html.contains("chart-title"));
        assert!(!html.contains(r#"class="markers""#));
        assert!(html.contains("go"));
    }

    #[test]
    fn gridlines_are_dashed_and_bounded() {
        let series = vec![
            point(400_000_000, 400_000_000, 1, "/gritlab/school-curriculum/a"),
            point(1_000_000_000, 600_000_000, 2, "/gritlab/school-curriculum/b"),
        ];
        let scene = line_chart_scene(&series, None).unwrap();
        let svg = render_svg(&scene).unwrap();
        let grid_paths = svg.matches(r##"stroke="#666666""##).count();
        assert!(grid_paths > 11, "gridlines drawn solid: {grid_paths}");
        assert!(svg.len() < 400_000, "svg is {} bytes", svg.len());
    }
}
