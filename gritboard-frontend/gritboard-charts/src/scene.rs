//! Backend independent description of a drawn chart.

use plotters::style::RGBColor;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Rounded backend pixel coordinate.
    pub fn px(&self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Line {
        from: Point,
        to: Point,
        color: RGBColor,
        dashed: bool,
    },
    Polyline {
        points: Vec<Point>,
        color: RGBColor,
        width: u32,
    },
    /// Data point marker, `annotation` is revealed on hover where the target supports it.
    Marker {
        center: Point,
        radius: f64,
        fill: RGBColor,
        stroke: RGBColor,
        annotation: String,
    },
    Rect {
        origin: Point,
        width: f64,
        height: f64,
        fill: RGBColor,
    },
    /// Vertically centered on `at`.
    Text {
        at: Point,
        text: String,
        anchor: Anchor,
        size: u32,
        color: RGBColor,
    },
}

impl Shape {
    fn points(&self) -> Vec<Point> {
        match self {
            Shape::Line { from, to, .. } => vec![*from, *to],
            Shape::Polyline { points, .. } => points.clone(),
            Shape::Marker { center, radius, .. } => vec![*center, Point::new(*radius, 0.0)],
            Shape::Rect {
                origin,
                width,
                height,
                ..
            } => vec![*origin, Point::new(*width, *height)],
            Shape::Text { at, .. } => vec![*at],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartScene {
    pub width: u32,
    pub height: u32,
    pub title: Option<String>,
    pub shapes: Vec<Shape>,
    /// Rows left out because the canvas height is capped.
    pub hidden_rows: usize,
}

impl ChartScene {
    pub fn new(width: u32, height: u32, title: Option<&str>) -> Self {
        Self {
            width,
            height,
            title: title.map(str::to_string),
            shapes: Vec::new(),
            hidden_rows: 0,
        }
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// No coordinate or size in the scene is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.shapes
            .iter()
            .flat_map(Shape::points)
            .all(|point| point.is_finite())
    }

    pub fn markers(&self) -> impl Iterator<Item = (&Point, &str)> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Marker {
                center, annotation, ..
            } => Some((center, annotation.as_str())),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
