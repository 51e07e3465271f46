use plotters::style::RGBColor;

pub const LINE: RGBColor = RGBColor(0xDB, 0x0F, 0x16);
pub const MARKER: RGBColor = LINE;
pub const MARKER_STROKE: RGBColor = RGBColor(0xFF, 0xFF, 0xFF);
pub const AXIS: RGBColor = RGBColor(0x33, 0x33, 0x33);
pub const GRID: RGBColor = RGBColor(0x66, 0x66, 0x66);
pub const TEXT: RGBColor = RGBColor(0x1F, 0x29, 0x37);
pub const TRACK: RGBColor = RGBColor(0xE5, 0xE7, 0xEB);
pub const BAR: RGBColor = RGBColor(0xFF, 0xD3, 0x00);
pub const BACKGROUND: RGBColor = RGBColor(0xFF, 0xFF, 0xFF);

/// `#rrggbb` form for adapters that write markup directly.
pub fn hex(color: RGBColor) -> String {
    format!("#{:02x}{:02x}{:02x}", color.0, color.1, color.2)
}
