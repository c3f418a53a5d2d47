use ratatui::style::Color;

use crate::settings::Orientation;

/// Where the clock draws. Only axis-aligned rectangles in a single fill
/// color are ever drawn.
pub trait Surface {
    /// Size of the pixel buffer. The presenter scales it to the display box.
    fn resize(&mut self, width: u32, height: u32);

    fn size(&self) -> (u32, u32);

    fn clear_region(&mut self, x: i32, y: i32, width: u32, height: u32);

    /// Fills with the current fill color. Zero-sized rects draw nothing.
    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32);

    fn set_fill_color(&mut self, color: Color);

    /// Color of the area around and behind the digits.
    fn set_background(&mut self, color: Color);

    /// How the presenter rotates the buffer.
    fn set_orientation(&mut self, orientation: Orientation);
}
