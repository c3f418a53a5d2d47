/// A filled horizontal run of pixels within one scanline, `left..right`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stroke {
    pub left: i32,
    pub right: i32,
}

impl Stroke {
    pub const fn new(left: i32, right: i32) -> Self {
        Self { left, right }
    }

    /// A zero-width stroke at `x`. Draws nothing, but gives interpolation a
    /// point to grow from.
    pub const fn point(x: i32) -> Self {
        Self { left: x, right: x }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }
}

pub type Scanline = Vec<Stroke>;

/// A glyph outline: one list of strokes per pixel row of the glyph cell.
///
/// Every scanline holds at least one stroke. Rows without ink carry a
/// zero-width stroke so that every row has something to interpolate from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shape {
    lines: Vec<Scanline>,
}

impl Shape {
    pub fn from_lines(lines: Vec<Scanline>) -> Self {
        Self { lines }
    }

    /// One zero-width stroke per scanline at `round(width / 2)`.
    pub fn empty(width: u16, height: u16) -> Self {
        let mid = (f32::from(width) / 2.0).round() as i32;
        let lines = (0..height).map(|_| vec![Stroke::point(mid)]).collect();
        Self { lines }
    }

    /// Run-length encodes a bitmap into strokes.
    ///
    /// `rows[y][x]` is `true` where the glyph has ink. Pixels past `width`
    /// are ignored.
    pub fn from_rows(rows: &[Vec<bool>], width: u16) -> Self {
        let width = usize::from(width);
        let mid = (width as f32 / 2.0).round() as i32;

        let lines = rows
            .iter()
            .map(|row| {
                let mut line = Vec::new();
                let mut start: Option<usize> = None;

                for x in 0..=width {
                    let ink = x < width && row.get(x).copied().unwrap_or(false);

                    match (start, ink) {
                        (None, true) => start = Some(x),
                        (Some(s), false) => {
                            line.push(Stroke::new(s as i32, x as i32));
                            start = None;
                        }
                        _ => {}
                    }
                }

                if line.is_empty() {
                    line.push(Stroke::point(mid));
                }

                line
            })
            .collect();

        Self { lines }
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[Scanline] {
        &self.lines
    }

    pub fn lines_mut(&mut self) -> &mut [Scanline] {
        &mut self.lines
    }

    pub fn line(&self, y: usize) -> Option<&Scanline> {
        self.lines.get(y)
    }

    /// Overwrites `self` with `other`, reusing existing allocations.
    pub fn copy_from(&mut self, other: &Shape) {
        self.lines.clone_from(&other.lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bitmap(rows: &[&str]) -> Vec<Vec<bool>> {
        rows.iter()
            .map(|r| r.chars().map(|c| c == '#').collect())
            .collect()
    }

    #[test]
    fn empty_shape_is_centered_point_per_row() {
        let shape = Shape::empty(9, 4);

        assert_eq!(shape.height(), 4);
        for line in shape.lines() {
            assert_eq!(line, &vec![Stroke::point(5)]);
        }
    }

    #[test]
    fn from_rows_encodes_runs() {
        let rows = bitmap(&["##..##", "......", ".####."]);
        let shape = Shape::from_rows(&rows, 6);

        assert_eq!(shape.lines()[0], vec![Stroke::new(0, 2), Stroke::new(4, 6)]);
        assert_eq!(shape.lines()[1], vec![Stroke::point(3)]);
        assert_eq!(shape.lines()[2], vec![Stroke::new(1, 5)]);
    }

    #[test]
    fn from_rows_clips_to_width() {
        let rows = bitmap(&["########"]);
        let shape = Shape::from_rows(&rows, 4);

        assert_eq!(shape.lines()[0], vec![Stroke::new(0, 4)]);
    }

    #[test]
    fn copy_from_replaces_content() {
        let mut a = Shape::empty(4, 2);
        let b = Shape::from_rows(&bitmap(&["##..", "..##"]), 4);

        a.copy_from(&b);
        assert_eq!(a, b);
    }
}
