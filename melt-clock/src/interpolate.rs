use crate::shape::{Shape, Stroke};

/// Writes the shape `t` of the way from `origin` to `target` into `current`.
///
/// `t` must be in `[0.0, 1.0]`. Each stroke endpoint moves on its own
/// straight line. When one side has fewer strokes on a scanline, its first
/// stroke stands in for the missing ones, so a single bar splits into
/// several (or several merge into one) without jumping. `current` ends up
/// with the larger stroke count on every scanline.
pub fn interpolate(origin: &Shape, target: &Shape, t: f32, current: &mut Shape) {
    let lines = current
        .lines_mut()
        .iter_mut()
        .zip(origin.lines())
        .zip(target.lines());

    for ((cline, oline), tline) in lines {
        let count = oline.len().max(tline.len());
        cline.resize(count, Stroke::default());

        for (j, cseg) in cline.iter_mut().enumerate() {
            let oseg = stroke_or_first(oline, j);
            let tseg = stroke_or_first(tline, j);

            cseg.left = lerp_coord(oseg.left, tseg.left, t);
            cseg.right = lerp_coord(oseg.right, tseg.right, t);
        }
    }
}

fn stroke_or_first(line: &[Stroke], index: usize) -> Stroke {
    line.get(index)
        .or_else(|| line.first())
        .copied()
        .unwrap_or_default()
}

/// Halves round toward positive infinity.
fn lerp_coord(src: i32, dst: i32, t: f32) -> i32 {
    src + ((dst - src) as f32 * t + 0.5).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(lines: &[&[(i32, i32)]]) -> Shape {
        Shape::from_lines(
            lines
                .iter()
                .map(|l| l.iter().map(|&(a, b)| Stroke::new(a, b)).collect())
                .collect(),
        )
    }

    #[test]
    fn at_zero_matches_origin() {
        let origin = shape(&[&[(0, 4)], &[(1, 2), (5, 8)]]);
        let target = shape(&[&[(3, 9)], &[(0, 9)]]);
        let mut current = origin.clone();

        interpolate(&origin, &target, 0.0, &mut current);

        assert_eq!(current.lines()[0], vec![Stroke::new(0, 4)]);
        assert_eq!(current.lines()[1], vec![Stroke::new(1, 2), Stroke::new(5, 8)]);
    }

    #[test]
    fn at_one_matches_target() {
        let origin = shape(&[&[(0, 4)], &[(1, 2)]]);
        let target = shape(&[&[(3, 9)], &[(0, 3), (6, 9)]]);
        let mut current = origin.clone();

        interpolate(&origin, &target, 1.0, &mut current);

        assert_eq!(current, target);
    }

    #[test]
    fn midpoint_rounds() {
        let origin = shape(&[&[(0, 0)]]);
        let target = shape(&[&[(3, 10)]]);
        let mut current = origin.clone();

        interpolate(&origin, &target, 0.5, &mut current);

        assert_eq!(current.lines()[0], vec![Stroke::new(2, 5)]);
    }

    #[test]
    fn halves_round_up_in_both_directions() {
        assert_eq!(lerp_coord(0, 5, 0.5), 3);
        assert_eq!(lerp_coord(0, -5, 0.5), -2);
        assert_eq!(lerp_coord(10, 5, 0.5), 8);

        let origin = shape(&[&[(0, 0)]]);
        let target = shape(&[&[(-5, 5)]]);
        let mut current = origin.clone();

        interpolate(&origin, &target, 0.5, &mut current);

        assert_eq!(current.lines()[0], vec![Stroke::new(-2, 3)]);
    }

    #[test]
    fn missing_strokes_reuse_first() {
        // One bar splitting into two: both halves start from the bar.
        let origin = shape(&[&[(2, 8)]]);
        let target = shape(&[&[(0, 2), (8, 10)]]);
        let mut current = origin.clone();

        interpolate(&origin, &target, 0.0, &mut current);
        assert_eq!(current.lines()[0], vec![Stroke::new(2, 8), Stroke::new(2, 8)]);

        interpolate(&origin, &target, 0.5, &mut current);
        assert_eq!(current.lines()[0], vec![Stroke::new(1, 5), Stroke::new(5, 9)]);
    }

    #[test]
    fn merging_collapses_onto_first() {
        let origin = shape(&[&[(0, 2), (8, 10)]]);
        let target = shape(&[&[(4, 6)]]);
        let mut current = origin.clone();

        interpolate(&origin, &target, 1.0, &mut current);

        assert_eq!(current.lines()[0], vec![Stroke::new(4, 6), Stroke::new(4, 6)]);
    }

    #[test]
    fn current_is_reused_in_place() {
        let origin = shape(&[&[(0, 4)]]);
        let target = shape(&[&[(4, 8)]]);
        let mut current = origin.clone();
        let before = current.lines()[0].as_ptr();

        for i in 0..=10 {
            interpolate(&origin, &target, i as f32 / 10.0, &mut current);
        }

        assert_eq!(current.lines()[0].as_ptr(), before);
    }
}
