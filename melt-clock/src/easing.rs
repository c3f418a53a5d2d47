/// How much faster than real time the melt runs. `1.2` finishes the morph
/// at ~833ms and holds the settled digits for the rest of the second.
pub const LINGER_SCALE: f32 = 1.2;

/// Progress through the current second's melt, given the milliseconds
/// elapsed since the second began. Reaches `1.0` early and stays there.
pub fn linger(millis: u32) -> f32 {
    (millis as f32 * LINGER_SCALE / 1000.0).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_boundaries(f: impl Fn(u32) -> f32) {
        assert!(f(0).abs() < 1e-6, "f(0) = {}, expected 0", f(0));
        assert!((f(999) - 1.0).abs() < 1e-6, "f(999) = {}, expected 1", f(999));
    }

    fn assert_monotonic(f: impl Fn(u32) -> f32) {
        let mut prev = f(0);

        for ms in 1..1000 {
            let val = f(ms);
            assert!(val >= prev, "non-monotonic at {ms}ms: {prev} > {val}");
            prev = val;
        }
    }

    #[test]
    fn linger_boundaries() {
        assert_boundaries(linger);
    }

    #[test]
    fn linger_monotonic() {
        assert_monotonic(linger);
    }

    #[test]
    fn linger_holds_last_sixth() {
        assert!(linger(800) < 1.0);
        assert_eq!(linger(834), 1.0);
        assert_eq!(linger(900), 1.0);
    }

    #[test]
    fn linger_midpoint() {
        assert!((linger(250) - 0.3).abs() < 1e-6);
    }
}
