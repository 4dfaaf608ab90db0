// iris_core/src/models/motion.rs

//! The motion-noise model for the prediction step.
//!
//! A commanded move lands exactly where intended with the bulk of the
//! probability mass, but some mass leaks onto the 8-cell neighborhood to
//! model actuation error. The kernel is normalized before any mass is
//! distributed, so the prediction step preserves total probability by
//! construction.

/// One kernel entry: a relative offset and the share of mass it receives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelTap {
    pub dy: i64,
    pub dx: i64,
    pub weight: f64,
}

/// Builds the normalized blur kernel for a given blur factor `b >= 0`.
///
/// Relative weights before normalization: the center cell keeps weight 1,
/// each edge-adjacent neighbor gets `b`, each diagonal neighbor `b / 2`.
/// `b = 0` yields the single-tap identity kernel, so the prediction step
/// degenerates to the exact shift. Larger `b` spreads mass further: the
/// center share is `1 / (1 + 6b)`, strictly decreasing in `b`.
pub fn blur_kernel(blur: f64) -> Vec<KernelTap> {
    assert!(
        blur.is_finite() && blur >= 0.0,
        "blur_kernel: blur factor must be finite and non-negative"
    );

    if blur == 0.0 {
        return vec![KernelTap {
            dy: 0,
            dx: 0,
            weight: 1.0,
        }];
    }

    let mut taps = Vec::with_capacity(9);
    for dy in -1..=1_i64 {
        for dx in -1..=1_i64 {
            let weight = match (dy, dx) {
                (0, 0) => 1.0,
                (0, _) | (_, 0) => blur,
                _ => blur / 2.0,
            };
            taps.push(KernelTap { dy, dx, weight });
        }
    }

    let total: f64 = taps.iter().map(|tap| tap.weight).sum();
    for tap in &mut taps {
        tap.weight /= total;
    }
    taps
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_zero_blur_is_identity_kernel() {
        let taps = blur_kernel(0.0);
        assert_eq!(taps.len(), 1);
        assert_eq!((taps[0].dy, taps[0].dx), (0, 0));
        assert_abs_diff_eq!(taps[0].weight, 1.0);
    }

    #[test]
    fn test_kernel_weights_sum_to_one() {
        for &blur in &[0.05, 0.5, 4.0] {
            let total: f64 = blur_kernel(blur).iter().map(|tap| tap.weight).sum();
            assert_abs_diff_eq!(total, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_center_share_shrinks_with_blur() {
        let center = |blur: f64| {
            blur_kernel(blur)
                .iter()
                .find(|tap| tap.dy == 0 && tap.dx == 0)
                .map(|tap| tap.weight)
                .unwrap()
        };
        assert_abs_diff_eq!(center(0.5), 1.0 / 4.0, epsilon = 1e-12);
        assert!(center(1.0) < center(0.5));
        assert!(center(2.0) < center(1.0));
    }
}
