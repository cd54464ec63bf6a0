use crate::shapes::SamplingVector;

/// Sharpen the contrast between dense and sparse regions of a cell
///
/// Each component is normalized against the cell's own peak, raised to
/// `exponent`, then scaled back by the peak. The peak itself is unchanged, so
/// overall brightness is kept while weaker regions fall toward zero
/// (for `exponent > 1`).
///
/// An all-zero vector is returned unchanged.
pub fn enhance_contrast(vector: SamplingVector, exponent: f32) -> SamplingVector {
    let peak = vector.iter().copied().fold(0.0f32, f32::max);
    if peak == 0.0 {
        return vector;
    }

    vector.map(|v| (v / peak).powf(exponent) * peak)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_vector_unchanged() {
        assert_eq!(enhance_contrast([0.0; 6], 2.0), [0.0; 6]);
    }

    #[test]
    fn test_peak_preserved() {
        let v = enhance_contrast([0.2, 0.8, 0.4, 0.1, 0.0, 0.6], 2.0);
        assert_eq!(v[1], 0.8);
        assert_eq!(v[4], 0.0);
    }

    #[test]
    fn test_low_values_pulled_down() {
        let v = enhance_contrast([0.4, 0.8, 0.4, 0.8, 0.4, 0.8], 2.0);
        // (0.4 / 0.8)^2 * 0.8 = 0.2
        assert!((v[0] - 0.2).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_exponent_one_is_identity() {
        let input = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6];
        let v = enhance_contrast(input, 1.0);
        for i in 0..6 {
            assert!((v[i] - input[i]).abs() < 1e-6);
        }
    }

    #[test]
    fn test_uniform_vector_unchanged() {
        assert_eq!(enhance_contrast([1.0; 6], 1.5), [1.0; 6]);
    }
}
