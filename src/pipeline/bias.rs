//! Operator-controlled bias correction.
//!
//! The offset is the most recent discrepancy between a lab assay and the
//! model's prediction at that time. Stateless: the operator supplies both
//! values per request, and a disabled correction means a zero bias.

/// Correction offset from the last known lab/model pair.
pub fn lab_bias(last_lab: f64, last_model: f64) -> f64 {
    last_lab - last_model
}

/// Applies the offset to a raw model estimate.
pub fn apply(raw: f64, bias: f64) -> f64 {
    raw + bias
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_bias_is_the_identity() {
        assert_eq!(apply(2.3, 0.0), 2.3);
        assert_eq!(apply(-1.5, 0.0), -1.5);
    }

    #[test]
    fn correction_shifts_by_the_lab_discrepancy() {
        let bias = lab_bias(2.5, 2.3);
        let raw = 2.3;
        assert!((apply(raw, bias) - raw - (2.5 - 2.3)).abs() < 1e-12);
    }

    #[test]
    fn concrete_scenario_matches_the_dashboard() {
        let bias = lab_bias(2.5, 2.3);
        assert!((bias - 0.2).abs() < 1e-12);
        assert!((apply(2.3, bias) - 2.5).abs() < 1e-12);
    }
}
