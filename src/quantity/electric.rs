quantity!(Volts, suffix: "V", precision: 1);
quantity!(Amperes, suffix: "A", precision: 3);

quantity!(
    /// Apparent power, the product of voltage and current magnitudes.
    VoltAmperes, suffix: "VA", precision: 2
);

implement_mul!(Volts, Amperes, VoltAmperes);

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_apparent_power() {
        assert_abs_diff_eq!((Volts(230.0) * Amperes(0.5)).0, 115.0);
        assert_abs_diff_eq!((Amperes(2.0) * Volts(120.0)).0, 240.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Volts(229.96).to_string(), "230.0 V");
        assert_eq!(Amperes(0.0812).to_string(), "0.081 A");
        assert_eq!(format!("{:?}", VoltAmperes(12.346)), "12.35VA");
    }
}
