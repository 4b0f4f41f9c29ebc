use std::fmt::{Debug, Display, Formatter};

use serde::Serialize;

/// Ratio of the active power to the apparent power, always within `0.0..=1.0`.
#[derive(Copy, Clone, Default, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct PowerFactor(pub f64);

impl PowerFactor {
    pub const ZERO: Self = Self(0.0);

    pub fn new(ratio: f64) -> Self {
        if ratio.is_finite() { Self(ratio.clamp(0.0, 1.0)) } else { Self::ZERO }
    }
}

impl Display for PowerFactor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl Debug for PowerFactor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps() {
        assert_eq!(PowerFactor::new(1.5), PowerFactor(1.0));
        assert_eq!(PowerFactor::new(-0.1), PowerFactor::ZERO);
        assert_eq!(PowerFactor::new(f64::NAN), PowerFactor::ZERO);
    }

    #[test]
    fn test_display() {
        assert_eq!(PowerFactor::new(0.95).to_string(), "0.950");
    }
}
