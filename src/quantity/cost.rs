quantity!(
    /// Money in the configured currency.
    Cost, precision: 2
);

impl Cost {
    pub const ZERO: Self = Self(0.0);
}
