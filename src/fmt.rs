use itertools::{Itertools, MinMaxResult};

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render the values as a one-line bar chart, scaled between their minimum and maximum.
#[must_use]
pub fn sparkline(values: &[f64]) -> String {
    let (min, max) = match values.iter().copied().minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => return String::new(),
        MinMaxResult::OneElement(value) => (value, value),
        MinMaxResult::MinMax(min, max) => (min, max),
    };
    let span = max - min;
    values
        .iter()
        .map(|value| {
            if span > 0.0 {
                #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let index = ((value - min) / span * 7.0).round() as usize;
                BARS[index.min(BARS.len() - 1)]
            } else {
                BARS[0]
            }
        })
        .collect()
}
