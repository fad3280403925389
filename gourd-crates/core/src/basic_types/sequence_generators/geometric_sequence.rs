use super::SequenceGenerator;

/// `f(0) = base` and `f(i) = floor(f(i - 1) * factor)`. Because every step is rounded down, this
/// is not the same as `floor(base * factor^i)` for non-integral factors.
#[derive(Debug, Copy, Clone)]
pub(crate) struct GeometricSequence {
    current_value: u64,
    factor: f64,
}

impl GeometricSequence {
    pub(crate) fn new(base: u64, factor: f64) -> GeometricSequence {
        GeometricSequence {
            current_value: base,
            factor,
        }
    }
}

impl SequenceGenerator for GeometricSequence {
    fn next(&mut self) -> u64 {
        let value = self.current_value;
        self.current_value = (self.current_value as f64 * self.factor) as u64;
        value
    }
}
