use super::SequenceGenerator;

#[derive(Debug, Copy, Clone)]
pub(crate) struct ConstantSequence {
    value: u64,
}

impl ConstantSequence {
    pub(crate) fn new(value: u64) -> ConstantSequence {
        ConstantSequence { value }
    }
}

impl SequenceGenerator for ConstantSequence {
    fn next(&mut self) -> u64 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_yields_the_same_value() {
        let mut sequence = ConstantSequence::new(50);
        assert!((0..100).all(|_| sequence.next() == 50));
    }
}
