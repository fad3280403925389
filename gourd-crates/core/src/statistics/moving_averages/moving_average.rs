use std::fmt::Debug;

pub trait MovingAverage<Term>: Debug {
    fn add_term(&mut self, new_term: Term);

    /// The current average; 0 if no terms have been added.
    fn value(&self) -> f64;
}
