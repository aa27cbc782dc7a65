//! Layer summing.

use crate::layer::Layer;

/// Sums a set of layers and clamps the result to [-1, 1].
///
/// The clamp bounds what enters the filter chain. It is separate from the
/// limiter stage at the end of the chain.
pub struct LayerMixer {
    layers: Vec<Box<dyn Layer>>,
}

impl LayerMixer {
    /// Creates a mixer over the given layers.
    pub fn new(layers: Vec<Box<dyn Layer>>) -> Self {
        Self { layers }
    }

    /// Number of layers being mixed.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns true if the mixer has no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Mixed sample at time `t`.
    pub fn sample(&mut self, t: f64) -> f64 {
        let sum: f64 = self.layers.iter_mut().map(|layer| layer.sample(t)).sum();
        sum.clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Constant(f64);

    impl Layer for Constant {
        fn sample(&mut self, _t: f64) -> f64 {
            self.0
        }
    }

    struct Counter(Rc<Cell<u32>>);

    impl Layer for Counter {
        fn sample(&mut self, _t: f64) -> f64 {
            self.0.set(self.0.get() + 1);
            0.0
        }
    }

    #[test]
    fn test_sum() {
        let mut mixer = LayerMixer::new(vec![Box::new(Constant(0.25)), Box::new(Constant(-0.5))]);
        assert_eq!(mixer.sample(0.0), -0.25);
    }

    #[test]
    fn test_clamps_both_sides() {
        let mut hot = LayerMixer::new(vec![Box::new(Constant(0.8)), Box::new(Constant(0.8))]);
        assert_eq!(hot.sample(0.0), 1.0);
        let mut cold = LayerMixer::new(vec![Box::new(Constant(-0.8)), Box::new(Constant(-0.8))]);
        assert_eq!(cold.sample(0.0), -1.0);
    }

    #[test]
    fn test_empty_is_silent() {
        let mut mixer = LayerMixer::new(Vec::new());
        assert!(mixer.is_empty());
        assert_eq!(mixer.sample(1.0), 0.0);
    }

    #[test]
    fn test_every_layer_advances() {
        // A saturated sum must not short-circuit later layers.
        let calls = Rc::new(Cell::new(0));
        let mut mixer = LayerMixer::new(vec![
            Box::new(Constant(1.5)),
            Box::new(Counter(Rc::clone(&calls))),
        ]);
        for i in 0..10 {
            assert_eq!(mixer.sample(i as f64), 1.0);
        }
        assert_eq!(mixer.len(), 2);
        assert_eq!(calls.get(), 10);
    }
}
