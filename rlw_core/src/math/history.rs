use std::collections::VecDeque;

/// One high/low observation per bar
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sample {
    pub high: f64,
    pub low: f64,
}

impl Sample {
    pub fn new(high: f64, low: f64) -> Self {
        Self { high, low }
    }

    pub fn is_finite(&self) -> bool {
        self.high.is_finite() && self.low.is_finite()
    }
}

/// Most-recent-first window of samples.
///
/// Index 0 is the bar in progress. Capacity is fixed at construction;
/// pushing onto a full history drops the oldest sample.
#[derive(Debug, Clone)]
pub struct History {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push_front(&mut self, sample: Sample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_back();
        }
        self.samples.push_front(sample);
    }

    pub fn front_mut(&mut self) -> Option<&mut Sample> {
        self.samples.front_mut()
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Highest high over all held samples
    pub fn highest(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.high)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Lowest low over all held samples
    pub fn lowest(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.low)
            .fold(f64::INFINITY, f64::min)
    }

    pub fn all_finite(&self) -> bool {
        self.samples.iter().all(Sample::is_finite)
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_front_order() {
        let mut history = History::new(3);
        history.push_front(Sample::new(1.0, 0.5));
        history.push_front(Sample::new(2.0, 1.5));
        assert_eq!(history.get(0), Some(&Sample::new(2.0, 1.5)));
        assert_eq!(history.get(1), Some(&Sample::new(1.0, 0.5)));
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = History::new(2);
        history.push_front(Sample::new(100.0, 1.0));
        history.push_front(Sample::new(3.0, 2.0));
        history.push_front(Sample::new(4.0, 3.0));
        assert_eq!(history.len(), 2);
        assert_eq!(history.highest(), 4.0);
        assert_eq!(history.lowest(), 2.0);
    }

    #[test]
    fn test_front_mut_overwrites() {
        let mut history = History::new(2);
        history.push_front(Sample::default());
        if let Some(front) = history.front_mut() {
            front.high = 7.0;
            front.low = 6.0;
        }
        assert_eq!(history.get(0), Some(&Sample::new(7.0, 6.0)));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_all_finite() {
        let mut history = History::new(2);
        history.push_front(Sample::new(1.0, 0.0));
        assert!(history.all_finite());
        history.push_front(Sample::new(f64::NAN, 0.0));
        assert!(!history.all_finite());
    }
}
