use tracing::{debug, trace};

use crate::common::{enums::UpdateReason, exception::RlwError, utils::is_flat_range};
use crate::config::rlw_config::RlwConfig;
use crate::kline::kline_unit::{KLineUnit, MetricModel};
use crate::math::history::{History, Sample};

/// %R Larry Williams oscillator.
///
/// `-100 * (highest high - close) / (highest high - lowest low)` over the
/// last `period` bars. Values sit in [-100, 0] while the close is inside the
/// window's range; they are not clamped when it is not.
#[derive(Debug, Clone)]
pub struct RollingRangeOscillator {
    period: usize,
    history: History,
    count: usize,
    last_value: Option<f64>,
}

impl RollingRangeOscillator {
    pub fn new(period: usize) -> Result<Self, RlwError> {
        RlwConfig::check_period(period)?;
        debug!(period, "create rlw oscillator");
        Ok(Self {
            period,
            history: History::new(period),
            count: 0,
            last_value: None,
        })
    }

    pub fn from_config(config: &RlwConfig) -> Result<Self, RlwError> {
        Self::new(config.period)
    }

    /// Feed the current bar's prices.
    ///
    /// `is_new_bar` opens a fresh bar; otherwise the prices revise the bar
    /// in progress. Returns `None` until `period` bars have been seen, when
    /// the window range is flat, or when any input in the window is not finite.
    pub fn update(&mut self, high: f64, low: f64, close: f64, is_new_bar: bool) -> Option<f64> {
        // a revision with nothing to revise still opens the first bar
        if is_new_bar || self.history.is_empty() {
            self.history.push_front(Sample::default());
            self.count += 1;
        }

        if let Some(front) = self.history.front_mut() {
            front.high = high;
            front.low = low;
        }

        if self.count < self.period {
            return None;
        }

        if !close.is_finite() || !self.history.all_finite() {
            trace!(count = self.count, "non-finite price in window");
            return None;
        }

        let highest = self.history.highest();
        let lowest = self.history.lowest();
        if is_flat_range(highest, lowest) {
            trace!(count = self.count, highest, lowest, "flat range, no value");
            return None;
        }

        let value = -100.0 * (highest - close) / (highest - lowest);
        self.last_value = Some(value);
        Some(value)
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Bars processed so far
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_ready(&self) -> bool {
        self.count >= self.period
    }

    /// Latest value produced, kept across flat or incomplete updates
    pub fn last_value(&self) -> Option<f64> {
        self.last_value
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn reset(&mut self) {
        debug!(period = self.period, count = self.count, "reset rlw oscillator");
        self.history.clear();
        self.count = 0;
        self.last_value = None;
    }
}

impl MetricModel for RollingRangeOscillator {
    fn update_kline_unit(&mut self, klu: &mut KLineUnit, reason: UpdateReason) {
        klu.rlw = self.update(klu.high, klu.low, klu.close, reason.is_new_bar());
    }
}
