use tracing::warn;

use crate::common::{
    enums::UpdateReason,
    exception::{ErrCode, RlwError},
    time::Time,
};

/// One OHLCV bar plus the indicator output written onto it
#[derive(Debug, Clone, PartialEq)]
pub struct KLineUnit {
    pub time: Time,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub rlw: Option<f64>,
}

impl KLineUnit {
    pub fn new(
        time: Time,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        autofix: bool,
    ) -> Result<Self, RlwError> {
        let mut unit = Self {
            time,
            open,
            high,
            low,
            close,
            volume,
            rlw: None,
        };

        unit.check(autofix)?;
        Ok(unit)
    }

    fn check(&mut self, autofix: bool) -> Result<(), RlwError> {
        let prices = [self.open, self.high, self.low, self.close];
        if prices.iter().any(|p| !p.is_finite()) {
            return Err(RlwError::new(
                format!(
                    "{} non-finite price in [open={}, high={}, low={}, close={}]",
                    self.time, self.open, self.high, self.low, self.close
                ),
                ErrCode::KlDataInvalid,
            ));
        }

        let min_price = self.low.min(self.open).min(self.high).min(self.close);
        let max_price = self.low.max(self.open).max(self.high).max(self.close);

        if self.low > min_price {
            if !autofix {
                return Err(RlwError::new(
                    format!(
                        "{} low price={} is not min of [low={}, open={}, high={}, close={}]",
                        self.time, self.low, self.low, self.open, self.high, self.close
                    ),
                    ErrCode::KlDataInvalid,
                ));
            }
            warn!(time = %self.time, low = self.low, fixed = min_price, "repair bar low");
            self.low = min_price;
        }

        if self.high < max_price {
            if !autofix {
                return Err(RlwError::new(
                    format!(
                        "{} high price={} is not max of [low={}, open={}, high={}, close={}]",
                        self.time, self.high, self.low, self.open, self.high, self.close
                    ),
                    ErrCode::KlDataInvalid,
                ));
            }
            warn!(time = %self.time, high = self.high, fixed = max_price, "repair bar high");
            self.high = max_price;
        }
        Ok(())
    }
}

/// Indicators that write their output onto a bar
pub trait MetricModel {
    fn update_kline_unit(&mut self, klu: &mut KLineUnit, reason: UpdateReason);
}
