use std::ops::Index;

use super::kline_unit::KLineUnit;
use crate::common::exception::{ErrCode, RlwError};

/// Ordered bars, oldest first; the last bar may still be in progress
#[derive(Debug, Clone, Default)]
pub struct KLineList {
    pub lst: Vec<KLineUnit>,
}

impl KLineList {
    pub fn new() -> Self {
        Self { lst: Vec::new() }
    }

    /// Append a bar; its time must be after the last bar's
    pub fn add_single_klu(&mut self, klu: KLineUnit) -> Result<(), RlwError> {
        if let Some(last) = self.lst.last() {
            if klu.time <= last.time {
                return Err(RlwError::new(
                    format!("kline time not monotonous: {} after {}", klu.time, last.time),
                    ErrCode::KlNotMonotonous,
                ));
            }
        }
        self.lst.push(klu);
        Ok(())
    }

    /// Replace the bar in progress with its revised state; the time must match
    pub fn replace_last(&mut self, klu: KLineUnit) -> Result<(), RlwError> {
        let Some(last) = self.lst.last_mut() else {
            return Err(RlwError::new("no bar to revise", ErrCode::NoData));
        };
        if klu.time != last.time {
            return Err(RlwError::new(
                format!("revision at {} does not match bar in progress {}", klu.time, last.time),
                ErrCode::KlNotMonotonous,
            ));
        }
        *last = klu;
        Ok(())
    }

    pub fn last(&self) -> Option<&KLineUnit> {
        self.lst.last()
    }

    pub fn len(&self) -> usize {
        self.lst.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lst.is_empty()
    }
}

impl Index<usize> for KLineList {
    type Output = KLineUnit;

    fn index(&self, index: usize) -> &Self::Output {
        &self.lst[index]
    }
}
