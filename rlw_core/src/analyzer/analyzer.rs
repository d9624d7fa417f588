use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::common::{
    enums::{UpdateReason, Zone},
    exception::RlwError,
    time::Time,
};
use crate::config::rlw_config::RlwConfig;
use crate::kline::{kline_list::KLineList, kline_unit::{KLineUnit, MetricModel}};
use crate::math::rlw::RollingRangeOscillator;

/// Oscillator output for one bar
#[derive(Debug, Clone, PartialEq)]
pub struct RlwPoint {
    pub time: Time,
    pub value: Option<f64>,
    pub zone: Option<Zone>,
}

#[derive(Serialize)]
struct RlwRow {
    time: String,
    value: Option<f64>,
    zone: Option<Zone>,
}

/// Drives the oscillator from a stream of bars and ticks, one point per bar
#[derive(Debug)]
pub struct Analyzer {
    kline_list: KLineList,
    oscillator: RollingRangeOscillator,
    points: Vec<RlwPoint>,
    config: RlwConfig,
}

impl Analyzer {
    pub fn new(config: RlwConfig) -> Result<Self, RlwError> {
        config.check()?;
        Ok(Self {
            kline_list: KLineList::new(),
            oscillator: RollingRangeOscillator::from_config(&config)?,
            points: Vec::new(),
            config,
        })
    }

    /// Feed one bar or tick.
    ///
    /// A `NewTick` replaces the bar in progress and its point and must carry
    /// that bar's time; any other reason appends a later bar. A tick arriving
    /// before any bar opens one. Rejected updates leave the state untouched.
    pub fn on_update(&mut self, reason: UpdateReason, klu: KLineUnit) -> Result<Option<f64>, RlwError> {
        let reason = if !reason.is_new_bar() && self.kline_list.is_empty() {
            debug!(time = %klu.time, "tick before first bar, opening bar");
            UpdateReason::NewBar
        } else {
            reason
        };

        if reason.is_new_bar() {
            self.kline_list.add_single_klu(klu)?;
        } else {
            self.kline_list.replace_last(klu)?;
        }

        let Some(last) = self.kline_list.lst.last_mut() else {
            return Ok(None);
        };
        self.oscillator.update_kline_unit(last, reason);

        let point = RlwPoint {
            time: last.time,
            value: last.rlw,
            zone: last.rlw.map(|v| self.config.zone(v)),
        };
        let value = point.value;
        if reason.is_new_bar() {
            self.points.push(point);
        } else if let Some(p) = self.points.last_mut() {
            *p = point;
        }

        Ok(value)
    }

    /// Feed closed bars in order
    pub fn update(&mut self, klus: &[KLineUnit]) -> Result<(), RlwError> {
        for klu in klus {
            self.on_update(UpdateReason::HistoricalBar, klu.clone())?;
        }
        debug!(bars = self.kline_list.len(), "historical update done");
        Ok(())
    }

    pub fn points(&self) -> &[RlwPoint] {
        &self.points
    }

    pub fn last_point(&self) -> Option<&RlwPoint> {
        self.points.last()
    }

    pub fn klus(&self) -> &KLineList {
        &self.kline_list
    }

    pub fn oscillator(&self) -> &RollingRangeOscillator {
        &self.oscillator
    }

    pub fn config(&self) -> &RlwConfig {
        &self.config
    }

    /// Write `time,value,zone` rows to `<directory>/<name>.csv`
    pub fn to_csv(&self, directory: &Path, name: &str) -> Result<PathBuf, RlwError> {
        std::fs::create_dir_all(directory)?;

        let file_path = directory.join(format!("{}.csv", name));
        let mut wtr = csv::Writer::from_path(&file_path)?;
        for p in &self.points {
            wtr.serialize(RlwRow {
                time: p.time.to_str(),
                value: p.value,
                zone: p.zone,
            })?;
        }
        wtr.flush()?;

        info!(rows = self.points.len(), path = %file_path.display(), "saved {}", self.config.short_name());
        Ok(file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::exception::ErrCode;

    fn klu(day: u32, high: f64, low: f64, close: f64) -> KLineUnit {
        let time = format!("202401{:02}", day).parse().unwrap();
        KLineUnit::new(time, close, high, low, close, 0.0, false).unwrap()
    }

    #[test]
    fn test_historical_update() {
        let mut analyzer = Analyzer::new(RlwConfig::with_period(3).unwrap()).unwrap();
        let bars: Vec<_> = (1..=4).map(|d| klu(d, 10.0, 5.0, 7.5)).collect();
        analyzer.update(&bars).unwrap();

        let points = analyzer.points();
        assert_eq!(points.len(), 4);
        assert_eq!(points[0].value, None);
        assert_eq!(points[1].value, None);
        assert_eq!(points[2].value, Some(-50.0));
        assert_eq!(points[2].zone, Some(Zone::Neutral));
        assert_eq!(analyzer.klus()[3].rlw, Some(-50.0));
    }

    #[test]
    fn test_tick_replaces_point() {
        let mut analyzer = Analyzer::new(RlwConfig::with_period(1).unwrap()).unwrap();
        assert_eq!(analyzer.on_update(UpdateReason::NewBar, klu(1, 10.0, 5.0, 7.5)).unwrap(), Some(-50.0));
        let v = analyzer.on_update(UpdateReason::NewTick, klu(1, 10.0, 5.0, 9.5)).unwrap();
        assert_eq!(v, Some(-10.0));
        assert_eq!(analyzer.points().len(), 1);
        assert_eq!(analyzer.klus().len(), 1);
        let last = analyzer.last_point().unwrap();
        assert_eq!(last.zone, Some(Zone::Overbought));
        assert_eq!(analyzer.oscillator().count(), 1);
    }

    #[test]
    fn test_tick_with_other_time_rejected() {
        let mut analyzer = Analyzer::new(RlwConfig::with_period(1).unwrap()).unwrap();
        analyzer.on_update(UpdateReason::NewBar, klu(2, 10.0, 5.0, 7.5)).unwrap();
        analyzer.on_update(UpdateReason::NewBar, klu(3, 10.0, 5.0, 7.5)).unwrap();

        for day in [1, 4] {
            let err = analyzer.on_update(UpdateReason::NewTick, klu(day, 10.0, 5.0, 9.5)).unwrap_err();
            assert_eq!(err.errcode, ErrCode::KlNotMonotonous);
        }

        let times: Vec<_> = analyzer.points().iter().map(|p| p.time.to_str()).collect();
        assert_eq!(times, ["2024-01-02 00:00:00", "2024-01-03 00:00:00"]);
        assert_eq!(analyzer.klus()[1].close, 7.5);
        assert_eq!(analyzer.last_point().unwrap().value, Some(-50.0));
        assert_eq!(analyzer.oscillator().count(), 2);
    }

    #[test]
    fn test_first_tick_opens_bar() {
        let mut analyzer = Analyzer::new(RlwConfig::with_period(1).unwrap()).unwrap();
        let v = analyzer.on_update(UpdateReason::NewTick, klu(1, 10.0, 5.0, 5.5)).unwrap();
        assert_eq!(v, Some(-90.0));
        assert_eq!(analyzer.last_point().unwrap().zone, Some(Zone::Oversold));
    }

    #[test]
    fn test_out_of_order_bar_leaves_state() {
        let mut analyzer = Analyzer::new(RlwConfig::with_period(1).unwrap()).unwrap();
        analyzer.on_update(UpdateReason::NewBar, klu(2, 10.0, 5.0, 7.5)).unwrap();
        assert!(analyzer.on_update(UpdateReason::NewBar, klu(1, 10.0, 5.0, 7.5)).is_err());
        assert_eq!(analyzer.oscillator().count(), 1);
        assert_eq!(analyzer.points().len(), 1);
    }

    #[test]
    fn test_to_csv() {
        let dir = tempfile::tempdir().unwrap();
        let mut analyzer = Analyzer::new(RlwConfig::with_period(2).unwrap()).unwrap();
        let bars = vec![klu(1, 10.0, 5.0, 7.5), klu(2, 10.0, 5.0, 9.0), klu(3, 5.0, 5.0, 5.0)];
        analyzer.update(&bars).unwrap();

        let path = analyzer.to_csv(dir.path(), "sample_rlw").unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], "time,value,zone");
        assert_eq!(lines[1], "2024-01-01 00:00:00,,");
        assert_eq!(lines[2], "2024-01-02 00:00:00,-20.0,OVERBOUGHT");
        assert_eq!(lines.len(), 4);
    }
}
