pub mod analyzer;
pub mod common;
pub mod config;
pub mod kline;
pub mod math;

pub use analyzer::analyzer::{Analyzer, RlwPoint};
pub use common::enums::{UpdateReason, Zone};
pub use common::exception::{ErrCode, RlwError};
pub use config::rlw_config::RlwConfig;
pub use kline::kline_unit::KLineUnit;
pub use math::rlw::RollingRangeOscillator;
