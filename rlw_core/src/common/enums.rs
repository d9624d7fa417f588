use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Why the host is calling the indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum UpdateReason {
    /// Replaying closed bars while history loads
    HistoricalBar,
    /// A realtime bar has just opened
    NewBar,
    /// Intra-bar revision of the current bar
    NewTick,
}

impl UpdateReason {
    /// Every reason except a tick opens a fresh bar
    pub fn is_new_bar(&self) -> bool {
        !matches!(self, UpdateReason::NewTick)
    }
}

/// Position of an oscillator value relative to the reference levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Zone {
    Overbought,
    Neutral,
    Oversold,
}
