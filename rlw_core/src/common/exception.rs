use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Error codes for the RLW system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[repr(i32)]
pub enum ErrCode {
    // Indicator errors (0-99)
    #[strum(serialize = "_RLW_ERR_BEGIN")]
    RlwErrBegin = 0,
    #[strum(serialize = "SRC_DATA_NOT_FOUND")]
    SrcDataNotFound = 3,
    #[strum(serialize = "PARA_ERROR")]
    ParaError = 5,
    #[strum(serialize = "CONFIG_ERROR")]
    ConfigError = 17,
    #[strum(serialize = "SRC_DATA_FORMAT_ERROR")]
    SrcDataFormatError = 18,
    #[strum(serialize = "IO_ERROR")]
    IoError = 19,
    #[strum(serialize = "_RLW_ERR_END")]
    RlwErrEnd = 99,

    // KL data errors (200-299)
    #[strum(serialize = "_KL_ERR_BEGIN")]
    KlErrBegin = 200,
    #[strum(serialize = "KL_DATA_INVALID")]
    KlDataInvalid = 203,
    #[strum(serialize = "KL_NOT_MONOTONOUS")]
    KlNotMonotonous = 206,
    #[strum(serialize = "NO_DATA")]
    NoData = 210,
    #[strum(serialize = "_KL_ERR_END")]
    KlErrEnd = 299,
}

impl ErrCode {
    pub fn is_kldata_err(&self) -> bool {
        let code = *self as i32;
        code > Self::KlErrBegin as i32 && code < Self::KlErrEnd as i32
    }

    pub fn is_rlw_err(&self) -> bool {
        let code = *self as i32;
        code > Self::RlwErrBegin as i32 && code < Self::RlwErrEnd as i32
    }
}

#[derive(Debug, Error)]
#[error("{errcode}: {msg}")]
pub struct RlwError {
    pub errcode: ErrCode,
    pub msg: String,
}

impl RlwError {
    pub fn new(message: impl Into<String>, code: ErrCode) -> Self {
        Self {
            errcode: code,
            msg: message.into(),
        }
    }

    pub fn is_kldata_err(&self) -> bool {
        self.errcode.is_kldata_err()
    }

    pub fn is_rlw_err(&self) -> bool {
        self.errcode.is_rlw_err()
    }
}

impl From<std::io::Error> for RlwError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string(), ErrCode::IoError)
    }
}

impl From<csv::Error> for RlwError {
    fn from(e: csv::Error) -> Self {
        if e.is_io_error() {
            Self::new(e.to_string(), ErrCode::IoError)
        } else {
            Self::new(e.to_string(), ErrCode::SrcDataFormatError)
        }
    }
}

impl From<serde_json::Error> for RlwError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(e.to_string(), ErrCode::ConfigError)
    }
}
