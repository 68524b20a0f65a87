use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Error codes for the indicator system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[repr(i32)]
pub enum ErrCode {
    // Indicator errors (0-99)
    #[strum(serialize = "_BOLL_ERR_BEGIN")]
    BollErrBegin = 0,
    #[strum(serialize = "PARA_ERROR")]
    ParaError = 5,
    #[strum(serialize = "PLOT_ERR")]
    PlotErr = 11,
    #[strum(serialize = "CONFIG_ERROR")]
    ConfigError = 17,
    #[strum(serialize = "SRC_DATA_FORMAT_ERROR")]
    SrcDataFormatError = 18,
    #[strum(serialize = "_BOLL_ERR_END")]
    BollErrEnd = 99,

    // KL data errors (200-299)
    #[strum(serialize = "_KL_ERR_BEGIN")]
    KlErrBegin = 200,
    #[strum(serialize = "KL_DATA_INVALID")]
    KlDataInvalid = 203,
    #[strum(serialize = "KL_NOT_MONOTONOUS")]
    KlNotMonotonous = 206,
    #[strum(serialize = "_KL_ERR_END")]
    KlErrEnd = 299,
}

impl ErrCode {
    pub fn is_kldata_err(&self) -> bool {
        let code = *self as i32;
        code > Self::KlErrBegin as i32 && code < Self::KlErrEnd as i32
    }

    pub fn is_boll_err(&self) -> bool {
        let code = *self as i32;
        code > Self::BollErrBegin as i32 && code < Self::BollErrEnd as i32
    }
}

/// Error raised by every fallible operation of the crate.
///
/// `InvalidParameter` from the calculator contract maps to [`ErrCode::ParaError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{errcode}: {msg}")]
pub struct BollError {
    pub errcode: ErrCode,
    pub msg: String,
}

impl BollError {
    pub fn new(message: impl Into<String>, code: ErrCode) -> Self {
        Self {
            errcode: code,
            msg: message.into(),
        }
    }

    pub fn para(message: impl Into<String>) -> Self {
        Self::new(message, ErrCode::ParaError)
    }

    pub fn is_kldata_err(&self) -> bool {
        self.errcode.is_kldata_err()
    }

    pub fn is_boll_err(&self) -> bool {
        self.errcode.is_boll_err()
    }

    pub fn is_param_err(&self) -> bool {
        self.errcode == ErrCode::ParaError
    }
}
