use std::fmt;

/// Errors produced while synthesizing, encoding or writing sounds.
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    #[error("Invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: ParamValue },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid preset: {0}")]
    Preset(#[from] serde_json::Error),

    #[error("Unknown preset '{0}'")]
    UnknownPreset(String),

    #[error("Unknown sound kind '{0}'")]
    UnknownSound(String),
}

/// The offending value carried by [`SynthError::InvalidParameter`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Float(f64),
    Int(u64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Int(v) => write!(f, "{v}"),
        }
    }
}

impl SynthError {
    pub(crate) fn invalid_float(name: &'static str, value: f64) -> Self {
        SynthError::InvalidParameter {
            name,
            value: ParamValue::Float(value),
        }
    }

    pub(crate) fn invalid_int(name: &'static str, value: u64) -> Self {
        SynthError::InvalidParameter {
            name,
            value: ParamValue::Int(value),
        }
    }
}

pub type Result<T> = std::result::Result<T, SynthError>;
