use std::fmt;

use validator::ValidationError;

use crate::constants::{
    ALREADY_SPUN_ERROR, EMPTY_WHEEL_ERROR, INVALID_EMAIL_ERROR, NOT_SIGNED_IN_ERROR,
    PERMISSION_DENIED_ERROR, SPIN_IN_FLIGHT_ERROR,
};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    InvalidEmail,
    AlreadySpun,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "{}", INVALID_EMAIL_ERROR),
            Self::AlreadySpun => write!(f, "{}", ALREADY_SPUN_ERROR),
        }
    }
}

impl std::error::Error for SessionError {}

#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeError {
    EmptyWheel,
}

impl fmt::Display for OutcomeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyWheel => write!(f, "{}", EMPTY_WHEEL_ERROR),
        }
    }
}

impl std::error::Error for OutcomeError {}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    PermissionDenied,
    UnknownItem(String),
    Invalid(ValidationError),
    Import(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "{}", PERMISSION_DENIED_ERROR),
            Self::UnknownItem(id) => write!(f, "No wheel item with id {}", id),
            Self::Invalid(e) => write!(f, "Invalid wheel configuration: {}", e.code),
            Self::Import(msg) => write!(f, "Could not import configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Invalid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for ConfigError {
    fn from(err: ValidationError) -> Self {
        Self::Invalid(err)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    Unavailable(String),
    Write(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "Storage unavailable: {}", msg),
            Self::Write(msg) => write!(f, "Storage write failed: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

#[derive(Debug, Clone, PartialEq)]
pub enum SpinError {
    NotSignedIn,
    SpinInFlight,
    StaleSpin,
    Session(SessionError),
    Outcome(OutcomeError),
}

impl fmt::Display for SpinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSignedIn => write!(f, "{}", NOT_SIGNED_IN_ERROR),
            Self::SpinInFlight => write!(f, "{}", SPIN_IN_FLIGHT_ERROR),
            Self::StaleSpin => write!(f, "Spin was cancelled before it finished"),
            Self::Session(e) => write!(f, "{}", e),
            Self::Outcome(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SpinError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Session(e) => Some(e),
            Self::Outcome(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SessionError> for SpinError {
    fn from(err: SessionError) -> Self {
        Self::Session(err)
    }
}

impl From<OutcomeError> for SpinError {
    fn from(err: OutcomeError) -> Self {
        Self::Outcome(err)
    }
}

/// Umbrella error for callers that handle every failure at one boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum WheelError {
    Session(SessionError),
    Outcome(OutcomeError),
    Config(ConfigError),
    Storage(StorageError),
    Spin(SpinError),
}

impl fmt::Display for WheelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Session(e) => write!(f, "{}", e),
            Self::Outcome(e) => write!(f, "{}", e),
            Self::Config(e) => write!(f, "{}", e),
            Self::Storage(e) => write!(f, "{}", e),
            Self::Spin(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for WheelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Session(e) => Some(e),
            Self::Outcome(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Storage(e) => Some(e),
            Self::Spin(e) => Some(e),
        }
    }
}

impl From<SessionError> for WheelError {
    fn from(err: SessionError) -> Self {
        Self::Session(err)
    }
}

impl From<OutcomeError> for WheelError {
    fn from(err: OutcomeError) -> Self {
        Self::Outcome(err)
    }
}

impl From<ConfigError> for WheelError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<StorageError> for WheelError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

impl From<SpinError> for WheelError {
    fn from(err: SpinError) -> Self {
        Self::Spin(err)
    }
}
