use core::fmt;

/// Construction-time configuration errors
///
/// Every component validates its configuration once, when it is built.
/// After that no operation can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Hysteresis window must be in `1..=32`
    WindowSize(u8),
    /// Idle calibration needs at least one sample
    ZeroCalibrationSamples,
    /// Oversampling depth must be at least one acquisition
    ZeroOversampling,
    /// Brightness controller was given no output channels
    NoOutputs,
    /// Duty values must not increase with the brightness index
    NonMonotonicTable {
        /// First index whose duty is greater than the previous one
        index: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WindowSize(size) => {
                write!(f, "hysteresis window of {size} samples is outside 1..=32")
            }
            Self::ZeroCalibrationSamples => f.write_str("calibration sample count is zero"),
            Self::ZeroOversampling => f.write_str("oversampling depth is zero"),
            Self::NoOutputs => f.write_str("no output channels"),
            Self::NonMonotonicTable { index } => {
                write!(f, "brightness table increases in duty at index {index}")
            }
        }
    }
}

impl core::error::Error for ConfigError {}
