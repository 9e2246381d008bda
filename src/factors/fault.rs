use serde::{Deserialize, Serialize};

/// Numeric fault code returned by every risk factor function.
///
/// Codes follow the historical convention:
/// - 0: success
/// - 10: a division by zero was detected and a fallback value was used
///
/// A fault is local to the factor that raised it. The calculation driver
/// records it and keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct FaultCode(u32);

impl FaultCode {
    /// No fault.
    pub const OK: FaultCode = FaultCode(0);
    /// Division by zero, fallback value used.
    pub const DIVISION_BY_ZERO: FaultCode = FaultCode(10);

    /// Get the integer code.
    #[must_use]
    pub const fn code(self) -> u32 {
        self.0
    }

    pub const fn is_ok(self) -> bool {
        self.0 == 0
    }

    /// Keep the first non-zero code.
    #[must_use]
    pub const fn or(self, other: FaultCode) -> FaultCode {
        if self.0 == 0 {
            other
        } else {
            self
        }
    }
}

impl std::fmt::Display for FaultCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Divide, reporting a zero denominator as a fault instead of producing
/// `inf` or `NaN`.
pub(crate) fn ratio(numerator: f64, denominator: f64) -> Result<f64, FaultCode> {
    if denominator == 0.0 {
        Err(FaultCode::DIVISION_BY_ZERO)
    } else {
        Ok(numerator / denominator)
    }
}
