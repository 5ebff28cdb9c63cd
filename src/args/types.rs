use std::num::NonZeroUsize;
use std::ops::RangeInclusive;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositiveUsize(NonZeroUsize);

impl PositiveUsize {
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for PositiveUsize {
    type Error = ValidationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        NonZeroUsize::new(value)
            .map(PositiveUsize)
            .ok_or(ValidationError::ValueTooSmall { min: 1 })
    }
}

impl std::str::FromStr for PositiveUsize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: usize = s
            .trim()
            .parse()
            .map_err(|err| ValidationError::InvalidNumber {
                value: s.to_owned(),
                source: err,
            })?;
        PositiveUsize::try_from(value)
    }
}

impl From<PositiveUsize> for usize {
    fn from(value: PositiveUsize) -> Self {
        value.get()
    }
}

/// Inclusive range of workload hints, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadRange {
    min_secs: u64,
    max_secs: u64,
}

impl WorkloadRange {
    /// Creates a range, rejecting `min > max`.
    ///
    /// # Errors
    ///
    /// Returns an error when the bounds are inverted.
    pub const fn new(min_secs: u64, max_secs: u64) -> Result<Self, ValidationError> {
        if min_secs > max_secs {
            return Err(ValidationError::WorkloadRangeInverted {
                min: min_secs,
                max: max_secs,
            });
        }
        Ok(Self { min_secs, max_secs })
    }

    #[must_use]
    pub const fn min_secs(self) -> u64 {
        self.min_secs
    }

    #[must_use]
    pub const fn max_secs(self) -> u64 {
        self.max_secs
    }

    #[must_use]
    pub const fn as_range(self) -> RangeInclusive<u64> {
        self.min_secs..=self.max_secs
    }
}
