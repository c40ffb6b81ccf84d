//! Evidence gatekeeping.

use super::reference_search::ReferenceData;

/// Decides whether enough evidence exists to attempt an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceValidator {
    minimum_references: usize,
}

impl Default for ReferenceValidator {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ReferenceValidator {
    /// Creates a validator requiring `minimum_references` references.
    pub fn new(minimum_references: usize) -> Self {
        Self { minimum_references }
    }

    /// Returns the number of references required.
    pub fn minimum_references(&self) -> usize {
        self.minimum_references
    }

    /// Returns true if the references across all sources reach the minimum.
    pub fn is_valid(&self, references: &ReferenceData) -> bool {
        references.total_count() >= self.minimum_references
    }
}
