use super::temporal::TemporalPrecision;

/// Per-attribute hints collected while an attribute's mapping is processed
///
/// Built fresh for each attribute and dropped once its type is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionIndicators {
    pub lob: bool,
    pub nationalized: bool,
    /// `None` means no precision was requested
    pub temporal_precision: Option<TemporalPrecision>,
}

impl ResolutionIndicators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lob(mut self, lob: bool) -> Self {
        self.lob = lob;
        self
    }

    pub fn with_nationalized(mut self, nationalized: bool) -> Self {
        self.nationalized = nationalized;
        self
    }

    pub fn with_temporal_precision(mut self, precision: TemporalPrecision) -> Self {
        self.temporal_precision = Some(precision);
        self
    }
}
