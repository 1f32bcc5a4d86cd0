//! Risk classification types.
//!
//! Represents the output of the child illness risk classifier.

/// Class labels the classifier must declare, in training order.
pub const EXPECTED_CLASSES: [i64; 3] = [0, 1, 2];

/// Risk level predicted for a child's symptom profile.
///
/// The discriminants are the classifier's class indices and must not drift
/// from the training label order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    /// Continue home care
    Low = 0,
    /// Monitor, see a clinician soon
    Medium = 1,
    /// Visit a healthcare facility immediately
    High = 2,
}

impl RiskLevel {
    /// All levels in class-index order.
    pub const ALL: [RiskLevel; 3] = [Self::Low, Self::Medium, Self::High];

    /// Map a class index to a level. Returns `None` for anything outside `0..=2`.
    #[must_use]
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(Self::Low),
            1 => Some(Self::Medium),
            2 => Some(Self::High),
            _ => None,
        }
    }

    /// Class index the classifier uses for this level.
    #[must_use]
    pub fn class_index(self) -> i64 {
        self as i64
    }

    /// Canonical (untranslated) label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Get the associated color for TUI display (RGB).
    #[must_use]
    pub fn color(self) -> (u8, u8, u8) {
        match self {
            Self::Low => (16, 185, 129),     // Emerald (#10B981)
            Self::Medium => (251, 191, 36),  // Amber (#FBBF24)
            Self::High => (244, 63, 94),     // Rose (#F43F5E)
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of decoding a predicted class index.
///
/// Decoding never fails: an index the mapping does not know becomes `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedRisk {
    Level(RiskLevel),
    Unknown,
}

impl DecodedRisk {
    /// Sentinel label for an unmapped class index.
    pub const UNKNOWN_LABEL: &'static str = "Unknown";

    #[must_use]
    pub fn decode(class: i64) -> Self {
        RiskLevel::from_class(class).map_or(Self::Unknown, Self::Level)
    }

    #[must_use]
    pub fn level(self) -> Option<RiskLevel> {
        match self {
            Self::Level(level) => Some(level),
            Self::Unknown => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Level(level) => level.label(),
            Self::Unknown => Self::UNKNOWN_LABEL,
        }
    }
}

impl std::fmt::Display for DecodedRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Class probabilities `[p_low, p_medium, p_high]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassProbabilities([f64; 3]);

impl ClassProbabilities {
    #[must_use]
    pub fn new(low: f64, medium: f64, high: f64) -> Self {
        Self([low, medium, high])
    }

    /// Probability for one level (0.0 to 1.0).
    #[must_use]
    pub fn get(&self, level: RiskLevel) -> f64 {
        self.0[level as usize]
    }

    /// Probability for one level as a percentage (`p * 100`).
    #[must_use]
    pub fn percent(&self, level: RiskLevel) -> f64 {
        self.get(level) * 100.0
    }

    /// Percentage with one decimal place, e.g. `80.0%`.
    #[must_use]
    pub fn format_percent(&self, level: RiskLevel) -> String {
        format!("{:.1}%", self.percent(level))
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Level with the highest probability (lowest index wins ties).
    #[must_use]
    pub fn most_likely(&self) -> RiskLevel {
        let mut best = RiskLevel::Low;
        for level in RiskLevel::ALL {
            if self.get(level) > self.get(best) {
                best = level;
            }
        }
        best
    }
}

impl From<[f64; 3]> for ClassProbabilities {
    fn from(values: [f64; 3]) -> Self {
        Self(values)
    }
}
