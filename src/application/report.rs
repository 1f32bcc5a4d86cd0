//! Assessment report: the structured result of one submission.
//!
//! The report stores data, not rendered text, so switching language
//! re-renders the same result in the other language.

use chrono::{DateTime, Utc};

use crate::domain::{translate, ClassProbabilities, DecodedRisk, Language, MessageKey, RiskLevel};

/// Guidance tier shown under the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    /// Visit a healthcare facility immediately
    Urgent,
    /// Monitor symptoms, see a clinician soon
    Monitor,
    /// Continue home care
    HomeCare,
}

impl Advisory {
    /// Tier for a decoded risk. Anything that is not High or Medium,
    /// including `Unknown`, gets the home-care notice.
    #[must_use]
    pub fn for_risk(risk: DecodedRisk) -> Self {
        match risk {
            DecodedRisk::Level(RiskLevel::High) => Self::Urgent,
            DecodedRisk::Level(RiskLevel::Medium) => Self::Monitor,
            DecodedRisk::Level(RiskLevel::Low) | DecodedRisk::Unknown => Self::HomeCare,
        }
    }

    #[must_use]
    pub fn message_key(self) -> MessageKey {
        match self {
            Self::Urgent => MessageKey::warning(RiskLevel::High),
            Self::Monitor => MessageKey::warning(RiskLevel::Medium),
            Self::HomeCare => MessageKey::warning(RiskLevel::Low),
        }
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentReport {
    pub child_name: String,
    pub age: u8,
    /// Raw class index returned by the classifier
    pub class: i64,
    pub risk: DecodedRisk,
    pub probabilities: ClassProbabilities,
    pub assessed_at: DateTime<Utc>,
}

impl AssessmentReport {
    /// "Risk Assessment for Amara (2 years)".
    #[must_use]
    pub fn header(&self, language: Language) -> String {
        translate(MessageKey::AssessmentHeader, language)
            .replace("{name}", &self.child_name)
            .replace("{age}", &self.age.to_string())
    }

    /// Localized name of the decoded level.
    #[must_use]
    pub fn risk_label(&self, language: Language) -> &'static str {
        let key = match self.risk {
            DecodedRisk::Level(level) => MessageKey::level(level),
            DecodedRisk::Unknown => MessageKey::LevelUnknown,
        };
        translate(key, language)
    }

    /// "Risk Level: High".
    #[must_use]
    pub fn risk_line(&self, language: Language) -> String {
        format!(
            "{}: {}",
            translate(MessageKey::RiskLevelLabel, language),
            self.risk_label(language)
        )
    }

    /// "High Risk: 80.0%" for one level.
    #[must_use]
    pub fn probability_line(&self, level: RiskLevel, language: Language) -> String {
        format!(
            "{}: {}",
            translate(MessageKey::probability_label(level), language),
            self.probabilities.format_percent(level)
        )
    }

    #[must_use]
    pub fn advisory(&self) -> Advisory {
        Advisory::for_risk(self.risk)
    }

    #[must_use]
    pub fn advisory_text(&self, language: Language) -> &'static str {
        translate(self.advisory().message_key(), language)
    }

    /// "Assessed at 2026-10-19 08:30 UTC".
    #[must_use]
    pub fn timestamp_line(&self, language: Language) -> String {
        format!(
            "{} {}",
            translate(MessageKey::AssessedAt, language),
            self.assessed_at.format("%Y-%m-%d %H:%M UTC")
        )
    }
}
