//! Static English/Swahili localization table.
//!
//! Every user-facing string is looked up here by `MessageKey`; the active
//! `Language` is UI state and is never persisted.

use super::{RiskLevel, Symptom};

/// Languages offered by the language selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Swahili,
}

impl Language {
    pub const ALL: [Language; 2] = [Self::English, Self::Swahili];

    /// The other bundled language.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::English => Self::Swahili,
            Self::Swahili => Self::English,
        }
    }

    /// Name shown in the selector (always in the language itself).
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Swahili => "Swahili",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Self::English),
            "swahili" | "kiswahili" | "sw" => Ok(Self::Swahili),
            other => Err(format!("Unsupported language: {other}")),
        }
    }
}

/// Keys of the localization table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    Title,
    EnterDetails,
    ChildName,
    ChildAge,
    SelectSymptoms,
    PredictButton,
    ErrorName,
    ErrorPrediction,
    LowRisk,
    MediumRisk,
    HighRisk,
    ProbabilityBreakdown,
    Disclaimer,
    WarningHigh,
    WarningMedium,
    WarningLow,
    AssessmentHeader,
    RiskLevelLabel,
    LevelLow,
    LevelMedium,
    LevelHigh,
    LevelUnknown,
    AssessedAt,
    OutputTitle,
    OutputIdle,
    HintNavigate,
    HintToggle,
    HintSubmit,
    HintLanguage,
    HintQuit,
    Symptom(Symptom),
}

impl MessageKey {
    /// Label used in the probability breakdown for a level.
    #[must_use]
    pub fn probability_label(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Low => Self::LowRisk,
            RiskLevel::Medium => Self::MediumRisk,
            RiskLevel::High => Self::HighRisk,
        }
    }

    /// Advisory shown for a level.
    #[must_use]
    pub fn warning(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Low => Self::WarningLow,
            RiskLevel::Medium => Self::WarningMedium,
            RiskLevel::High => Self::WarningHigh,
        }
    }

    /// Localized name of a level.
    #[must_use]
    pub fn level(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Low => Self::LevelLow,
            RiskLevel::Medium => Self::LevelMedium,
            RiskLevel::High => Self::LevelHigh,
        }
    }
}

/// Caption of the language selector. Bilingual on purpose: the reader may
/// not understand the currently selected language.
pub const LANGUAGE_SELECTOR_CAPTION: &str = "Select Language / Chagua Lugha";

/// Look up `key` in `language`.
#[must_use]
pub fn translate(key: MessageKey, language: Language) -> &'static str {
    let (en, sw) = entry(key);
    match language {
        Language::English => en,
        Language::Swahili => sw,
    }
}

fn entry(key: MessageKey) -> (&'static str, &'static str) {
    use MessageKey as K;

    match key {
        K::Title => ("Child Illness Risk Checker", "Kikokotoo cha Hatari ya Ugonjwa wa Mtoto"),
        K::EnterDetails => ("Enter Child Details", "Weka Taarifa za Mtoto"),
        K::ChildName => ("Child Name", "Jina la Mtoto"),
        K::ChildAge => ("Child Age (years)", "Umri wa Mtoto (miaka)"),
        K::SelectSymptoms => ("Select Symptoms", "Chagua Dalili"),
        K::PredictButton => ("Predict Risk Level", "Kadiria Hatari"),
        K::ErrorName => ("Please enter the child's name.", "Tafadhali weka jina la mtoto."),
        K::ErrorPrediction => (
            "The risk could not be calculated. Please try again.",
            "Hatari haikuweza kukadiriwa. Tafadhali jaribu tena.",
        ),
        K::LowRisk => ("Low Risk", "Hatari Ndogo"),
        K::MediumRisk => ("Medium Risk", "Hatari ya Kati"),
        K::HighRisk => ("High Risk", "Hatari Kubwa"),
        K::ProbabilityBreakdown => ("Probability Breakdown", "Ufafanuzi wa Uwezekano"),
        K::Disclaimer => (
            "This App supports decision-making but does NOT replace a healthcare professional",
            "App hii inasaidia kufanya maamuzi lakini HAIJABADILI mtaalamu wa afya",
        ),
        K::WarningHigh => (
            "🚨 HIGH RISK: Please visit a nearby healthcare facility immediately!",
            "🚨 HATARI KUBWA: Tafadhali tembelea kituo cha afya mara moja!",
        ),
        K::WarningMedium => (
            "⚠️ MEDIUM RISK: Monitor symptoms and consider seeing a clinician soon.",
            "⚠️ HATARI YA KATI: Fuatilia dalili na fikiria kumuona daktari.",
        ),
        K::WarningLow => (
            "✅ LOW RISK: Continue home care and monitor symptoms.",
            "✅ HATARI NDOGO: Endelea na uangalizi nyumbani na fuatilia dalili.",
        ),
        K::AssessmentHeader => (
            "Risk Assessment for {name} ({age} years)",
            "Tathmini ya Hatari kwa {name} (miaka {age})",
        ),
        K::RiskLevelLabel => ("Risk Level", "Kiwango cha Hatari"),
        K::LevelLow => ("Low", "Ndogo"),
        K::LevelMedium => ("Medium", "Kati"),
        K::LevelHigh => ("High", "Kubwa"),
        K::LevelUnknown => ("Unknown", "Haijulikani"),
        K::AssessedAt => ("Assessed at", "Imetathminiwa"),
        K::OutputTitle => ("Result", "Matokeo"),
        K::OutputIdle => (
            "Fill in the form and press the button to see the risk level.",
            "Jaza fomu na ubonyeze kitufe kuona kiwango cha hatari.",
        ),
        K::HintNavigate => ("Navigate", "Sogeza"),
        K::HintToggle => ("Toggle / Adjust", "Badilisha"),
        K::HintSubmit => ("Submit", "Wasilisha"),
        K::HintLanguage => ("Language", "Lugha"),
        K::HintQuit => ("Quit", "Ondoka"),
        K::Symptom(symptom) => symptom_entry(symptom),
    }
}

fn symptom_entry(symptom: Symptom) -> (&'static str, &'static str) {
    match symptom {
        Symptom::Fever => ("Fever", "Homa"),
        Symptom::Cough => ("Cough", "Kikohozi"),
        Symptom::Vomiting => ("Vomiting", "Kutapika"),
        Symptom::Diarrhea => ("Diarrhea", "Kuhara"),
        Symptom::Fatigue => ("Fatigue", "Uchovu"),
        Symptom::Lethargy => ("Lethargy", "Udhaifu"),
        Symptom::Rash => ("Rash", "Vipere"),
    }
}
