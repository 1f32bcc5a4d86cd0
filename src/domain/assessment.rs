//! Assessment input types for child illness risk prediction.
//!
//! One `AssessmentInput` is built per form submission and dropped once the
//! result has been rendered.

/// Youngest age accepted by the form, in years.
pub const MIN_AGE: u8 = 0;

/// Oldest age accepted by the form, in years.
pub const MAX_AGE: u8 = 18;

/// Feature names in the order the classifier was trained on.
/// Order: Age, Fever, Cough, Vomiting, Diarrhea, Fatigue, Lethargy, Rash
pub const FEATURE_NAMES: [&str; 8] = [
    "Age", "Fever", "Cough", "Vomiting", "Diarrhea", "Fatigue", "Lethargy", "Rash",
];

/// Symptoms offered as checkboxes, in feature order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symptom {
    Fever,
    Cough,
    Vomiting,
    Diarrhea,
    Fatigue,
    Lethargy,
    Rash,
}

impl Symptom {
    /// All symptoms in feature-vector order.
    pub const ALL: [Symptom; 7] = [
        Self::Fever,
        Self::Cough,
        Self::Vomiting,
        Self::Diarrhea,
        Self::Fatigue,
        Self::Lethargy,
        Self::Rash,
    ];

    /// Position of this symptom within `ALL` (and within the symptom block
    /// of the feature vector, offset by one for age).
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Fever => 0,
            Self::Cough => 1,
            Self::Vomiting => 2,
            Self::Diarrhea => 3,
            Self::Fatigue => 4,
            Self::Lethargy => 5,
            Self::Rash => 6,
        }
    }

    /// Column name used by the model artifact.
    #[must_use]
    pub fn feature_name(self) -> &'static str {
        FEATURE_NAMES[self.index() + 1]
    }
}

/// Reasons a submission is rejected before any prediction runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("child name is empty")]
    EmptyName,

    #[error("age {0} out of range [0, 18]")]
    AgeOutOfRange(u8),
}

/// Ordered model input: `[Age, Fever, Cough, Vomiting, Diarrhea, Fatigue, Lethargy, Rash]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; 8]);

impl FeatureVector {
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn into_array(self) -> [f64; 8] {
        self.0
    }
}

impl From<[f64; 8]> for FeatureVector {
    fn from(values: [f64; 8]) -> Self {
        Self(values)
    }
}

/// A single submitted form instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentInput {
    name: String,
    age: u8,
    symptoms: [bool; 7],
}

impl AssessmentInput {
    /// Build a validated input.
    ///
    /// The name is trimmed; an empty result is rejected, as is an age outside
    /// `[MIN_AGE, MAX_AGE]`.
    ///
    /// # Errors
    /// Returns `ValidationError` when the name is blank or the age is out of range.
    pub fn new(
        name: &str,
        age: u8,
        symptoms: impl IntoIterator<Item = Symptom>,
    ) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(ValidationError::AgeOutOfRange(age));
        }

        let mut flags = [false; 7];
        for symptom in symptoms {
            flags[symptom.index()] = true;
        }

        Ok(Self {
            name: name.to_string(),
            age,
            symptoms: flags,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn age(&self) -> u8 {
        self.age
    }

    #[must_use]
    pub fn has(&self, symptom: Symptom) -> bool {
        self.symptoms[symptom.index()]
    }

    /// Symptoms that were ticked, in feature order.
    pub fn symptoms(&self) -> impl Iterator<Item = Symptom> + '_ {
        Symptom::ALL.into_iter().filter(|s| self.has(*s))
    }

    /// Convert to the classifier's input. Booleans are encoded as 0/1.
    #[must_use]
    pub fn to_features(&self) -> FeatureVector {
        let mut values = [0.0; 8];
        values[0] = f64::from(self.age);
        for symptom in Symptom::ALL {
            values[symptom.index() + 1] = if self.has(symptom) { 1.0 } else { 0.0 };
        }
        FeatureVector(values)
    }
}
