//! Patient data types for diabetes risk screening.
//!
//! Features follow the public diabetes prediction dataset:
//! gender, age, hypertension, heart_disease, smoking_history, bmi,
//! HbA1c_level, blood_glucose_level.

use serde::{Deserialize, Serialize};

/// Raw patient input collected from the form.
///
/// Categorical values are kept as the labels the user picked. The feature
/// schema is the only place that maps them to codes, so an unknown label is
/// rejected exactly once, at encoding time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Age in years
    pub age: i64,

    /// Body mass index in kg/m²
    pub bmi: f64,

    /// Glycated haemoglobin in %
    pub hba1c_level: f64,

    /// Blood glucose in mg/dL
    pub blood_glucose_level: i64,

    /// Gender label (`Female` or `Male`)
    pub gender: String,

    /// Diagnosed hypertension
    pub hypertension: bool,

    /// Diagnosed heart disease
    pub heart_disease: bool,

    /// Smoking history label (`never`, `current`, `former`, ...)
    pub smoking_history: String,
}

impl PatientRecord {
    /// Form defaults: 25 years, BMI 22.0, HbA1c 5.7 %, glucose 100 mg/dL.
    #[must_use]
    pub fn baseline(gender: impl Into<String>, smoking_history: impl Into<String>) -> Self {
        Self {
            age: 25,
            bmi: 22.0,
            hba1c_level: 5.7,
            blood_glucose_level: 100,
            gender: gender.into(),
            hypertension: false,
            heart_disease: false,
            smoking_history: smoking_history.into(),
        }
    }

    /// Raw label held for a categorical field, `None` for other fields.
    #[must_use]
    pub fn label(&self, field: Field) -> Option<&str> {
        match field {
            Field::Gender => Some(&self.gender),
            Field::SmokingHistory => Some(&self.smoking_history),
            _ => None,
        }
    }
}

/// Native numeric type of a measured feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericKind {
    Integer,
    Real,
}

/// How a field is represented before encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Numeric(NumericKind),
    Flag,
    Categorical,
}

/// A source attribute of [`PatientRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    Age,
    Bmi,
    HbA1cLevel,
    BloodGlucoseLevel,
    Gender,
    Hypertension,
    HeartDisease,
    SmokingHistory,
}

impl Field {
    /// Every field, in record declaration order.
    pub const ALL: [Field; 8] = [
        Field::Age,
        Field::Bmi,
        Field::HbA1cLevel,
        Field::BloodGlucoseLevel,
        Field::Gender,
        Field::Hypertension,
        Field::HeartDisease,
        Field::SmokingHistory,
    ];

    #[must_use]
    pub fn kind(self) -> FieldKind {
        match self {
            Self::Age | Self::BloodGlucoseLevel => FieldKind::Numeric(NumericKind::Integer),
            Self::Bmi | Self::HbA1cLevel => FieldKind::Numeric(NumericKind::Real),
            Self::Hypertension | Self::HeartDisease => FieldKind::Flag,
            Self::Gender | Self::SmokingHistory => FieldKind::Categorical,
        }
    }

    /// Column name of this field in the source dataset.
    #[must_use]
    pub fn dataset_column(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Bmi => "bmi",
            Self::HbA1cLevel => "HbA1c_level",
            Self::BloodGlucoseLevel => "blood_glucose_level",
            Self::Gender => "gender",
            Self::Hypertension => "hypertension",
            Self::HeartDisease => "heart_disease",
            Self::SmokingHistory => "smoking_history",
        }
    }

    /// Human-readable label for forms and error messages.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Bmi => "Body Mass Index (BMI)",
            Self::HbA1cLevel => "HbA1c Level",
            Self::BloodGlucoseLevel => "Blood Glucose Level",
            Self::Gender => "Gender",
            Self::Hypertension => "Hypertension",
            Self::HeartDisease => "Heart Disease",
            Self::SmokingHistory => "Smoking History",
        }
    }

    /// Fields measured on a numeric scale, with their native type.
    pub fn numeric() -> impl Iterator<Item = (Field, NumericKind)> {
        Self::ALL.into_iter().filter_map(|f| match f.kind() {
            FieldKind::Numeric(kind) => Some((f, kind)),
            _ => None,
        })
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dataset_column())
    }
}
