//! Declared feature schemas and the encoder that follows them.
//!
//! A classifier only ever sees a row of numbers. Which number sits in which
//! column, and how a categorical label became a number, is fixed at training
//! time and invisible at inference time: a row in the wrong order still
//! produces *a* label. This module makes that contract an explicit value.
//!
//! A [`FeatureSchema`] is a named, versioned, ordered list of
//! [`ColumnSpec`]s. Building one validates the declaration (rule/field
//! compatibility, duplicate columns, categorical tables) and compiles it into
//! a list of slots, so encoding itself cannot fail except on an unknown label.
//!
//! Two schemas are declared, one per model variant. They are deliberately
//! not interchangeable:
//!
//! - [`SchemaVariant::Ordinal`]: `diabetes-ordinal@1`, 8 columns, smoking
//!   history as a single categorical code.
//! - [`SchemaVariant::OneHot`]: `diabetes-onehot@1`, 10 columns, gender
//!   dropped, smoking history as four indicator columns.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::patient::{Field, FieldKind, NumericKind, PatientRecord};

/// Gender codes used by the ordinal variant.
pub const GENDER_CODES: &[(&str, i64)] = &[("Female", 0), ("Male", 1)];

/// Smoking history codes used by the ordinal variant.
///
/// Listed in form order. The codes are the ones the ordinal model was
/// trained on and are not alphabetical (`former` is 2, `ever` is 3).
pub const SMOKING_CODES: &[(&str, i64)] = &[
    ("never", 4),
    ("No Info", 0),
    ("current", 1),
    ("former", 2),
    ("ever", 3),
    ("not current", 5),
];

/// Errors raised while declaring a schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("Schema {schema} declares no columns")]
    Empty { schema: String },

    #[error("Column {column} is declared more than once")]
    DuplicateColumn { column: String },

    #[error("Column {column}: rule {rule} cannot encode field {field}")]
    IncompatibleRule {
        column: String,
        field: Field,
        rule: &'static str,
    },

    #[error("Field {field} is encoded both ordinally and by indicator columns")]
    MixedCategoricalEncoding { field: Field },

    #[error("Field {field} has more than one ordinal column")]
    DuplicateOrdinal { field: Field },

    #[error("Field {field} declares indicator label {label:?} twice")]
    DuplicateIndicator { field: Field, label: String },

    #[error("Column {column}: invalid ordinal table ({reason})")]
    InvalidOrdinalTable { column: String, reason: String },
}

/// Errors raised while encoding a record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("Invalid category {label:?} for {field} (expected one of: {expected})")]
    InvalidCategory {
        field: Field,
        label: String,
        expected: String,
    },
}

/// Identity of a declared schema, rendered `name@version`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaId {
    pub name: &'static str,
    pub version: u32,
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

impl Serialize for SchemaId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How one column derives its value from a [`PatientRecord`] field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EncodingRule {
    /// Integer measurement, passed through.
    Integer,
    /// Real measurement, passed through.
    Real,
    /// Boolean as `0` / `1`.
    Flag,
    /// Categorical label mapped through a fixed `(label, code)` table.
    Ordinal(&'static [(&'static str, i64)]),
    /// One column of a one-hot group: `1` when the label matches.
    Indicator(&'static str),
}

impl EncodingRule {
    fn name(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Real => "real",
            Self::Flag => "flag",
            Self::Ordinal(_) => "ordinal",
            Self::Indicator(_) => "indicator",
        }
    }

    fn accepts(&self, kind: FieldKind) -> bool {
        matches!(
            (self, kind),
            (Self::Integer, FieldKind::Numeric(NumericKind::Integer))
                | (Self::Real, FieldKind::Numeric(NumericKind::Real))
                | (Self::Flag, FieldKind::Flag)
                | (Self::Ordinal(_), FieldKind::Categorical)
                | (Self::Indicator(_), FieldKind::Categorical)
        )
    }
}

/// One declared column: its training-time name, source field and rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub field: Field,
    pub rule: EncodingRule,
}

impl ColumnSpec {
    #[must_use]
    pub const fn new(name: &'static str, field: Field, rule: EncodingRule) -> Self {
        Self { name, field, rule }
    }
}

/// A single encoded value, typed the way the model was trained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    Int(i64),
    Real(f64),
}

impl FeatureValue {
    #[must_use]
    pub fn to_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Real(v) => v,
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v:?}"),
        }
    }
}

impl Serialize for FeatureValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Int(v) => serializer.serialize_i64(*v),
            Self::Real(v) => serializer.serialize_f64(*v),
        }
    }
}

/// Encoded row, tagged with the schema that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    schema: SchemaId,
    values: Vec<FeatureValue>,
}

impl FeatureVector {
    #[must_use]
    pub fn schema(&self) -> SchemaId {
        self.schema
    }

    #[must_use]
    pub fn values(&self) -> &[FeatureValue] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Dense `f64` row for numeric models.
    #[must_use]
    pub fn to_f64(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.to_f64()).collect()
    }
}

/// Compiled column: the accessor is resolved once, at schema construction.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Age,
    BloodGlucose,
    Bmi,
    HbA1c,
    Hypertension,
    HeartDisease,
    Ordinal(Field, &'static [(&'static str, i64)]),
    Indicator(Field, &'static str),
}

impl Slot {
    fn compile(spec: &ColumnSpec) -> Result<Self, SchemaError> {
        if !spec.rule.accepts(spec.field.kind()) {
            return Err(SchemaError::IncompatibleRule {
                column: spec.name.to_string(),
                field: spec.field,
                rule: spec.rule.name(),
            });
        }

        Ok(match (spec.rule, spec.field) {
            (EncodingRule::Ordinal(table), field) => Self::Ordinal(field, table),
            (EncodingRule::Indicator(label), field) => Self::Indicator(field, label),
            (_, Field::Age) => Self::Age,
            (_, Field::BloodGlucoseLevel) => Self::BloodGlucose,
            (_, Field::Bmi) => Self::Bmi,
            (_, Field::HbA1cLevel) => Self::HbA1c,
            (_, Field::Hypertension) => Self::Hypertension,
            (_, Field::HeartDisease) => Self::HeartDisease,
            // Categorical fields only pass `accepts` with a categorical rule.
            (_, field @ (Field::Gender | Field::SmokingHistory)) => {
                return Err(SchemaError::IncompatibleRule {
                    column: spec.name.to_string(),
                    field,
                    rule: spec.rule.name(),
                })
            }
        })
    }

    fn value(&self, record: &PatientRecord) -> FeatureValue {
        match *self {
            Self::Age => FeatureValue::Int(record.age),
            Self::BloodGlucose => FeatureValue::Int(record.blood_glucose_level),
            Self::Bmi => FeatureValue::Real(record.bmi),
            Self::HbA1c => FeatureValue::Real(record.hba1c_level),
            Self::Hypertension => FeatureValue::Int(i64::from(record.hypertension)),
            Self::HeartDisease => FeatureValue::Int(i64::from(record.heart_disease)),
            Self::Ordinal(field, table) => {
                // Labels are checked before any slot is evaluated.
                let label = record.label(field).unwrap_or_default();
                let code = table
                    .iter()
                    .find(|(l, _)| *l == label)
                    .map_or(0, |(_, code)| *code);
                FeatureValue::Int(code)
            }
            Self::Indicator(field, expected) => {
                let label = record.label(field).unwrap_or_default();
                FeatureValue::Int(i64::from(label == expected))
            }
        }
    }
}

/// An explicit, versioned column contract between encoder and model.
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    id: SchemaId,
    columns: Vec<ColumnSpec>,
    slots: Vec<Slot>,
    /// Accepted labels per categorical field, in form order.
    categories: BTreeMap<Field, Vec<&'static str>>,
}

impl FeatureSchema {
    /// Declare a schema.
    ///
    /// # Errors
    /// Returns [`SchemaError`] if the declaration is inconsistent.
    pub fn new(id: SchemaId, columns: Vec<ColumnSpec>) -> Result<Self, SchemaError> {
        if columns.is_empty() {
            return Err(SchemaError::Empty {
                schema: id.to_string(),
            });
        }

        let mut names = BTreeSet::new();
        let mut ordinal_fields = BTreeSet::new();
        let mut indicator_fields = BTreeSet::new();
        let mut categories: BTreeMap<Field, Vec<&'static str>> = BTreeMap::new();
        let mut slots = Vec::with_capacity(columns.len());

        for spec in &columns {
            if !names.insert(spec.name) {
                return Err(SchemaError::DuplicateColumn {
                    column: spec.name.to_string(),
                });
            }

            match spec.rule {
                EncodingRule::Ordinal(table) => {
                    validate_table(spec.name, table)?;
                    if indicator_fields.contains(&spec.field) {
                        return Err(SchemaError::MixedCategoricalEncoding { field: spec.field });
                    }
                    if !ordinal_fields.insert(spec.field) {
                        return Err(SchemaError::DuplicateOrdinal { field: spec.field });
                    }
                    categories.insert(spec.field, table.iter().map(|(l, _)| *l).collect());
                }
                EncodingRule::Indicator(label) => {
                    if ordinal_fields.contains(&spec.field) {
                        return Err(SchemaError::MixedCategoricalEncoding { field: spec.field });
                    }
                    indicator_fields.insert(spec.field);
                    let labels = categories.entry(spec.field).or_default();
                    if labels.contains(&label) {
                        return Err(SchemaError::DuplicateIndicator {
                            field: spec.field,
                            label: label.to_string(),
                        });
                    }
                    labels.push(label);
                }
                _ => {}
            }

            slots.push(Slot::compile(spec)?);
        }

        Ok(Self {
            id,
            columns,
            slots,
            categories,
        })
    }

    #[must_use]
    pub fn id(&self) -> SchemaId {
        self.id
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Column names in model order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    /// Number of values every encoded vector carries.
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Whether any column reads `field`.
    #[must_use]
    pub fn uses(&self, field: Field) -> bool {
        self.columns.iter().any(|c| c.field == field)
    }

    /// Accepted labels for a categorical field (empty if the field is unused).
    #[must_use]
    pub fn categories(&self, field: Field) -> &[&'static str] {
        self.categories.get(&field).map_or(&[], Vec::as_slice)
    }

    /// Encode a record into this schema's column order.
    ///
    /// # Errors
    /// Returns [`EncodeError::InvalidCategory`] if a categorical label read
    /// by this schema is not declared. No vector is produced in that case.
    pub fn encode(&self, record: &PatientRecord) -> Result<FeatureVector, EncodeError> {
        for (field, accepted) in &self.categories {
            let label = record.label(*field).unwrap_or_default();
            if !accepted.iter().any(|a| *a == label) {
                return Err(EncodeError::InvalidCategory {
                    field: *field,
                    label: label.to_string(),
                    expected: accepted.join(", "),
                });
            }
        }

        Ok(FeatureVector {
            schema: self.id,
            values: self.slots.iter().map(|slot| slot.value(record)).collect(),
        })
    }
}

fn validate_table(column: &str, table: &[(&str, i64)]) -> Result<(), SchemaError> {
    if table.is_empty() {
        return Err(SchemaError::InvalidOrdinalTable {
            column: column.to_string(),
            reason: "no labels".into(),
        });
    }
    let mut labels = BTreeSet::new();
    let mut codes = BTreeSet::new();
    for (label, code) in table {
        if !labels.insert(*label) {
            return Err(SchemaError::InvalidOrdinalTable {
                column: column.to_string(),
                reason: format!("label {label:?} listed twice"),
            });
        }
        if !codes.insert(*code) {
            return Err(SchemaError::InvalidOrdinalTable {
                column: column.to_string(),
                reason: format!("code {code} assigned twice"),
            });
        }
    }
    Ok(())
}

/// The schemas this build knows how to encode for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaVariant {
    /// Single categorical code for smoking history, gender included.
    #[default]
    Ordinal,
    /// Smoking history one-hot encoded into four columns, gender dropped.
    OneHot,
}

impl SchemaVariant {
    pub const ORDINAL_ID: SchemaId = SchemaId {
        name: "diabetes-ordinal",
        version: 1,
    };

    pub const ONE_HOT_ID: SchemaId = SchemaId {
        name: "diabetes-onehot",
        version: 1,
    };

    #[must_use]
    pub fn id(self) -> SchemaId {
        match self {
            Self::Ordinal => Self::ORDINAL_ID,
            Self::OneHot => Self::ONE_HOT_ID,
        }
    }

    /// Column declaration for this variant.
    #[must_use]
    pub fn columns(self) -> Vec<ColumnSpec> {
        use EncodingRule::{Flag, Indicator, Integer, Ordinal, Real};

        match self {
            Self::Ordinal => vec![
                ColumnSpec::new("gender", Field::Gender, Ordinal(GENDER_CODES)),
                ColumnSpec::new("age", Field::Age, Integer),
                ColumnSpec::new("hypertension", Field::Hypertension, Flag),
                ColumnSpec::new("heart_disease", Field::HeartDisease, Flag),
                ColumnSpec::new("smoking_history", Field::SmokingHistory, Ordinal(SMOKING_CODES)),
                ColumnSpec::new("bmi", Field::Bmi, Real),
                ColumnSpec::new("HbA1c_level", Field::HbA1cLevel, Real),
                ColumnSpec::new("blood_glucose_level", Field::BloodGlucoseLevel, Integer),
            ],
            Self::OneHot => vec![
                ColumnSpec::new("age", Field::Age, Integer),
                ColumnSpec::new("hypertension", Field::Hypertension, Flag),
                ColumnSpec::new("heart_disease", Field::HeartDisease, Flag),
                ColumnSpec::new("bmi", Field::Bmi, Real),
                ColumnSpec::new("HbA1c_level", Field::HbA1cLevel, Real),
                ColumnSpec::new("blood_glucose_level", Field::BloodGlucoseLevel, Integer),
                ColumnSpec::new("smoking_history_current", Field::SmokingHistory, Indicator("current")),
                ColumnSpec::new("smoking_history_former", Field::SmokingHistory, Indicator("former")),
                ColumnSpec::new("smoking_history_never", Field::SmokingHistory, Indicator("never")),
                ColumnSpec::new(
                    "smoking_history_not current",
                    Field::SmokingHistory,
                    Indicator("not current"),
                ),
            ],
        }
    }

    /// Build the declared schema.
    ///
    /// # Errors
    /// Returns [`SchemaError`] if the declaration is inconsistent.
    pub fn schema(self) -> Result<FeatureSchema, SchemaError> {
        FeatureSchema::new(self.id(), self.columns())
    }
}

impl FromStr for SchemaVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ordinal" | "diabetes-ordinal@1" => Ok(Self::Ordinal),
            "onehot" | "one-hot" | "diabetes-onehot@1" => Ok(Self::OneHot),
            other => Err(format!("unknown schema {other:?} (expected ordinal or onehot)")),
        }
    }
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(gender: &str, smoking: &str) -> PatientRecord {
        PatientRecord::baseline(gender, smoking)
    }

    #[test]
    fn test_declared_schemas_build() {
        let ordinal = SchemaVariant::Ordinal.schema().expect("ordinal schema");
        assert_eq!(ordinal.width(), 8);
        assert_eq!(ordinal.id().to_string(), "diabetes-ordinal@1");

        let one_hot = SchemaVariant::OneHot.schema().expect("one-hot schema");
        assert_eq!(one_hot.width(), 10);
        assert!(!one_hot.uses(Field::Gender));
    }

    #[test]
    fn test_ordinal_column_order() {
        let schema = SchemaVariant::Ordinal.schema().expect("schema");
        assert_eq!(
            schema.column_names(),
            vec![
                "gender",
                "age",
                "hypertension",
                "heart_disease",
                "smoking_history",
                "bmi",
                "HbA1c_level",
                "blood_glucose_level",
            ]
        );
    }

    #[test]
    fn test_ordinal_encoding() {
        let schema = SchemaVariant::Ordinal.schema().expect("schema");
        let mut patient = record("Male", "current");
        patient.hypertension = true;

        let vector = schema.encode(&patient).expect("encode");
        assert_eq!(vector.schema(), SchemaVariant::ORDINAL_ID);
        assert_eq!(
            vector.values(),
            &[
                FeatureValue::Int(1),
                FeatureValue::Int(25),
                FeatureValue::Int(1),
                FeatureValue::Int(0),
                FeatureValue::Int(1),
                FeatureValue::Real(22.0),
                FeatureValue::Real(5.7),
                FeatureValue::Int(100),
            ]
        );
    }

    #[test]
    fn test_one_hot_encoding() {
        let schema = SchemaVariant::OneHot.schema().expect("schema");
        let patient = record("", "former");

        let vector = schema.encode(&patient).expect("encode");
        let tail: Vec<_> = vector.values()[6..].to_vec();
        assert_eq!(
            tail,
            vec![
                FeatureValue::Int(0),
                FeatureValue::Int(1),
                FeatureValue::Int(0),
                FeatureValue::Int(0),
            ]
        );
    }

    #[test]
    fn test_one_hot_rejects_labels_without_a_column() {
        let schema = SchemaVariant::OneHot.schema().expect("schema");
        for label in ["No Info", "ever"] {
            let err = schema.encode(&record("Female", label)).expect_err("must fail");
            assert!(matches!(
                err,
                EncodeError::InvalidCategory { field: Field::SmokingHistory, .. }
            ));
        }
    }

    #[test]
    fn test_unknown_gender_rejected() {
        let schema = SchemaVariant::Ordinal.schema().expect("schema");
        let err = schema.encode(&record("Other", "never")).expect_err("must fail");
        assert_eq!(
            err,
            EncodeError::InvalidCategory {
                field: Field::Gender,
                label: "Other".into(),
                expected: "Female, Male".into(),
            }
        );
    }

    #[test]
    fn test_label_matching_is_case_sensitive() {
        let schema = SchemaVariant::Ordinal.schema().expect("schema");
        assert!(schema.encode(&record("female", "never")).is_err());
        assert!(schema.encode(&record("Female", "Never")).is_err());
    }

    #[test]
    fn test_categories_follow_form_order() {
        let schema = SchemaVariant::Ordinal.schema().expect("schema");
        assert_eq!(schema.categories(Field::Gender), &["Female", "Male"]);
        assert_eq!(schema.categories(Field::SmokingHistory)[0], "never");
        assert!(schema.categories(Field::Age).is_empty());
    }

    #[test]
    fn test_rejects_incompatible_rule() {
        let err = FeatureSchema::new(
            SchemaId { name: "t", version: 1 },
            vec![ColumnSpec::new("age", Field::Age, EncodingRule::Real)],
        )
        .expect_err("must fail");
        assert!(matches!(err, SchemaError::IncompatibleRule { .. }));

        let err = FeatureSchema::new(
            SchemaId { name: "t", version: 1 },
            vec![ColumnSpec::new("gender", Field::Gender, EncodingRule::Flag)],
        )
        .expect_err("must fail");
        assert!(matches!(err, SchemaError::IncompatibleRule { field: Field::Gender, .. }));
    }

    #[test]
    fn test_rejects_duplicate_column() {
        let err = FeatureSchema::new(
            SchemaId { name: "t", version: 1 },
            vec![
                ColumnSpec::new("age", Field::Age, EncodingRule::Integer),
                ColumnSpec::new("age", Field::BloodGlucoseLevel, EncodingRule::Integer),
            ],
        )
        .expect_err("must fail");
        assert_eq!(err, SchemaError::DuplicateColumn { column: "age".into() });
    }

    #[test]
    fn test_rejects_mixed_categorical_encoding() {
        let err = FeatureSchema::new(
            SchemaId { name: "t", version: 1 },
            vec![
                ColumnSpec::new("smoking", Field::SmokingHistory, EncodingRule::Ordinal(SMOKING_CODES)),
                ColumnSpec::new("smoking_never", Field::SmokingHistory, EncodingRule::Indicator("never")),
            ],
        )
        .expect_err("must fail");
        assert_eq!(
            err,
            SchemaError::MixedCategoricalEncoding { field: Field::SmokingHistory }
        );

        // Indicator first, then an ordinal table that shares its label.
        let err = FeatureSchema::new(
            SchemaId { name: "t", version: 1 },
            vec![
                ColumnSpec::new("smoking_never", Field::SmokingHistory, EncodingRule::Indicator("never")),
                ColumnSpec::new("smoking", Field::SmokingHistory, EncodingRule::Ordinal(SMOKING_CODES)),
            ],
        )
        .expect_err("must fail");
        assert_eq!(
            err,
            SchemaError::MixedCategoricalEncoding { field: Field::SmokingHistory }
        );
    }

    #[test]
    fn test_rejects_bad_ordinal_tables() {
        const DUP_CODES: &[(&str, i64)] = &[("a", 0), ("b", 0)];
        let err = FeatureSchema::new(
            SchemaId { name: "t", version: 1 },
            vec![ColumnSpec::new("g", Field::Gender, EncodingRule::Ordinal(DUP_CODES))],
        )
        .expect_err("must fail");
        assert!(matches!(err, SchemaError::InvalidOrdinalTable { .. }));

        let err = FeatureSchema::new(
            SchemaId { name: "t", version: 1 },
            vec![ColumnSpec::new("g", Field::Gender, EncodingRule::Ordinal(&[]))],
        )
        .expect_err("must fail");
        assert!(matches!(err, SchemaError::InvalidOrdinalTable { .. }));
    }

    #[test]
    fn test_rejects_empty_schema() {
        let err = FeatureSchema::new(SchemaId { name: "t", version: 1 }, vec![])
            .expect_err("must fail");
        assert_eq!(err, SchemaError::Empty { schema: "t@1".into() });
    }

    #[test]
    fn test_variant_parsing() {
        assert_eq!("ordinal".parse::<SchemaVariant>(), Ok(SchemaVariant::Ordinal));
        assert_eq!("One-Hot".parse::<SchemaVariant>(), Ok(SchemaVariant::OneHot));
        assert_eq!(
            "diabetes-onehot@1".parse::<SchemaVariant>(),
            Ok(SchemaVariant::OneHot)
        );
        assert!("xgb".parse::<SchemaVariant>().is_err());
    }

    #[test]
    fn test_vector_serializes_typed_values() {
        let schema = SchemaVariant::Ordinal.schema().expect("schema");
        let vector = schema.encode(&record("Female", "never")).expect("encode");
        let json = serde_json::to_value(&vector).expect("serialize");
        assert_eq!(json["schema"], "diabetes-ordinal@1");
        assert_eq!(json["values"][0], serde_json::json!(0));
        assert_eq!(json["values"][5], serde_json::json!(22.0));
    }
}
