//! End-to-end checks of the column contract: schema, encoder, bounds and
//! predictor wired together the way the application wires them.

use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use glucoscope::adapters::{CsvDataset, TreeEnsemble};
use glucoscope::application::{load_patient_bounds, AppContext, PredictionService};
use glucoscope::domain::{
    Bounds, EncodeError, FeatureValue, FeatureVector, Field, Label, PatientRecord, SchemaVariant,
};
use glucoscope::ports::{Predictor, PredictorError};
use glucoscope::{AppConfig, GlucoscopeError};
use proptest::prelude::*;
use tempfile::NamedTempFile;

#[derive(Default)]
struct CountingPredictor {
    calls: AtomicUsize,
}

impl Predictor for CountingPredictor {
    fn predict(&self, _features: &FeatureVector) -> Result<Label, PredictorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Label::Negative)
    }
}

fn patient(gender: &str, smoking: &str) -> PatientRecord {
    PatientRecord::baseline(gender, smoking)
}

#[test]
fn baseline_patient_encodes_to_documented_vector() {
    let schema = SchemaVariant::Ordinal.schema().expect("schema");
    let vector = schema.encode(&patient("Female", "never")).expect("encode");

    assert_eq!(vector.schema().to_string(), "diabetes-ordinal@1");
    assert_eq!(
        vector.values(),
        &[
            FeatureValue::Int(0),
            FeatureValue::Int(25),
            FeatureValue::Int(0),
            FeatureValue::Int(0),
            FeatureValue::Int(4),
            FeatureValue::Real(22.0),
            FeatureValue::Real(5.7),
            FeatureValue::Int(100),
        ]
    );
}

#[test]
fn unknown_smoking_label_never_reaches_predictor() {
    let schema = SchemaVariant::Ordinal.schema().expect("schema");
    let predictor = Arc::new(CountingPredictor::default());
    let service = PredictionService::new(schema, Arc::clone(&predictor));

    let err = service
        .assess(&patient("Female", "unknown"))
        .expect_err("must fail");

    match err {
        GlucoscopeError::Encode(EncodeError::InvalidCategory { field, label, .. }) => {
            assert_eq!(field, Field::SmokingHistory);
            assert_eq!(label, "unknown");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(predictor.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn encoding_is_deterministic_for_every_declared_label() {
    for variant in [SchemaVariant::Ordinal, SchemaVariant::OneHot] {
        let schema = variant.schema().expect("schema");
        let genders: Vec<&str> = if schema.uses(Field::Gender) {
            schema.categories(Field::Gender).to_vec()
        } else {
            vec![""]
        };

        for gender in &genders {
            for smoking in schema.categories(Field::SmokingHistory) {
                let record = patient(gender, smoking);
                let first = schema.encode(&record).expect("encode");
                let second = schema.encode(&record).expect("encode");

                assert_eq!(first, second, "{variant}: {gender}/{smoking}");
                assert_eq!(first.len(), schema.width());
            }
        }
    }
}

#[test]
fn one_hot_sets_exactly_one_smoking_indicator() {
    let schema = SchemaVariant::OneHot.schema().expect("schema");
    let names = schema.column_names();

    for smoking in schema.categories(Field::SmokingHistory) {
        let vector = schema.encode(&patient("Male", smoking)).expect("encode");
        let hot: Vec<&str> = names
            .iter()
            .zip(vector.values())
            .filter(|(name, _)| name.starts_with("smoking_history_"))
            .filter(|(_, value)| **value == FeatureValue::Int(1))
            .map(|(name, _)| *name)
            .collect();

        assert_eq!(hot, vec![format!("smoking_history_{smoking}").as_str()]);
    }
}

#[test]
fn dataset_bounds_round_trip_through_encoder() {
    let mut file = NamedTempFile::new().expect("tempfile");
    write!(
        file,
        "gender,age,hypertension,heart_disease,smoking_history,bmi,HbA1c_level,blood_glucose_level,diabetes\n\
         Female,80.0,0,1,never,25.19,6.6,140,0\n\
         Male,0.08,0,0,No Info,10.01,3.5,80,0\n\
         Female,52.0,1,0,former,95.69,9.0,300,1\n"
    )
    .expect("write");

    let dataset = CsvDataset::open(file.path()).expect("open");
    let bounds = load_patient_bounds(&dataset).expect("bounds");
    assert_eq!(bounds.integer("age"), Ok((0, 80)));

    for variant in [SchemaVariant::Ordinal, SchemaVariant::OneHot] {
        let schema = variant.schema().expect("schema");
        let smoking = schema.categories(Field::SmokingHistory)[0];

        let picks: [fn(&Bounds) -> f64; 2] = [Bounds::min_f64, Bounds::max_f64];
        for pick in picks {
            let mut record = patient("Female", smoking);
            for (field, _) in Field::numeric() {
                let value = pick(&bounds.field(field).expect("bounds"));
                match field {
                    Field::Age => record.age = value as i64,
                    Field::Bmi => record.bmi = value,
                    Field::HbA1cLevel => record.hba1c_level = value,
                    Field::BloodGlucoseLevel => record.blood_glucose_level = value as i64,
                    _ => unreachable!("non-numeric field"),
                }
            }

            let vector = schema.encode(&record).expect("encode");
            assert_eq!(vector.len(), schema.width());
            assert!(vector.to_f64().iter().all(|v| v.is_finite()));
        }
    }
}

#[test]
fn context_rejects_model_with_other_column_order() {
    let model = r#"{
        "format_version": 1,
        "feature_names": ["age", "gender", "hypertension", "heart_disease",
                          "smoking_history", "bmi", "HbA1c_level", "blood_glucose_level"],
        "trees": [ { "nodes": [ { "leaf": 0.0 } ] } ]
    }"#;
    let model = TreeEnsemble::from_json_str(model).expect("model");
    let schema = SchemaVariant::Ordinal.schema().expect("schema");
    let bounds = glucoscope::domain::BoundsTable::default();

    let err = AppContext::new(AppConfig::default(), schema, Arc::new(model), bounds)
        .err()
        .expect("must fail");
    assert!(matches!(err, GlucoscopeError::FeatureOrderMismatch { .. }));
}

#[test]
fn bundled_model_matches_ordinal_schema() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("models/diabetes_model.json");
    let model = TreeEnsemble::load(&path, false).expect("bundled model");
    let schema = SchemaVariant::Ordinal.schema().expect("schema");

    let context = AppContext::new(
        AppConfig::default(),
        schema,
        Arc::new(model),
        glucoscope::domain::BoundsTable::default(),
    )
    .expect("context");

    let baseline = context
        .service()
        .assess(&patient("Female", "never"))
        .expect("assess");
    assert_eq!(baseline.label, Label::Negative);
    assert!(baseline.probability.is_some());

    let mut elevated = patient("Male", "current");
    elevated.hba1c_level = 7.5;
    elevated.blood_glucose_level = 220;
    let elevated = context.service().assess(&elevated).expect("assess");
    assert_eq!(elevated.label, Label::Positive);
}

proptest! {
    #[test]
    fn width_and_order_are_constant(
        age in 0i64..=120,
        bmi in 10.0f64..100.0,
        hba1c in 3.0f64..10.0,
        glucose in 50i64..=400,
        hypertension in any::<bool>(),
        heart_disease in any::<bool>(),
        smoking_idx in 0usize..4,
    ) {
        for variant in [SchemaVariant::Ordinal, SchemaVariant::OneHot] {
            let schema = variant.schema().expect("schema");
            let smoking = schema.categories(Field::SmokingHistory)[smoking_idx];
            let record = PatientRecord {
                age,
                bmi,
                hba1c_level: hba1c,
                blood_glucose_level: glucose,
                gender: "Male".into(),
                hypertension,
                heart_disease,
                smoking_history: smoking.into(),
            };

            let vector = schema.encode(&record).expect("encode");
            prop_assert_eq!(vector.len(), schema.width());
            prop_assert_eq!(vector.schema(), schema.id());

            // Numeric columns carry the record's values at their declared positions.
            let names = schema.column_names();
            let age_at = names.iter().position(|n| *n == "age").expect("age column");
            prop_assert_eq!(vector.values()[age_at], FeatureValue::Int(age));
            let bmi_at = names.iter().position(|n| *n == "bmi").expect("bmi column");
            prop_assert_eq!(vector.values()[bmi_at], FeatureValue::Real(bmi));
        }
    }
}
