use medi_diagnosis::codes::{self, HEART_TABLES};
use medi_diagnosis::{encode_heart, encode_heart_checked, DiagnosisKind, HeartInput, UNMAPPED_CODE};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn scenario_input() -> HeartInput {
    HeartInput {
        age: 55,
        sex: "Male".into(),
        chest_pain_type: "Asymptomatic".into(),
        resting_bp: 140,
        serum_cholesterol: 250,
        fasting_blood_sugar_high: "Yes".into(),
        resting_ecg: "Normal".into(),
        max_heart_rate: 130,
        exercise_angina: "No".into(),
        st_depression: 2.0,
        st_slope: "Flat".into(),
        num_major_vessels: 1,
        thalassemia: "Fixed Defect".into(),
    }
}

#[test]
fn documented_scenario_encodes_exactly() {
    init();
    let v = encode_heart(&scenario_input());
    assert_eq!(
        v.into_inner(),
        vec![55.0, 1.0, 3.0, 140.0, 250.0, 1.0, 0.0, 130.0, 0.0, 2.0, 1.0, 1.0, 1.0]
    );
}

#[test]
fn unknown_chest_pain_becomes_sentinel_without_error() {
    init();
    let mut input = scenario_input();
    input.chest_pain_type = "Unknown Pain".into();
    let encoded = encode_heart_checked(&input);
    assert_eq!(encoded.vector.len(), 13);
    assert_eq!(encoded.vector.as_slice()[2], f64::from(UNMAPPED_CODE));
    assert_eq!(encoded.unmapped.len(), 1);
    assert_eq!(encoded.unmapped[0].field, "chest_pain_type");
    assert_eq!(encoded.unmapped[0].value, "Unknown Pain");
}

#[test]
fn every_table_value_lands_at_its_index() {
    let index_of = |field: &str| {
        DiagnosisKind::Heart
            .feature_names()
            .iter()
            .position(|f| *f == field)
            .unwrap()
    };
    for table in HEART_TABLES {
        for (label, code) in table.entries {
            let mut input = scenario_input();
            match table.field {
                "sex" => input.sex = label.to_string(),
                "chest_pain_type" => input.chest_pain_type = label.to_string(),
                "fasting_blood_sugar_high" => input.fasting_blood_sugar_high = label.to_string(),
                "resting_ecg" => input.resting_ecg = label.to_string(),
                "exercise_angina" => input.exercise_angina = label.to_string(),
                "st_slope" => input.st_slope = label.to_string(),
                "thalassemia" => input.thalassemia = label.to_string(),
                other => panic!("unexpected table {other}"),
            }
            let v = encode_heart(&input);
            assert_eq!(
                v.as_slice()[index_of(table.field)],
                f64::from(*code),
                "{} = {label}",
                table.field
            );
        }
    }
}

#[test]
fn yes_no_fields_accept_any_case() {
    for value in ["yes", "YES", "Yes", "yEs"] {
        let mut input = scenario_input();
        input.exercise_angina = value.into();
        input.fasting_blood_sugar_high = value.into();
        let v = encode_heart(&input);
        assert_eq!(v.as_slice()[5], 1.0);
        assert_eq!(v.as_slice()[8], 1.0);
    }
    for value in ["female", "FEMALE", "Female"] {
        let mut input = scenario_input();
        input.sex = value.into();
        assert_eq!(encode_heart(&input).as_slice()[1], 0.0);
    }
}

#[test]
fn unlisted_yes_no_value_is_unmapped() {
    let mut input = scenario_input();
    input.exercise_angina = "maybe".into();
    input.sex = "".into();
    let encoded = encode_heart_checked(&input);
    assert_eq!(encoded.vector.as_slice()[1], -1.0);
    assert_eq!(encoded.vector.as_slice()[8], -1.0);
    assert_eq!(encoded.unmapped.len(), 2);
}

#[test]
fn decoder_recovers_labels_from_vector() {
    let v = encode_heart(&scenario_input());
    let s = v.as_slice();
    assert_eq!(codes::CHEST_PAIN_TYPE.label_of(s[2] as i32), Some("Asymptomatic"));
    assert_eq!(codes::ST_SLOPE.label_of(s[10] as i32), Some("Flat"));
    assert_eq!(codes::THALASSEMIA.label_of(s[12] as i32), Some("Fixed Defect"));
}

fn arb_label(table: &'static codes::CategoryTable) -> impl Strategy<Value = String> {
    prop_oneof![
        proptest::sample::select(table.labels().collect::<Vec<_>>()).prop_map(str::to_string),
        "[a-zA-Z -]{0,24}",
    ]
}

prop_compose! {
    fn arb_heart()(
        age in 0u32..=120,
        sex in arb_label(&codes::SEX),
        chest_pain_type in arb_label(&codes::CHEST_PAIN_TYPE),
        resting_bp in 50u32..=200,
        serum_cholesterol in 100u32..=600,
        fasting_blood_sugar_high in arb_label(&codes::FASTING_BLOOD_SUGAR_HIGH),
        resting_ecg in arb_label(&codes::RESTING_ECG),
        max_heart_rate in 60u32..=220,
        exercise_angina in arb_label(&codes::EXERCISE_ANGINA),
        st_depression in 0.0f64..=10.0,
        st_slope in arb_label(&codes::ST_SLOPE),
        num_major_vessels in 0u8..=3,
        thalassemia in arb_label(&codes::THALASSEMIA),
    ) -> HeartInput {
        HeartInput {
            age, sex, chest_pain_type, resting_bp, serum_cholesterol,
            fasting_blood_sugar_high, resting_ecg, max_heart_rate, exercise_angina,
            st_depression, st_slope, num_major_vessels, thalassemia,
        }
    }
}

proptest! {
    #[test]
    fn encoding_is_total_and_idempotent(input in arb_heart()) {
        let a = encode_heart_checked(&input);
        let b = encode_heart_checked(&input);
        prop_assert_eq!(a.vector.len(), 13);
        prop_assert_eq!(&a, &b);
    }

    #[test]
    fn numeric_fields_pass_through(input in arb_heart()) {
        let v = encode_heart(&input);
        let s = v.as_slice();
        prop_assert_eq!(s[0], f64::from(input.age));
        prop_assert_eq!(s[3], f64::from(input.resting_bp));
        prop_assert_eq!(s[4], f64::from(input.serum_cholesterol));
        prop_assert_eq!(s[7], f64::from(input.max_heart_rate));
        prop_assert_eq!(s[9], input.st_depression);
        prop_assert_eq!(s[11], f64::from(input.num_major_vessels));
    }

    #[test]
    fn categorical_slots_hold_code_or_sentinel(input in arb_heart()) {
        let encoded = encode_heart_checked(&input);
        let s = encoded.vector.as_slice();
        let slots = [
            (1, &codes::SEX, &input.sex),
            (2, &codes::CHEST_PAIN_TYPE, &input.chest_pain_type),
            (5, &codes::FASTING_BLOOD_SUGAR_HIGH, &input.fasting_blood_sugar_high),
            (6, &codes::RESTING_ECG, &input.resting_ecg),
            (8, &codes::EXERCISE_ANGINA, &input.exercise_angina),
            (10, &codes::ST_SLOPE, &input.st_slope),
            (12, &codes::THALASSEMIA, &input.thalassemia),
        ];
        let mut misses = 0;
        for (idx, table, value) in slots {
            match table.code_of(value) {
                Some(code) => prop_assert_eq!(s[idx], f64::from(code)),
                None => {
                    misses += 1;
                    prop_assert_eq!(s[idx], -1.0);
                }
            }
        }
        prop_assert_eq!(misses, encoded.unmapped.len());
    }
}
