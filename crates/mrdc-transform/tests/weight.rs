//! Tests for weight normalization.

use polars::prelude::*;

use mrdc_transform::TransformError;
use mrdc_transform::normalization::normalize_weight;

fn weight_frame(values: Vec<Option<&str>>) -> DataFrame {
    DataFrame::new(vec![Series::new("weight".into(), values).into()]).unwrap()
}

#[test]
fn test_weights_in_kilograms() {
    let df = weight_frame(vec![
        Some("2 x 200g"),
        Some("600ml"),
        Some("0.6kg"),
        Some("16oz"),
        Some("16g ."),
        Some("11.6g"),
        None,
    ]);
    let df = normalize_weight(df).unwrap();
    let col = df.column("weight").unwrap().f64().unwrap();
    let expected = [0.4, 0.6, 0.6, 0.4536, 0.016, 0.0116];
    for (idx, want) in expected.iter().enumerate() {
        let got = col.get(idx).unwrap();
        assert!((got - want).abs() <= 0.001, "row {idx}: expected {want}, got {got}");
    }
    assert_eq!(col.get(6), None);
}

#[test]
fn test_ounces_rounded_to_grams() {
    let df = normalize_weight(weight_frame(vec![Some("16oz")])).unwrap();
    let col = df.column("weight").unwrap().f64().unwrap();
    assert_eq!(col.get(0), Some(0.454));
}

#[test]
fn test_unparseable_weight() {
    let err = normalize_weight(weight_frame(vec![Some("a lot")])).unwrap_err();
    match err {
        TransformError::InvalidNumber { column, value, .. } => {
            assert_eq!(column, "weight");
            assert_eq!(value, "a lot");
        }
        other => panic!("unexpected error: {other}"),
    }
}
