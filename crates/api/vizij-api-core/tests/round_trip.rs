use vizij_api_core::{Color, ColorModel, ConversionError, Value, ValueKind, Vectorize, VectorizedValue};

fn round_trip<T: Vectorize + PartialEq + std::fmt::Debug>(value: T) {
    let v = value.vectorize().expect("vectorize");
    assert_eq!(v.arity(), v.kind().arity());
    let back = T::devectorize(&v).expect("devectorize");
    assert_eq!(back, value);
}

#[test]
fn scalars_round_trip() {
    for x in [0.0, -0.0, -42.5, 1.0, f64::MAX, f64::MIN_POSITIVE] {
        round_trip(x);
        round_trip(Value::Float(x));
    }
    round_trip(0.25f32);
}

#[test]
fn vectors_round_trip() {
    round_trip([0.0, -1.0]);
    round_trip([3.0, -4.0, 5.5]);
    round_trip([-1.0, 0.0, 1.0, 1e-12]);
    round_trip(Value::vec2(-10.0, 10.0));
    round_trip(Value::Vec4([0.0; 4]));
}

#[test]
fn geometry_round_trips() {
    round_trip(Value::rect(0.0, 0.0, 0.0, 0.0));
    round_trip(Value::rect(-5.0, 7.0, 100.0, 0.5));
    round_trip(Value::Insets {
        top: 1.0,
        left: -2.0,
        bottom: 0.0,
        right: 8.0,
    });
    round_trip(Value::identity_affine());
    round_trip(Value::Affine([0.0, -1.0, 1.0, 0.0, -20.0, 35.0]));
    round_trip(Value::identity_matrix4());
}

#[test]
fn colors_round_trip_at_boundaries() {
    round_trip(Color::rgba(0.0, 0.0, 0.0, 0.0));
    round_trip(Color::rgba(1.0, 1.0, 1.0, 1.0));
    round_trip(Color::hsba(0.0, 1.0, 1.0, 1.0));
    round_trip(Color::hsba(1.0, 0.5, 0.25, 0.0));
    round_trip(Color::gray(0.5, 1.0));
    round_trip(Color::cmyka(0.1, 0.2, 0.3, 0.4, 0.5));
    round_trip(Value::Color(Color::hsba(1.0, 1.0, 1.0, 1.0)));
}

#[test]
fn each_color_model_has_its_own_kind() {
    let kinds: Vec<ValueKind> = [ColorModel::Rgba, ColorModel::Hsba, ColorModel::Gray, ColorModel::Cmyka]
        .into_iter()
        .map(|m| Color::default().to_model(m).kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            ValueKind::ColorRgba,
            ValueKind::ColorHsba,
            ValueKind::ColorGray,
            ValueKind::ColorCmyka
        ]
    );
    for kind in &kinds {
        assert_eq!(ColorModel::from_kind(kind).map(ColorModel::kind).as_ref(), Some(kind));
    }
}

#[test]
fn nan_components_are_rejected_on_vectorize() {
    let err = Value::vec2(f64::NAN, 0.0).vectorize().unwrap_err();
    assert_eq!(
        err,
        ConversionError::NonFiniteComponent {
            kind: ValueKind::Vec2,
            index: 0
        }
    );
}

#[test]
fn devectorize_into_wrong_type_fails() {
    let rect = VectorizedValue::new(ValueKind::Rect, vec![0.0, 0.0, 1.0, 1.0]).unwrap();
    assert!(Color::devectorize(&rect).is_err());
    assert!(<[f64; 4]>::devectorize(&rect).is_err());
    assert_eq!(Value::devectorize(&rect).unwrap(), Value::rect(0.0, 0.0, 1.0, 1.0));
}
