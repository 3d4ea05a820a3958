use super::*;

#[test]
fn new_layer_populates_every_style_field() {
    let layer = TextLayer::new(LayerId(7));
    assert_eq!(layer.id, LayerId(7));
    assert_eq!(layer.text, "");
    assert_eq!(layer.color, Rgba8::WHITE);
    assert_eq!(layer.x, DEFAULT_LAYER_X);
    assert_eq!(layer.font_size, DEFAULT_FONT_SIZE);
    assert!(!layer.shadow.enabled);
    assert_eq!(layer.shadow.color, Rgba8::BLACK);
    assert_eq!(layer.shadow.blur, 4.0);
    assert_eq!(layer.shadow.offset_x, 2.0);
    assert_eq!(layer.shadow.offset_y, 2.0);
    layer.validate().unwrap();
}

#[test]
fn patch_merges_field_by_field() {
    let mut layer = TextLayer::new(LayerId(0));
    layer.y = 80.0;

    let patch = LayerPatch {
        text: Some("Hi".to_string()),
        x: Some(50.0),
        ..LayerPatch::default()
    };
    patch.apply_to(&mut layer);

    assert_eq!(layer.text, "Hi");
    assert_eq!(layer.x, 50.0);
    // untouched fields keep their prior values
    assert_eq!(layer.y, 80.0);
    assert_eq!(layer.color, Rgba8::WHITE);
    assert_eq!(layer.font_size, DEFAULT_FONT_SIZE);
}

#[test]
fn shadow_patch_is_partial_too() {
    let mut layer = TextLayer::new(LayerId(0));
    let patch = LayerPatch {
        shadow: Some(ShadowPatch {
            enabled: Some(true),
            blur: Some(9.0),
            ..ShadowPatch::default()
        }),
        ..LayerPatch::default()
    };
    patch.apply_to(&mut layer);

    assert!(layer.shadow.enabled);
    assert_eq!(layer.shadow.blur, 9.0);
    assert_eq!(layer.shadow.color, Rgba8::BLACK);
    assert_eq!(layer.shadow.offset_x, 2.0);
}

#[test]
fn empty_patch_is_identity() {
    let mut layer = TextLayer::new(LayerId(3));
    layer.text = "keep".to_string();
    let before = layer.clone();
    LayerPatch::default().apply_to(&mut layer);
    assert_eq!(layer, before);
}

#[test]
fn validate_rejects_zero_font_size() {
    let mut layer = TextLayer::new(LayerId(0));
    layer.font_size = 0;
    assert!(layer.validate().is_err());
}

#[test]
fn validate_rejects_non_finite_position() {
    let mut layer = TextLayer::new(LayerId(0));
    layer.x = f64::NAN;
    assert!(layer.validate().is_err());

    let mut layer = TextLayer::new(LayerId(0));
    layer.y = f64::INFINITY;
    assert!(layer.validate().is_err());
}

#[test]
fn validate_allows_out_of_bounds_position() {
    let mut layer = TextLayer::new(LayerId(0));
    layer.x = -500.0;
    layer.y = 1.0e6;
    layer.validate().unwrap();
}

#[test]
fn validate_rejects_oversized_text() {
    let mut layer = TextLayer::new(LayerId(0));
    layer.text = "x".repeat(MAX_TEXT_BYTES + 1);
    assert!(layer.validate().is_err());

    layer.text = "x".repeat(MAX_TEXT_BYTES);
    layer.validate().unwrap();
}

#[test]
fn validate_rejects_negative_shadow_blur() {
    let mut layer = TextLayer::new(LayerId(0));
    layer.shadow.blur = -1.0;
    assert!(layer.validate().is_err());
}

#[test]
fn validate_rejects_oversized_shadow_blur() {
    let mut layer = TextLayer::new(LayerId(0));
    layer.shadow.blur = MAX_SHADOW_BLUR + 1.0;
    assert!(layer.validate().is_err());

    layer.shadow.blur = MAX_SHADOW_BLUR;
    layer.validate().unwrap();
}

#[test]
fn layer_without_shadow_field_deserializes_with_defaults() {
    let json = r##"{"id":1,"text":"hello","color":"#ffffff","x":20.0,"y":40.0,"font_size":24}"##;
    let layer: TextLayer = serde_json::from_str(json).unwrap();
    assert!(!layer.shadow.enabled);
    assert_eq!(layer.shadow.blur, 4.0);
}

#[test]
fn id_serializes_as_number() {
    let json = serde_json::to_value(LayerId(12)).unwrap();
    assert_eq!(json, serde_json::json!(12));
}
