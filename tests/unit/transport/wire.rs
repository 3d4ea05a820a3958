use super::*;

use crate::foundation::color::Rgba8;
use crate::layer::model::{LayerId, Shadow};

fn sample_layer(id: u64) -> TextLayer {
    TextLayer {
        id: LayerId(id),
        text: "hello".to_string(),
        color: Rgba8::new(255, 136, 0, 255),
        x: 12.5,
        y: -3.0,
        font_size: 32,
        shadow: Shadow {
            enabled: true,
            color: Rgba8::BLACK,
            blur: 6.0,
            offset_x: 1.0,
            offset_y: 2.0,
        },
    }
}

#[test]
fn roundtrip_preserves_order_and_fields() {
    let layers = vec![sample_layer(2), sample_layer(0), sample_layer(1)];
    let bytes = encode_layers(&layers).unwrap();
    let back = decode_layers(&bytes).unwrap();
    assert_eq!(back, layers);
}

#[test]
fn numeric_fields_travel_as_numbers() {
    let bytes = encode_layers(&[sample_layer(0)]).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    let record = &value[0];
    assert!(record["id"].is_number());
    assert!(record["x"].is_number());
    assert!(record["y"].is_number());
    assert!(record["font_size"].is_number());
    assert!(record["shadow"]["blur"].is_number());
    assert!(record["color"].is_string());
}

#[test]
fn decode_rejects_wrong_shape() {
    assert!(matches!(
        decode_layers(b"{\"layers\": 3}"),
        Err(ScrawlError::Serde(_))
    ));
    assert!(matches!(decode_layers(b"not json"), Err(ScrawlError::Serde(_))));
}

#[test]
fn decode_rejects_missing_required_field() {
    // no color
    let payload = br##"[{"id":0,"text":"hi","x":1.0,"y":2.0,"font_size":24}]"##;
    assert!(matches!(
        decode_layers(payload),
        Err(ScrawlError::Serde(_))
    ));
}

#[test]
fn decode_rejects_string_font_size() {
    let payload =
        br##"[{"id":0,"text":"hi","color":"#ffffff","x":1.0,"y":2.0,"font_size":"24"}]"##;
    assert!(matches!(
        decode_layers(payload),
        Err(ScrawlError::Serde(_))
    ));
}

#[test]
fn decode_rejects_zero_font_size() {
    let payload = br##"[{"id":0,"text":"hi","color":"#ffffff","x":1.0,"y":2.0,"font_size":0}]"##;
    assert!(matches!(
        decode_layers(payload),
        Err(ScrawlError::Validation(_))
    ));
}

#[test]
fn decode_rejects_over_cap_collections() {
    let layers: Vec<TextLayer> = (0..(MAX_LAYERS as u64 + 1)).map(sample_layer).collect();
    let bytes = serde_json::to_vec(&layers).unwrap();
    assert!(matches!(
        decode_layers(&bytes),
        Err(ScrawlError::Validation(_))
    ));
}

#[test]
fn decode_accepts_empty_collection() {
    assert_eq!(decode_layers(b"[]").unwrap(), Vec::<TextLayer>::new());
}

#[test]
fn shadow_record_is_optional_on_the_wire() {
    let payload = br##"[{"id":4,"text":"hi","color":"#102030","x":0.0,"y":0.0,"font_size":16}]"##;
    let layers = decode_layers(payload).unwrap();
    assert!(!layers[0].shadow.enabled);
}
