use super::*;

fn empty_session() -> Session {
    Session::new(Compositor::new(Vec::new()))
}

fn opaque_background(width: u32, height: u32) -> PreparedImage {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for i in 0..(width * height) {
        data.extend_from_slice(&[(i % 251) as u8, (i % 241) as u8, (i % 239) as u8, 255]);
    }
    PreparedImage {
        width,
        height,
        rgba8_premul: std::sync::Arc::new(data),
    }
}

#[test]
fn add_layer_cascades_y_and_assigns_fresh_ids() {
    let mut session = empty_session();
    let a = session.add_layer().unwrap();
    let b = session.add_layer().unwrap();
    let c = session.add_layer().unwrap();

    assert!(a < b && b < c);
    let ys: Vec<f64> = session.layers().iter().map(|l| l.y).collect();
    assert_eq!(
        ys,
        vec![
            LAYER_Y_BASE,
            LAYER_Y_BASE + LAYER_Y_STRIDE,
            LAYER_Y_BASE + 2.0 * LAYER_Y_STRIDE
        ]
    );
}

#[test]
fn ids_are_never_reused_after_removal() {
    let mut session = empty_session();
    let a = session.add_layer().unwrap();
    session.remove_layer(a);
    let b = session.add_layer().unwrap();
    assert_ne!(a, b);
}

#[test]
fn update_unknown_id_is_a_silent_noop() {
    let mut session = empty_session();
    session.add_layer().unwrap();
    let before = session.layers().to_vec();

    let patch = LayerPatch {
        text: Some("ignored".to_string()),
        ..LayerPatch::default()
    };
    session.update_layer(LayerId(999), &patch);
    assert_eq!(session.layers(), &before[..]);
}

#[test]
fn remove_unknown_id_is_a_silent_noop() {
    let mut session = empty_session();
    session.add_layer().unwrap();
    session.remove_layer(LayerId(999));
    assert_eq!(session.layers().len(), 1);
}

#[test]
fn update_preserves_layer_position() {
    let mut session = empty_session();
    let a = session.add_layer().unwrap();
    let b = session.add_layer().unwrap();

    let patch = LayerPatch {
        text: Some("first".to_string()),
        ..LayerPatch::default()
    };
    session.update_layer(a, &patch);

    assert_eq!(session.layers()[0].id, a);
    assert_eq!(session.layers()[0].text, "first");
    assert_eq!(session.layers()[1].id, b);
}

#[test]
fn add_layer_enforces_collection_cap() {
    let mut session = empty_session();
    for _ in 0..MAX_LAYERS {
        session.add_layer().unwrap();
    }
    assert!(matches!(
        session.add_layer(),
        Err(ScrawlError::Validation(_))
    ));
    assert_eq!(session.layers().len(), MAX_LAYERS);
}

#[test]
fn preview_before_background_attach_fails_gracefully() {
    let mut session = empty_session();
    assert!(!session.background_ready());
    assert!(matches!(
        session.render_preview(),
        Err(ScrawlError::Asset(_))
    ));
}

#[test]
fn preview_with_background_and_no_layers_passes_it_through() {
    let mut session = empty_session();
    let background = opaque_background(8, 6);
    session.attach_background(background.clone());
    assert!(session.background_ready());

    let frame = session.render_preview().unwrap();
    assert_eq!(frame.width, 8);
    assert_eq!(frame.height, 6);
    assert!(frame.premultiplied);
    assert_eq!(&frame.data, background.rgba8_premul.as_ref());
}

#[test]
fn download_before_background_attach_fails_gracefully() {
    struct Unreachable;
    impl RegenerateEndpoint for Unreachable {
        fn regenerate(
            &mut self,
            _payload: &[u8],
        ) -> ScrawlResult<crate::transport::download::EncodedImage> {
            panic!("endpoint must not be contacted before the background is ready");
        }
    }

    let session = empty_session();
    assert!(matches!(
        session.request_download(&mut Unreachable),
        Err(ScrawlError::Asset(_))
    ));
}
