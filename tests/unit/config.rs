use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "showcase_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn defaults_match_stock_collage() {
    let cfg = ShowcaseConfig::default();
    assert_eq!(cfg.icon_sources.len(), 17);
    assert_eq!(
        cfg.canvas,
        Size {
            width: 1000,
            height: 400
        }
    );
    assert_eq!(cfg.icon_size, 40);
    assert_eq!(cfg.background.to_hex(), "#253142");
    assert_eq!(cfg.placements, 800);
    assert_eq!(cfg.layout, LayoutStrategy::grid());
    assert_eq!(cfg.pace(), Duration::from_millis(500));
    assert_eq!(cfg.http_timeout(), None);
    assert_eq!(cfg.converter, ConverterKind::Remote);
    assert!(cfg.validate().is_ok());
}

#[test]
fn partial_json_keeps_defaults() {
    let tmp = temp_dir("config_partial");
    std::fs::create_dir_all(&tmp).unwrap();
    let path = tmp.join("showcase.json");
    std::fs::write(
        &path,
        r##"{
            "placements": 12,
            "background": "#000000",
            "converter": "local",
            "layout": {"kind": "random", "margin": 10, "max_rotation_deg": 45},
            "http_timeout_secs": 30
        }"##,
    )
    .unwrap();

    let cfg = ShowcaseConfig::from_json_file(&path).unwrap();
    assert_eq!(cfg.placements, 12);
    assert_eq!(cfg.background, Rgba8::rgb(0, 0, 0));
    assert_eq!(cfg.converter, ConverterKind::Local);
    assert_eq!(cfg.layout.name(), "random");
    assert_eq!(cfg.http_timeout(), Some(Duration::from_secs(30)));
    assert_eq!(cfg.icon_size, 40);
    assert_eq!(cfg.icon_sources.len(), 17);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn unknown_fields_and_bad_values_are_rejected() {
    let tmp = temp_dir("config_bad");
    std::fs::create_dir_all(&tmp).unwrap();

    let path = tmp.join("typo.json");
    std::fs::write(&path, r#"{"placement": 3}"#).unwrap();
    let err = ShowcaseConfig::from_json_file(&path).unwrap_err();
    assert!(matches!(err, ShowcaseError::Serde(_)), "{err}");

    let path = tmp.join("zero.json");
    std::fs::write(&path, r#"{"icon_size": 0}"#).unwrap();
    let err = ShowcaseConfig::from_json_file(&path).unwrap_err();
    assert!(matches!(err, ShowcaseError::Validation(_)), "{err}");

    assert!(ShowcaseConfig::from_json_file(&tmp.join("missing.json")).is_err());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn converter_kind_selects_backend() {
    let cfg = ShowcaseConfig {
        converter: ConverterKind::Local,
        ..ShowcaseConfig::default()
    };
    // Local conversion never touches the transport, so a failing one is fine.
    struct NoNetwork;
    impl crate::net::Transport for NoNetwork {
        fn get_bytes(&self, url: &str) -> ShowcaseResult<Vec<u8>> {
            Err(ShowcaseError::fetch(url.to_owned()))
        }
        fn post_form(
            &self,
            url: &str,
            _fields: &[(&str, &str)],
        ) -> ShowcaseResult<crate::net::HttpResponse> {
            Err(ShowcaseError::fetch(url.to_owned()))
        }
    }

    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"><rect width="4" height="4"/></svg>"#;
    assert!(cfg.build_converter().convert(&NoNetwork, svg).is_ok());

    let remote = ShowcaseConfig::default().build_converter();
    assert!(matches!(
        remote.convert(&NoNetwork, svg),
        Err(ShowcaseError::Fetch(_))
    ));
}
