use super::*;

struct Canned(Vec<u8>);

impl Transport for Canned {
    fn get_bytes(&self, _url: &str) -> ShowcaseResult<Vec<u8>> {
        Ok(self.0.clone())
    }

    fn post_form(&self, _url: &str, _fields: &[(&str, &str)]) -> ShowcaseResult<HttpResponse> {
        Ok(HttpResponse {
            status: 200,
            body: self.0.clone(),
        })
    }
}

#[test]
fn remote_detection_matches_http_schemes_only() {
    assert!(is_remote("https://cdn.test/icon.svg"));
    assert!(is_remote("http://cdn.test/icon.svg"));
    assert!(!is_remote("./icons/rust-original.png"));
    assert!(!is_remote("ftp://cdn.test/icon.svg"));
}

#[test]
fn default_get_text_decodes_lossily() {
    let t = Canned(vec![b'<', b's', 0xff, b'>']);
    let text = t.get_text("https://x").unwrap();
    assert!(text.starts_with("<s"));
    assert!(text.ends_with('>'));
}

#[test]
fn response_status_helpers() {
    let ok = HttpResponse {
        status: 200,
        body: b"png".to_vec(),
    };
    assert!(ok.is_ok());
    let created = HttpResponse {
        status: 201,
        body: vec![],
    };
    assert!(!created.is_ok());
    assert_eq!(ok.text_lossy(), "png");
}

#[test]
fn reqwest_transport_builds_with_and_without_timeout() {
    ReqwestTransport::new(None).unwrap();
    ReqwestTransport::new(Some(Duration::from_secs(5))).unwrap();
}
