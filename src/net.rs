use std::time::Duration;

use crate::foundation::error::{ShowcaseError, ShowcaseResult};

/// Status and body of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// Numeric HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Whether the exchange returned exactly `200 OK`.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// The HTTP operations the generator performs.
///
/// Every network call in the crate goes through this trait, so tests can swap in a stub that
/// counts requests and serves canned bodies.
pub trait Transport {
    /// GET `url` and return the body.
    ///
    /// Non-success statuses are [`ShowcaseError::HttpStatus`]; connection and read failures
    /// are [`ShowcaseError::Fetch`].
    fn get_bytes(&self, url: &str) -> ShowcaseResult<Vec<u8>>;

    /// POST `fields` as `application/x-www-form-urlencoded` and return the raw response.
    fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> ShowcaseResult<HttpResponse>;

    /// GET `url` and decode the body as UTF-8 text.
    fn get_text(&self, url: &str) -> ShowcaseResult<String> {
        let bytes = self.get_bytes(url)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Whether `source` names a remote resource rather than a local path.
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Blocking [`Transport`] backed by `reqwest`.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Build a client. `timeout` of `None` waits indefinitely.
    pub fn new(timeout: Option<Duration>) -> ShowcaseResult<Self> {
        let mut builder = reqwest::blocking::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(concat!("skills-showcase/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ShowcaseError::fetch(format!("build http client: {e}")))?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    #[tracing::instrument(skip(self))]
    fn get_bytes(&self, url: &str) -> ShowcaseResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ShowcaseError::fetch(format!("GET {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShowcaseError::http_status(url, status.as_u16()));
        }

        let body = response
            .bytes()
            .map_err(|e| ShowcaseError::fetch(format!("read body of {url}: {e}")))?;
        tracing::debug!(bytes = body.len(), "fetched");
        Ok(body.to_vec())
    }

    #[tracing::instrument(skip(self, fields))]
    fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> ShowcaseResult<HttpResponse> {
        let response = self
            .client
            .post(url)
            .form(fields)
            .send()
            .map_err(|e| ShowcaseError::fetch(format!("POST {url}: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| ShowcaseError::fetch(format!("read body of {url}: {e}")))?;
        tracing::debug!(status, bytes = body.len(), "posted form");
        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/net.rs"]
mod tests;
