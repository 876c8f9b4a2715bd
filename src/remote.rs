//! Remote diagram rendering over HTTP.
//!
//! The diagram source is sent as URL-safe base64 (padded) in the last path
//! segment of a GET request; a 200 response body is the rendered image.

use std::path::Path;
use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::{output, Error, RendererConfig, Result};

/// Use case diagram rendered when no source document is available.
pub const FALLBACK_USE_CASE_DIAGRAM: &str = r#"graph LR
    subgraph System [Fashion Store System]
        ip1(Browse Products)
        ip2(Add to Cart)
        ip3(Checkout)
        ip4(View Order History)
        ip5(Manage Products)
        ip6(Manage Orders)
        ip7(View Dashboard)
    end

    c((Customer)) --> ip1
    c --> ip2
    c --> ip3
    c --> ip4

    a((Admin)) --> ip5
    a --> ip6
    a --> ip7
"#;

/// URL-safe base64 of the UTF-8 source, with padding.
pub fn encode_diagram(source: &str) -> String {
    URL_SAFE.encode(source.as_bytes())
}

/// Outcome of a successful download
#[derive(Debug, Clone)]
pub struct FetchReport {
    pub url: String,
    pub bytes: usize,
}

/// Blocking client for a Mermaid-compatible image endpoint.
pub struct DiagramRenderer {
    client: Client,
    endpoint: url::Url,
}

impl DiagramRenderer {
    pub fn new(config: &RendererConfig) -> Result<Self> {
        let endpoint = parse_endpoint(&config.endpoint)?;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::NetworkError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, endpoint })
    }

    /// Full request URL for `source`.
    pub fn render_url(&self, source: &str) -> String {
        format!("{}{}", self.endpoint, encode_diagram(source))
    }

    /// Download the rendered image. Any status other than 200 is an error
    /// carrying the status code and the response body.
    pub fn fetch(&self, source: &str) -> Result<Vec<u8>> {
        let url = self.render_url(source);
        log::info!("Downloading diagram from: {}", url);

        let resp = self.client.get(&url).send()?;
        let status = resp.status();
        if status != StatusCode::OK {
            let body = match resp.bytes() {
                Ok(raw) => String::from_utf8_lossy(&raw).into_owned(),
                Err(e) => format!("<failed to read response body: {}>", e),
            };
            return Err(Error::RemoteFetch {
                status: status.as_u16(),
                body,
            });
        }
        let bytes = resp.bytes()?;
        Ok(bytes.to_vec())
    }

    /// Download and write the body verbatim to `out`. Nothing is written on
    /// failure.
    pub fn fetch_to_file(&self, source: &str, out: &Path) -> Result<FetchReport> {
        let bytes = self.fetch(source)?;
        output::write_bytes(out, &bytes)?;
        log::info!("Wrote {} bytes to {}", bytes.len(), out.display());
        Ok(FetchReport {
            url: self.render_url(source),
            bytes: bytes.len(),
        })
    }

    /// Render the built-in use case diagram.
    pub fn fetch_fallback_to_file(&self, out: &Path) -> Result<FetchReport> {
        self.fetch_to_file(FALLBACK_USE_CASE_DIAGRAM, out)
    }
}

/// Validate the endpoint and make sure it ends with a slash so the encoded
/// diagram becomes its own path segment.
fn parse_endpoint(raw: &str) -> Result<url::Url> {
    let mut endpoint = url::Url::parse(raw)
        .map_err(|e| Error::ConfigError(format!("endpoint {:?}: {}", raw, e)))?;
    if !matches!(endpoint.scheme(), "http" | "https") {
        return Err(Error::ConfigError(format!("endpoint {:?} must be http or https", raw)));
    }
    if !endpoint.path().ends_with('/') {
        let path = format!("{}/", endpoint.path());
        endpoint.set_path(&path);
    }
    Ok(endpoint)
}
