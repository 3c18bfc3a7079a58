//! yUML rendering service
//!
//! Turning yUML text into an image is done by the yuml.me web service: the
//! DSL is POSTed as a form field, the service answers with the path of a
//! generated image, and the image is then downloaded. Each request is made
//! once; any failure aborts the whole render.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Result};
use reqwest::blocking::Client;
use tracing::{debug, info, span, warn, Level};

use crate::core::DiagramError;

/// Default service endpoint
pub const DEFAULT_BASE_URL: &str = "https://yuml.me";

/// Drawing style offered by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum DiagramStyle {
    #[default]
    Plain,
    Scruffy,
}

impl fmt::Display for DiagramStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagramStyle::Plain => write!(f, "plain"),
            DiagramStyle::Scruffy => write!(f, "scruffy"),
        }
    }
}

impl FromStr for DiagramStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" => Ok(DiagramStyle::Plain),
            "scruffy" => Ok(DiagramStyle::Scruffy),
            _ => Err(format!("Unknown diagram style: {}", s)),
        }
    }
}

/// An image returned by the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDiagram {
    /// Path of the image on the service, e.g. `abc123.png`
    pub image_path: String,
    pub bytes: Vec<u8>,
}

impl RenderedDiagram {
    /// Write the image to `path`, replacing any existing file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DiagramError> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}

/// Something that can turn yUML text into an image
pub trait DiagramService: Send + Sync {
    fn render(&self, yuml: &str, style: DiagramStyle) -> Result<RenderedDiagram>;
}

/// Blocking client for the yuml.me API
pub struct YumlClient {
    base_url: String,
    client: Client,
}

impl YumlClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Form endpoint the DSL is posted to
    pub fn diagram_url(&self, style: DiagramStyle) -> String {
        format!("{}/diagram/{}/class/", self.base_url, style)
    }

    pub fn image_url(&self, image_path: &str) -> String {
        format!("{}/{}", self.base_url, image_path.trim_start_matches('/'))
    }

    fn request_image_path(&self, yuml: &str, style: DiagramStyle) -> Result<String> {
        let response = self
            .client
            .post(self.diagram_url(style))
            .form(&[("dsl_text", yuml)])
            .send()
            .map_err(|e| anyhow!("yUML request failed: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(anyhow!("yUML error ({}): {}", status, body));
        }

        let body = response.text()?;
        Ok(validate_image_path(&body)?)
    }

    fn download(&self, image_path: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(self.image_url(image_path))
            .send()
            .map_err(|e| anyhow!("Image download failed: {}", e))?;

        if !response.status().is_success() {
            return Err(anyhow!("Image download failed ({})", response.status()));
        }

        Ok(response.bytes()?.to_vec())
    }
}

impl DiagramService for YumlClient {
    fn render(&self, yuml: &str, style: DiagramStyle) -> Result<RenderedDiagram> {
        let render_span = span!(Level::INFO, "render_yuml", %style, dsl_len = yuml.len());
        let _enter = render_span.enter();

        let image_path = self.request_image_path(yuml, style).inspect_err(|e| {
            warn!(error = %e, "yUML service rejected the diagram");
        })?;
        debug!(image_path = %image_path, "Image path received");

        let bytes = self.download(&image_path)?;
        info!(bytes = bytes.len(), "Diagram image downloaded");
        Ok(RenderedDiagram { image_path, bytes })
    }
}

/// The service answers with a bare image path; anything else is an error
/// message in disguise.
pub fn validate_image_path(body: &str) -> Result<String, DiagramError> {
    let path = body.trim();
    if path.ends_with(".png") {
        Ok(path.to_string())
    } else {
        Err(DiagramError::service_error(format!(
            "Path to image was not received: {}",
            path
        )))
    }
}
