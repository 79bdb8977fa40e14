use super::{DailyMosaic, ExportRequest, ImageCatalog};
use crate::collections::CollectionId;
use crate::error::ConfigError;
use anyhow::{anyhow, Result};
use futures_util::StreamExt;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::File;
use std::io::Write;
use url::Url;

const DEFAULT_API: &str = "https://catalog.earthengine.app/v1";

const API_VAR: &str = "GEEDAILY_API";
const TOKEN_VAR: &str = "GEEDAILY_TOKEN";

/// HTTP client for an Earth Engine style catalog. Holds the one
/// authenticated session of the process; constructed once at startup and
/// handed to the orchestrator.
#[derive(Debug)]
pub struct EarthEngine {
    api: Url,
    token: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ExportBody<'a> {
    image: &'a DailyMosaic,
    scale: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    crs: Option<&'a str>,
    #[serde(rename = "fileFormat")]
    file_format: &'static str,
}

#[derive(Deserialize)]
struct ExportStarted {
    #[serde(rename = "downloadUrl")]
    download_url: Url,
}

impl EarthEngine {
    pub fn new(api: Url, token: String) -> Self {
        Self { api, token, client: reqwest::Client::new() }
    }

    /// Build the session from the environment: endpoint from `GEEDAILY_API`
    /// (falling back to the public catalog), access token from
    /// `GEEDAILY_TOKEN` (required).
    pub fn from_env() -> Result<Self> {
        let api = match std::env::var(API_VAR) {
            Ok(raw) => Url::parse(&raw)?,
            Err(_) => Url::parse(DEFAULT_API).expect("default API url should always parse"),
        };
        let token = std::env::var(TOKEN_VAR).map_err(|_| ConfigError::MissingToken(TOKEN_VAR))?;
        Ok(Self::new(api, token))
    }

    fn endpoint(self: &Self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("Catalog API url cannot be a base: {}", self.api))?
            .extend(segments);
        Ok(url)
    }
}

impl ImageCatalog for EarthEngine {
    async fn validate_collection(self: &Self, id: &CollectionId) -> Result<bool> {
        let url = self.endpoint(&["collections", id.as_str()])?;
        let response = self.client.get(url).bearer_auth(&self.token).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => Err(anyhow!(
                "Catalog returned {} while validating '{}'",
                status,
                id.as_str()
            )),
        }
    }

    async fn export(self: &Self, image: &DailyMosaic, request: &ExportRequest<'_>) -> Result<()> {
        if request.dest.exists() {
            println!("Output file already exists: {}", request.dest.display());
            return Ok(());
        }

        let body = ExportBody {
            image,
            scale: request.scale,
            crs: request.crs,
            file_format: "GEO_TIFF",
        };

        let started: ExportStarted = self
            .client
            .post(self.endpoint(&["exports"])?)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        // Stream the raster to a .partial file and rename once complete, so
        // an interrupted transfer never masquerades as a finished export.
        let partial = request.dest.with_extension("tif.partial");
        let mut file = File::create(&partial)?;

        let response = self
            .client
            .get(started.download_url)
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?;

        let mut stream = response.bytes_stream();
        while let Some(bytes) = stream.next().await {
            file.write_all(&bytes?)?;
        }

        fs::rename(partial, &request.dest)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_requires_token() {
        // Neither variable is set anywhere in this test binary, so the
        // default endpoint is used and the token lookup is what fails.
        std::env::remove_var(API_VAR);
        std::env::remove_var(TOKEN_VAR);
        let err = EarthEngine::from_env().unwrap_err();
        assert!(err.to_string().contains(TOKEN_VAR));
    }

    #[tokio::test]
    async fn test_export_skips_existing_output() {
        let dest = std::path::PathBuf::from("/tmp/geedaily_test_skip_existing.tif");
        fs::write(&dest, b"previous run").unwrap();

        // An unroutable endpoint: the skip must return before any request.
        let engine = EarthEngine::new(
            Url::parse("http://127.0.0.1:9/v1").unwrap(),
            "token".to_string(),
        );
        let aoi = crate::aoi::Aoi::from_geometry(serde_json::json!({ "type": "Point" }));
        let image = DailyMosaic::compose(
            &CollectionId::from("A/1"),
            chrono::NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            &aoi,
        );

        engine
            .export(&image, &ExportRequest::new(&dest, 30, None))
            .await
            .unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"previous run");
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let engine = EarthEngine::new(
            Url::parse("https://example.com/v1").unwrap(),
            "token".to_string(),
        );
        let url = engine
            .endpoint(&["collections", "MODIS/006/MOD13Q1"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/v1/collections/MODIS%2F006%2FMOD13Q1"
        );
    }

    #[test]
    fn test_export_body_omits_unset_crs() {
        let aoi = crate::aoi::Aoi::from_geometry(serde_json::json!({ "type": "Point" }));
        let image = DailyMosaic::compose(
            &CollectionId::from("A/1"),
            chrono::NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            &aoi,
        );
        let body = ExportBody { image: &image, scale: 30, crs: None, file_format: "GEO_TIFF" };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("crs").is_none());

        let body = ExportBody {
            image: &image,
            scale: 30,
            crs: Some("EPSG:4326"),
            file_format: "GEO_TIFF",
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["crs"], "EPSG:4326");
    }
}
