//! Marketplace HTTP client.

use std::path::Path;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use tracing::debug;

use plugship_core::{
    BinaryRecord, Expand, PlatformVersion, PluginRecord, StoreClient, StoreError,
};

use crate::types::{
    AuthRequest, PlatformVersionDto, PluginDto, SaveBinaryBody, TokenResponse,
};

/// Client for the marketplace REST API.
///
/// Carries the bearer token obtained by [`MarketplaceClient::authenticate`];
/// all further calls send it. Request timeouts live here, not in the release
/// workflow.
pub struct MarketplaceClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl MarketplaceClient {
    /// Creates a client for the store at `base_url`.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");

        let base_url = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Exchanges credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Auth`] when the store refuses the credentials,
    /// or a transport/API error for any other failure.
    pub async fn authenticate(&mut self, username: &str, password: &str) -> Result<(), StoreError> {
        let url = format!("{}/api/auth/token", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&AuthRequest { username, password })
            .send()
            .await
            .map_err(|err| transport(&url, err))?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Err(StoreError::Auth {
                username: username.to_string(),
            });
        }
        let response = into_api_error(response).await?;

        let token: TokenResponse = response.json().await.map_err(|err| transport(&url, err))?;
        self.token = Some(token.token);
        debug!(%username, "authenticated against the store");
        Ok(())
    }

    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and decodes the plugin snapshot it returns.
    async fn fetch_plugin(
        &self,
        builder: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<PluginRecord, StoreError> {
        let response = builder.send().await.map_err(|err| transport(url, err))?;
        let response = into_api_error(response).await?;
        let dto: PluginDto = response.json().await.map_err(|err| transport(url, err))?;
        Ok(dto.into())
    }
}

impl StoreClient for MarketplaceClient {
    async fn find_plugin(
        &self,
        name: &str,
        expand: &[Expand],
    ) -> Result<Option<PluginRecord>, StoreError> {
        let expand = expand
            .iter()
            .map(|entity| entity.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let url = format!("{}/api/plugins/{name}", self.base_url);
        debug!(%url, %expand, "looking up plugin");

        let response = self
            .request(Method::GET, &url)
            .query(&[("expand", expand.as_str())])
            .send()
            .await
            .map_err(|err| transport(&url, err))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = into_api_error(response).await?;
        let dto: PluginDto = response.json().await.map_err(|err| transport(&url, err))?;
        Ok(Some(dto.into()))
    }

    async fn enable_partial_encryption(
        &self,
        plugin: PluginRecord,
    ) -> Result<PluginRecord, StoreError> {
        let url = format!(
            "{}/api/plugins/{}/partial-encryption",
            self.base_url, plugin.id
        );
        self.fetch_plugin(self.request(Method::POST, &url), &url)
            .await
    }

    async fn upload_binary(
        &self,
        plugin: PluginRecord,
        archive: &Path,
    ) -> Result<PluginRecord, StoreError> {
        let url = format!("{}/api/plugins/{}/binaries", self.base_url, plugin.id);
        debug!(%url, archive = %archive.display(), "uploading new binary");
        let form = archive_form(archive, &url).await?;
        self.fetch_plugin(self.request(Method::POST, &url).multipart(form), &url)
            .await
    }

    async fn update_binary(
        &self,
        plugin: PluginRecord,
        target: &BinaryRecord,
        archive: &Path,
    ) -> Result<PluginRecord, StoreError> {
        let url = format!(
            "{}/api/plugins/{}/binaries/{}/content",
            self.base_url, plugin.id, target.id
        );
        debug!(%url, archive = %archive.display(), "replacing binary content");
        let form = archive_form(archive, &url).await?;
        self.fetch_plugin(self.request(Method::POST, &url).multipart(form), &url)
            .await
    }

    async fn save_plugin_binary(
        &self,
        plugin: PluginRecord,
        binary: BinaryRecord,
    ) -> Result<PluginRecord, StoreError> {
        let url = format!(
            "{}/api/plugins/{}/binaries/{}",
            self.base_url, plugin.id, binary.id
        );
        self.fetch_plugin(
            self.request(Method::PUT, &url)
                .json(&SaveBinaryBody::from_record(&binary)),
            &url,
        )
        .await
    }

    async fn request_binary_review(
        &self,
        plugin: PluginRecord,
    ) -> Result<PluginRecord, StoreError> {
        let binary = plugin
            .latest_binary
            .as_ref()
            .ok_or_else(|| StoreError::Malformed {
                reason: "no staged binary to submit for review".to_string(),
            })?;
        let url = format!(
            "{}/api/plugins/{}/binaries/{}/review",
            self.base_url, plugin.id, binary.id
        );
        self.fetch_plugin(self.request(Method::POST, &url), &url)
            .await
    }

    async fn platform_versions(&self) -> Result<Vec<PlatformVersion>, StoreError> {
        let url = format!("{}/api/platform-versions", self.base_url);
        let response = self
            .request(Method::GET, &url)
            .send()
            .await
            .map_err(|err| transport(&url, err))?;
        let response = into_api_error(response).await?;
        let versions: Vec<PlatformVersionDto> =
            response.json().await.map_err(|err| transport(&url, err))?;
        Ok(versions.into_iter().map(Into::into).collect())
    }
}

fn transport(url: &str, source: impl std::error::Error + Send + Sync + 'static) -> StoreError {
    StoreError::Transport {
        url: url.to_string(),
        source: Box::new(source),
    }
}

/// Maps a non-success status into [`StoreError::Api`] with the response body.
async fn into_api_error(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(StoreError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Builds the multipart form carrying the archive content.
async fn archive_form(archive: &Path, url: &str) -> Result<reqwest::multipart::Form, StoreError> {
    let bytes = tokio::fs::read(archive)
        .await
        .map_err(|err| transport(url, err))?;
    let file_name = archive
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("plugin.zip")
        .to_string();
    let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
    Ok(reqwest::multipart::Form::new().part("file", part))
}
