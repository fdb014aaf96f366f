//! HTTP implementation of [`TrackerApi`]

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::types::{Device, Geofence, NewGeofence, Permission, Position, Server, StatisticsRecord, User};
use super::TrackerApi;
use crate::config::ServerConfig;
use crate::error::{ApiError, ApiResult};
use crate::statistics::statistics_query;
use crate::status::links::media_path;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Thin reqwest wrapper bound to one server
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Builds a client from the `[server]` config section
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is unusable or the HTTP client
    /// cannot be constructed
    pub fn new(config: &ServerConfig) -> ApiResult<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if reqwest::Url::parse(&base_url).is_err() {
            return Err(ApiError::InvalidUrl(base_url));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::Http(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            token: config.token.clone().filter(|t| !t.is_empty()),
        })
    }

    /// Base URL all paths are resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and turns a non-success status into an error
    /// carrying the response body text
    async fn send(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url().path());

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!("Server returned {}: {}", status.as_u16(), body);
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let response = self.send(builder).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl TrackerApi for ApiClient {
    async fn session(&self) -> ApiResult<User> {
        self.send_json(self.request(Method::GET, "/api/session")).await
    }

    async fn server(&self) -> ApiResult<Server> {
        self.send_json(self.request(Method::GET, "/api/server")).await
    }

    async fn devices(&self) -> ApiResult<Vec<Device>> {
        self.send_json(self.request(Method::GET, "/api/devices")).await
    }

    async fn positions(&self) -> ApiResult<Vec<Position>> {
        self.send_json(self.request(Method::GET, "/api/positions")).await
    }

    async fn delete_device(&self, id: i64) -> ApiResult<()> {
        let path = format!("/api/devices/{}", id);
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    async fn create_geofence(&self, geofence: &NewGeofence) -> ApiResult<Geofence> {
        let builder = self.request(Method::POST, "/api/geofences").json(geofence);
        self.send_json(builder).await
    }

    async fn delete_geofence(&self, id: i64) -> ApiResult<()> {
        let path = format!("/api/geofences/{}", id);
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    async fn create_permission(&self, permission: &Permission) -> ApiResult<()> {
        let builder = self.request(Method::POST, "/api/permissions").json(permission);
        self.send(builder).await?;
        Ok(())
    }

    async fn statistics(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ApiResult<Vec<StatisticsRecord>> {
        let builder = self
            .request(Method::GET, "/api/statistics")
            .query(&statistics_query(from, to));
        self.send_json(builder).await
    }

    async fn media(&self, unique_id: &str, name: &str) -> ApiResult<Vec<u8>> {
        let path = media_path(unique_id, name);
        let response = self.send(self.request(Method::GET, &path)).await?;
        Ok(response.bytes().await?.to_vec())
    }
}
