use std::{future::Future, time::Duration};

use anyhow::Context;
use dashboard_common::DashboardError;
use serde::de::DeserializeOwned;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }
}

pub trait HttpTransport {
    fn get(&self, path: &str) -> impl Future<Output = Result<RawResponse, DashboardError>>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("failed to build http client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl HttpTransport for ReqwestTransport {
    async fn get(&self, path: &str) -> Result<RawResponse, DashboardError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| DashboardError::transport(path, err))?;

        let status = response.status();
        if !status.is_success() {
            return Ok(RawResponse::status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|err| DashboardError::transport(path, err))?;
        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Response {
    path: String,
    body: String,
}

impl Response {
    pub fn text(&self) -> &str {
        &self.body
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, DashboardError> {
        serde_json::from_str(&self.body).map_err(|err| DashboardError::body_parse(&self.path, err))
    }
}

pub struct ResourceFetcher<T> {
    transport: T,
}

impl<T: HttpTransport> ResourceFetcher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub async fn fetch(&self, path: &str) -> Result<Response, DashboardError> {
        let raw = self.transport.get(path).await?;
        if !(200..300).contains(&raw.status) {
            return Err(DashboardError::HttpStatus {
                path: path.to_string(),
                status: raw.status,
            });
        }

        debug!("GET {path} -> {} ({} bytes)", raw.status, raw.body.len());
        Ok(Response {
            path: path.to_string(),
            body: raw.body,
        })
    }
}
