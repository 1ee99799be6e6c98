//! JSON-over-HTTP client for the remote anchor store.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use tracing::{debug, warn};

use am_core::device::{Device, PublicKey};
use am_core::ports::{ConnectionError, ConnectionPort};
use am_core::registration::AnchorInfo;
use am_core::Anchor;

pub struct HttpConnection {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpConnection {
    /// `timeout` of `None` keeps the client default.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("build http client failed")?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        })
    }

    fn anchor_url(&self, anchor: &Anchor) -> String {
        format!("{}/anchors/{}", self.endpoint, anchor)
    }

    fn device_url(&self, anchor: &Anchor, public_key: &PublicKey) -> String {
        format!("{}/devices/{}", self.anchor_url(anchor), public_key.to_hex())
    }

    async fn status_error(response: Response) -> ConnectionError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        warn!(status, "anchor store returned an error status");
        ConnectionError::Status { status, body }
    }
}

fn transport(err: reqwest::Error) -> ConnectionError {
    ConnectionError::Transport(err.to_string())
}

#[async_trait]
impl ConnectionPort for HttpConnection {
    async fn get_anchor_info(&self, anchor: &Anchor) -> Result<AnchorInfo, ConnectionError> {
        let url = self.anchor_url(anchor);
        debug!(%url, "GET anchor info");
        let response = self.client.get(&url).send().await.map_err(transport)?;

        match response.status() {
            status if status.is_success() => response
                .json::<AnchorInfo>()
                .await
                .map_err(|e| ConnectionError::Decode(e.to_string())),
            StatusCode::NOT_FOUND => Err(ConnectionError::AnchorNotFound(anchor.to_string())),
            _ => Err(Self::status_error(response).await),
        }
    }

    async fn remove(&self, anchor: &Anchor, public_key: &PublicKey) -> Result<(), ConnectionError> {
        let url = self.device_url(anchor, public_key);
        debug!(%url, "DELETE device");
        let response = self.client.delete(&url).send().await.map_err(transport)?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(ConnectionError::DeviceNotFound(public_key.fingerprint())),
            _ => Err(Self::status_error(response).await),
        }
    }

    async fn add(&self, anchor: &Anchor, device: Device) -> Result<(), ConnectionError> {
        let url = format!("{}/devices", self.anchor_url(anchor));
        debug!(%url, alias = %device.alias(), "POST device");
        let response = self
            .client
            .post(&url)
            .json(&device)
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(ConnectionError::AnchorNotFound(anchor.to_string())),
            _ => Err(Self::status_error(response).await),
        }
    }
}
