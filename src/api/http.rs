// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Downline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Downline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{ApiError, MemberApi};
use crate::model::{MemberId, MemberPayload, SearchResult, TreeNode};

/// `reqwest`-backed [`MemberApi`].
#[derive(Debug, Clone)]
pub struct HttpMemberApi {
    client: Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl HttpMemberApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = parse_base_url(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("downline/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins percent-encoded path segments onto the base url.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|err| {
            log::warn!("request failed: {err}");
            ApiError::from(err)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.json::<ErrorBody>().await.ok().and_then(|body| body.message);
        log::warn!("{} responded with {status}: {message:?}", self.base_url);
        Err(ApiError::Status { status: status.as_u16(), message })
    }

    async fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl MemberApi for HttpMemberApi {
    async fn fetch_tree(&self) -> Result<Vec<TreeNode>, ApiError> {
        let url = self.endpoint(&["members", "tree"])?;
        log::debug!("GET {url}");
        self.get_json(self.client.get(url)).await
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ApiError> {
        let url = self.endpoint(&["members"])?;
        log::debug!("GET {url}?q={query}");
        self.get_json(self.client.get(url).query(&[("q", query)])).await
    }

    async fn create_member(&self, payload: &MemberPayload) -> Result<(), ApiError> {
        let url = self.endpoint(&["members"])?;
        log::debug!("POST {url}");
        self.send(self.client.post(url).json(payload)).await?;
        Ok(())
    }

    async fn update_member(&self, id: &MemberId, payload: &MemberPayload) -> Result<(), ApiError> {
        let url = self.endpoint(&["members", id.as_str()])?;
        log::debug!("PUT {url}");
        self.send(self.client.put(url).json(payload)).await?;
        Ok(())
    }

    async fn delete_member(&self, id: &MemberId) -> Result<(), ApiError> {
        let url = self.endpoint(&["members", id.as_str()])?;
        log::debug!("DELETE {url}");
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn delete_member_cascade(&self, id: &MemberId) -> Result<(), ApiError> {
        let url = self.endpoint(&["members", "cascade", id.as_str()])?;
        log::debug!("DELETE {url}");
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|err| ApiError::InvalidUrl(format!("{raw}: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl(raw.to_owned()));
    }
    Ok(url)
}
