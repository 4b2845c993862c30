/// Moltbook API 客户端
///
/// 封装所有与 Moltbook REST API 相关的调用逻辑
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use crate::clients::MoltbookApi;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::moltbook::{
    AgentProfile, AgentStatus, Comment, CreatedPost, Listing, Post, PostDetail,
};
use crate::models::payload::{CommentPayload, PostPayload};
use crate::utils::logging::truncate_text;

/// Moltbook 客户端
pub struct MoltbookClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl MoltbookClient {
    /// 创建新的客户端
    pub fn new(config: &Config, api_key: impl Into<String>) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|source| AppError::Network {
                endpoint: config.api_base_url.clone(),
                source,
            })?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            api_key: api_key.into(),
        })
    }

    /// 发帖接口地址（预览时展示）
    pub fn posts_url(base_url: &str) -> String {
        format!("{}/posts", base_url.trim_end_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key)
    }

    /// 发送请求，非 2xx 返回 BadResponse，成功时返回原始响应体
    async fn send_raw(&self, builder: RequestBuilder, endpoint: &str) -> AppResult<String> {
        let response = builder.send().await.map_err(|source| AppError::Network {
            endpoint: endpoint.to_string(),
            source,
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| AppError::Network {
            endpoint: endpoint.to_string(),
            source,
        })?;

        debug!("{} -> {} ({} 字节)", endpoint, status, body.len());

        if !status.is_success() {
            return Err(AppError::BadResponse {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body: truncate_text(body.trim(), 200),
            });
        }

        Ok(body)
    }

    /// 发送请求并解析 JSON 响应
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder, endpoint: &str) -> AppResult<T> {
        let body = self.send_raw(builder, endpoint).await?;
        let body = if body.trim().is_empty() { "{}" } else { body.as_str() };
        serde_json::from_str(body).map_err(|e| AppError::json(endpoint, e))
    }
}

#[async_trait]
impl MoltbookApi for MoltbookClient {
    async fn agent_status(&self) -> AppResult<AgentStatus> {
        self.send(self.request(Method::GET, "/agents/status"), "/agents/status")
            .await
    }

    async fn agent_profile(&self, name: &str) -> AppResult<AgentProfile> {
        let builder = self
            .request(Method::GET, "/agents/profile")
            .query(&[("name", name)]);
        self.send(builder, "/agents/profile").await
    }

    async fn create_post(&self, payload: &PostPayload) -> AppResult<CreatedPost> {
        let builder = self.request(Method::POST, "/posts").json(payload);
        self.send(builder, "/posts").await
    }

    async fn submolt_feed(&self, submolt: &str, limit: usize) -> AppResult<Vec<Post>> {
        let limit = limit.to_string();
        let builder = self.request(Method::GET, "/posts").query(&[
            ("submolt", submolt),
            ("sort", "new"),
            ("limit", limit.as_str()),
        ]);
        let listing: Listing<Post> = self.send(builder, "/posts").await?;
        Ok(listing.into_items())
    }

    async fn post_comments(&self, post_id: &str) -> AppResult<Vec<Comment>> {
        let path = format!("/posts/{}/comments", post_id);
        let builder = self
            .request(Method::GET, &path)
            .query(&[("sort", "new")]);

        match self.send::<Listing<Comment>>(builder, &path).await {
            Ok(listing) => Ok(listing.into_items()),
            // 部分部署不支持 GET 评论列表，改为从帖子详情里取
            Err(e) if e.status() == Some(StatusCode::METHOD_NOT_ALLOWED.as_u16()) => {
                warn!("评论列表接口返回 405，改用帖子详情: {}", post_id);
                let path = format!("/posts/{}", post_id);
                let detail: PostDetail = self.send(self.request(Method::GET, &path), &path).await?;
                Ok(detail.comments)
            }
            Err(e) => Err(e),
        }
    }

    async fn create_comment(&self, post_id: &str, payload: &CommentPayload) -> AppResult<()> {
        let path = format!("/posts/{}/comments", post_id);
        let builder = self.request(Method::POST, &path).json(payload);
        // 只看状态码，2xx 即已回复，响应体不一定是 JSON
        self.send_raw(builder, &path).await?;
        Ok(())
    }
}
