pub mod moltbook_client;

pub use moltbook_client::MoltbookClient;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::moltbook::{AgentProfile, AgentStatus, Comment, CreatedPost, Post};
use crate::models::payload::{CommentPayload, PostPayload};

/// agent 流程依赖的平台能力
///
/// 真实实现是 [`MoltbookClient`]，测试里用内存实现替换。
#[async_trait]
pub trait MoltbookApi: Send + Sync {
    async fn agent_status(&self) -> AppResult<AgentStatus>;

    async fn agent_profile(&self, name: &str) -> AppResult<AgentProfile>;

    async fn create_post(&self, payload: &PostPayload) -> AppResult<CreatedPost>;

    /// 某个 submolt 最新的帖子
    async fn submolt_feed(&self, submolt: &str, limit: usize) -> AppResult<Vec<Post>>;

    async fn post_comments(&self, post_id: &str) -> AppResult<Vec<Comment>>;

    async fn create_comment(&self, post_id: &str, payload: &CommentPayload) -> AppResult<()>;
}
