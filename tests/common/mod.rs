//! 测试共用的内存版 Moltbook

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use moltbook_daily::clients::MoltbookApi;
use moltbook_daily::error::{AppError, AppResult};
use moltbook_daily::models::moltbook::{AgentProfile, AgentStatus, Author, Comment, CreatedPost, Post};
use moltbook_daily::models::{CommentPayload, PostPayload, QuestionQueue};
use moltbook_daily::workflow::RunCtx;

pub const AGENT_NAME: &str = "daily-asker";

/// 记录所有写操作的内存平台
pub struct FakeApi {
    pub status: String,
    pub recent_posts: Vec<Post>,
    pub feeds: HashMap<String, Vec<Post>>,
    pub comments: HashMap<String, Vec<Comment>>,
    pub fail_post: bool,
    /// 回复这些 id 时返回错误（评论 id 或帖子 id）
    pub failing_targets: HashSet<String>,
    pub created_posts: Mutex<Vec<PostPayload>>,
    pub created_comments: Mutex<Vec<(String, CommentPayload)>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            status: "claimed".to_string(),
            recent_posts: Vec::new(),
            feeds: HashMap::new(),
            comments: HashMap::new(),
            fail_post: false,
            failing_targets: HashSet::new(),
            created_posts: Mutex::new(Vec::new()),
            created_comments: Mutex::new(Vec::new()),
        }
    }

    /// m/general 下一个短标题帖子，挂上给定的评论
    pub fn with_thread(mut self, post_id: &str, comments: Vec<Comment>) -> Self {
        self.feeds
            .entry("general".to_string())
            .or_default()
            .push(post(post_id, "Short title", None, Some("someone")));
        self.comments.insert(post_id.to_string(), comments);
        self
    }

    pub fn posts(&self) -> Vec<PostPayload> {
        self.created_posts.lock().unwrap().clone()
    }

    /// 回复的目标 id（评论回复取 parent_id，否则取帖子 id）
    pub fn reply_targets(&self) -> Vec<String> {
        self.created_comments
            .lock()
            .unwrap()
            .iter()
            .map(|(post_id, payload)| payload.parent_id.clone().unwrap_or_else(|| post_id.clone()))
            .collect()
    }
}

fn rejected(endpoint: &str) -> AppError {
    AppError::BadResponse {
        endpoint: endpoint.to_string(),
        status: 500,
        body: "internal error".to_string(),
    }
}

#[async_trait]
impl MoltbookApi for FakeApi {
    async fn agent_status(&self) -> AppResult<AgentStatus> {
        Ok(AgentStatus {
            status: self.status.clone(),
        })
    }

    async fn agent_profile(&self, _name: &str) -> AppResult<AgentProfile> {
        Ok(AgentProfile {
            recent_posts: self.recent_posts.clone(),
        })
    }

    async fn create_post(&self, payload: &PostPayload) -> AppResult<CreatedPost> {
        if self.fail_post {
            return Err(rejected("/posts"));
        }
        let mut posts = self.created_posts.lock().unwrap();
        posts.push(payload.clone());
        Ok(CreatedPost {
            post: Some(post(&format!("own-{}", posts.len()), &payload.title, None, Some(AGENT_NAME))),
        })
    }

    async fn submolt_feed(&self, submolt: &str, _limit: usize) -> AppResult<Vec<Post>> {
        Ok(self.feeds.get(submolt).cloned().unwrap_or_default())
    }

    async fn post_comments(&self, post_id: &str) -> AppResult<Vec<Comment>> {
        Ok(self.comments.get(post_id).cloned().unwrap_or_default())
    }

    async fn create_comment(&self, post_id: &str, payload: &CommentPayload) -> AppResult<()> {
        let target = payload.parent_id.as_deref().unwrap_or(post_id);
        if self.failing_targets.contains(target) {
            return Err(rejected("/comments"));
        }
        self.created_comments
            .lock()
            .unwrap()
            .push((post_id.to_string(), payload.clone()));
        Ok(())
    }
}

pub fn post(id: &str, title: &str, content: Option<&str>, author: Option<&str>) -> Post {
    Post {
        id: Some(id.to_string()),
        title: Some(title.to_string()),
        content: content.map(str::to_string),
        author: author.map(|name| Author {
            name: Some(name.to_string()),
        }),
        created_at: None,
    }
}

pub fn comment(id: &str, content: &str, author: &str) -> Comment {
    Comment {
        id: Some(id.to_string()),
        content: Some(content.to_string()),
        author: Some(Author {
            name: Some(author.to_string()),
        }),
    }
}

/// 指定长度的正常评论
pub fn thoughtful(len: usize) -> String {
    let base = "I think the answer depends on how we weigh long term effects against short term ones. ";
    let mut text: String = base.chars().cycle().take(len.saturating_sub(1)).collect();
    text.push('.');
    text
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn sample_queue() -> QuestionQueue {
    QuestionQueue::parse(
        "What is one habit that changed how you think?\n\
         Which tool do you wish more agents used?\n\
         What should every newcomer read first?\n",
        "test",
    )
    .unwrap()
}

/// 某天对应队列中第一题的上下文
pub fn ctx_on(today: NaiveDate) -> RunCtx {
    let queue = sample_queue();
    RunCtx::new(today, queue.get(0).clone(), queue.len())
}
