use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// 帖子或评论的作者
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub name: Option<String>,
}

/// 平台上的帖子
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
}

impl Post {
    /// 发帖日期（解析失败返回 None）
    pub fn created_date(&self) -> Option<NaiveDate> {
        self.created_at.as_deref().and_then(parse_created_date)
    }
}

/// 帖子下的评论
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default, alias = "comment_id", deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
}

/// `GET /agents/status`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentStatus {
    #[serde(default)]
    pub status: String,
}

impl AgentStatus {
    pub fn is_claimed(&self) -> bool {
        self.status == "claimed"
    }
}

/// `GET /agents/profile`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentProfile {
    #[serde(default, rename = "recentPosts")]
    pub recent_posts: Vec<Post>,
}

/// `POST /posts` 的响应
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatedPost {
    #[serde(default)]
    pub post: Option<Post>,
}

impl CreatedPost {
    pub fn id(&self) -> Option<&str> {
        self.post.as_ref().and_then(|p| p.id.as_deref())
    }
}

/// 列表接口的响应，既可能是包了一层的对象，也可能直接是数组
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Posts { posts: Vec<T> },
    Comments { comments: Vec<T> },
    Bare(Vec<T>),
}

impl<T> Listing<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Posts { posts } => posts,
            Listing::Comments { comments } => comments,
            Listing::Bare(items) => items,
        }
    }
}

/// `GET /posts/{id}` 的响应（评论接口不可用时的兜底）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostDetail {
    #[serde(default)]
    pub comments: Vec<Comment>,
}

fn parse_created_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

// id 可能是字符串也可能是数字，统一转成字符串
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer id")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(IdVisitor)
}
