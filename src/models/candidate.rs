use crate::models::moltbook::{Comment, Post};

/// 候选类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    /// 帖子本身，回复为顶层评论
    Post,
    /// 帖子下的评论，回复为楼中楼
    Comment,
}

/// 扫描得到的可回复对象
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub kind: CandidateKind,
    pub id: String,
    /// 回复要发到哪个帖子下
    pub post_id: String,
    pub author: Option<String>,
    pub content: String,
    /// 扫描来源的 submolt（仅用于日志）
    pub submolt: String,
}

impl Candidate {
    /// 从帖子构造，没有 id 的帖子无法回复，返回 None
    pub fn from_post(post: &Post, submolt: &str) -> Option<Self> {
        let id = post.id.clone()?;
        let content = post
            .content
            .as_deref()
            .or(post.title.as_deref())
            .unwrap_or_default()
            .to_string();

        Some(Self {
            kind: CandidateKind::Post,
            post_id: id.clone(),
            id,
            author: post.author.as_ref().and_then(|a| a.name.clone()),
            content,
            submolt: submolt.to_string(),
        })
    }

    /// 从评论构造
    pub fn from_comment(comment: &Comment, post_id: &str, submolt: &str) -> Option<Self> {
        let id = comment.id.clone()?;

        Some(Self {
            kind: CandidateKind::Comment,
            id,
            post_id: post_id.to_string(),
            author: comment.author.as_ref().and_then(|a| a.name.clone()),
            content: comment.content.clone().unwrap_or_default(),
            submolt: submolt.to_string(),
        })
    }

    /// 回复时的 parent_id：评论需要，帖子不需要
    pub fn parent_id(&self) -> Option<&str> {
        match self.kind {
            CandidateKind::Post => None,
            CandidateKind::Comment => Some(&self.id),
        }
    }

    /// 去掉首尾空白后的字符数
    pub fn content_len(&self) -> usize {
        self.content.trim().chars().count()
    }
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            CandidateKind::Post => "帖子",
            CandidateKind::Comment => "评论",
        };
        write!(f, "[m/{} {} #{}]", self.submolt, kind, self.id)
    }
}
