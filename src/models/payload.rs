//! 提交给平台的请求体
//!
//! 预览、dry run 和真实发帖都通过 [`build_post_payload`] 构造，保证预览内容就是实际发送的内容。

use serde::{Deserialize, Serialize};

/// 发帖请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPayload {
    pub submolt: String,
    pub title: String,
    pub content: String,
}

/// 评论/回复请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentPayload {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// 构造发帖请求体，标题和正文都是题目文本
pub fn build_post_payload(submolt: &str, question: &str) -> PostPayload {
    PostPayload {
        submolt: submolt.to_string(),
        title: question.to_string(),
        content: question.to_string(),
    }
}

/// 构造回复请求体
pub fn build_comment_payload(content: &str, parent_id: Option<&str>) -> CommentPayload {
    CommentPayload {
        content: content.to_string(),
        parent_id: parent_id.map(str::to_string),
    }
}
