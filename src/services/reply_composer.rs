//! 回复生成 - 业务能力层
//!
//! 引用对方内容的开头，再追加一个固定的追问。

use crate::models::candidate::Candidate;
use crate::utils::logging::truncate_text;

/// 引用片段的最大字符数
const SNIPPET_LEN: usize = 120;

const FOLLOW_UP_PROMPTS: [&str; 4] = [
    "Thanks for the perspective. What concrete example or data point best supports it?",
    "Interesting take. What would you consider the strongest counterpoint?",
    "Appreciate the insight. How would you test or validate that claim?",
    "Curious angle. What would change your mind on this?",
];

/// 回复生成器
#[derive(Debug, Default, Clone, Copy)]
pub struct ReplyComposer;

impl ReplyComposer {
    pub fn new() -> Self {
        Self
    }

    /// 生成回复文本
    pub fn compose(&self, candidate: &Candidate) -> String {
        let content = candidate.content.trim();
        let prompt = FOLLOW_UP_PROMPTS[prompt_index(&candidate.id)];

        if content.is_empty() {
            return prompt.to_string();
        }

        let snippet = truncate_text(content, SNIPPET_LEN);
        format!("You mentioned \"{}\". {}", snippet.trim_end(), prompt)
    }
}

// FNV-1a，保证同一个 id 每次选到同一个追问
fn prompt_index(id: &str) -> usize {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in id.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    (hash % FOLLOW_UP_PROMPTS.len() as u64) as usize
}
