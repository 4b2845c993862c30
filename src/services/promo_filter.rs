//! 推广内容过滤 - 业务能力层
//!
//! 以 trait 形式注入到 agent 流程，黑名单可以单独测试和扩展。

use regex::Regex;

/// 内置的推广关键词黑名单（小写）
pub const DEFAULT_PROMO_KEYWORDS: &[&str] = &[
    "airdrop",
    "buy now",
    "click here",
    "discount",
    "dm me",
    "follow me",
    "free crypto",
    "giveaway",
    "limited offer",
    "promo code",
    "referral",
    "subscribe",
];

/// 判断一段文本是否是推广内容
pub trait PromoFilter: Send + Sync {
    fn is_promotional(&self, text: &str) -> bool;
}

/// 链接 + 关键词过滤器
pub struct KeywordLinkFilter {
    link_pattern: Regex,
    /// 关键词及其整词匹配的正则
    keywords: Vec<(String, Regex)>,
}

impl KeywordLinkFilter {
    /// 使用内置黑名单
    pub fn new() -> Self {
        Self::with_keywords(std::iter::empty::<String>())
    }

    /// 在内置黑名单之外追加关键词
    pub fn with_keywords<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<String> =
            DEFAULT_PROMO_KEYWORDS.iter().map(|k| k.to_string()).collect();
        for keyword in extra {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !words.contains(&keyword) {
                words.push(keyword);
            }
        }

        let keywords = words
            .into_iter()
            .filter_map(|word| keyword_pattern(&word).map(|re| (word, re)))
            .collect();

        Self {
            link_pattern: Regex::new(r"(?i)\b(?:https?://|www\.)\S+").expect("静态正则"),
            keywords,
        }
    }

    pub fn contains_link(&self, text: &str) -> bool {
        self.link_pattern.is_match(text)
    }

    /// 命中的第一个关键词
    pub fn matched_keyword(&self, text: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|(_, re)| re.is_match(text))
            .map(|(word, _)| word.as_str())
    }
}

/// 整词匹配：关键词首尾是单词字符时才加 `\b`，"discount" 不会命中 "discounting"
fn keyword_pattern(keyword: &str) -> Option<Regex> {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let start = if keyword.starts_with(is_word) { r"\b" } else { "" };
    let end = if keyword.ends_with(is_word) { r"\b" } else { "" };
    Regex::new(&format!("(?i){}{}{}", start, regex::escape(keyword), end)).ok()
}

impl Default for KeywordLinkFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl PromoFilter for KeywordLinkFilter {
    fn is_promotional(&self, text: &str) -> bool {
        self.contains_link(text) || self.matched_keyword(text).is_some()
    }
}
