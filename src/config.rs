use crate::error::{AppError, AppResult};
use crate::services::resolver::{parse_date, DEFAULT_START_DATE};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 默认的配置文件名（存在时才加载）
pub const DEFAULT_CONFIG_FILE: &str = "moltbook.toml";

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// Moltbook API 地址
    pub api_base_url: String,
    /// API Key，发帖时必须提供
    pub api_key: Option<String>,
    /// 题目队列的起始日期
    pub start_date: NaiveDate,
    /// 题目文件
    pub questions_path: PathBuf,
    /// agent 状态文件
    pub state_path: PathBuf,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    // --- agent 配置（可由 moltbook.toml 覆盖）---
    pub agent: AgentSettings,
}

/// agent 模式的可调参数
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AgentSettings {
    /// agent 在平台上的名字，用于识别自己的帖子和评论
    pub name: Option<String>,
    /// 轮换列表为空时发帖的 submolt
    pub submolt: String,
    pub submolt_rotation: Vec<String>,
    pub scan_submolts: Vec<String>,
    /// 每个 submolt 最多扫描的帖子数
    pub scan_limit: usize,
    pub min_comment_length: usize,
    pub max_replies: usize,
    /// 追加到内置黑名单的推广关键词
    pub promo_keywords: Vec<String>,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            name: None,
            submolt: "general".to_string(),
            submolt_rotation: Vec::new(),
            scan_submolts: vec!["general".to_string()],
            scan_limit: 10,
            min_comment_length: 80,
            max_replies: 3,
            promo_keywords: Vec::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    agent: AgentSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://www.moltbook.com/api/v1".to_string(),
            api_key: None,
            start_date: parse_date(DEFAULT_START_DATE).unwrap_or_default(),
            questions_path: PathBuf::from("questions.txt"),
            state_path: default_state_path(),
            request_timeout_secs: 30,
            agent: AgentSettings::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源构造配置，测试时不需要改进程环境变量
    ///
    /// `MOLTBOOK_START_DATE` 和 `MOLTBOOK_QUESTIONS` 由命令行参数读取（见 `cli::CommonArgs`），
    /// 这样 `--start-date` 给出时不会去解析环境变量。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let default = Self::default();

        let agent = match lookup("MOLTBOOK_CONFIG") {
            Some(path) => load_agent_settings(Path::new(&path))?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                load_agent_settings(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => default.agent,
        };

        Ok(Self {
            api_base_url: lookup("MOLTBOOK_API_BASE")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(default.api_base_url),
            api_key: lookup("MOLTBOOK_API_KEY").filter(|v| !v.trim().is_empty()),
            start_date: default.start_date,
            questions_path: default.questions_path,
            state_path: lookup("MOLTBOOK_STATE_PATH")
                .map(PathBuf::from)
                .unwrap_or(default.state_path),
            request_timeout_secs: lookup("MOLTBOOK_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.request_timeout_secs),
            agent,
        })
    }
}

/// 读取 TOML 配置文件中的 `[agent]` 表
pub fn load_agent_settings(path: &Path) -> AppResult<AgentSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::file(path, e))?;
    parse_agent_settings(&content, &path.display().to_string())
}

fn parse_agent_settings(content: &str, origin: &str) -> AppResult<AgentSettings> {
    let file: ConfigFile = toml::from_str(content).map_err(|source| AppError::Config {
        path: origin.to_string(),
        source,
    })?;
    Ok(file.agent)
}

/// 平台对应的应用数据目录下的状态文件
pub fn default_state_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("moltbook-daily").join("agent_state.json"))
        .unwrap_or_else(|| PathBuf::from(".state").join("agent_state.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("MOLTBOOK_API_KEY", "moltbook_sk_test"),
            ("MOLTBOOK_API_BASE", "http://localhost:8080/api/v1/"),
            ("MOLTBOOK_TIMEOUT_SECS", "5"),
            ("MOLTBOOK_STATE_PATH", "/tmp/state.json"),
        ]))
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("moltbook_sk_test"));
        assert_eq!(config.api_base_url, "http://localhost:8080/api/v1");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.state_path, PathBuf::from("/tmp/state.json"));
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let config = Config::from_lookup(lookup_from(&[("MOLTBOOK_API_KEY", "   ")])).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_start_date_env_left_to_cli() {
        // 环境变量里的日期由命令行层解析，这里不应报错
        let config = Config::from_lookup(lookup_from(&[("MOLTBOOK_START_DATE", "02/01/2026")]))
            .unwrap();
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
    }

    #[test]
    fn test_default_start_date() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
    }

    #[test]
    fn test_parse_agent_settings_partial() {
        let settings = parse_agent_settings(
            r#"
            [agent]
            name = "daily-asker"
            submolt_rotation = ["general", "philosophy"]
            max_replies = 5
            "#,
            "inline",
        )
        .unwrap();

        assert_eq!(settings.name.as_deref(), Some("daily-asker"));
        assert_eq!(settings.submolt_rotation.len(), 2);
        assert_eq!(settings.max_replies, 5);
        // 未填写的字段使用默认值
        assert_eq!(settings.min_comment_length, 80);
        assert_eq!(settings.scan_submolts, vec!["general".to_string()]);
    }

    #[test]
    fn test_parse_agent_settings_invalid() {
        let err = parse_agent_settings("[agent]\nmax_replies = \"many\"", "inline").unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
    }
}
