//! 命令行参数
//!
//! 命令行参数优先于环境变量和 moltbook.toml

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{AgentSettings, Config};
use crate::error::AppResult;
use crate::services::resolver::parse_date;

#[derive(Debug, Parser)]
#[command(name = "moltbook-daily", version)]
#[command(about = "Moltbook 每日一问（默认只读，发帖需要 --post --confirm）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 选出今天（或指定日期/序号）的题目，可选发帖
    Pick(PickArgs),
    /// 手动运行一次 agent：发今天的题目并回复高质量评论
    Agent(AgentArgs),
}

/// 两个子命令共用的参数
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// 题目文件（默认 questions.txt）
    #[arg(long, env = "MOLTBOOK_QUESTIONS")]
    pub questions: Option<PathBuf>,

    /// 队列起始日期 YYYY-MM-DD（默认 2026-02-01）
    #[arg(long, env = "MOLTBOOK_START_DATE")]
    pub start_date: Option<String>,

    /// 允许调用 API 发帖
    #[arg(long, default_value_t = false)]
    pub post: bool,

    /// 与 --post 一起使用，确认发帖
    #[arg(long, default_value_t = false)]
    pub confirm: bool,
}

impl CommonArgs {
    pub fn apply_to(&self, config: &mut Config) -> AppResult<()> {
        if let Some(path) = &self.questions {
            config.questions_path = path.clone();
        }
        if let Some(raw) = &self.start_date {
            config.start_date = parse_date(raw)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Args)]
pub struct PickArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// 题目序号（从1开始，优先于 --date）
    #[arg(long, allow_hyphen_values = true)]
    pub index: Option<String>,

    /// 按日期选题 YYYY-MM-DD（默认今天）
    #[arg(long)]
    pub date: Option<String>,

    /// 目标 submolt
    #[arg(long, default_value = "general")]
    pub submolt: String,

    /// 只打印请求体，不调用 API
    #[arg(long, default_value_t = false)]
    pub preview: bool,

    /// 列出全部题目
    #[arg(long, default_value_t = false)]
    pub list: bool,
}

#[derive(Debug, Clone, Args)]
pub struct AgentArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// 模拟运行日期 YYYY-MM-DD（默认今天）
    #[arg(long)]
    pub date: Option<String>,

    /// agent 名字
    #[arg(long)]
    pub name: Option<String>,

    /// 轮换列表为空时发帖的 submolt
    #[arg(long)]
    pub submolt: Option<String>,

    /// 状态文件路径
    #[arg(long)]
    pub state: Option<PathBuf>,

    /// 可回复内容的最小字符数
    #[arg(long)]
    pub min_comment_length: Option<usize>,

    /// 每次运行最多回复数
    #[arg(long)]
    pub max_replies: Option<usize>,

    /// 发帖 submolt 轮换列表，逗号分隔
    #[arg(long, value_delimiter = ',')]
    pub submolt_rotation: Vec<String>,

    /// 扫描的 submolt 列表，逗号分隔
    #[arg(long, value_delimiter = ',')]
    pub scan_submolts: Vec<String>,

    /// 每个 submolt 最多扫描的帖子数
    #[arg(long)]
    pub scan_limit: Option<usize>,
}

impl AgentArgs {
    /// 用命令行参数覆盖配置文件中的 agent 设置
    pub fn apply_to(&self, settings: &mut AgentSettings) {
        if let Some(name) = &self.name {
            settings.name = Some(name.clone());
        }
        if let Some(submolt) = &self.submolt {
            settings.submolt = submolt.clone();
        }
        if let Some(len) = self.min_comment_length {
            settings.min_comment_length = len;
        }
        if let Some(max) = self.max_replies {
            settings.max_replies = max;
        }
        if let Some(limit) = self.scan_limit {
            settings.scan_limit = limit;
        }
        let rotation = clean_list(&self.submolt_rotation);
        if !rotation.is_empty() {
            settings.submolt_rotation = rotation;
        }
        let scan = clean_list(&self.scan_submolts);
        if !scan.is_empty() {
            settings.scan_submolts = scan;
        }
    }
}

fn clean_list(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
