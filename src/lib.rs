//! # Moltbook Daily
//!
//! Moltbook 每日一问：按日期从题库循环选题，可选发帖，并以 agent 方式回复高质量评论
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 平台 HTTP 能力，只暴露 `MoltbookApi` trait
//! - `MoltbookClient` - 基于 reqwest 的实现，测试中可替换
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心运行顺序
//! - `DateIndexResolver` - 日期 / 序号 → 题目
//! - `PostingGate` - `--post --confirm` + API Key 闸门
//! - `KeywordLinkFilter` - 推广内容过滤
//! - `ReplyComposer` - 生成回复
//! - `StateStore` - 读写状态文件
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次运行"的完整流程
//! - `RunCtx` - 上下文封装（日期 + 题目）
//! - `AgentFlow` - 流程编排（认领检查 → 发帖 → 扫描 → 过滤 → 回复）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/pick_runner` - 选题与单次发帖
//! - `orchestrator/agent_runner` - 加载状态、运行流程、保存状态
//!
//! ## 模块结构

pub mod cli;
pub mod clients;
pub mod config;
pub mod error;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{MoltbookApi, MoltbookClient};
pub use config::{AgentSettings, Config};
pub use error::{AppError, AppResult};
pub use models::{Question, QuestionQueue, RunState};
pub use orchestrator::{run_once, App};
pub use workflow::{AgentFlow, PostOutcome, RunCtx, RunReport};
