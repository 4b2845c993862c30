//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责把命令行参数、配置、状态文件和流程串起来。
//!
//! ### `app` - 应用入口
//! - 合并命令行参数和配置
//! - 分发子命令
//!
//! ### `pick_runner` - 选题
//! - 列表 / 预览 / dry run / 单次发帖
//!
//! ### `agent_runner` - agent 运行
//! - 加载状态 → AgentFlow → 保存状态
//! - 闸门未打开时只打印计划，不读写网络，不写状态
//!
//! ```text
//! app
//!     ↓
//! pick_runner / agent_runner
//!     ↓
//! workflow::AgentFlow
//!     ↓
//! services (resolver / gate / filter / composer / state_store)
//!     ↓
//! clients (MoltbookApi)
//! ```

pub mod agent_runner;
pub mod app;
pub mod pick_runner;

pub use agent_runner::{run_agent, run_once};
pub use app::App;
pub use pick_runner::{publish, run_pick};
