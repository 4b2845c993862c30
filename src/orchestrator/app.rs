use chrono::Local;

use crate::cli::Command;
use crate::config::Config;
use crate::error::AppResult;
use crate::orchestrator::{agent_runner, pick_runner};
use crate::utils::logging::log_startup;

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Self {
        Self { config }
    }

    /// 运行子命令
    pub async fn run(mut self, command: Command) -> AppResult<()> {
        let today = Local::now().date_naive();

        match command {
            Command::Pick(args) => {
                args.common.apply_to(&mut self.config)?;
                log_startup("pick", !(args.common.post && args.common.confirm));
                pick_runner::run_pick(&self.config, &args, today).await
            }
            Command::Agent(args) => {
                args.common.apply_to(&mut self.config)?;
                log_startup("agent", !(args.common.post && args.common.confirm));
                agent_runner::run_agent(&self.config, &args, today).await
            }
        }
    }
}
