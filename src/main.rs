use clap::Parser;
use std::process::ExitCode;
use tracing::error;

use moltbook_daily::cli::Cli;
use moltbook_daily::utils::logging;
use moltbook_daily::{App, Config};

#[tokio::main]
async fn main() -> ExitCode {
    // 初始化日志
    logging::init();

    let cli = Cli::parse();

    // 加载配置
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ 配置错误: {}", e);
            return ExitCode::from(e.exit_code());
        }
    };

    match App::initialize(config).run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("❌ {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
