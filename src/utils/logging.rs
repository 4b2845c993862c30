/// 日志工具模块
///
/// 提供日志初始化和输出格式的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 默认 `info` 级别，可以用 `RUST_LOG` 覆盖。日志写到 stderr，stdout 只留给预览和列表输出。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `mode`: 运行模式（pick / agent）
/// - `dry_run`: 是否只读
pub fn log_startup(mode: &str, dry_run: bool) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - {} 模式", mode);
    if dry_run {
        info!("🔒 只读模式：不会调用任何 API");
    } else {
        info!("📤 已开启发帖 (--post --confirm)");
    }
    info!("{}", "=".repeat(60));
}

/// 打印分隔线包裹的标题
pub fn log_section(title: &str) {
    info!("\n{}", "─".repeat(60));
    info!("{}", title);
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
///
/// # 返回
/// 返回截断后的文本，超长时末尾追加 `...`
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
