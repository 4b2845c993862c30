//! agent 命令
//!
//! 负责把状态的加载和保存包在一次运行的前后，流程本身在 workflow::AgentFlow

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::cli::AgentArgs;
use crate::clients::{MoltbookApi, MoltbookClient};
use crate::config::{AgentSettings, Config};
use crate::error::AppResult;
use crate::models::load_question_queue;
use crate::orchestrator::pick_runner::print_preview;
use crate::services::{
    parse_date, DateIndexResolver, GateDecision, KeywordLinkFilter, PostingGate, PromoFilter,
    Selection, StateStore,
};
use crate::utils::logging::log_section;
use crate::workflow::{AgentFlow, PostOutcome, RunCtx, RunReport};

/// 执行 agent 子命令
pub async fn run_agent(config: &Config, args: &AgentArgs, today: NaiveDate) -> AppResult<()> {
    let mut settings = config.agent.clone();
    args.apply_to(&mut settings);

    let queue = load_question_queue(&config.questions_path).await?;
    let today = match &args.date {
        Some(raw) => parse_date(raw)?,
        None => today,
    };
    let resolver = DateIndexResolver::new(config.start_date);
    let question = resolver.resolve(&queue, &Selection::Today, today)?.clone();
    let ctx = RunCtx::new(today, question, queue.len());

    println!("选中第 {} 题（共 {} 题）:", ctx.question.number, ctx.queue_len);
    println!("{}", ctx.question.text);

    let store = StateStore::new(
        args.state
            .clone()
            .unwrap_or_else(|| config.state_path.clone()),
    );
    let gate = PostingGate::new(args.common.post, args.common.confirm);
    let api_key = match gate.evaluate(config.api_key.as_deref())? {
        GateDecision::Publish { api_key } => api_key,
        decision => {
            let state = store.load().await?;
            if state.posted_on(today) {
                info!("{} 今天已经发过帖", ctx);
            }
            let payload = AgentFlow::planned_payload(&settings, &state, &ctx);
            print_preview(&payload, &config.api_base_url)?;
            info!(
                "🔒 只读模式：将扫描 {:?}（每个最多 {} 帖），最多回复 {} 条",
                settings.scan_submolts, settings.scan_limit, settings.max_replies
            );
            if settings.name.is_none() {
                warn!("⚠️ 未配置 --name，真正运行时会被拒绝");
            }
            if decision == GateDecision::ConfirmRequired {
                warn!("⚠️ 缺少 --confirm，拒绝发帖");
            }
            return Ok(());
        }
    };

    let client = MoltbookClient::new(config, api_key)?;
    let filter = KeywordLinkFilter::with_keywords(&settings.promo_keywords);
    let report = run_once(&client, &filter, &settings, &ctx, &store).await?;

    print_run_summary(&ctx, &report);
    Ok(())
}

/// 加载状态 → 运行 → 保存状态
///
/// 运行中途的失败已经由流程记录在报告里，这里保存的是实际完成的动作。
pub async fn run_once(
    api: &dyn MoltbookApi,
    promo_filter: &dyn PromoFilter,
    settings: &AgentSettings,
    ctx: &RunCtx,
    store: &StateStore,
) -> AppResult<RunReport> {
    let state = store.load().await?;
    let flow = AgentFlow::new(api, promo_filter, settings);
    let (state, report) = flow.run(ctx, state).await?;
    store.save(&state).await?;
    Ok(report)
}

fn print_run_summary(ctx: &RunCtx, report: &RunReport) {
    log_section(&format!("📊 运行完成 {}", ctx));
    match &report.post {
        PostOutcome::Posted { post_id, submolt } => {
            info!("✅ 已发帖到 m/{} (id={})", submolt, post_id.as_deref().unwrap_or("-"))
        }
        PostOutcome::AlreadyPostedToday => info!("⏭️ 今天已发过帖"),
        PostOutcome::DuplicateQuestion => info!("⏭️ 本轮已发过相同题目"),
        PostOutcome::Failed { reason } => info!("❌ 发帖失败: {}", reason),
    }
    info!("🔍 扫描: {} / 可回复: {}", report.scanned, report.eligible);
    info!("💬 已回复: {}", report.replied.len());
    if !report.failed_replies.is_empty() {
        info!("⚠️ 回复失败: {}", report.failed_replies.len());
    }
    info!("{}", "─".repeat(60));
}
