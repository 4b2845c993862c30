//! 选题命令
//!
//! 加载题库 → 选题 → 预览 / dry run / 发帖

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::cli::PickArgs;
use crate::clients::{MoltbookApi, MoltbookClient};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::moltbook::CreatedPost;
use crate::models::payload::{build_post_payload, PostPayload};
use crate::models::question::QuestionQueue;
use crate::models::load_question_queue;
use crate::services::{DateIndexResolver, GateDecision, PostingGate, Selection};

/// 执行 pick 子命令
///
/// # 参数
/// - `config`: 已合并命令行参数的配置
/// - `args`: pick 参数
/// - `today`: 本地日期
pub async fn run_pick(config: &Config, args: &PickArgs, today: NaiveDate) -> AppResult<()> {
    let queue = load_question_queue(&config.questions_path).await?;

    if args.list {
        print_question_list(&queue);
        return Ok(());
    }

    let selection = Selection::from_args(args.index.as_deref(), args.date.as_deref())?;
    let resolver = DateIndexResolver::new(config.start_date);
    let question = resolver.resolve(&queue, &selection, today)?;

    println!("选中第 {} 题（共 {} 题）:", question.number, queue.len());
    println!("{}", question.text);

    let payload = build_post_payload(&args.submolt, &question.text);

    if args.preview {
        print_preview(&payload, &config.api_base_url)?;
        return Ok(());
    }

    let gate = PostingGate::new(args.common.post, args.common.confirm);
    match gate.evaluate(config.api_key.as_deref())? {
        GateDecision::DryRun => {
            print_preview(&payload, &config.api_base_url)?;
            info!("🔒 只读模式，没有调用任何 API");
        }
        GateDecision::ConfirmRequired => {
            print_preview(&payload, &config.api_base_url)?;
            warn!("⚠️ 缺少 --confirm，拒绝发帖");
        }
        GateDecision::Publish { api_key } => {
            let client = MoltbookClient::new(config, api_key)?;
            let created = publish(&client, &payload).await?;
            println!("发帖成功: id={}", created.id().unwrap_or("-"));
        }
    }

    Ok(())
}

/// 发帖
pub async fn publish(api: &dyn MoltbookApi, payload: &PostPayload) -> AppResult<CreatedPost> {
    info!("📤 正在发帖到 m/{}...", payload.submolt);
    api.create_post(payload).await
}

/// 打印全部题目
pub fn print_question_list(queue: &QuestionQueue) {
    for question in queue.iter() {
        println!("{}", question);
    }
}

/// 打印请求体预览
pub fn print_preview(payload: &PostPayload, api_base_url: &str) -> AppResult<()> {
    let json = serde_json::to_string_pretty(payload).map_err(|e| AppError::json("PostPayload", e))?;
    println!("预览 payload（不调用 API）:");
    println!("{}", json);
    println!("目标地址: {}", MoltbookClient::posts_url(api_base_url));
    Ok(())
}
