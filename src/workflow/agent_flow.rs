//! Agent 流程 - 流程层
//!
//! 核心职责：定义"一次运行"的完整流程
//!
//! 流程顺序：
//! 1. 确认配置了 agent 名字，检查 agent 是否已认领
//! 2. 读取自己最近的帖子
//! 3. 今天已发过 / 同一轮内发过同样的题 → 跳过发帖，否则发帖
//! 4. 扫描自己最近帖子下的评论和配置的 submolt → 过滤候选 → 最多回复 N 条
//! 5. 返回更新后的状态，由编排层负责保存

use chrono::Utc;
use std::collections::HashSet;
use tracing::{debug, error, info, warn};

use crate::clients::MoltbookApi;
use crate::config::AgentSettings;
use crate::error::{AppError, AppResult};
use crate::models::candidate::{Candidate, CandidateKind};
use crate::models::moltbook::Post;
use crate::models::payload::{build_comment_payload, build_post_payload, PostPayload};
use crate::models::state::RunState;
use crate::services::{PromoFilter, ReplyComposer};
use crate::utils::logging::truncate_text;
use crate::workflow::run_ctx::RunCtx;

/// 扫描评论的自己最近帖子数
pub const OWN_POSTS_TO_SCAN: usize = 5;

/// 自己帖子下评论的来源标记（仅用于日志）
const OWN_POSTS_SOURCE: &str = "self";

/// 发帖步骤的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostOutcome {
    /// 发帖成功
    Posted {
        post_id: Option<String>,
        submolt: String,
    },
    /// 今天已经发过
    AlreadyPostedToday,
    /// 本轮内已经发过同样的题目
    DuplicateQuestion,
    /// 发帖失败（不影响后续回复）
    Failed { reason: String },
}

/// 候选被过滤掉的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyReplied,
    OwnContent,
    TooShort,
    Promotional,
}

/// 单次运行的统计
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub post: PostOutcome,
    /// 扫描到的候选数
    pub scanned: usize,
    /// 通过过滤的候选数
    pub eligible: usize,
    /// 成功回复的 id（按回复顺序）
    pub replied: Vec<String>,
    /// 回复失败的 id
    pub failed_replies: Vec<String>,
}

/// Agent 流程
///
/// - 编排发帖、扫描、过滤、回复
/// - 不持有状态，状态由调用方传入并取回
/// - 只依赖 MoltbookApi 和 PromoFilter 两个注入的能力
pub struct AgentFlow<'a> {
    api: &'a dyn MoltbookApi,
    promo_filter: &'a dyn PromoFilter,
    settings: &'a AgentSettings,
    composer: ReplyComposer,
}

impl<'a> AgentFlow<'a> {
    pub fn new(
        api: &'a dyn MoltbookApi,
        promo_filter: &'a dyn PromoFilter,
        settings: &'a AgentSettings,
    ) -> Self {
        Self {
            api,
            promo_filter,
            settings,
            composer: ReplyComposer::new(),
        }
    }

    /// 本次发帖使用的 submolt：轮换列表优先，否则使用默认 submolt
    pub fn post_submolt(settings: &AgentSettings, state: &RunState) -> String {
        state
            .rotation_submolt(&settings.submolt_rotation)
            .unwrap_or(settings.submolt.as_str())
            .to_string()
    }

    /// 本次要发出的请求体（dry run 预览与真实发帖共用）
    pub fn planned_payload(settings: &AgentSettings, state: &RunState, ctx: &RunCtx) -> PostPayload {
        build_post_payload(&Self::post_submolt(settings, state), &ctx.question.text)
    }

    /// 执行一次完整运行
    ///
    /// 没有配置名字、agent 未认领或认领检查本身失败时返回错误，其余失败都记录在 [`RunReport`] 中。
    pub async fn run(&self, ctx: &RunCtx, mut state: RunState) -> AppResult<(RunState, RunReport)> {
        let name = self.agent_name()?;
        self.ensure_claimed().await?;

        let recent_posts = self.recent_posts(ctx, name).await;

        let post = self.post_step(ctx, &mut state, &recent_posts).await;

        let candidates = self.scan(&recent_posts).await;
        let scanned = candidates.len();
        info!("{} 🔍 扫描完成，共 {} 个候选", ctx, scanned);

        let eligible = self.filter_candidates(candidates, &state);
        info!("{} ✓ 通过过滤 {} 个", ctx, eligible.len());

        let mut report = RunReport {
            post,
            scanned,
            eligible: eligible.len(),
            replied: Vec::new(),
            failed_replies: Vec::new(),
        };

        self.reply_step(ctx, eligible, &mut state, &mut report).await;

        state.last_run_at = Some(Utc::now());
        Ok((state, report))
    }

    fn agent_name(&self) -> AppResult<&str> {
        self.settings
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(AppError::MissingAgentName)
    }

    async fn ensure_claimed(&self) -> AppResult<()> {
        let status = self.api.agent_status().await?;
        if !status.is_claimed() {
            return Err(AppError::NotClaimed {
                status: status.status,
            });
        }
        debug!("agent 已认领");
        Ok(())
    }

    // ========== 发帖 ==========

    /// 自己最近的帖子，获取失败时返回空列表
    async fn recent_posts(&self, ctx: &RunCtx, name: &str) -> Vec<Post> {
        match self.api.agent_profile(name).await {
            Ok(profile) => profile.recent_posts,
            Err(e) => {
                warn!("{} ⚠️ 获取最近帖子失败，跳过重复题目检查和自己帖子的评论: {}", ctx, e);
                Vec::new()
            }
        }
    }

    async fn post_step(&self, ctx: &RunCtx, state: &mut RunState, recent_posts: &[Post]) -> PostOutcome {
        if state.posted_on(ctx.today) {
            info!("{} ⏭️ 今天已经发过帖，跳过", ctx);
            return PostOutcome::AlreadyPostedToday;
        }

        if Self::is_duplicate_question(ctx, recent_posts) {
            warn!("{} ⚠️ 本轮内已经发过相同的题目，跳过", ctx);
            return PostOutcome::DuplicateQuestion;
        }

        let payload = Self::planned_payload(self.settings, state, ctx);
        info!("{} 📤 正在发帖到 m/{}...", ctx, payload.submolt);

        match self.api.create_post(&payload).await {
            Ok(created) => {
                let post_id = created.id().map(str::to_string);
                info!("{} ✓ 发帖成功 id={:?}", ctx, post_id);
                state.record_post(
                    ctx.today,
                    ctx.question.number,
                    post_id.clone(),
                    self.settings.submolt_rotation.len(),
                );
                PostOutcome::Posted {
                    post_id,
                    submolt: payload.submolt,
                }
            }
            Err(e) => {
                error!("{} ❌ 发帖失败: {}", ctx, e);
                PostOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// 最近的帖子里是否已有同样的题目
    ///
    /// 只看一整轮队列之内的帖子，隔了一轮的重复是正常循环。
    fn is_duplicate_question(ctx: &RunCtx, recent_posts: &[Post]) -> bool {
        let text = ctx.question.text.as_str();
        recent_posts.iter().any(|post| {
            let same_text = post.title.as_deref().map(str::trim) == Some(text)
                || post.content.as_deref().map(str::trim) == Some(text);
            let in_cycle = match post.created_date() {
                Some(date) => (ctx.today - date).num_days() < ctx.queue_len as i64,
                None => true,
            };
            same_text && in_cycle
        })
    }

    // ========== 扫描与过滤 ==========

    /// 先扫描自己最近帖子下的评论，再按配置顺序扫描 submolt，返回去重后的候选
    async fn scan(&self, recent_posts: &[Post]) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        let mut seen = HashSet::new();

        for post in recent_posts.iter().take(OWN_POSTS_TO_SCAN) {
            let Some(post_id) = post.id.as_deref() else {
                continue;
            };
            self.collect_comments(post_id, OWN_POSTS_SOURCE, &mut seen, &mut candidates)
                .await;
        }

        for submolt in &self.settings.scan_submolts {
            let posts = match self.api.submolt_feed(submolt, self.settings.scan_limit).await {
                Ok(posts) => posts,
                Err(e) => {
                    warn!("⚠️ 扫描 m/{} 失败，跳过: {}", submolt, e);
                    continue;
                }
            };
            debug!("m/{} 返回 {} 个帖子", submolt, posts.len());

            for post in posts.iter().take(self.settings.scan_limit) {
                let Some(post_candidate) = Candidate::from_post(post, submolt) else {
                    continue;
                };
                let post_id = post_candidate.post_id.clone();
                if seen.insert(post_candidate.id.clone()) {
                    candidates.push(post_candidate);
                }

                self.collect_comments(&post_id, submolt, &mut seen, &mut candidates)
                    .await;
            }
        }

        candidates
    }

    /// 把一个帖子下的评论加入候选，获取失败时跳过
    async fn collect_comments(
        &self,
        post_id: &str,
        source: &str,
        seen: &mut HashSet<String>,
        candidates: &mut Vec<Candidate>,
    ) {
        match self.api.post_comments(post_id).await {
            Ok(comments) => {
                for comment in &comments {
                    if let Some(c) = Candidate::from_comment(comment, post_id, source) {
                        if seen.insert(c.id.clone()) {
                            candidates.push(c);
                        }
                    }
                }
            }
            Err(e) => warn!("⚠️ 获取帖子 {} 的评论失败: {}", post_id, e),
        }
    }

    /// 检查单个候选是否可以回复
    pub fn check_candidate(&self, candidate: &Candidate, state: &RunState) -> Result<(), SkipReason> {
        if state.has_replied(&candidate.id) {
            return Err(SkipReason::AlreadyReplied);
        }

        let own_name = self.settings.name.as_deref();
        let by_self = match (candidate.author.as_deref(), own_name) {
            (Some(author), Some(name)) => author.eq_ignore_ascii_case(name),
            _ => false,
        };
        let own_post = candidate.kind == CandidateKind::Post
            && state.last_post_id.as_deref() == Some(candidate.id.as_str());
        if by_self || own_post {
            return Err(SkipReason::OwnContent);
        }

        if candidate.content_len() < self.settings.min_comment_length {
            return Err(SkipReason::TooShort);
        }

        if self.promo_filter.is_promotional(&candidate.content) {
            return Err(SkipReason::Promotional);
        }

        Ok(())
    }

    fn filter_candidates(&self, candidates: Vec<Candidate>, state: &RunState) -> Vec<Candidate> {
        candidates
            .into_iter()
            .filter(|c| match self.check_candidate(c, state) {
                Ok(()) => true,
                Err(reason) => {
                    debug!("{} 跳过: {:?}", c, reason);
                    false
                }
            })
            .collect()
    }

    // ========== 回复 ==========

    async fn reply_step(
        &self,
        ctx: &RunCtx,
        eligible: Vec<Candidate>,
        state: &mut RunState,
        report: &mut RunReport,
    ) {
        for candidate in eligible {
            if report.replied.len() >= self.settings.max_replies {
                break;
            }

            let text = self.composer.compose(&candidate);
            let payload = build_comment_payload(&text, candidate.parent_id());
            debug!("{} 回复内容: {}", candidate, truncate_text(&text, 80));

            match self.api.create_comment(&candidate.post_id, &payload).await {
                Ok(()) => {
                    info!("{} 💬 已回复 {}", ctx, candidate);
                    state.record_reply(candidate.id.clone());
                    report.replied.push(candidate.id);
                }
                Err(e) => {
                    warn!("{} ⚠️ 回复 {} 失败，跳过: {}", ctx, candidate, e);
                    report.failed_replies.push(candidate.id);
                }
            }
        }
    }
}
