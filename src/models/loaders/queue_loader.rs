use crate::error::{AppError, AppResult};
use crate::models::question::QuestionQueue;
use std::path::Path;
use tokio::fs;

/// 从文本文件加载题目队列
pub async fn load_question_queue(path: &Path) -> AppResult<QuestionQueue> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file(path, e))?;

    let queue = QuestionQueue::parse(&content, &path.display().to_string())?;

    tracing::info!(
        "✓ 已加载 {} 道题目: {}",
        queue.len(),
        path.file_name().unwrap_or_default().to_string_lossy()
    );

    Ok(queue)
}
