//! 状态文件读写 - 业务能力层
//!
//! 只负责 RunState 的加载和保存，不关心流程

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::state::RunState;

/// 状态文件存储
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 加载状态，文件不存在时返回空状态
    pub async fn load(&self) -> AppResult<RunState> {
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            debug!("状态文件不存在，使用空状态: {}", self.path.display());
            return Ok(RunState::default());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| AppError::file(&self.path, e))?;

        serde_json::from_str(&content)
            .map_err(|e| AppError::json(self.path.display().to_string(), e))
    }

    /// 保存状态，自动创建父目录
    pub async fn save(&self, state: &RunState) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::file(parent, e))?;
        }

        let json = serde_json::to_string_pretty(state)
            .map_err(|e| AppError::json("RunState", e))?;
        fs::write(&self.path, json + "\n")
            .await
            .map_err(|e| AppError::file(&self.path, e))?;

        debug!("状态已保存: {}", self.path.display());
        Ok(())
    }
}
