//! 发帖闸门 - 业务能力层
//!
//! 任何网络调用之前先过这一关：必须同时有 `--post`、`--confirm` 和 API Key。

use crate::error::{AppError, AppResult};

/// 闸门判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// 没有 `--post`，只打印
    DryRun,
    /// 有 `--post` 但没有 `--confirm`
    ConfirmRequired,
    /// 可以发帖
    Publish { api_key: String },
}

/// 发帖闸门
#[derive(Debug, Clone, Copy)]
pub struct PostingGate {
    post: bool,
    confirm: bool,
}

impl PostingGate {
    pub fn new(post: bool, confirm: bool) -> Self {
        Self { post, confirm }
    }

    /// 判定是否允许发帖
    ///
    /// 明确要求发帖（`--post --confirm`）但缺少 API Key 时返回 `MissingCredential`。
    pub fn evaluate(&self, api_key: Option<&str>) -> AppResult<GateDecision> {
        if !self.post {
            return Ok(GateDecision::DryRun);
        }
        if !self.confirm {
            return Ok(GateDecision::ConfirmRequired);
        }
        match api_key.map(str::trim).filter(|k| !k.is_empty()) {
            Some(key) => Ok(GateDecision::Publish {
                api_key: key.to_string(),
            }),
            None => Err(AppError::MissingCredential),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_run_by_default() {
        let gate = PostingGate::new(false, true);
        assert_eq!(gate.evaluate(Some("key")).unwrap(), GateDecision::DryRun);
        assert_eq!(gate.evaluate(None).unwrap(), GateDecision::DryRun);
    }

    #[test]
    fn test_post_requires_confirm() {
        let gate = PostingGate::new(true, false);
        assert_eq!(gate.evaluate(Some("key")).unwrap(), GateDecision::ConfirmRequired);
        // 没有 confirm 时不检查 key
        assert_eq!(gate.evaluate(None).unwrap(), GateDecision::ConfirmRequired);
    }

    #[test]
    fn test_missing_credential() {
        let gate = PostingGate::new(true, true);
        assert!(matches!(gate.evaluate(None), Err(AppError::MissingCredential)));
        assert!(matches!(gate.evaluate(Some("  ")), Err(AppError::MissingCredential)));
    }

    #[test]
    fn test_publish() {
        let decision = PostingGate::new(true, true).evaluate(Some("sk")).unwrap();
        assert_eq!(
            decision,
            GateDecision::Publish {
                api_key: "sk".to_string()
            }
        );
    }
}
