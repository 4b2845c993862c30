use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 题目序号不是正整数
    #[error("无效的题目序号: '{value}' (必须是正整数)")]
    InvalidIndex { value: String },

    /// 日期无法解析
    #[error("无效的日期: '{value}' (格式应为 YYYY-MM-DD)")]
    InvalidDate { value: String },

    /// 题目文件里没有任何题目
    #[error("题目队列为空: {path}")]
    EmptyQueue { path: String },

    /// 题目超长
    #[error("第 {number} 题超过 {max} 个字符 (实际 {len} 个)")]
    QuestionTooLong { number: usize, len: usize, max: usize },

    /// 请求发帖但没有提供 API Key
    #[error("缺少环境变量 MOLTBOOK_API_KEY，无法发帖")]
    MissingCredential,

    /// 发帖模式下没有配置 agent 名字，无法识别自己的帖子和评论
    #[error("agent 发帖需要 --name（或 moltbook.toml 中的 agent.name）")]
    MissingAgentName,

    /// Agent 尚未被认领
    #[error("Agent 尚未认领 (status: {status})，已中止")]
    NotClaimed { status: String },

    /// 网络请求失败
    #[error("网络请求失败 ({endpoint}): {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// API 返回非 2xx 响应
    #[error("API返回错误响应 ({endpoint}): status={status}, body={body}")]
    BadResponse {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// 文件读写失败
    #[error("文件错误 ({path}): {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON 解析或序列化失败
    #[error("JSON解析失败 ({context}): {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// 配置文件解析失败
    #[error("配置文件解析失败 ({path}): {source}")]
    Config {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl AppError {
    /// 是否属于网络类错误（单次调用失败，不影响整个运行）
    pub fn is_network(&self) -> bool {
        matches!(self, AppError::Network { .. } | AppError::BadResponse { .. })
    }

    /// HTTP 状态码（仅 BadResponse 有）
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::BadResponse { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 进程退出码
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::MissingCredential => 3,
            AppError::NotClaimed { .. } => 4,
            _ => 1,
        }
    }

    pub fn file(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        AppError::File {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        AppError::Json {
            context: context.into(),
            source,
        }
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::MissingCredential.exit_code(), 3);
        assert_eq!(
            AppError::NotClaimed {
                status: "pending_claim".to_string()
            }
            .exit_code(),
            4
        );
        assert_eq!(
            AppError::InvalidIndex {
                value: "0".to_string()
            }
            .exit_code(),
            1
        );
        assert_eq!(
            AppError::EmptyQueue {
                path: "questions.txt".to_string()
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn test_bad_response_is_network() {
        let err = AppError::BadResponse {
            endpoint: "/posts".to_string(),
            status: 405,
            body: String::new(),
        };
        assert!(err.is_network());
        assert_eq!(err.status(), Some(405));
        assert!(!AppError::MissingCredential.is_network());
    }
}
