use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 跨运行持久化的 agent 状态
///
/// 只有 agent 流程在动作成功后才会修改它，读写由编排层在运行前后完成。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    #[serde(default)]
    pub last_post_date: Option<NaiveDate>,
    /// 上次发出的题目序号（从1开始）
    #[serde(default)]
    pub last_question_index: Option<usize>,
    #[serde(default)]
    pub last_post_id: Option<String>,
    /// submolt 轮换指针
    #[serde(default)]
    pub submolt_rotation_index: usize,
    #[serde(default)]
    pub replied_comment_ids: BTreeSet<String>,
    #[serde(default)]
    pub last_run_at: Option<DateTime<Utc>>,
}

impl RunState {
    pub fn posted_on(&self, date: NaiveDate) -> bool {
        self.last_post_date == Some(date)
    }

    pub fn has_replied(&self, id: &str) -> bool {
        self.replied_comment_ids.contains(id)
    }

    /// 当前轮换到的 submolt，轮换列表为空时返回 None
    pub fn rotation_submolt<'a>(&self, rotation: &'a [String]) -> Option<&'a str> {
        if rotation.is_empty() {
            return None;
        }
        Some(rotation[self.submolt_rotation_index % rotation.len()].as_str())
    }

    /// 记录一次成功发帖，并推进 submolt 轮换
    pub fn record_post(
        &mut self,
        date: NaiveDate,
        question_number: usize,
        post_id: Option<String>,
        rotation_len: usize,
    ) {
        self.last_post_date = Some(date);
        self.last_question_index = Some(question_number);
        self.last_post_id = post_id;
        if rotation_len > 0 {
            self.submolt_rotation_index = (self.submolt_rotation_index + 1) % rotation_len;
        }
    }

    pub fn record_reply(&mut self, id: impl Into<String>) {
        self.replied_comment_ids.insert(id.into());
    }
}
