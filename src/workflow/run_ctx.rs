//! 运行上下文
//!
//! 封装"今天是哪天、该发第几题"这一信息

use chrono::NaiveDate;
use std::fmt::Display;

use crate::models::question::Question;

/// 单次运行的上下文
#[derive(Debug, Clone)]
pub struct RunCtx {
    /// 本次运行对应的日期（可由 `--date` 模拟）
    pub today: NaiveDate,

    /// 今天的题目
    pub question: Question,

    /// 队列长度，用于判断重复发帖是否在同一轮内
    pub queue_len: usize,
}

impl RunCtx {
    pub fn new(today: NaiveDate, question: Question, queue_len: usize) -> Self {
        Self {
            today,
            question,
            queue_len,
        }
    }
}

impl Display for RunCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} 题目#{}/{}]",
            self.today, self.question.number, self.queue_len
        )
    }
}
