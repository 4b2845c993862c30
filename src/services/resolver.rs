//! 日期/序号解析 - 业务能力层
//!
//! 把日历日期或显式序号映射到队列下标，超出队列长度时循环。

use chrono::NaiveDate;

use crate::error::{AppError, AppResult};
use crate::models::question::{Question, QuestionQueue};

/// 默认的队列起始日期
pub const DEFAULT_START_DATE: &str = "2026-02-01";

/// 解析 `YYYY-MM-DD`
pub fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| AppError::InvalidDate {
        value: value.to_string(),
    })
}

/// 选题方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// 显式序号（从1开始，原样保留以便报错）
    Index(String),
    /// 显式日期
    Date(NaiveDate),
    /// 今天
    Today,
}

impl Selection {
    /// 序号优先于日期
    pub fn from_args(index: Option<&str>, date: Option<&str>) -> AppResult<Self> {
        if let Some(raw) = index {
            return Ok(Selection::Index(raw.to_string()));
        }
        match date {
            Some(raw) => Ok(Selection::Date(parse_date(raw)?)),
            None => Ok(Selection::Today),
        }
    }
}

/// 日期/序号解析器
#[derive(Debug, Clone, Copy)]
pub struct DateIndexResolver {
    start_date: NaiveDate,
}

impl DateIndexResolver {
    pub fn new(start_date: NaiveDate) -> Self {
        Self { start_date }
    }

    /// 日期对应的下标，起始日期之前的日期同样循环到合法范围
    pub fn position_for_date(&self, date: NaiveDate, queue_len: usize) -> usize {
        let days = (date - self.start_date).num_days();
        days.rem_euclid(queue_len as i64) as usize
    }

    /// 显式序号对应的下标
    pub fn position_for_index(raw: &str, queue_len: usize) -> AppResult<usize> {
        let invalid = || AppError::InvalidIndex {
            value: raw.to_string(),
        };
        let index: i64 = raw.trim().parse().map_err(|_| invalid())?;
        if index < 1 {
            return Err(invalid());
        }
        Ok(((index - 1) as u64 % queue_len as u64) as usize)
    }

    /// 解析出当天（或指定）的题目
    ///
    /// # 参数
    /// - `queue`: 题目队列
    /// - `selection`: 选题方式
    /// - `today`: 本地日期，`Selection::Today` 时使用
    pub fn resolve<'q>(
        &self,
        queue: &'q QuestionQueue,
        selection: &Selection,
        today: NaiveDate,
    ) -> AppResult<&'q Question> {
        let position = match selection {
            Selection::Index(raw) => Self::position_for_index(raw, queue.len())?,
            Selection::Date(date) => self.position_for_date(*date, queue.len()),
            Selection::Today => self.position_for_date(today, queue.len()),
        };
        Ok(queue.get(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn queue_of(len: usize) -> QuestionQueue {
        let content: Vec<String> = (1..=len).map(|i| format!("Question {}?", i)).collect();
        QuestionQueue::parse(&content.join("\n"), "inline").unwrap()
    }

    fn resolver() -> DateIndexResolver {
        DateIndexResolver::new(parse_date(DEFAULT_START_DATE).unwrap())
    }

    #[test]
    fn test_start_date_is_first_question() {
        let queue = queue_of(30);
        let q = resolver()
            .resolve(&queue, &Selection::Today, date(2026, 2, 1))
            .unwrap();
        assert_eq!(q.number, 1);
    }

    #[test]
    fn test_wraps_past_queue_length() {
        let queue = queue_of(30);
        let r = resolver();

        // 2026-03-03 距起始 30 天，正好回到第 1 题
        let q = r.resolve(&queue, &Selection::Date(date(2026, 3, 3)), date(2026, 1, 1)).unwrap();
        assert_eq!(q.number, 1);

        // 31 天后是第 2 题
        let q = r.resolve(&queue, &Selection::Date(date(2026, 3, 4)), date(2026, 1, 1)).unwrap();
        assert_eq!(q.number, 2);
    }

    #[test]
    fn test_cyclic_property() {
        let r = resolver();
        let base = date(2026, 2, 1);
        for offset in [-400i64, -31, -1, 0, 1, 17, 29, 365] {
            let d = base + Duration::days(offset);
            let expected = r.position_for_date(d, 30);
            assert!(expected < 30);
            for k in [-3i64, -1, 1, 2, 10] {
                let shifted = d + Duration::days(30 * k);
                assert_eq!(r.position_for_date(shifted, 30), expected, "offset={} k={}", offset, k);
            }
        }
    }

    #[test]
    fn test_date_before_start_wraps_into_range() {
        assert_eq!(resolver().position_for_date(date(2026, 1, 31), 30), 29);
    }

    #[test]
    fn test_explicit_index() {
        assert_eq!(DateIndexResolver::position_for_index("1", 30).unwrap(), 0);
        assert_eq!(DateIndexResolver::position_for_index("30", 30).unwrap(), 29);
        assert_eq!(DateIndexResolver::position_for_index("31", 30).unwrap(), 0);
        assert_eq!(DateIndexResolver::position_for_index(" 5 ", 30).unwrap(), 4);
    }

    #[test]
    fn test_invalid_index() {
        for raw in ["0", "-3", "2.5", "abc", ""] {
            let err = DateIndexResolver::position_for_index(raw, 30).unwrap_err();
            assert!(matches!(err, AppError::InvalidIndex { .. }), "raw={:?}", raw);
        }
    }

    #[test]
    fn test_invalid_date() {
        for raw in ["2026-02-30", "2026/02/01", "tomorrow"] {
            assert!(matches!(parse_date(raw), Err(AppError::InvalidDate { .. })));
        }
    }

    #[test]
    fn test_index_wins_over_date() {
        let selection = Selection::from_args(Some("7"), Some("not-a-date")).unwrap();
        assert_eq!(selection, Selection::Index("7".to_string()));

        let selection = Selection::from_args(None, Some("2026-02-10")).unwrap();
        assert_eq!(selection, Selection::Date(date(2026, 2, 10)));

        assert_eq!(Selection::from_args(None, None).unwrap(), Selection::Today);
    }
}
