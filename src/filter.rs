//! 级联筛选：年度 → 问题组 → 题号
//!
//! 每个选项列表都是题库与上级选择的纯函数，每次调用都从头重新计算。

use tracing::debug;

use crate::store::QuestionStore;

/// 固定排在最前面的问题组（必答题）
pub const REQUIRED_SET: &str = "必須問題";

/// 取出 "RN" 年度的数字部分
///
/// 只接受规范写法：`R` 后跟不以 0 开头的 ASCII 数字，
/// 所以 `R05`、`R+5` 都不能排序，不会和 `R5` 重复出现
fn year_number(year: &str) -> Option<u32> {
    let digits = year.strip_prefix('R')?;
    if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    digits.parse().ok()
}

fn push_distinct(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

/// 级联筛选器
pub struct FilterCascade<'a> {
    store: &'a QuestionStore,
}

impl<'a> FilterCascade<'a> {
    pub fn new(store: &'a QuestionStore) -> Self {
        Self { store }
    }

    /// 去重后的年度，按数字部分降序（R7 在 R6 之前）
    ///
    /// 空年度和无法解析数字的年度会被跳过
    pub fn years(&self) -> Vec<String> {
        let mut years: Vec<(u32, String)> = Vec::new();
        for record in self.store.all() {
            let year = record.normalized_year();
            if years.iter().any(|(_, y)| y == year) {
                continue;
            }
            match year_number(year) {
                Some(n) => years.push((n, year.to_string())),
                None => debug!("跳过无法排序的年度: {:?} (#{})", year, record.id()),
            }
        }
        years.sort_by(|a, b| b.0.cmp(&a.0));
        years.into_iter().map(|(_, y)| y).collect()
    }

    /// 指定年度下去重后的问题组：必答题在前，其余按字典序升序
    pub fn question_sets(&self, for_year: &str) -> Vec<String> {
        let mut sets = Vec::new();
        for record in self
            .store
            .all()
            .iter()
            .filter(|r| r.normalized_year() == for_year)
        {
            push_distinct(&mut sets, record.question_set());
        }
        sets.sort_by(|a, b| (a != REQUIRED_SET, a).cmp(&(b != REQUIRED_SET, b)));
        sets
    }

    /// 指定年度、问题组下去重后的题号，按字典序升序
    pub fn question_numbers(&self, for_year: &str, for_set: &str) -> Vec<String> {
        let mut numbers = Vec::new();
        for record in self
            .store
            .all()
            .iter()
            .filter(|r| r.normalized_year() == for_year && r.question_set() == for_set)
        {
            push_distinct(&mut numbers, record.question_number());
        }
        numbers.sort();
        numbers
    }
}

/// 下拉框的当前选择
///
/// 改变年度会清空问题组和题号，改变问题组会清空题号
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    year: Option<String>,
    set: Option<String>,
    number: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_year(&mut self, year: impl Into<String>) {
        self.year = Some(year.into());
        self.set = None;
        self.number = None;
    }

    pub fn select_set(&mut self, set: impl Into<String>) {
        self.set = Some(set.into());
        self.number = None;
    }

    pub fn select_number(&mut self, number: impl Into<String>) {
        self.number = Some(number.into());
    }

    pub fn year(&self) -> Option<&str> {
        self.year.as_deref()
    }

    pub fn set(&self) -> Option<&str> {
        self.set.as_deref()
    }

    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }

    /// 三项都已选择时返回完整的键
    pub fn key(&self) -> Option<(&str, &str, &str)> {
        Some((self.year()?, self.set()?, self.number()?))
    }

    /// 当前年度下可选的问题组
    pub fn set_options(&self, cascade: &FilterCascade<'_>) -> Vec<String> {
        self.year()
            .map(|year| cascade.question_sets(year))
            .unwrap_or_default()
    }

    /// 当前年度、问题组下可选的题号
    pub fn number_options(&self, cascade: &FilterCascade<'_>) -> Vec<String> {
        match (self.year(), self.set()) {
            (Some(year), Some(set)) => cascade.question_numbers(year, set),
            _ => Vec::new(),
        }
    }
}
