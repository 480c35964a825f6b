//! 题库 - 核心层
//!
//! 持有归一化、展平后的题目序列，只在启动时整体加载一次，之后不可变。

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

use crate::error::{QuizError, QuizResult};
use crate::models::catalog::{Collection, DatasetCatalog};
use crate::models::question::QuestionRecord;

static REIWA_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"令和([0-9０-９]+)年").expect("年度正则表达式无效")
});

/// 把年度标签归一化为 "RN" 形式
///
/// - `令和5年` → `R5`（全角数字转为半角）
/// - 其他形式原样返回（`R5` → `R5`）
/// - 缺失或为空 → 空字符串
///
/// 匹配不锚定首尾：标签中任意位置出现 `令和N年` 即归一化，
/// 前后的文字被丢弃（`令和5年度` → `R5`，`2023(令和5年)` → `R5`）。
/// 多处出现时取第一处。
pub fn normalize_year(raw_year: Option<&str>) -> String {
    let raw = match raw_year {
        Some(raw) if !raw.is_empty() => raw,
        _ => return String::new(),
    };

    match REIWA_YEAR.captures(raw) {
        Some(caps) => {
            let digits: String = caps[1]
                .chars()
                .map(|c| match c {
                    '０'..='９' => char::from(b'0' + (c as u32 - '０' as u32) as u8),
                    _ => c,
                })
                .collect();
            format!("R{}", digits)
        }
        None => raw.to_string(),
    }
}

/// 一次加载的结果
#[derive(Debug, Default)]
pub struct LoadReport {
    /// 加载的题目总数
    pub loaded: usize,
    /// 成功加载的数据集名称（按加载顺序）
    pub collections: Vec<String>,
    /// 被跳过的数据集
    pub skipped: Vec<QuizError>,
}

/// 题库
#[derive(Debug, Default)]
pub struct QuestionStore {
    records: Vec<QuestionRecord>,
}

impl QuestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按 `order` 指定的顺序拼接数据集，替换原有内容
    ///
    /// 缺失或格式错误的数据集记一条警告并跳过，不会中断整个加载。
    /// 不做 id 去重。
    pub fn load(&mut self, catalog: &DatasetCatalog, order: &[String]) -> LoadReport {
        let mut report = LoadReport::default();
        let mut records = Vec::new();

        for name in order {
            match catalog.get(name) {
                Some(Collection::Records(items)) => {
                    debug!("拼接数据集 {}: {} 题", name, items.len());
                    records.extend(items.iter().cloned().map(|data| {
                        let normalized = normalize_year(data.raw_year.as_deref());
                        QuestionRecord::new(data, normalized)
                    }));
                    report.collections.push(name.clone());
                }
                Some(Collection::Malformed { reason }) => {
                    let err = QuizError::configuration(name, reason.clone());
                    warn!("⚠️ 跳过数据集: {}", err);
                    report.skipped.push(err);
                }
                None => {
                    let err = QuizError::configuration(name, "数据集不存在");
                    warn!("⚠️ 跳过数据集: {}", err);
                    report.skipped.push(err);
                }
            }
        }

        report.loaded = records.len();
        self.records = records;

        info!(
            "✓ 题库加载完成: {} 题 (数据集 {} 个, 跳过 {} 个)",
            report.loaded,
            report.collections.len(),
            report.skipped.len()
        );

        report
    }

    pub fn all(&self) -> &[QuestionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 带边界检查的按索引取题
    pub fn at(&self, index: usize) -> QuizResult<&QuestionRecord> {
        self.records
            .get(index)
            .ok_or(QuizError::NoRecordAt { index })
    }

    /// 按 (年度, 问题组, 题号) 查找第一道匹配的题目
    pub fn find_by_key(&self, year: &str, set: &str, number: &str) -> QuizResult<usize> {
        self.records
            .iter()
            .position(|r| r.matches_key(year, set, number))
            .ok_or_else(|| QuizError::not_found(year, set, number))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::question::QuestionData;

    pub(crate) fn data(id: &str, year: Option<&str>, set: &str, number: &str) -> QuestionData {
        let mut value = serde_json::json!({
            "id": id,
            "q_set": set,
            "q_num": number,
            "type": "calculation",
            "question_text": format!("{} の問題文", id),
        });
        if let Some(year) = year {
            value["year"] = serde_json::json!(year);
        }
        serde_json::from_value(value).unwrap()
    }

    pub(crate) fn store_of(records: Vec<QuestionData>) -> QuestionStore {
        let mut catalog = DatasetCatalog::new();
        catalog.insert_records("main", records);
        let mut store = QuestionStore::new();
        store.load(&catalog, &["main".to_string()]);
        store
    }

    #[test]
    fn test_normalize_year() {
        assert_eq!(normalize_year(Some("令和4年")), "R4");
        assert_eq!(normalize_year(Some("R4")), "R4");
        assert_eq!(normalize_year(Some("令和１０年")), "R10");
        assert_eq!(normalize_year(Some("")), "");
        assert_eq!(normalize_year(None), "");
        assert_eq!(normalize_year(Some("平成30年")), "平成30年");
    }

    #[test]
    fn test_normalize_year_matches_inside_label() {
        assert_eq!(normalize_year(Some("令和5年度")), "R5");
        assert_eq!(normalize_year(Some("2023(令和5年)")), "R5");
        assert_eq!(normalize_year(Some("令和4年/令和5年")), "R4");
        assert_eq!(normalize_year(Some("令和元年")), "令和元年");
    }

    #[test]
    fn test_load_concatenates_in_caller_order() {
        let mut catalog = DatasetCatalog::new();
        catalog.insert_records("a", vec![data("dup", Some("令和5年"), "必須問題", "問1")]);
        catalog.insert_records("b", vec![data("dup", Some("R5"), "必須問題", "問2")]);

        let mut store = QuestionStore::new();
        let report = store.load(&catalog, &["b".to_string(), "a".to_string()]);

        assert_eq!(report.loaded, 2);
        assert!(report.skipped.is_empty());
        let numbers: Vec<&str> = store.all().iter().map(|r| r.question_number()).collect();
        assert_eq!(numbers, vec!["問2", "問1"]);
        assert!(store.all().iter().all(|r| r.id() == "dup"));
        assert!(store.all().iter().all(|r| r.normalized_year() == "R5"));
    }

    #[test]
    fn test_load_skips_missing_and_malformed() {
        let mut catalog = DatasetCatalog::new();
        catalog.insert_records("good", vec![data("g1", Some("R6"), "必須問題", "問1")]);
        catalog.insert_malformed("bad", "questions 不是数组");

        let mut store = QuestionStore::new();
        let order = vec!["bad".to_string(), "missing".to_string(), "good".to_string()];
        let report = store.load(&catalog, &order);

        assert_eq!(store.len(), 1);
        assert_eq!(report.collections, vec!["good".to_string()]);
        assert_eq!(report.skipped.len(), 2);
        assert!(matches!(
            &report.skipped[0],
            QuizError::Configuration { name, .. } if name == "bad"
        ));
    }

    #[test]
    fn test_load_replaces_prior_content() {
        let mut store = store_of(vec![data("x", Some("R6"), "必須問題", "問1")]);
        store.load(&DatasetCatalog::new(), &[]);
        assert!(store.is_empty());
    }

    #[test]
    fn test_at_and_find_by_key() {
        let store = store_of(vec![
            data("a", Some("令和5年"), "必須問題", "問1"),
            data("b", None, "必須問題", "問1"),
            data("c", Some("R5"), "必須問題", "問1"),
        ]);

        assert_eq!(store.at(1).unwrap().id(), "b");
        assert_eq!(store.at(3).unwrap_err(), QuizError::NoRecordAt { index: 3 });

        // 返回 store 顺序中的第一条
        assert_eq!(store.find_by_key("R5", "必須問題", "問1").unwrap(), 0);
        assert_eq!(store.find_by_key("", "必須問題", "問1").unwrap(), 1);
        assert!(matches!(
            store.find_by_key("r5", "必須問題", "問1"),
            Err(QuizError::NotFound { .. })
        ));
    }
}
