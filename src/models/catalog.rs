use std::collections::BTreeMap;

use crate::models::question::QuestionData;

/// 一个具名数据集
#[derive(Debug, Clone)]
pub enum Collection {
    /// 正常解析出的题目序列
    Records(Vec<QuestionData>),
    /// 已声明但无法作为题目序列使用
    Malformed { reason: String },
}

/// 数据集目录：数据集名称 → 题目序列
///
/// 名称不存在即表示"没有这个数据集"，不需要运行时探测
#[derive(Debug, Clone, Default)]
pub struct DatasetCatalog {
    collections: BTreeMap<String, Collection>,
}

impl DatasetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_records(&mut self, name: impl Into<String>, records: Vec<QuestionData>) {
        self.collections
            .insert(name.into(), Collection::Records(records));
    }

    pub fn insert_malformed(&mut self, name: impl Into<String>, reason: impl Into<String>) {
        self.collections.insert(
            name.into(),
            Collection::Malformed {
                reason: reason.into(),
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&Collection> {
        self.collections.get(name)
    }

    /// 按名称排序的全部数据集名称（默认加载顺序）
    pub fn names(&self) -> Vec<String> {
        self.collections.keys().cloned().collect()
    }
}
