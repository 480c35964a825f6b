//! 备忘录服务 - 业务能力层
//!
//! 每道题一条备忘录，键为 `aitest_memo_<id>`，保存在本地 JSON 文件中

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

const MEMO_KEY_PREFIX: &str = "aitest_memo_";

/// 一条备忘录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoEntry {
    pub text: String,
    pub saved_at: String,
}

/// 备忘录服务
pub struct MemoStore {
    path: PathBuf,
    memos: BTreeMap<String, MemoEntry>,
}

impl MemoStore {
    /// 备忘录的存储键
    pub fn key_for(id: &str) -> String {
        format!("{}{}", MEMO_KEY_PREFIX, id)
    }

    /// 打开备忘录文件；文件不存在时为空
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let memos = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("无法读取备忘录文件: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("无法解析备忘录文件: {}", path.display()))?
        } else {
            BTreeMap::new()
        };

        debug!("已加载 {} 条备忘录: {}", memos.len(), path.display());
        Ok(Self { path, memos })
    }

    /// 读取备忘录；没有时返回空字符串
    pub fn get(&self, id: &str) -> &str {
        self.memos
            .get(&Self::key_for(id))
            .map(|m| m.text.as_str())
            .unwrap_or_default()
    }

    /// 保存备忘录并写入文件
    ///
    /// 写入失败时返回错误，内存中的备忘录仍然保留
    pub fn save(&mut self, id: &str, text: &str) -> Result<()> {
        self.memos.insert(
            Self::key_for(id),
            MemoEntry {
                text: text.to_string(),
                saved_at: chrono::Local::now().to_rfc3339(),
            },
        );

        let json = serde_json::to_string_pretty(&self.memos)?;
        fs::write(&self.path, json)
            .with_context(|| format!("无法写入备忘录文件: {}", self.path.display()))?;

        debug!("已保存备忘录: {}", Self::key_for(id));
        Ok(())
    }
}
