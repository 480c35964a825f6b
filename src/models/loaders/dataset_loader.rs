use crate::models::catalog::DatasetCatalog;
use crate::models::question::QuestionData;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 数据文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DataFormat {
    Toml,
    Json,
}

impl DataFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Some(DataFormat::Toml),
            Some("json") => Some(DataFormat::Json),
            _ => None,
        }
    }
}

/// 解析一个数据集文件的内容
///
/// - TOML：`[[questions]]` 数组
/// - JSON：顶层数组，或带 `questions` 数组的对象
///
/// 返回 `Err(reason)` 表示数据集格式错误
fn parse_content(content: &str, format: DataFormat) -> std::result::Result<Vec<QuestionData>, String> {
    let value: serde_json::Value = match format {
        DataFormat::Toml => {
            let table: toml::Table =
                toml::from_str(content).map_err(|e| format!("TOML解析失败: {}", e))?;
            serde_json::to_value(table).map_err(|e| format!("TOML转换失败: {}", e))?
        }
        DataFormat::Json => {
            serde_json::from_str(content).map_err(|e| format!("JSON解析失败: {}", e))?
        }
    };

    let questions = match value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut map) => match map.remove("questions") {
            Some(serde_json::Value::Array(items)) => items,
            Some(_) => return Err("questions 不是数组".to_string()),
            None => return Err("缺少 questions".to_string()),
        },
        _ => return Err("数据集不是题目序列".to_string()),
    };

    questions
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value::<QuestionData>(item)
                .map_err(|e| format!("第 {} 题格式错误: {}", i + 1, e))
        })
        .collect()
}

/// 解析单个数据集文件，并以文件名（不含扩展名）登记到目录中
pub async fn parse_collection(catalog: &mut DatasetCatalog, path: &Path) -> Result<()> {
    let Some(format) = DataFormat::from_path(path) else {
        return Ok(());
    };
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .with_context(|| format!("无效的文件名: {}", path.display()))?;

    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取数据文件: {}", path.display()))?;

    match parse_content(&content, format) {
        Ok(records) => {
            tracing::info!("成功加载数据集 {}: {} 题", name, records.len());
            catalog.insert_records(name, records);
        }
        Err(reason) => {
            tracing::warn!("数据集 {} 格式错误: {}", name, reason);
            catalog.insert_malformed(name, reason);
        }
    }

    Ok(())
}

/// 从文件夹中加载所有数据集（`*.toml` / `*.json`）
pub async fn load_catalog(folder_path: &str) -> Result<DatasetCatalog> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("数据文件夹不存在: {}", folder_path);
    }

    let mut catalog = DatasetCatalog::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if DataFormat::from_path(&path).is_none() {
            continue;
        }
        tracing::debug!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );
        if let Err(e) = parse_collection(&mut catalog, &path).await {
            tracing::warn!("加载文件失败 {}: {}", path.display(), e);
        }
    }

    Ok(catalog)
}
