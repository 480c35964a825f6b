/// 未配置 API Key 时的占位值
pub const API_KEY_PLACEHOLDER: &str = "YOUR_GEMINI_API_KEY_HERE";

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 数据集文件夹（*.toml / *.json）
    pub data_folder: String,
    /// 数据集加载顺序（为空时按文件名排序）
    pub dataset_order: Vec<String>,
    /// 备忘录文件
    pub memo_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_folder: "data".to_string(),
            dataset_order: Vec::new(),
            memo_file: "memos.json".to_string(),
            verbose_logging: false,
            llm_api_key: API_KEY_PLACEHOLDER.to_string(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-2.0-flash".to_string(),
        }
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            data_folder: std::env::var("DATA_FOLDER").unwrap_or(default.data_folder),
            dataset_order: std::env::var("DATASET_ORDER").map(|v| parse_list(&v)).unwrap_or(default.dataset_order),
            memo_file: std::env::var("MEMO_FILE").unwrap_or(default.memo_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
        }
    }

    /// 是否配置了可用的 API Key
    pub fn has_api_key(&self) -> bool {
        !self.llm_api_key.trim().is_empty() && self.llm_api_key != API_KEY_PLACEHOLDER
    }
}
