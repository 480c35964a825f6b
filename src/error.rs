use thiserror::Error;

/// 题库核心错误类型
///
/// 核心层的所有失败都通过返回值上报，不会导致程序退出。
/// 最坏的情况是"没有可显示的题目"。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// 数据集缺失或格式错误（跳过并继续）
    #[error("数据集 {name} 配置错误: {reason}")]
    Configuration { name: String, reason: String },

    /// 导航目标超出范围
    #[error("索引 {index} 超出范围 [0, {len})")]
    OutOfRange { index: usize, len: usize },

    /// 按 (年度, 问题组, 题号) 未找到题目
    #[error("未找到题目: {year} {set} {number}")]
    NotFound {
        year: String,
        set: String,
        number: String,
    },

    /// 按索引未找到题目
    #[error("索引 {index} 处没有题目")]
    NoRecordAt { index: usize },

    /// 题库为空
    #[error("题库为空，没有可显示的题目")]
    EmptyStore,

    /// 用户尚未输入解答
    #[error("请先输入解答再请求 AI 建议")]
    EmptyAnswer,

    /// AI 建议服务不可用（未配置 API Key 等）
    #[error("AI 建议服务不可用: {0}")]
    AdviceUnavailable(String),
}

impl QuizError {
    /// 创建配置错误
    pub fn configuration(name: impl Into<String>, reason: impl Into<String>) -> Self {
        QuizError::Configuration {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// 创建按键查找失败错误
    pub fn not_found(year: &str, set: &str, number: &str) -> Self {
        QuizError::NotFound {
            year: year.to_string(),
            set: set.to_string(),
            number: number.to_string(),
        }
    }
}

/// 核心层结果类型
pub type QuizResult<T> = Result<T, QuizError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = QuizError::OutOfRange { index: 5, len: 3 };
        assert_eq!(err.to_string(), "索引 5 超出范围 [0, 3)");

        let err = QuizError::not_found("R5", "必須問題", "問9");
        assert_eq!(err.to_string(), "未找到题目: R5 必須問題 問9");
    }
}
