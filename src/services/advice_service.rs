//! AI 建议服务 - 业务能力层
//!
//! 只负责"根据模范解答点评用户解答"能力，不关心界面状态
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 兼容 OpenAI API 的服务（如 Gemini 的 OpenAI 兼容端点）

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::QuizError;
use crate::models::question::QuestionRecord;

const SYSTEM_MESSAGE: &str = "あなたは測量士国家試験の非常に優秀な指導者です。";

/// 一次建议请求的内容
#[derive(Debug, Clone)]
pub struct AdviceRequest {
    pub question_id: String,
    pub question_text: String,
    pub expected_answer: String,
    pub user_answer: String,
}

impl AdviceRequest {
    /// 解答为空（或只有空白）时返回 `EmptyAnswer`
    pub fn from_record(record: &QuestionRecord, user_answer: &str) -> Result<Self, QuizError> {
        let user_answer = user_answer.trim();
        if user_answer.is_empty() {
            return Err(QuizError::EmptyAnswer);
        }
        let data = record.data();
        Ok(Self {
            question_id: data.id.clone(),
            question_text: data.question_text.clone(),
            expected_answer: data.answer().expected_text(),
            user_answer: user_answer.to_string(),
        })
    }

    /// 构建点评用的提示词
    pub fn prompt(&self) -> String {
        format!(
            r#"以下の問題に対する受験生の解答を評価し、励ましながら具体的なアドバイスをしてください。

# 問題
{}

# 模範解答
{}

# 受験生の解答
{}

# アドバイスの形式
1.  まず「素晴らしいですね！」「惜しい！」など、ポジティブな一言で始めます。
2.  良い点と改善点を、それぞれ具体的に指摘します。
3.  特に間違っている箇所については、なぜそうなるのかを優しく解説してください。
4.  最後に、次につながる学習のヒントを簡潔に示してください。"#,
            self.question_text, self.expected_answer, self.user_answer
        )
    }
}

/// 点评能力
#[allow(async_fn_in_trait)]
pub trait Advisor {
    async fn advise(&self, request: &AdviceRequest) -> Result<String>;
}

/// AI 建议服务
pub struct AdviceService {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl AdviceService {
    /// 创建新的建议服务；未配置 API Key 时返回错误
    pub fn new(config: &Config) -> Result<Self, QuizError> {
        if !config.has_api_key() {
            return Err(QuizError::AdviceUnavailable(
                "LLM_API_KEY 未设置".to_string(),
            ));
        }

        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Ok(Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
        })
    }

    /// 通用的 LLM 调用函数
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（字符串）
    pub async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
    ) -> Result<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(0.7)
            .max_tokens(2048u32)
            .build()?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            anyhow::anyhow!("LLM API 调用失败: {}", e)
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| anyhow::anyhow!("LLM 返回内容为空"))?;

        Ok(content.trim().to_string())
    }
}

impl Advisor for AdviceService {
    async fn advise(&self, request: &AdviceRequest) -> Result<String> {
        debug!("请求 AI 建议: #{}", request.question_id);
        self.send_to_llm(&request.prompt(), Some(SYSTEM_MESSAGE))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::{data, store_of};

    #[test]
    fn test_request_carries_expected_answer() {
        let store = store_of(vec![data("r5_q1", Some("R5"), "必須問題", "問1")]);
        let record = store.at(0).unwrap();

        let request = AdviceRequest::from_record(record, "  100 m  ").unwrap();
        assert_eq!(request.user_answer, "100 m");
        assert_eq!(request.question_text, "r5_q1 の問題文");

        let prompt = request.prompt();
        assert!(prompt.contains("# 問題\nr5_q1 の問題文"));
        assert!(prompt.contains("# 受験生の解答\n100 m"));
    }

    #[test]
    fn test_blank_answer_is_rejected() {
        let store = store_of(vec![data("r5_q1", Some("R5"), "必須問題", "問1")]);
        let err = AdviceRequest::from_record(store.at(0).unwrap(), " \n ").unwrap_err();
        assert_eq!(err, QuizError::EmptyAnswer);
    }

    #[test]
    fn test_service_requires_api_key() {
        let config = Config::default();
        assert!(matches!(
            AdviceService::new(&config),
            Err(QuizError::AdviceUnavailable(_))
        ));
    }

    /// 测试 LLM API 连接性
    ///
    /// 运行方式：
    /// ```bash
    /// LLM_API_KEY=... cargo test test_advice_api -- --ignored --nocapture
    /// ```
    #[tokio::test]
    #[ignore]
    async fn test_advice_api() {
        let _ = tracing_subscriber::fmt::try_init();

        let config = Config::from_env();
        let service = AdviceService::new(&config).expect("需要设置 LLM_API_KEY");

        let request = AdviceRequest {
            question_id: "demo".to_string(),
            question_text: "水準測量における視準距離を等しくする理由を述べよ。".to_string(),
            expected_answer: "視準軸誤差と球差・気差を消去するため。".to_string(),
            user_answer: "誤差を減らすため。".to_string(),
        };

        let advice = service.advise(&request).await.expect("AI 建议请求失败");
        println!("{}", advice);
        assert!(!advice.is_empty());
    }
}
