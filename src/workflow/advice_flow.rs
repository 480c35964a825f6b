//! AI 建议流程 - 流程层
//!
//! 流程顺序：检查解答 → 禁用按钮 → 等待建议 → 恢复按钮
//!
//! 同一张卡片同时最多只有一个请求；按钮恢复只发生一次，
//! 无论请求成功、失败还是任务被丢弃。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use crate::models::question::QuestionRecord;
use crate::services::advice_service::{AdviceRequest, Advisor};

/// 卡片上的"请 AI 点评"按钮
#[derive(Debug, Clone, Default)]
pub struct AdviceButton {
    pending: Arc<AtomicBool>,
}

impl AdviceButton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        !self.pending.load(Ordering::Acquire)
    }

    /// 禁用按钮；已在等待中时返回 None
    pub fn try_begin(&self) -> Option<PendingAdvice> {
        self.pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| PendingAdvice {
                pending: Arc::clone(&self.pending),
            })
    }
}

/// 请求进行中的凭证，drop 时恢复按钮
#[derive(Debug)]
pub struct PendingAdvice {
    pending: Arc<AtomicBool>,
}

impl Drop for PendingAdvice {
    fn drop(&mut self) {
        self.pending.store(false, Ordering::Release);
    }
}

/// 未发送请求的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdviceRefusal {
    /// 还没有输入解答
    EmptyAnswer,
    /// 该卡片已有请求在进行中
    Busy,
}

/// 一次点评的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdviceOutcome {
    /// AI 的建议
    Advice(String),
    /// 请求失败
    Failed(String),
}

/// AI 建议流程
pub struct AdviceFlow<A> {
    advisor: Arc<A>,
}

impl<A: Advisor> AdviceFlow<A> {
    pub fn new(advisor: A) -> Self {
        Self {
            advisor: Arc::new(advisor),
        }
    }

    /// 检查解答并禁用按钮
    ///
    /// 解答为空返回 `EmptyAnswer`，按钮已禁用返回 `Busy`，两种情况都不会发送请求
    pub fn begin(
        &self,
        button: &AdviceButton,
        record: &QuestionRecord,
        user_answer: &str,
    ) -> Result<AdviceTask<A>, AdviceRefusal> {
        let request = AdviceRequest::from_record(record, user_answer)
            .map_err(|_| AdviceRefusal::EmptyAnswer)?;

        let Some(pending) = button.try_begin() else {
            return Err(AdviceRefusal::Busy);
        };

        Ok(AdviceTask {
            advisor: Arc::clone(&self.advisor),
            request,
            pending,
        })
    }
}

/// 已禁用按钮、等待发送的请求
///
/// 持有按钮凭证，可以移入后台任务；运行结束或任务被丢弃时按钮恢复
pub struct AdviceTask<A> {
    advisor: Arc<A>,
    request: AdviceRequest,
    pending: PendingAdvice,
}

impl<A: Advisor> AdviceTask<A> {
    pub fn request(&self) -> &AdviceRequest {
        &self.request
    }

    /// 调用点评服务并把错误转为结果
    pub async fn run(self) -> AdviceOutcome {
        let AdviceTask {
            advisor,
            request,
            pending,
        } = self;

        info!("🤖 正在请求 AI 建议: #{}", request.question_id);
        let outcome = match advisor.advise(&request).await {
            Ok(advice) => {
                info!("✓ 已收到 AI 建议: #{}", request.question_id);
                AdviceOutcome::Advice(advice)
            }
            Err(e) => {
                warn!("⚠️ AI 建议获取失败 #{}: {}", request.question_id, e);
                AdviceOutcome::Failed(e.to_string())
            }
        };
        drop(pending);
        outcome
    }
}
