//! # Sokuryo Quiz
//!
//! 测量士国家考试题库浏览器
//!
//! ## 架构设计
//!
//! ### ① 核心层（Core）
//! - `store` - `QuestionStore`，归一化后的题目序列，按键查找
//! - `filter` - `FilterCascade`，年度 → 问题组 → 题号 的级联选项
//! - `navigation` - `NavigationController`，当前索引与前后跳转
//! - `session` - `QuizSession`，持有题库和导航状态
//!
//! ### ② 数据层（Models）
//! - `models/question` - 题目数据结构与模范解答
//! - `models/loaders` - 从文件夹加载具名数据集（TOML / JSON）
//!
//! ### ③ 业务能力层（Services）
//! - `MemoStore` - 每道题的备忘录
//! - `AdviceService` - 调用 LLM 点评用户的解答
//!
//! ### ④ 流程层（Workflow）
//! - `AdviceFlow` / `AdviceTask` - 禁用按钮 → 等待建议 → 恢复按钮
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod navigation;
pub mod render;
pub mod services;
pub mod session;
pub mod store;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{QuizError, QuizResult};
pub use filter::{FilterCascade, Selection, REQUIRED_SET};
pub use models::{DatasetCatalog, QuestionRecord};
pub use navigation::{NavigationController, ViewToken};
pub use session::QuizSession;
pub use store::{normalize_year, LoadReport, QuestionStore};
pub use workflow::{AdviceButton, AdviceFlow, AdviceOutcome, AdviceRefusal, AdviceTask};
