pub mod advice_service;
pub mod memo_store;

pub use advice_service::{AdviceRequest, AdviceService, Advisor};
pub use memo_store::MemoStore;
