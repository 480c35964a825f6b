pub mod advice_flow;

pub use advice_flow::{
    AdviceButton, AdviceFlow, AdviceOutcome, AdviceRefusal, AdviceTask, PendingAdvice,
};
