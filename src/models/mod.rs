pub mod catalog;
pub mod loaders;
pub mod question;

pub use catalog::{Collection, DatasetCatalog};
pub use loaders::load_catalog;
pub use question::{Answer, BlankAnswer, QuestionData, QuestionKind, QuestionRecord};
