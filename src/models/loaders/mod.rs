pub mod dataset_loader;

pub use dataset_loader::{load_catalog, parse_collection};
