pub mod brand_directory;
pub mod csv_parser;
pub mod error;
pub mod executor;
pub mod product_store;
pub mod progress_tracker;
pub mod summary;
pub mod template;

pub use brand_directory::{BrandDirectory, BrandSource, DbBrandSource};
pub use error::{ImportError, StoreError};
pub use executor::{ExecutorSettings, ImportExecutor, ImportOutcome};
pub use product_store::{DbProductStore, ProductStore};
pub use progress_tracker::ProgressTracker;
