pub mod compare;
pub mod config;
pub mod error;
pub mod load;
pub mod pipeline;
pub mod report;

pub use compare::{compare, Comparison, KeyMode, Summary};
pub use error::{ConfigError, LoadError};
pub use load::{load_ids, IdColumn, LoadOptions, LoadedFile};
