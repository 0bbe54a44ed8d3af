pub mod config;
pub mod error;
pub mod loader;
pub mod manifest;
pub mod storage;
pub mod types;

pub use config::{ProjectConfig, parse_project_toml};
pub use error::{Error, Result};
pub use loader::{FnTemplate, ModuleLoader, PageTemplate, StaticModuleLoader};
pub use manifest::reduce_entry_chunks;
pub use storage::{FsStorage, MemoryStorage, Storage};
pub use types::*;
