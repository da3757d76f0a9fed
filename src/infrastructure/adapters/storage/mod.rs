//! Storage Adapter - 请求工作区

mod file_staging;

pub use file_staging::FileStaging;
