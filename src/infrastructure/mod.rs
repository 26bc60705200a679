pub mod audio;
pub mod crm;
pub mod download;
pub mod llm;
pub mod observability;
pub mod storage;
