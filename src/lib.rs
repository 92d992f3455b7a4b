pub mod batch;
pub mod config;
pub mod executor;
pub mod expression;
pub mod format;
pub mod session;
pub mod shell;
pub mod storage;
pub mod table;
