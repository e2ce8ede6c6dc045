pub mod config;
pub mod decode;
pub mod export;
pub mod import;
pub mod init;
pub mod log;
pub mod record;
pub mod timeline;
pub mod timeoff;
