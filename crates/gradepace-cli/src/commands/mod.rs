pub mod init;
pub mod plan;
pub mod report;
pub mod score;
pub mod status;
pub mod subject;
pub mod target;
pub mod template;
pub mod validate;
