pub mod create;
pub mod generate;
pub mod init;
pub mod run;
pub mod start;
