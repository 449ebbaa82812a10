pub mod init;
pub mod run;
pub mod search;
pub mod validate;
