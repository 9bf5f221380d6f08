pub mod init;
pub mod names;
pub mod run;
