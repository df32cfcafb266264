pub mod add;
pub mod banner;
pub mod debug;
pub mod init;
pub mod list;
pub mod monitors;
pub mod resolve;
pub mod run;
pub mod status;
