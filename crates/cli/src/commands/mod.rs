pub mod build;
pub mod check;
pub mod init;
pub mod preview;
pub mod project;
pub mod routes;
pub mod validate;
