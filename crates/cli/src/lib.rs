//! Library half of the dbx CLI, shared by the binary and its integration tests

pub mod cmd;
pub mod settings;
