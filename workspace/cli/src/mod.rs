pub mod args;
pub mod create_deb;
pub mod latest_version;
