pub mod banner;
pub mod config;
pub mod consts;
pub mod engine;
pub mod server;
