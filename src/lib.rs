pub mod api;
pub mod config;
pub mod error;
pub mod feed;
pub mod nearby;
pub mod stations;
