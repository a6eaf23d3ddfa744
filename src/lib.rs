pub mod cli;
pub mod collector;
pub mod config;
pub mod export;
pub mod game;
pub mod http_client;
pub mod lichess;
pub mod logging;
pub mod normalize;
pub mod report;
pub mod summary;
