pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod migrate;
pub mod sheet;
pub mod sink;
pub mod tmdb;
