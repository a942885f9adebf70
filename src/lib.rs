pub mod config;
pub mod models;
pub mod scrape;
pub mod web;
