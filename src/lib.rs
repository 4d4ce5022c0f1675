pub mod config;
pub mod error;
pub mod gemini;
pub mod generator;
pub mod models;
pub mod pages;
pub mod routes;
