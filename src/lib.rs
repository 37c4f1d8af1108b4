pub mod canvas;
pub mod config;
pub mod error;
pub mod leganto;
pub mod models;
pub mod services;
pub mod term;
