pub mod audio;
pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
mod player;
pub mod random;
pub mod round;
mod routes;
pub mod session;
pub mod startup;
pub mod vocabulary;
mod websocket;
pub mod word;
