pub mod audio;
pub mod config;
pub mod error;
pub mod export;
pub mod sample;
pub mod stage;
pub mod state;
