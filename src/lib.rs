// first-aid-relay - Injury descriptions and photos to structured first-aid guidance via Gemini
// Author: kelexine (https://github.com/kelexine)

pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod gemini;
pub mod intake;
pub mod metrics;
pub mod models;
pub mod normalize;
pub mod server;
pub mod utils;
pub mod vision;
