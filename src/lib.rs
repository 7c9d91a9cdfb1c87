pub mod logging;

pub mod cli;
pub mod client;
pub mod config;
pub mod context;
pub mod department;
pub mod download;
pub mod error;
pub mod extract;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod utils;
