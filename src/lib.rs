//! Liuren - Xiao Liu Ren MCP Server
//!
//! A Model Context Protocol server casting "small six-cardinal" (小六壬)
//! three-transmission readings over the nine palaces, with five-element
//! generate/overcome relations between consecutive palaces.

pub mod config;
pub mod divination;
pub mod error;
pub mod models;
pub mod server;

pub use config::Settings;
pub use error::{Error, Result};
pub use server::LiurenServer;
