//! Server settings loaded from command-line flags and environment variables

use clap::{builder::BoolishValueParser, Parser};

use crate::error::{Error, Result};

const DEFAULT_SERVER_NAME: &str = "LiurenMCP";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_MAX_PROMPT_CALLS: u32 = 10;
const DEFAULT_INTERPRETATION_MAX_TOKENS: u32 = 1024;

#[derive(Parser, Debug, Clone)]
#[command(name = "liuren", version, about = "Xiao liu ren divination MCP server.")]
pub struct Settings {
    /// Name advertised to MCP clients
    #[arg(long, env = "MCP_SERVER_NAME", default_value = DEFAULT_SERVER_NAME)]
    pub server_name: String,

    /// Version advertised to MCP clients
    #[arg(long, env = "MCP_VERSION", default_value = env!("CARGO_PKG_VERSION"))]
    pub server_version: String,

    /// Default tracing directive when RUST_LOG is unset
    #[arg(long, env = "LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    #[arg(
        long,
        env = "DEBUG",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    pub debug: bool,

    /// Upper bound for the `times` argument of the call_hello_multiple prompt
    #[arg(long, env = "MAX_PROMPT_CALLS", default_value_t = DEFAULT_MAX_PROMPT_CALLS)]
    pub max_prompt_calls: u32,

    /// Count and log tool invocations
    #[arg(
        long,
        env = "ENABLE_METRICS",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    pub enable_metrics: bool,

    /// Token budget requested from the client when sampling an interpretation
    #[arg(
        long,
        env = "INTERPRETATION_MAX_TOKENS",
        default_value_t = DEFAULT_INTERPRETATION_MAX_TOKENS
    )]
    pub interpretation_max_tokens: u32,
}

impl Settings {
    /// Parse from the process arguments and environment
    pub fn load() -> Result<Self> {
        Self::parse().validated()
    }

    pub fn validated(self) -> Result<Self> {
        if self.max_prompt_calls == 0 {
            return Err(Error::Config(
                "MAX_PROMPT_CALLS must be at least 1".to_string(),
            ));
        }
        if self.interpretation_max_tokens == 0 {
            return Err(Error::Config(
                "INTERPRETATION_MAX_TOKENS must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }

    /// Effective tracing directive
    pub fn log_directive(&self) -> &str {
        if self.debug {
            "debug"
        } else {
            &self.log_level
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_name: DEFAULT_SERVER_NAME.to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            debug: false,
            max_prompt_calls: DEFAULT_MAX_PROMPT_CALLS,
            enable_metrics: false,
            interpretation_max_tokens: DEFAULT_INTERPRETATION_MAX_TOKENS,
        }
    }
}
