//! Command line configuration.
//!
//! Every option can also come from a `TTT_*` environment variable; an explicit
//! flag wins over the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::board::{DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE};

fn default_static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src/static")
}

fn parse_board_size(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err(String::from("board size must be at least 1")),
        Ok(size) if size > MAX_BOARD_SIZE => {
            Err(format!("board size must be at most {MAX_BOARD_SIZE}"))
        }
        Ok(size) => Ok(size),
        Err(e) => Err(e.to_string()),
    }
}

/// Two-player tic-tac-toe in the browser.
#[derive(Parser, Debug, Clone)]
#[command(name = "tic-tac-toe", version, about, long_about = None)]
pub struct Cli {
    /// Address serving the game page
    #[arg(long, env = "TTT_HTTP_ADDR", default_value = "127.0.0.1:8080")]
    pub http_addr: SocketAddr,

    /// Address accepting WebSocket game connections
    #[arg(long, env = "TTT_WS_ADDR", default_value = "127.0.0.1:8081")]
    pub ws_addr: SocketAddr,

    /// WebSocket URL the page connects to [default: ws://<ws-addr>]
    #[arg(long, env = "TTT_WS_ENDPOINT")]
    pub ws_endpoint: Option<String>,

    /// Directory holding index.html, app.js and grid.css
    #[arg(long, env = "TTT_STATIC_DIR", default_value_os_t = default_static_dir())]
    pub static_dir: PathBuf,

    /// Cells per side; a full row, column or diagonal wins
    #[arg(long, env = "TTT_BOARD_SIZE", default_value_t = DEFAULT_BOARD_SIZE, value_parser = parse_board_size)]
    pub board_size: usize,
}

impl Cli {
    pub fn ws_endpoint(&self) -> String {
        self.ws_endpoint
            .clone()
            .unwrap_or_else(|| format!("ws://{}", self.ws_addr))
    }
}
