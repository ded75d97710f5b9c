use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

use crate::application::engine::TransferPolicy;

/// Runtime configuration for the beneficio ledger service.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Address the HTTP gateway binds to.
    #[arg(long, env = "BENEFICIO_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Bounded wait for each record lock during a transfer, in milliseconds.
    #[arg(long, env = "BENEFICIO_LOCK_WAIT_MS", default_value_t = 250)]
    pub lock_wait_ms: u64,

    /// Lock re-acquisition attempts before a transfer is aborted as a
    /// conflict.
    #[arg(long, env = "BENEFICIO_LOCK_RETRIES", default_value_t = 3)]
    pub lock_retries: u32,
}

impl Config {
    pub fn transfer_policy(&self) -> TransferPolicy {
        TransferPolicy {
            lock_wait: Duration::from_millis(self.lock_wait_ms),
            lock_retries: self.lock_retries,
            ..TransferPolicy::default()
        }
    }
}
