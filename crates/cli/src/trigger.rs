//! Commands accepted on stdin by the daemon.

use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerCommand {
    Refresh,
    Status,
    Quit,
}

impl FromStr for TriggerCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "refresh" | "run" => Ok(Self::Refresh),
            "status" => Ok(Self::Status),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(format!(
                "Unknown command '{other}' (expected refresh, status or quit)"
            )),
        }
    }
}
