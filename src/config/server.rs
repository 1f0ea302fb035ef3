/// Server configuration constants.
///
/// Address the HTTP/WebSocket server binds to and the simulation cadence.
pub const BIND_ADDR: &str = "127.0.0.1";
pub const BIND_PORT: u16 = 8080;

/// Interval between two simulation ticks, in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 1000;

/// Longest player name kept; longer names are cut.
pub const MAX_NAME_LEN: usize = 16;
