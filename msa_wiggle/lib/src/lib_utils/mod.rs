pub mod alignment;
pub mod alphabet;
pub mod deinterleave;
pub mod entropy;
pub mod errors;
pub mod reference;
pub mod streaming;
pub mod struct_helper;
pub mod track_writer;

use entropy::DEFAULT_SCALE;

// columns between flushes of the streaming outputs
pub const FLUSH_INTERVAL: usize = 5000;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WiggleOptions {
    // multiplier applied to the entropy in bits
    pub scale: f64,
    // streaming writer only, 0 disables periodic flushing
    pub flush_interval: usize,
}

impl Default for WiggleOptions {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            flush_interval: FLUSH_INTERVAL,
        }
    }
}
