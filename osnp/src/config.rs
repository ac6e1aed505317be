//! Compile-time configuration.
//!
//! Every constant can be overridden at build time with an environment
//! variable named after it, prefixed with `OSNP_`:
//!
//! ```sh
//! OSNP_TRANSMISSION_TIMEOUT="Duration::from_ms(250)" cargo build
//! ```
//!
//! - `TRANSMISSION_TIMEOUT`: how long a MAC command waits for its response.
//! - `MAX_PENDING_COMMANDS`: capacity of the pending list of a
//!   [`DefaultCommandQueue`](crate::command_queue::DefaultCommandQueue).
//! - `KEY_COUNTER_UNSET`: key counter of a freshly built secured frame.
pub use customizable::*;


#[cfg(not(test))]
mod customizable {
    #![allow(unused)]
    include!(concat!(env!("OUT_DIR"), "/config.rs"));
}
