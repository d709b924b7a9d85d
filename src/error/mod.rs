//! Error types for the monitor.
//!
//! - [`PollError`] - why a status poll produced no document. Never shown to
//!   the user; the display simply stays stale until the next poll.
//! - [`DeviceError`] - why a device command (save WiFi, restart) failed.
//!
//! | Error | Surfaced to user | Affects polling |
//! |-------|------------------|-----------------|
//! | `PollError::Transport` | No | No |
//! | `PollError::Status` | No | No |
//! | `PollError::Parse` | No | No |
//! | `DeviceError::*` | Transient notice | No |

mod device;
mod poll;

pub use device::DeviceError;
pub use poll::PollError;
