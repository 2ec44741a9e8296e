//! Render loop and its collaborators

pub mod host_detect;
pub mod schedule;
mod shutdown;
mod update_manager;

pub use host_detect::resolve_output_format;
pub use schedule::duration_until_next_tick;
pub use shutdown::{ShutdownHandle, ShutdownSignal};
pub use update_manager::{RenderError, UpdateManager};
