//! Context capabilities and the hooks that use them
//!
//! Each capability is a trait a context type implements (usually by
//! delegating to an embedded `WithLevel` or `WithTime`), paired with a hook
//! that reads or updates it.

pub mod level;
pub mod level_logger;
pub mod time;

pub use level::{hook_any_level_skip, hook_level_skip, is_active, Level, Leveler, WithLevel};
pub use level_logger::{LevelLogger, LevelWriter};
pub use time::{hook_update_time, Timer, WithTime};
