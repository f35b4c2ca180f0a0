//! One handler per subcommand. Handlers report their own errors and return
//! the process exit code.

mod backups;
mod log;
mod rotate;

pub use backups::cmd_backups;
pub use log::cmd_log;
pub use rotate::cmd_rotate;
