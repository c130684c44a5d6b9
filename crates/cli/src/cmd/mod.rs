mod demo;
mod info;
mod run;

pub use demo::cmd_demo;
pub use info::cmd_info;
pub use run::{RunOptions, cmd_run};
