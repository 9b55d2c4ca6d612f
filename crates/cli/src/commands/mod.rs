pub mod classify;
pub mod init;
pub mod inspect;
pub mod rules;
pub mod run;
pub mod tree;

pub use classify::classify_command;
pub use init::init_command;
pub use inspect::inspect_command;
pub use rules::rules_command;
pub use run::run_command;
pub use tree::tree_command;
