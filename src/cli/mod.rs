pub mod output;
pub mod shell;

pub use shell::Shell;
