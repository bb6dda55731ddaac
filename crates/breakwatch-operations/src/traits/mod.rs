mod command_loader;
mod path_table;

pub use command_loader::CommandLoader;
pub use path_table::PathTable;
