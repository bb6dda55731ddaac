mod command_table;
mod path_table;

pub use command_table::FileSystemCommandLoader;
pub use path_table::DirectoryPathTable;
