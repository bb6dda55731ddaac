use crate::Result;
use crate::model::PathTableEntries;

pub trait PathTable: Send + Sync {
    /// Lists core, builtin modules and extensions, keeping only the names in
    /// `include_only` when given.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured module directory cannot be read.
    fn path_table(&self, include_only: Option<&[String]>) -> Result<PathTableEntries>;
}
