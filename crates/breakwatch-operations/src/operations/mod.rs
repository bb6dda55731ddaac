mod collect;
mod next_version;

pub use collect::{CollectInput, CollectOperation, TargetVersion};
pub use next_version::{NextVersionInput, cal_next_version};
