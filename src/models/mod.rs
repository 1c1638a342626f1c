pub mod category;
pub mod record;
pub mod report;

pub use category::*;
pub use record::*;
pub use report::*;
