pub mod conversion;
pub mod dataset;
pub mod definition;

pub use conversion::*;
pub use dataset::*;
pub use definition::*;
