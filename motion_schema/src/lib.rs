pub mod model;
pub mod result;
pub mod trace;

pub use model::*;
pub use result::*;
pub use trace::*;
