pub use hint::*;
pub use snapshot::*;

mod hint;
mod snapshot;
