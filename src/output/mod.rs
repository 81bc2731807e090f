pub mod sink;
pub mod summary;

pub use sink::{JsonFileSink, RenderPayload, RenderingSink};
