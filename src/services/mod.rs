pub mod abort;
pub mod identity;
pub mod pipeline;
pub mod timeline;

pub use abort::{AbortHandle, AbortSignal};
pub use identity::IdentityResolver;
pub use pipeline::PipelineService;
pub use timeline::TimelineFetcher;
