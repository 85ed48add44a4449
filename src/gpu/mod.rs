mod buffers;
mod context;
mod render;

pub use buffers::SceneBuffers;
pub use context::GpuContext;
pub use render::RenderPipeline;
