//! Application-instance entities: surfaces, instances, and the registry the
//! top-level window list monitors.

pub mod instance;
pub mod registry;
pub mod surface;

pub use instance::{ApplicationInstance, InstanceHandle, InstanceState, SurfaceList};
pub use registry::InstanceRegistry;
pub use surface::{Surface, SurfaceHandle};
