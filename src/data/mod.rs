//! Field data: pluggable host storage, the multi-component [`Field`], and the
//! explicit field registry.

pub mod field;
pub mod registry;
pub mod storage;

pub use field::Field;
pub use registry::FieldRegistry;
pub use storage::{HostStorage, VecStorage};
