//! Restart restore path: load a field from the partitioned store or clone it
//! from another field, then commit the result to the device.

pub mod loader;
pub mod scatter;

pub use loader::{clone_field, load_field, load_registered_field};
pub use scatter::scatter_component;
