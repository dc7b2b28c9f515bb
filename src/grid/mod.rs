//! Grid geometry: local buffer layouts and global read-domain descriptors.
//!
//! Everything that turns a multi-axis coordinate into a flat buffer index goes
//! through the single [`linear_index`]/[`coord_of`] pair exported here, so the
//! store and the scatter step cannot drift apart on ordering.

pub mod domain;
pub mod layout;

pub use domain::DomainDescriptor;
pub use layout::{GridLayout, coord_of, linear_index};

/// Serde helpers for per-axis `[usize; N]` vectors; serde has no
/// `Deserialize` impl for const-generic arrays, so descriptor fields go
/// through a `Vec` with a length check.
pub(crate) mod axes_serde {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, const N: usize>(
        axes: &[usize; N],
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        axes.as_slice().serialize(serializer)
    }

    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[usize; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        let axes = Vec::<usize>::deserialize(deserializer)?;
        let len = axes.len();
        axes.try_into()
            .map_err(|_| D::Error::invalid_length(len, &"one entry per axis"))
    }
}
