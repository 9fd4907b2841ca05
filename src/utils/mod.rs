pub mod serde_fields;
pub use serde_fields::null_as_default;
