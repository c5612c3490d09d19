//! Table metadata catalog

mod registry;

pub use registry::TableRegistry;
