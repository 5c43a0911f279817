pub mod error;
pub mod catalog;
pub mod arch;

pub use arch::ArchCatalog;
pub use catalog::{Architecture, Catalog, Subset};
pub use error::CatalogError;
