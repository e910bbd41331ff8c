//! Ready-made loader pieces: URL builders for HTTP backends and an in-memory
//! source.

pub mod memory;
pub mod query;

pub use memory::MemorySource;
pub use query::{build_page_url, QueryConvention};
