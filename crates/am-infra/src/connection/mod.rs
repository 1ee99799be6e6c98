pub mod http;
pub mod in_memory;

pub use http::HttpConnection;
pub use in_memory::InMemoryAnchorDirectory;
