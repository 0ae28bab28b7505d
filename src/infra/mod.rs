pub mod clipboard;
pub mod file_store;
pub mod http_endpoint;
pub mod in_memory_store;
pub mod notifier;

pub use clipboard::{InMemoryClipboard, SystemClipboard};
pub use file_store::FileLeadStore;
pub use http_endpoint::ReqwestLeadEndpoint;
pub use in_memory_store::InMemoryLeadStore;
pub use notifier::{NoopNotifier, TracingNotifier};
