pub mod config;
pub mod error;
pub mod logging;
pub mod result;
pub mod traits;

pub use config::ClientConfig;
pub use error::SyncError;
pub use logging::init_tracing;
pub use result::SyncResult;
pub use traits::Editable;
