pub mod auth;
pub mod http;
pub mod source;
pub mod wire;

pub use auth::AuthContext;
pub use http::HttpBoardDataSource;
pub use source::{BoardDataSource, BoardSelector};
pub use wire::{CreateCardRequest, DeleteCardRequest, EditCardRequest, SuccessEnvelope};
