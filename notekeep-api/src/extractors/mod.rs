//! Custom extractors that turn axum rejections into `ApiError`s.

mod json;
mod path_id;

pub use json::{ApiJson, ApiQuery};
pub use path_id::NoteIdPath;
