//! HTTP handlers.

mod doc;
mod landing;
mod meta;
mod status;

pub use doc::doc_handler;
pub use landing::landing_handler;
pub use meta::meta_handler;
pub use status::status_handler;
