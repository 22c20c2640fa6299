//! A [`gpui::http_client::HttpClient`] backed by [`reqwest`].
//!
//! GPUI executors do not drive tokio, so requests run on a small tokio runtime owned by
//! this crate and their results are handed back to the caller's executor.
mod native_client;

pub use native_client::ReqwestClient;
