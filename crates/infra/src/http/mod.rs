//! HTTP plumbing shared by the REST transport

pub mod client;
pub mod url_builder;

pub use client::{HttpClient, HttpClientBuilder};
pub use url_builder::PathTemplateUrlBuilder;
