//! A barebones client for the Spotify Wrapper backend API.
#![deny(missing_docs)]

mod client;
pub use client::*;

mod auth;
pub use auth::*;

mod spotify;
pub use spotify::*;

mod request;
