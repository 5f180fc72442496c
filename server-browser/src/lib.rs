//! Game server browser.
//!
//! A web page listing the live servers the Steam directory knows about,
//! backed by a short-lived cache so page views don't hammer the API.

pub mod cache;
pub mod clock;
pub mod config;
pub mod lookup;
pub mod steam;
pub mod web;
