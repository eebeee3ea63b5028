//! HTTP clients for the place-search providers.
//!
//! [`PlacesClient`] wraps the Google Places web service (Text Search, Place
//! Details, Nearby Search); [`SerpClient`] wraps the SerpAPI local-pack
//! endpoint used as a fallback panel source. Both expose `with_base_url`
//! constructors for pointing at a mock server in tests.

pub mod client;
pub mod error;
pub mod serp;
mod types;

pub use client::{PlaceDetails, PlacesClient};
pub use error::PlacesError;
pub use serp::{LocalPack, SerpClient};
