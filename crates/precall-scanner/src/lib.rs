//! Website lead-capture scanner.
//!
//! Fetches a small fixed page set from a business website and reduces it to
//! a flat [`precall_core::CaptureSignal`]: phone numbers found, contact form
//! presence, call-tracking vendor detection, and scheduling widget
//! detection. Extraction is regex/substring based — the vendor signatures
//! live in `precall_core`'s catalog.

pub mod detect;
pub mod error;
pub mod scan;

pub use error::ScannerError;
pub use scan::SiteScanner;
