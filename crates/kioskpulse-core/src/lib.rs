//! Core domain for the kioskpulse kiosk status service.
//!
//! Provides the status record model, subject-line parsing and
//! classification, webhook field-alias resolution, and the persistence
//! layer. The API crate depends on these types; nothing here touches HTTP.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod models;
pub mod parse;
pub mod payload;
pub mod storage;
pub mod time;

pub use error::{CoreError, Result};
pub use models::{KioskStatus, KioskStatusRecord, Location, NotificationId};
pub use time::{Clock, ManualClock, SystemClock};
