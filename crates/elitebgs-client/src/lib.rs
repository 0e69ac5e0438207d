//! Client for the EliteBGS statistics API.
//!
//! One lookup per call, by case-folded name. A lookup with zero matches is
//! the `Ok(None)` outcome, distinct from transport failures. Retry policy,
//! if any, belongs to the caller.

pub mod client;
pub mod error;
pub mod mock;
pub mod models;

pub use client::{EbgsApi, EbgsClient, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use mock::{MockApi, MockApiError};
pub use models::{
    EbgsFaction, EbgsResponse, EbgsSystem, FactionPresence, StateTrend, SystemFactionRef,
};
