#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! LoRaWAN Class A end-device regional parameters.
//!
//! The crate provides the per-region channel plans (channel tables, channel masks and duty-cycle
//! bands), the channel selection engine used before every uplink, the handling of the regional
//! MAC commands (`LinkADRReq`, `NewChannelReq`, ...) and the ADR back-off algorithm.
//!
//! A device owns exactly one [`region::Configuration`], created from a [`Region`]. The radio
//! transceiver and the source of randomness are injected by the caller on every operation that
//! needs them, so the crate holds no global state and never blocks.
//!
//! ## Feature flags
#![doc = document_features::document_features!(feature_label = r#"<span class="stab portability"><code>{feature}</code></span>"#)]

pub(crate) mod fmt;

mod error;
pub use error::{Error, Result};

pub mod adr;
pub mod mac_commands;
pub mod radio;

pub mod region;
pub use region::{Configuration, Region, DR};

pub use rand_core::RngCore;
mod rng;
pub use rng::Prng;

#[cfg(test)]
mod test_util;

/// Milliseconds on the device's monotonic clock, counted from start-up.
pub type TimerTime = u64;
