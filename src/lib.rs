//! DHT21 Sensor Driver for Embedded Rust
//!
//! This crate provides a platform-agnostic driver for the DHT21 (AM2301) temperature
//! and humidity sensor, built on top of the [`embedded-hal`] traits.
//!
//! The sensor answers a start signal on its single data line with a 40-bit
//! frame. Each bit is encoded in the width of a HIGH pulse, so the driver
//! times every pulse against a free-running [`Clock`] rather than sampling
//! after a fixed delay.
//!
//! # Features
//! - Blocking synchronous API using `embedded-hal` traits
//! - Designed for `no_std` environments
//! - Wall-clock timeouts and counter rollover handling
//! - Optional logging support via `defmt` or `log`
//!
//! # Dependencies
//! This driver depends on the following traits:
//! - [`IoPin`], built on [`InputPin`] and [`OutputPin`], for GPIO access
//! - [`Clock`] for pulse-width measurement
//! - [`DelayNs`] for the start signal
//!
//! Open-drain pins that can be read while driven high can be wrapped in
//! [`OpenDrain`] instead of implementing [`IoPin`].
//!
//! # Optional Features
//! - `defmt`: Implements `defmt::Format` and logs through `defmt`
//! - `log`: Logs through the `log` facade
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//! [`InputPin`]: embedded_hal::digital::InputPin
//! [`OutputPin`]: embedded_hal::digital::OutputPin
//! [`DelayNs`]: embedded_hal::delay::DelayNs

#![cfg_attr(not(test), no_std)]

#[cfg(all(feature = "defmt", feature = "log"))]
compile_error!("Features \"defmt\" and \"log\" are mutually exclusive and cannot be enabled together");

#[macro_use]
mod fmt;

pub mod clock;
pub mod config;
pub mod dht21;
pub mod error;
pub mod frame;
pub mod pin;

#[cfg(test)]
mod testing;

pub use clock::Clock;
pub use config::Config;
pub use dht21::{Dht21, MIN_POLL_INTERVAL_MS};
pub use error::DhtError;
pub use frame::{Frame, Reading};
pub use pin::{IoPin, OpenDrain};
