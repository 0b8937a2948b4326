//! # Streaming NMEA 0183 fix decoder
//!
//! This library turns a raw, arbitrarily chunked byte stream of NMEA 0183
//! sentences into validated navigation fixes, delivered synchronously to a
//! sink.
//!
//! Three responsibilities compose into a pipeline:
//! - line assembly: bytes accumulate until a terminator, with bounded growth
//!   and resynchronization on overflow ([`FixDecoder`]),
//! - framing validation: `$` prefix, `*CC` XOR checksum ([`frame`]),
//! - sentence interpretation: `GPRMC` carries the 2D position, time, and date
//!   and triggers delivery; `GPGGA` contributes the altitude, which is carried
//!   across sentences until the next position sentence emits
//!   ([`sentences::Sentence`]).
//!
//! Anything else on the stream (unknown sentence types, framing noise,
//! checksum failures, half-populated sentences) is discarded without losing
//! synchronization and without failing the consume call.
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//! use nmea_fix_stream::{Fix, FixDecoder};
//!
//! let mut decoder: FixDecoder<Vec<Fix>> = FixDecoder::new(Vec::new());
//!
//! let stream = b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n\
//!                $GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n";
//! decoder.consume_slice(stream, Duration::from_millis(5));
//!
//! let fix = &decoder.sink()[0];
//! assert!((fix.latitude - 48.1173).abs() < 1e-6);
//! assert_eq!(fix.altitude, Some(545.4));
//! ```

pub mod decoder;
pub mod error;
mod frame;
pub mod sentences;

pub use decoder::{Fix, FixDecoder, FixSink};
pub use error::{Error, IResult};
pub use frame::frame;
pub use sentences::{Gga, Rmc, Sentence, SentenceParse, Status};

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct README;
