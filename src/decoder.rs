//! The streaming half of the crate: byte-at-a-time line assembly,
//! cross-sentence state, and fix delivery.

use core::mem;
use std::time::Duration;

use log::{debug, trace, warn};
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::{
    Error,
    frame::frame,
    sentences::{Gga, Rmc, Sentence, SentenceParse, Status},
};

/// A resolved navigation solution, handed to the sink.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Fix {
    /// Latitude in signed decimal degrees, south negative
    pub latitude: f64,
    /// Longitude in signed decimal degrees, west negative
    pub longitude: f64,
    /// Altitude above mean sea level in meters, if a fix-data sentence has
    /// supplied one since the decoder was created or reset
    pub altitude: Option<f64>,
    /// Absolute UTC instant combined from the sentence time and date fields
    pub utc: OffsetDateTime,
    /// The monotonic elapsed-realtime reading the caller passed to the
    /// consume call that completed this sentence
    pub elapsed_realtime: Duration,
}

/// Receives completed fixes.
///
/// Delivery is a direct synchronous call on the consuming thread, so
/// implementations are expected to hand the fix off cheaply; if the sink
/// blocks, the decoder blocks.
pub trait FixSink {
    /// Takes ownership of one completed fix.
    fn deliver(&mut self, fix: Fix);
}

/// Collecting sink, mostly useful in tests.
impl FixSink for Vec<Fix> {
    fn deliver(&mut self, fix: Fix) {
        self.push(fix);
    }
}

/// Streaming decoder: feed it bytes in arrival order, it feeds the sink
/// validated fixes.
///
/// Bytes accumulate in a pending buffer until a `\n` terminator; the
/// completed line then runs through framing validation and sentence
/// interpretation. A `GPGGA` sentence with a usable fix quality updates the
/// carried altitude; a valid `GPRMC` sentence emits a [`Fix`] carrying that
/// altitude. Malformed, checksum-failed, or unknown sentences are discarded
/// without desynchronizing the stream.
///
/// `N` caps how long an unterminated line may grow. A line that overflows is
/// discarded and the decoder skips ahead to the next terminator.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use nmea_fix_stream::{Fix, FixDecoder};
///
/// let mut decoder: FixDecoder<Vec<Fix>> = FixDecoder::new(Vec::new());
/// let line = b"$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n";
/// decoder.consume_slice(line, Duration::from_millis(5));
///
/// assert_eq!(decoder.sink().len(), 1);
/// assert!((decoder.sink()[0].latitude - 48.1173).abs() < 1e-6);
/// ```
pub struct FixDecoder<S, const N: usize = 120> {
    sink: S,
    pending: heapless::Vec<u8, N>,
    skipping: bool,
    altitude: Option<f64>,
}

impl<S: FixSink, const N: usize> FixDecoder<S, N> {
    /// Creates a decoder bound to `sink`. The decoder owns the sink for its
    /// lifetime; see [`FixDecoder::into_sink`] to get it back.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            pending: heapless::Vec::new(),
            skipping: false,
            altitude: None,
        }
    }

    /// Discards all in-flight state: the pending line and the carried
    /// altitude. The sink binding is unaffected.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.skipping = false;
        self.altitude = None;
    }

    /// Shared access to the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Exclusive access to the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the decoder and returns the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Consumes one byte from the stream.
    ///
    /// `elapsed` is the caller's monotonic elapsed-realtime reading for this
    /// delivery; it is passed through unchanged on any fix this byte
    /// completes. Any such fix reaches the sink before the call returns.
    /// `consume` never fails: every malformed input is answered by discarding
    /// the affected sentence.
    pub fn consume(&mut self, byte: u8, elapsed: Duration) {
        if byte == b'\n' {
            if mem::take(&mut self.skipping) {
                return;
            }
            self.flush(elapsed);
        } else if !self.skipping && self.pending.push(byte).is_err() {
            warn!("unterminated line exceeded {N} bytes, discarding");
            self.pending.clear();
            self.skipping = true;
        }
    }

    /// Consumes a chunk of the stream, byte by byte.
    ///
    /// Chunk boundaries carry no meaning: any split of the same bytes across
    /// calls decodes identically.
    pub fn consume_slice(&mut self, bytes: &[u8], elapsed: Duration) {
        for &byte in bytes {
            self.consume(byte, elapsed);
        }
    }

    fn flush(&mut self, elapsed: Duration) {
        let line = mem::take(&mut self.pending);
        let line = line.strip_suffix(b"\r").unwrap_or(&line);

        let Ok(text) = core::str::from_utf8(line) else {
            trace!("discarding non-UTF-8 line");
            return;
        };

        match frame(text) {
            Ok((_, body)) => self.interpret(body, elapsed),
            Err(err) => trace!("discarding unframed line: {err:?}"),
        }
    }

    fn interpret(&mut self, body: &str, elapsed: Duration) {
        match Sentence::parser(body) {
            Ok((_, Sentence::Rmc(rmc))) => self.apply_rmc(&rmc, elapsed),
            Ok((_, Sentence::Gga(gga))) => self.apply_gga(&gga),
            Err(nom::Err::Error(Error::UnrecognizedSentence(_))) => {}
            Err(err) => debug!("discarding malformed sentence: {err:?}"),
        }
    }

    fn apply_rmc(&mut self, rmc: &Rmc, elapsed: Duration) {
        if rmc.status != Status::Valid {
            return;
        }

        let (Some(latitude), Some(longitude), Some(time), Some(date)) =
            (rmc.latitude, rmc.longitude, rmc.fix_time, rmc.fix_date)
        else {
            debug!("discarding valid-status sentence with missing position or timestamp");
            return;
        };

        self.sink.deliver(Fix {
            latitude,
            longitude,
            altitude: self.altitude,
            utc: PrimitiveDateTime::new(date, time).assume_utc(),
            elapsed_realtime: elapsed,
        });
    }

    fn apply_gga(&mut self, gga: &Gga) {
        if !gga.has_fix() {
            return;
        }

        if let Some(altitude) = gga.altitude {
            if gga.altitude_unit != Some('M') {
                debug!("altitude units {:?} taken as meters", gga.altitude_unit);
            }
            self.altitude = Some(altitude);
        }
    }
}
