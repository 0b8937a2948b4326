//! Sentence framing validation.
//!
//! A candidate sentence (one assembled line, terminator already stripped) has
//! the shape `$BODY*CC`: a `$` start marker, a comma-delimited body opening
//! with the five-character talker-plus-type identifier, a single `*` checksum
//! marker, and two hex digits equal to the XOR of every body byte.

use nom::{
    Err, Input, Parser,
    bytes::complete::{take, take_until},
    character::complete::{char, hex_digit0},
    combinator::{rest_len, verify},
    error::{ErrorKind, ParseError},
    number::complete::hex_u32,
    sequence::terminated,
};

use crate::{Error, IResult};

/// Validates the framing of one candidate sentence and returns its body.
///
/// The body is everything between the `$` start marker and the `*` checksum
/// marker, identifier included. The two digits following `*` must spell the
/// XOR of all body bytes in hex; digit case is not significant. Nothing may
/// follow the checksum.
///
/// # Examples
///
/// ```rust
/// use nmea_fix_stream::frame;
///
/// let (_, body) = frame("$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47").unwrap();
/// assert!(body.starts_with("GPGGA,"));
///
/// assert!(frame("$GPGGA,123519*00").is_err()); // checksum mismatch
/// assert!(frame("GPGGA,123519*2F").is_err()); // missing start marker
/// ```
pub fn frame(i: &str) -> IResult<&str, &str> {
    if !i.is_ascii() {
        return Err(Err::Error(Error::NonAscii));
    }

    let (i, _) = char('$').parse(i)?;
    let (i, body) = take_until("*").parse(i)?;
    let (i, _) = char('*').parse(i)?;
    let (_, declared) = consumed(take(2u8), ErrorKind::Count).parse(i)?;
    let (_, declared) = consumed(hex_digit0, ErrorKind::IsA).parse(declared)?;
    let (_, declared) = hex_u32.map(|cc| cc as u8).parse(declared)?;

    let computed = checksum(body);
    if declared != computed {
        return Err(Err::Error(Error::ChecksumMismatch {
            expected: computed,
            found: declared,
        }));
    }

    Ok(("", body))
}

/// XOR of every byte between the `$` and `*` markers, exclusive of both.
fn checksum(body: &str) -> u8 {
    body.bytes().fold(0, |acc, byte| acc ^ byte)
}

/// Runs `f` and fails with `e` unless it consumed all of the input.
fn consumed<I, E: ParseError<I>, F>(
    f: F,
    e: ErrorKind,
) -> impl Parser<I, Output = <F as Parser<I>>::Output, Error = E>
where
    I: Input,
    F: Parser<I, Error = E>,
{
    terminated(
        f,
        verify(rest_len, |len| len == &0)
            .or(move |i| Err(Err::Error(nom::error::make_error(i, e)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W";

    fn xor(body: &str) -> u8 {
        body.bytes().fold(0, |acc, byte| acc ^ byte)
    }

    #[test]
    fn accepts_wellformed_sentence() {
        let line = format!("${BODY}*{:02X}", xor(BODY));
        let (_, body) = frame(&line).unwrap();
        assert_eq!(body, BODY);
    }

    #[test]
    fn checksum_hex_case_is_insignificant() {
        let line = format!("${BODY}*{:02x}", xor(BODY));
        assert!(frame(&line).is_ok());
    }

    #[test]
    fn any_single_byte_flip_is_rejected() {
        let cc = xor(BODY);
        for idx in 0..BODY.len() {
            let mut body = BODY.as_bytes().to_vec();
            body[idx] ^= 0x01;
            let line = format!("${}*{cc:02X}", core::str::from_utf8(&body).unwrap());
            assert!(frame(&line).is_err(), "flip of body byte {idx} was accepted");
        }
    }

    #[test]
    fn reports_checksum_mismatch() {
        let line = format!("${BODY}*00");
        match frame(&line) {
            Err(Err::Error(Error::ChecksumMismatch { expected, found })) => {
                assert_eq!(expected, xor(BODY));
                assert_eq!(found, 0x00);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn rejects_missing_start_marker() {
        assert!(frame("GPRMC,data*00").is_err());
    }

    #[test]
    fn rejects_missing_checksum_marker() {
        assert!(frame("$GPRMC,data").is_err());
    }

    #[test]
    fn rejects_malformed_checksum() {
        assert!(frame("$GPRMC,data*7").is_err());
        assert!(frame("$GPRMC,data*XQ").is_err());
        assert!(frame("$GPRMC,data*123").is_err());
    }

    #[test]
    fn rejects_trailing_bytes_after_checksum() {
        let line = format!("${BODY}*{:02X}extra", xor(BODY));
        assert!(frame(&line).is_err());
    }

    #[test]
    fn rejects_non_ascii_input() {
        assert_eq!(frame("$GPRMC,dätä*00"), Err(Err::Error(Error::NonAscii)));
    }
}
