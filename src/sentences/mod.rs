//! The two sentence grammars the decoder understands, plus the identifier
//! dispatch that routes a validated body to one of them.

pub(crate) mod fields;
mod gga;
mod rmc;

pub use gga::Gga;
pub use rmc::{Rmc, Status};

use nom::{Parser, bytes::complete::take, character::complete::char};

use crate::{Error, IResult};

/// Content-level parser for one sentence grammar, run on the validated body
/// the framing parser produced.
pub trait SentenceParse: Sized {
    /// Parses a sentence body (or the portion of it after the identifier)
    /// into `Self`.
    fn parser(i: &str) -> IResult<&str, Self>;
}

/// One recognized sentence, keyed by the five-character talker-plus-type
/// identifier that opens the body.
///
/// Identifiers are matched exactly; anything that is not `GPRMC` or `GPGGA`
/// comes back as [`Error::UnrecognizedSentence`], which the decoder treats as
/// a skip rather than an error.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug)]
pub enum Sentence {
    /// Recommended Minimum Navigation Information
    Rmc(Rmc),
    /// Global Positioning System Fix Data
    Gga(Gga),
}

impl SentenceParse for Sentence {
    fn parser(i: &str) -> IResult<&str, Self> {
        let body = i;

        let (i, address) = take(5u8).parse(i)?;
        let (i, _) = char(',').parse(i)?;

        match address {
            "GPRMC" => Rmc::parser.map(Self::Rmc).parse(i),
            "GPGGA" => Gga::parser.map(Self::Gga).parse(i),
            _ => Err(nom::Err::Error(Error::UnrecognizedSentence(body))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_on_identifier() {
        let body = "GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W";
        assert!(matches!(Sentence::parser(body), Ok((_, Sentence::Rmc(_)))));

        let body = "GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,";
        assert!(matches!(Sentence::parser(body), Ok((_, Sentence::Gga(_)))));
    }

    #[test]
    fn unknown_identifier_is_unrecognized() {
        let body = "GPGSV,3,1,11,03,03,111,00,04,15,270,00,06,01,010,00,13,06,292,00";
        assert!(matches!(
            Sentence::parser(body),
            Err(nom::Err::Error(Error::UnrecognizedSentence(_)))
        ));
    }
}
