//! Error types shared by the framing and sentence parsers.

use nom::error::{ErrorKind, FromExternalError, ParseError};

/// Holds the result of the framing and content parsers.
///
/// It depends on the input type `I`, the output type `O`, and the error type `E`
/// (by default `nom::error::Error<I>`).
///
/// The `Ok` side is a pair containing the remainder of the input (the part of
/// the data that was not parsed) and the produced value. The `Err` side
/// contains an instance of `nom::Err`.
pub type IResult<I, O, E = nom::error::Error<I>> = nom::IResult<I, O, Error<I, E>>;

/// Everything that can go wrong while validating or interpreting one sentence.
///
/// None of these are fatal at the stream level. The decoder answers each of
/// them by discarding the offending sentence and resynchronizing on the next
/// terminator; `consume` itself never fails.
#[derive(Debug, PartialEq)]
pub enum Error<I, E> {
    /// The sentence contains non-ASCII bytes.
    ///
    /// NMEA sentences are ASCII-only; anything else is transport noise.
    NonAscii,

    /// The declared checksum does not match the XOR of the body bytes.
    ///
    /// Contains both the checksum calculated from the body and the one found
    /// after the `*` marker.
    ChecksumMismatch {
        /// The checksum calculated from the sentence body
        expected: u8,
        /// The checksum found in the sentence
        found: u8,
    },

    /// The framing or a field did not match the expected grammar.
    ///
    /// This wraps nom's standard parsing errors.
    ParsingError(E),

    /// A structurally valid sentence whose identifier the decoder does not
    /// know.
    ///
    /// Not an error at the stream level; such sentences are skipped silently.
    /// The full body is provided for reference.
    UnrecognizedSentence(I),

    /// A field held a value outside what its grammar allows.
    ///
    /// Contains the input that caused the error.
    InvalidField(I),
}

impl<I, E> ParseError<I> for Error<I, E>
where
    E: ParseError<I>,
{
    fn from_error_kind(input: I, kind: ErrorKind) -> Self {
        Error::ParsingError(E::from_error_kind(input, kind))
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<I, E, EX> FromExternalError<I, EX> for Error<I, E>
where
    E: FromExternalError<I, EX>,
{
    fn from_external_error(input: I, kind: ErrorKind, e: EX) -> Self {
        Error::ParsingError(E::from_external_error(input, kind, e))
    }
}
