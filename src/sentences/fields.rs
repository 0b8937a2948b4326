//! Field-level parsers shared by the sentence grammars.

use nom::{
    Parser,
    branch::alt,
    bytes::complete::{tag, take},
    character::complete::{char, digit1, none_of, one_of},
    combinator::{map_res, opt, value},
    number::complete::double,
    sequence::{preceded, separated_pair},
};
use time::{Date, Month, Time};

use crate::{Error, IResult};

fn invalid(i: &str) -> nom::Err<Error<&str, nom::error::Error<&str>>> {
    nom::Err::Error(Error::InvalidField(i))
}

fn two_digits(i: &str) -> IResult<&str, u8> {
    map_res(take(2u8), |s: &str| s.parse::<u8>()).parse(i)
}

/// UTC time of day, `hhmmss` with an optional fractional-seconds suffix.
pub(crate) fn utc_time(i: &str) -> IResult<&str, Time> {
    let (i, (hour, minute, second)) = (two_digits, two_digits, two_digits).parse(i)?;
    let (i, fraction) = opt(preceded(char('.'), digit1)).parse(i)?;

    let milliseconds = match fraction {
        Some(fraction) => {
            let digits: f64 = fraction.parse().map_err(|_| invalid(fraction))?;
            (digits / 10f64.powi(fraction.len() as i32) * 1000.0) as u16
        }
        None => 0,
    };

    let time = Time::from_hms_milli(hour, minute, second, milliseconds).map_err(|_| invalid(i))?;

    Ok((i, time))
}

/// UTC date, `ddmmyy`. Two-digit years at or above 80 fall in the 1900s,
/// the rest in the 2000s.
pub(crate) fn utc_date(i: &str) -> IResult<&str, Date> {
    let (i, (day, month, year)) = (two_digits, two_digits, two_digits).parse(i)?;

    let month = Month::try_from(month).map_err(|_| invalid(i))?;
    let year = match year {
        80..=99 => 1900 + year as i32,
        _ => 2000 + year as i32,
    };

    let date = Date::from_calendar_date(year, month, day).map_err(|_| invalid(i))?;

    Ok((i, date))
}

/// One latitude or longitude value in the concatenated degrees-plus-minutes
/// encoding (`dddmm.mmmm`): every whole-number digit before the last two is
/// degrees, the last two plus the fraction are decimal minutes.
pub(crate) fn coordinate(i: &str) -> IResult<&str, f64> {
    let (i, whole) = digit1.parse(i)?;
    let (i, fraction) = opt(preceded(char('.'), digit1)).parse(i)?;

    if whole.len() < 2 {
        return Err(invalid(whole));
    }

    let (degrees, minutes) = whole.split_at(whole.len() - 2);
    let degrees: f64 = if degrees.is_empty() {
        0.0
    } else {
        degrees.parse().map_err(|_| invalid(whole))?
    };
    let mut minutes: f64 = minutes.parse().map_err(|_| invalid(whole))?;
    if let Some(fraction) = fraction {
        let digits: f64 = fraction.parse().map_err(|_| invalid(fraction))?;
        minutes += digits / 10f64.powi(fraction.len() as i32);
    }

    Ok((i, degrees + minutes / 60.0))
}

/// Latitude and longitude with their hemisphere letters, as signed decimal
/// degrees. South and west are negative. Four adjacent empty fields mean the
/// receiver has no position yet.
pub(crate) fn latlon(i: &str) -> IResult<&str, Option<(f64, f64)>> {
    alt((
        value(None, tag(",,,")),
        separated_pair(
            separated_pair(coordinate, char(','), one_of("NS")),
            char(','),
            separated_pair(coordinate, char(','), one_of("EW")),
        )
        .map(|((lat, ns), (lon, ew))| {
            let lat = if ns == 'S' { -lat } else { lat };
            let lon = if ew == 'W' { -lon } else { lon };
            Some((lat, lon))
        }),
    ))
    .parse(i)
}

/// A numeric field followed by its single-letter units field. The raw value
/// is kept whatever the units letter says; the caller decides what to make of
/// non-meter units.
pub(crate) fn unit_field(i: &str) -> IResult<&str, (Option<f64>, Option<char>)> {
    separated_pair(opt(double), char(','), opt(none_of(","))).parse(i)
}
