use nom::{
    Parser,
    character::complete::{char, u8},
    combinator::{opt, rest},
    number::complete::float,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::Time;

use crate::{
    IResult,
    sentences::{
        SentenceParse,
        fields::{latlon, unit_field, utc_time},
    },
};

/// GGA - Global Positioning System Fix Data
///
/// ```text
///                                                      11
///         1         2       3 4        5 6 7  8   9  10 |  12 13  14
///         |         |       | |        | | |  |   |   | |   | |   |
///  $--GGA,hhmmss.ss,ddmm.mm,a,dddmm.mm,a,x,xx,x.x,x.x,M,x.x,M,x.x,xxxx*hh<CR><LF>
/// ```
///
/// This sentence never emits a fix on its own; on a nonzero quality indicator
/// it supplies the altitude that the next position sentence attaches. Fields
/// past the altitude units letter are accepted and ignored.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug)]
pub struct Gga {
    /// Fix time in UTC
    pub fix_time: Option<Time>,
    /// Latitude in signed decimal degrees, south negative
    pub latitude: Option<f64>,
    /// Longitude in signed decimal degrees, west negative
    pub longitude: Option<f64>,
    /// GPS quality indicator; zero means no fix
    pub fix_quality: Option<u8>,
    /// Number of satellites in use
    pub satellite_count: Option<u8>,
    /// Horizontal dilution of precision
    pub hdop: Option<f32>,
    /// Altitude above mean sea level
    pub altitude: Option<f64>,
    /// Units letter of the altitude field, `M` for meters
    pub altitude_unit: Option<char>,
}

impl Gga {
    /// A quality indicator of zero, or an empty quality field, means the
    /// receiver has no fix.
    pub fn has_fix(&self) -> bool {
        self.fix_quality.unwrap_or(0) != 0
    }
}

impl SentenceParse for Gga {
    fn parser(i: &str) -> IResult<&str, Self> {
        let (i, fix_time) = opt(utc_time).parse(i)?;
        let (i, _) = char(',').parse(i)?;
        let (i, position) = latlon.parse(i)?;
        let (i, _) = char(',').parse(i)?;
        let (i, fix_quality) = opt(u8).parse(i)?;
        let (i, _) = char(',').parse(i)?;
        let (i, satellite_count) = opt(u8).parse(i)?;
        let (i, _) = char(',').parse(i)?;
        let (i, hdop) = opt(float).parse(i)?;
        let (i, _) = char(',').parse(i)?;
        let (i, (altitude, altitude_unit)) = unit_field.parse(i)?;
        let (i, _) = rest.parse(i)?;

        let (latitude, longitude) = match position {
            Some((latitude, longitude)) => (Some(latitude), Some(longitude)),
            None => (None, None),
        };

        Ok((
            i,
            Self {
                fix_time,
                latitude,
                longitude,
                fix_quality,
                satellite_count,
                hdop,
                altitude,
                altitude_unit,
            },
        ))
    }
}
