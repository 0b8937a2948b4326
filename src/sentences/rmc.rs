use nom::{
    Parser,
    character::complete::{char, none_of},
    combinator::{opt, rest},
    number::complete::float,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::{Date, Time};

use crate::{
    IResult,
    sentences::{
        SentenceParse,
        fields::{latlon, utc_date, utc_time},
    },
};

/// RMC - Recommended Minimum Navigation Information
///
/// ```text
///         1         2 3       4 5        6  7   8   9    10 11
///         |         | |       | |        |  |   |   |    |  |
///  $--RMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,xxxx,x.x,a*hh<CR><LF>
/// ```
///
/// This is the emitting sentence: it carries the authoritative 2D position
/// plus the full UTC date. Fields past the date (magnetic variation and the
/// mode indicators later NMEA revisions appended) are accepted and ignored.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug)]
pub struct Rmc {
    /// Fix time in UTC
    pub fix_time: Option<Time>,
    /// Receiver status flag
    pub status: Status,
    /// Latitude in signed decimal degrees, south negative
    pub latitude: Option<f64>,
    /// Longitude in signed decimal degrees, west negative
    pub longitude: Option<f64>,
    /// Speed over ground in knots
    pub speed_over_ground: Option<f32>,
    /// Course over ground in degrees
    pub course_over_ground: Option<f32>,
    /// Fix date in UTC
    pub fix_date: Option<Date>,
}

/// Receiver status flag. Only `A` marks a usable fix; every other value,
/// an empty field included, reads as void: the sentence is well formed but
/// there is nothing to report.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The receiver reports a valid fix
    Valid,
    /// The receiver has no fix
    Void,
}

impl SentenceParse for Rmc {
    fn parser(i: &str) -> IResult<&str, Self> {
        let (i, fix_time) = opt(utc_time).parse(i)?;
        let (i, _) = char(',').parse(i)?;
        let (i, status) = opt(none_of(","))
            .map(|flag| match flag {
                Some('A') => Status::Valid,
                _ => Status::Void,
            })
            .parse(i)?;
        let (i, _) = char(',').parse(i)?;
        let (i, position) = latlon.parse(i)?;
        let (i, _) = char(',').parse(i)?;
        let (i, speed_over_ground) = opt(float).parse(i)?;
        let (i, _) = char(',').parse(i)?;
        let (i, course_over_ground) = opt(float).parse(i)?;
        let (i, _) = char(',').parse(i)?;
        let (i, fix_date) = opt(utc_date).parse(i)?;
        let (i, _) = rest.parse(i)?;

        let (latitude, longitude) = match position {
            Some((latitude, longitude)) => (Some(latitude), Some(longitude)),
            None => (None, None),
        };

        Ok((
            i,
            Self {
                fix_time,
                status,
                latitude,
                longitude,
                speed_over_ground,
                course_over_ground,
                fix_date,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;

    #[test]
    fn parses_canonical_sentence() {
        let i = "123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W";
        let (_, rmc) = Rmc::parser(i).unwrap();

        assert_eq!(rmc.status, Status::Valid);
        assert_eq!(rmc.fix_time, Some(Time::from_hms(12, 35, 19).unwrap()));
        assert!((rmc.latitude.unwrap() - 48.1173).abs() < 1e-6);
        assert!((rmc.longitude.unwrap() - 11.516_667).abs() < 1e-6);
        assert_eq!(rmc.speed_over_ground, Some(22.4));
        assert_eq!(rmc.course_over_ground, Some(84.4));
        assert_eq!(
            rmc.fix_date,
            Some(Date::from_calendar_date(1994, Month::March, 23).unwrap())
        );
    }

    #[test]
    fn void_sentence_is_wellformed() {
        let (_, rmc) = Rmc::parser(",V,,,,,,,230394,,").unwrap();

        assert_eq!(rmc.status, Status::Void);
        assert_eq!(rmc.fix_time, None);
        assert_eq!(rmc.latitude, None);
        assert_eq!(rmc.longitude, None);
        // the empty speed and course fields must not shift the date slot
        assert_eq!(
            rmc.fix_date,
            Some(Date::from_calendar_date(1994, Month::March, 23).unwrap())
        );
    }

    #[test]
    fn unknown_status_flag_reads_as_void() {
        let i = "123519,Q,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W";
        let (_, rmc) = Rmc::parser(i).unwrap();

        assert_eq!(rmc.status, Status::Void);
    }

    #[test]
    fn rejects_garbled_position() {
        assert!(Rmc::parser("123519,A,notanumber,N,01131.000,E,,,230394,,").is_err());
    }
}
