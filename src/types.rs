//! Coordinate types shared by the parser and the mesh engine

use derive_more::{Add, AddAssign, Sub, SubAssign};
use std::fmt;
use strum::Display;

use nom::{
    branch::alt,
    character::complete::{char, digit1, one_of, u32},
    combinator::{all_consuming, map, opt},
    sequence::{preceded, tuple},
    IResult,
};

/// Fixed-point length in micrometers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Add, AddAssign, Sub, SubAssign)]
pub struct Micrometer(pub i64);

impl Micrometer {
    const PER_MM: i64 = 1_000;

    /// Whole millimeters
    pub const fn mm(mm: i64) -> Self {
        Self(mm * Self::PER_MM)
    }

    /// Parse from `nom`
    ///
    /// Digits past the third decimal are truncated.
    pub fn parse(input: &str) -> IResult<&str, Micrometer> {
        map(Self::parse_with_residue, |(um, _)| um)(input)
    }

    /// Parse from `nom`, also returning the sign of the truncated digits
    ///
    /// The residue is 0 when nothing below a micrometer was dropped,
    /// otherwise the sign of the value.
    pub fn parse_with_residue(input: &str) -> IResult<&str, (Micrometer, i8)> {
        fn decimal(input: &str) -> IResult<&str, (u32, bool)> {
            map(digit1, |s: &str| {
                let (kept, dropped) = s.split_at(s.len().min(3));
                let n = kept.bytes().fold(0, |n, b| n * 10 + (b - b'0') as u32);
                let n = n * 10_u32.pow(3 - kept.len() as u32);
                (n, dropped.bytes().any(|b| b != b'0'))
            })(input)
        }

        map(
            tuple((
                opt(map(one_of("+-"), |s| s == '-')),
                alt((
                    map(preceded(char('.'), decimal), |d| (0, Some(d))),
                    map(tuple((u32, opt(preceded(char('.'), opt(decimal))))), |(x, d)| {
                        (x, d.flatten())
                    }),
                )),
            )),
            |(sign, (x, d))| {
                let neg = sign.unwrap_or(false);
                let (frac, dropped) = d.unwrap_or((0, false));
                let x = x as i64 * Self::PER_MM + frac as i64;
                let residue = match (dropped, neg) {
                    (false, _) => 0,
                    (true, false) => 1,
                    (true, true) => -1,
                };
                (Micrometer(if neg { -x } else { x }), residue)
            },
        )(input)
    }

    /// Parse a whole token, `None` if anything is left over
    pub fn from_token(token: &str) -> Option<Self> {
        all_consuming(Self::parse)(token).ok().map(|(_, um)| um)
    }

    /// Drop the fractional millimeters, rounding toward zero
    pub fn trunc(self) -> Self {
        Self(self.0 / Self::PER_MM * Self::PER_MM)
    }

    /// [`Micrometer::trunc`] of a value that lay `residue` (a sign) beyond
    /// `self` before its sub-micrometer digits were dropped
    pub fn trunc_residue(self, residue: i8) -> Self {
        let t = self.trunc();
        if t != self {
            return t;
        }
        match (self.0.signum(), residue.signum()) {
            (1, -1) => t - Self::mm(1),
            (-1, 1) => t + Self::mm(1),
            _ => t,
        }
    }

    /// Non-negative remainder of division by `step`
    ///
    /// # Panics
    /// Panics if `step` is zero
    pub fn rem_euclid(self, step: Self) -> Self {
        Self(self.0.rem_euclid(step.0))
    }

    pub fn half(self) -> Self {
        Self(self.0 / 2)
    }

    /// How many times `step` fits into `self`, fractions included
    pub fn ratio(self, step: Self) -> f64 {
        self.0 as f64 / step.0 as f64
    }
}

impl fmt::Display for Micrometer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let (a, b) = (abs / Self::PER_MM as u64, abs % Self::PER_MM as u64);
        if b == 0 {
            write!(f, "{sign}{a}")
        } else {
            let frac = format!("{b:03}");
            write!(f, "{sign}{a}.{}", frac.trim_end_matches('0'))
        }
    }
}

/// Bed axis carried by the first layer marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Axis {
    X,
    Y,
}

#[cfg(test)]
mod tests {
    use super::Micrometer;

    #[test]
    fn um_format() {
        assert_eq!(Micrometer(7042).to_string(), "7.042");
        assert_eq!(Micrometer(-7042).to_string(), "-7.042");
        assert_eq!(Micrometer(33_500).to_string(), "33.5");
        assert_eq!(Micrometer(-500).to_string(), "-0.5");
        assert_eq!(Micrometer::mm(120).to_string(), "120");
        assert_eq!(Micrometer(0).to_string(), "0");
    }

    #[test]
    fn um_parse() {
        fn um(m: &str) -> Micrometer {
            Micrometer::parse(m).unwrap().1
        }

        assert_eq!(um("1"), Micrometer(1000));
        assert_eq!(um("+1"), Micrometer(1000));
        assert_eq!(um("-1"), Micrometer(-1000));
        assert_eq!(um("1."), Micrometer(1000));
        assert_eq!(um("-1."), Micrometer(-1000));

        assert_eq!(um("1.1"), Micrometer(1100));
        assert_eq!(um("1.01"), Micrometer(1010));
        assert_eq!(um("1.001"), Micrometer(1001));
        assert_eq!(um("1.0001"), Micrometer(1000));
        assert_eq!(um("-1.1000000"), Micrometer(-1100));

        assert_eq!(um(".42"), Micrometer(420));
        assert_eq!(um("-.42"), Micrometer(-420));

        assert_eq!(um("30.12345678901"), Micrometer(30_123));
        assert_eq!(um("1.99999999999999999999"), Micrometer(1_999));
    }

    #[test]
    fn um_parse_residue() {
        fn um(m: &str) -> (Micrometer, i8) {
            Micrometer::parse_with_residue(m).unwrap().1
        }

        assert_eq!(um("12.5"), (Micrometer(12_500), 0));
        assert_eq!(um("12.5000"), (Micrometer(12_500), 0));
        assert_eq!(um("0.0005"), (Micrometer(0), 1));
        assert_eq!(um("-0.0005"), (Micrometer(0), -1));
        assert_eq!(um("-2.00012345678901"), (Micrometer(-2_000), -1));
    }

    #[test]
    fn um_token() {
        assert_eq!(Micrometer::from_token("20"), Some(Micrometer::mm(20)));
        assert_eq!(Micrometer::from_token("12.5"), Some(Micrometer(12_500)));
        assert_eq!(Micrometer::from_token("abc"), None);
        assert_eq!(Micrometer::from_token("12mm"), None);
        assert_eq!(Micrometer::from_token(""), None);
    }

    #[test]
    fn um_trunc() {
        assert_eq!(Micrometer(12_345).trunc(), Micrometer::mm(12));
        assert_eq!(Micrometer(-1_500).trunc(), Micrometer::mm(-1));
        assert_eq!(Micrometer(-500).trunc(), Micrometer(0));
    }

    #[test]
    fn um_trunc_residue() {
        assert_eq!(Micrometer::mm(-1).trunc_residue(1), Micrometer(0));
        assert_eq!(Micrometer::mm(-1).trunc_residue(-1), Micrometer::mm(-1));
        assert_eq!(Micrometer::mm(2).trunc_residue(-1), Micrometer::mm(1));
        assert_eq!(Micrometer::mm(2).trunc_residue(1), Micrometer::mm(2));
        assert_eq!(Micrometer(0).trunc_residue(-1), Micrometer(0));
        assert_eq!(Micrometer(-1_500).trunc_residue(1), Micrometer::mm(-1));
        assert_eq!(Micrometer(2_500).trunc_residue(0), Micrometer::mm(2));
    }

    #[test]
    fn um_rem() {
        assert_eq!(Micrometer::mm(101).rem_euclid(Micrometer::mm(20)), Micrometer::mm(1));
        assert_eq!(Micrometer::mm(-1).rem_euclid(Micrometer::mm(20)), Micrometer::mm(19));
    }
}
