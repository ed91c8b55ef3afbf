use std::fmt;

/// Money is represented as integer cents to avoid floating-point precision
/// issues. 1 unit = 100 cents, so a deposit of "50.00" is stored as 5000.
pub type Cents = i64;

/// Format cents as a decimal string.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.abs();
    let units = abs_cents / 100;
    let remainder = abs_cents % 100;
    format!("{}{}.{:02}", sign, units, remainder)
}

/// Parse a decimal string into cents.
/// Example: "50.00" -> 5000, "12.5" -> 1250, "100" -> 10000
///
/// Amounts cross the HTTP boundary as decimal strings, so this is the only
/// place money text is interpreted. More than two decimal places is an
/// error, never a truncation.
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    let (negative, input) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };

    // A sign anywhere past the first byte is not money
    if input.contains(['-', '+']) {
        return Err(ParseCentsError::InvalidFormat);
    }

    let parts: Vec<&str> = input.split('.').collect();
    match parts.len() {
        1 => {
            let units: i64 = parts[0]
                .parse()
                .map_err(|_| ParseCentsError::InvalidFormat)?;
            let cents = units.checked_mul(100).ok_or(ParseCentsError::OutOfRange)?;
            Ok(if negative { -cents } else { cents })
        }
        2 => {
            let units: i64 = if parts[0].is_empty() {
                0
            } else {
                parts[0]
                    .parse()
                    .map_err(|_| ParseCentsError::InvalidFormat)?
            };

            let decimal_str = parts[1];
            let decimal_cents: i64 = match decimal_str.len() {
                0 => 0,
                1 => {
                    // Single digit like "5" means 50 cents
                    decimal_str
                        .parse::<i64>()
                        .map_err(|_| ParseCentsError::InvalidFormat)?
                        * 10
                }
                2 => decimal_str
                    .parse()
                    .map_err(|_| ParseCentsError::InvalidFormat)?,
                _ => return Err(ParseCentsError::TooPrecise),
            };

            // The sign was stripped above, so this never underflows
            let cents = units
                .checked_mul(100)
                .and_then(|cents| cents.checked_add(decimal_cents))
                .ok_or(ParseCentsError::OutOfRange)?;
            Ok(if negative { -cents } else { cents })
        }
        _ => Err(ParseCentsError::InvalidFormat),
    }
}

/// Serde adapter keeping cents as decimal strings on the wire.
/// Annotate fields with `#[serde(with = "cents_as_string")]`.
pub mod cents_as_string {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{Cents, format_cents, parse_cents};

    pub fn serialize<S: Serializer>(cents: &Cents, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_cents(*cents))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Cents, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_cents(&text).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    InvalidFormat,
    TooPrecise,
    OutOfRange,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCentsError::InvalidFormat => write!(f, "invalid money format"),
            ParseCentsError::TooPrecise => write!(f, "amounts support at most two decimal places"),
            ParseCentsError::OutOfRange => write!(f, "amount is out of range"),
        }
    }
}

impl std::error::Error for ParseCentsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(5000), "50.00");
        assert_eq!(format_cents(1234), "12.34");
        assert_eq!(format_cents(100), "1.00");
        assert_eq!(format_cents(1), "0.01");
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(-5000), "-50.00");
        assert_eq!(format_cents(-1), "-0.01");
    }

    #[test]
    fn test_parse_cents() {
        assert_eq!(parse_cents("50.00"), Ok(5000));
        assert_eq!(parse_cents("50"), Ok(5000));
        assert_eq!(parse_cents("12.34"), Ok(1234));
        assert_eq!(parse_cents("12.5"), Ok(1250));
        assert_eq!(parse_cents("0.01"), Ok(1));
        assert_eq!(parse_cents(".50"), Ok(50));
        assert_eq!(parse_cents("-50.00"), Ok(-5000));
        assert_eq!(parse_cents(" 100 "), Ok(10000));
    }

    #[test]
    fn test_parse_cents_rejects_excess_precision() {
        assert_eq!(parse_cents("100.999"), Err(ParseCentsError::TooPrecise));
        assert_eq!(parse_cents("0.001"), Err(ParseCentsError::TooPrecise));
    }

    #[test]
    fn test_parse_cents_bounds_at_i64_max_cents() {
        // i64::MAX is 92233720368547758.07 in decimal form
        assert_eq!(parse_cents("92233720368547758.07"), Ok(i64::MAX));
        assert_eq!(
            parse_cents("92233720368547758.08"),
            Err(ParseCentsError::OutOfRange)
        );
        assert_eq!(
            parse_cents("92233720368547759"),
            Err(ParseCentsError::OutOfRange)
        );
    }

    #[test]
    fn test_parse_cents_invalid() {
        assert!(parse_cents("abc").is_err());
        assert!(parse_cents("12.34.56").is_err());
        assert!(parse_cents("").is_err());
        assert!(parse_cents("12,34").is_err());
        assert!(parse_cents("--5").is_err());
        assert!(parse_cents("1.-5").is_err());
        assert!(parse_cents("+5").is_err());
    }

    #[test]
    fn test_format_parse_round_trip() {
        for cents in [0, 1, 99, 100, 12345, 1_000_000] {
            assert_eq!(parse_cents(&format_cents(cents)), Ok(cents));
        }
    }
}
