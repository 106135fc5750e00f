use std::{fmt, str::FromStr};

use num::{bigint::BigInt, rational::BigRational, ToPrimitive};
use solana_sdk::native_token::LAMPORTS_PER_SOL;

use crate::error::LockerError;

/// A human-denominated amount of SOL, held as an exact rational so that
/// fractional inputs convert to lamports without floating point rounding
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Amount {
    value: BigRational,
    text: String,
}

impl Amount {
    /// Amount in lamports, rounding half-up to the nearest lamport
    pub fn to_smallest_unit(&self) -> Result<u64, LockerError> {
        let lamports = &self.value * BigRational::from_integer(BigInt::from(LAMPORTS_PER_SOL));
        lamports
            .round()
            .to_integer()
            .to_u64()
            .ok_or_else(|| LockerError::InvalidAmount(self.text.clone()))
    }
}

impl FromStr for Amount {
    type Err = LockerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = || LockerError::InvalidAmount(s.to_string());

        let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
        let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction)
        {
            return Err(invalid());
        }

        let numer = BigInt::from_str(&format!("{}{}", whole, fraction)).map_err(|_| invalid())?;
        let denom = num::pow(BigInt::from(10u32), fraction.len());

        Ok(Amount {
            value: BigRational::new(numer, denom),
            text: text.to_string(),
        })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} SOL", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lamports(s: &str) -> u64 {
        s.parse::<Amount>().unwrap().to_smallest_unit().unwrap()
    }

    #[test]
    fn converts_whole_and_fractional_amounts() {
        assert_eq!(lamports("1"), 1_000_000_000);
        assert_eq!(lamports("1.0"), 1_000_000_000);
        assert_eq!(lamports("0.000000001"), 1);
        assert_eq!(lamports("2.5"), 2_500_000_000);
        assert_eq!(lamports(".5"), 500_000_000);
        assert_eq!(lamports("3."), 3_000_000_000);
        assert_eq!(lamports("0"), 0);
    }

    #[test]
    fn avoids_binary_float_error() {
        // 0.1 + 0.2 style inputs stay exact.
        assert_eq!(lamports("0.3"), 300_000_000);
        assert_eq!(lamports("1.000000007"), 1_000_000_007);
    }

    #[test]
    fn rounds_half_up_below_one_lamport() {
        assert_eq!(lamports("0.0000000005"), 1);
        assert_eq!(lamports("0.00000000049"), 0);
        assert_eq!(lamports("1.0000000015"), 1_000_000_002);
    }

    #[test]
    fn rejects_malformed_input() {
        for input in ["", ".", "-1", "+1", "1e9", "1.2.3", "one", "1,5"] {
            assert!(
                matches!(input.parse::<Amount>(), Err(LockerError::InvalidAmount(_))),
                "accepted {:?}",
                input
            );
        }
    }

    #[test]
    fn rejects_amounts_beyond_u64() {
        let amount: Amount = "18446744074".parse().unwrap();
        assert!(matches!(
            amount.to_smallest_unit(),
            Err(LockerError::InvalidAmount(_))
        ));
        let max: Amount = "18446744073.709551615".parse().unwrap();
        assert_eq!(max.to_smallest_unit().unwrap(), u64::MAX);
    }
}
