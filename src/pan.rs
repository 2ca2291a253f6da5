//! Test-fixture FPAN generation
//!
//! Produces synthetic 16-digit card numbers from a BIN prefix, with a valid
//! Luhn check digit so they survive basic remote-side validation.

use rand::Rng;

/// Total length of a generated FPAN
const PAN_LENGTH: usize = 16;

/// Generate a Luhn-valid FPAN starting with `bin`.
///
/// The BIN is extended with random digits up to 15 positions and the 16th
/// digit is the Luhn check digit. BINs longer than 15 digits are truncated
/// before the check digit is appended.
#[must_use]
pub fn generate_fpan(bin: &str) -> String {
    let mut rng = rand::thread_rng();
    let mut pan: String = bin.chars().filter(char::is_ascii_digit).take(PAN_LENGTH - 1).collect();
    while pan.len() < PAN_LENGTH - 1 {
        pan.push(char::from(b'0' + rng.gen_range(0..10u8)));
    }
    pan.push(char::from(b'0' + luhn_check_digit(&pan)));
    pan
}

/// Compute the Luhn check digit for a digit string
#[must_use]
pub fn luhn_check_digit(digits: &str) -> u8 {
    let sum: u32 = digits
        .chars()
        .filter_map(|c| c.to_digit(10))
        .rev()
        .enumerate()
        .map(|(i, d)| {
            // Positions counted from the (future) check digit: every other
            // digit is doubled.
            if i % 2 == 0 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();
    ((10 - (sum % 10)) % 10) as u8
}

/// Whether a digit string passes the Luhn checksum
#[must_use]
pub fn passes_luhn(pan: &str) -> bool {
    if pan.is_empty() || !pan.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let (body, check) = pan.split_at(pan.len() - 1);
    check
        .chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .is_some_and(|d| u8::try_from(d).is_ok_and(|d| d == luhn_check_digit(body)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_BIN: &str = "5425";

    #[test]
    fn test_generated_fpan_has_bin_prefix() {
        let fpan = generate_fpan(TEST_BIN);
        assert!(fpan.starts_with(TEST_BIN));
    }

    #[test]
    fn test_generated_fpan_is_16_digits() {
        let fpan = generate_fpan(TEST_BIN);
        assert_eq!(fpan.len(), 16);
        assert!(fpan.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_generated_fpan_passes_luhn() {
        for _ in 0..50 {
            let fpan = generate_fpan(TEST_BIN);
            assert!(passes_luhn(&fpan), "not Luhn-valid: {fpan}");
        }
    }

    #[test]
    fn test_known_check_digit() {
        // 7992739871 has check digit 3 (classic Luhn example)
        assert_eq!(luhn_check_digit("7992739871"), 3);
        assert!(passes_luhn("79927398713"));
        assert!(!passes_luhn("79927398710"));
    }

    #[test]
    fn test_overlong_bin_is_truncated() {
        let fpan = generate_fpan("54253900000000001234");
        assert_eq!(fpan.len(), 16);
        assert!(passes_luhn(&fpan));
    }

    #[test]
    fn test_non_digit_input_rejected_by_luhn() {
        assert!(!passes_luhn(""));
        assert!(!passes_luhn("12a4"));
    }
}
