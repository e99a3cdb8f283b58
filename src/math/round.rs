//! Decimal rounding of binary floats.
//!
//! `round_decimal(x, places)` rounds the *exact* value stored in `x` to
//! `places` decimal digits, breaking exact ties to the even digit. Scaling by
//! `10^places` first is not equivalent: `0.995` is stored as `0.99499999…`,
//! but `0.995 * 100.0` lands exactly on `99.5`.

/// Enough fractional digits to print any finite `f64` exactly.
const EXACT_DIGITS: usize = 1100;

/// Round the exact binary value of `x` to `places` decimals, ties to even.
pub fn round_decimal(x: f64, places: usize) -> f64 {
    if !x.is_finite() {
        return x;
    }

    let text = format!("{:.*}", EXACT_DIGITS, x.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let (kept, rest) = frac_part.split_at(places.min(frac_part.len()));

    let mut digits: Vec<u8> = int_part.bytes().chain(kept.bytes()).map(|b| b - b'0').collect();
    let round_up = match rest.as_bytes().first() {
        Some(b'6'..=b'9') => true,
        Some(b'5') => rest[1..].bytes().any(|b| b != b'0') || digits.last().is_some_and(|d| d % 2 == 1),
        _ => false,
    };
    if round_up {
        increment(&mut digits);
    }

    let split = digits.len() - kept.len();
    let mut out = String::with_capacity(digits.len() + 2);
    if x.is_sign_negative() {
        out.push('-');
    }
    out.extend(digits[..split].iter().map(|d| char::from(b'0' + d)));
    out.push('.');
    out.extend(digits[split..].iter().map(|d| char::from(b'0' + d)));
    out.push('0');

    // The decimal string is exact, so parsing yields the nearest double.
    out.parse().unwrap_or(x)
}

/// Add one unit in the last place of a decimal digit string.
fn increment(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == 9 {
            *d = 0;
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, 1);
}
