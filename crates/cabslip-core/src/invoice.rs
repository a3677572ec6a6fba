//! # Invoice Numbers
//!
//! 6-digit invoice numbers drawn uniformly from `100000..=999999`.
//!
//! Uniqueness is not tracked: a receipt number is a label, not a key.
//! The source is a trait so the session can be driven with fixed numbers
//! in tests.

use rand::Rng;

use crate::{INVOICE_ID_MAX, INVOICE_ID_MIN};

/// Produces invoice numbers.
pub trait InvoiceIdSource: Send {
    /// Draws a number in `INVOICE_ID_MIN..=INVOICE_ID_MAX`.
    fn next_number(&mut self) -> u32;
}

/// Uniform random invoice numbers from the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomInvoiceIds;

impl InvoiceIdSource for RandomInvoiceIds {
    fn next_number(&mut self) -> u32 {
        rand::thread_rng().gen_range(INVOICE_ID_MIN..=INVOICE_ID_MAX)
    }
}

/// Any `FnMut() -> u32` closure is a source.
impl<F> InvoiceIdSource for F
where
    F: FnMut() -> u32 + Send,
{
    fn next_number(&mut self) -> u32 {
        self()
    }
}

/// Draws a fresh invoice id as a string.
pub fn generate_invoice_id(source: &mut dyn InvoiceIdSource) -> String {
    source.next_number().to_string()
}

/// Draws a valid invoice id different from `current`.
///
/// Re-draws on a collision or an out-of-range number; a misbehaving source
/// is given a bounded number of tries before the next id in range is used.
pub fn regenerate_invoice_id(source: &mut dyn InvoiceIdSource, current: &str) -> String {
    const MAX_DRAWS: usize = 16;

    for _ in 0..MAX_DRAWS {
        let candidate = generate_invoice_id(source);
        if candidate != current && is_valid_invoice_id(&candidate) {
            return candidate;
        }
    }

    match current.parse::<u32>() {
        Ok(n) if (INVOICE_ID_MIN..INVOICE_ID_MAX).contains(&n) => (n + 1).to_string(),
        _ => INVOICE_ID_MIN.to_string(),
    }
}

/// Checks the 6-digit invoice id format.
pub fn is_valid_invoice_id(id: &str) -> bool {
    id.len() == 6
        && id.bytes().all(|b| b.is_ascii_digit())
        && id
            .parse::<u32>()
            .is_ok_and(|n| (INVOICE_ID_MIN..=INVOICE_ID_MAX).contains(&n))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_ids_are_six_digits() {
        let mut source = RandomInvoiceIds;
        for _ in 0..1_000 {
            let id = generate_invoice_id(&mut source);
            assert!(is_valid_invoice_id(&id), "bad id {id}");
        }
    }

    #[test]
    fn test_closure_source() {
        let mut next: u32 = 100_000;
        let mut source = move || {
            next += 1;
            next
        };
        assert_eq!(generate_invoice_id(&mut source), "100001");
        assert_eq!(generate_invoice_id(&mut source), "100002");
    }

    #[test]
    fn test_regenerate_skips_current() {
        let mut draws = vec![222_222_u32, 123_456, 123_456].into_iter();
        let mut source = move || draws.next_back().unwrap_or(999_999);
        assert_eq!(regenerate_invoice_id(&mut source, "123456"), "222222");
    }

    #[test]
    fn test_regenerate_with_stuck_source() {
        let mut source = || 500_000_u32;
        assert_eq!(regenerate_invoice_id(&mut source, "500000"), "500001");

        let mut source = || 999_999_u32;
        assert_eq!(regenerate_invoice_id(&mut source, "999999"), "100000");
    }

    #[test]
    fn test_random_ids_cover_the_range() {
        let mut source = RandomInvoiceIds;
        let draws: Vec<u32> = (0..2_000).map(|_| source.next_number()).collect();

        assert!(draws.iter().all(|n| (INVOICE_ID_MIN..=INVOICE_ID_MAX).contains(n)));
        // Both halves of the range show up
        assert!(draws.iter().any(|&n| n < 550_000));
        assert!(draws.iter().any(|&n| n >= 550_000));
    }

    #[test]
    fn test_regenerate_skips_out_of_range_draws() {
        let mut draws = vec![7_u32, 1_000_000, 654_321].into_iter();
        let mut source = move || draws.next().unwrap_or(999_999);
        assert_eq!(regenerate_invoice_id(&mut source, "123456"), "654321");
    }

    #[test]
    fn test_invoice_id_format() {
        assert!(is_valid_invoice_id("100000"));
        assert!(is_valid_invoice_id("999999"));
        assert!(!is_valid_invoice_id("099999"));
        assert!(!is_valid_invoice_id("12345"));
        assert!(!is_valid_invoice_id("12a456"));
    }
}
