//! Fixed-width decoding of Taiwanese e-invoice codes.
//!
//! Both formats are positional: every field lives at a static character
//! offset, and the total length is checked before anything is sliced.
//!
//! # One-dimensional barcode (exactly 19 chars)
//!
//! ```text
//! 10404 UZ17690872 0122
//! ^^^^^ ^^^^^^^^^^ ^^^^
//! period  invoice  random
//! ```
//!
//! # Two-dimensional QR code (at least 77 chars)
//!
//! | field            | range    |
//! |------------------|----------|
//! | invoice number   | [0, 10)  |
//! | invoice date     | [10, 17) |
//! | random number    | [17, 21) |
//! | sales amount     | [21, 29) |
//! | total amount     | [29, 37) |
//! | buyer tax id     | [37, 45) |
//! | seller tax id    | [45, 53) |
//! | encrypted digest | [53, 77) |
//!
//! Anything after character 77 is ignored here.

use std::ops::Range;

use crate::error::DecodeError;
use crate::invoice::{Barcode, QrCode};

pub const BARCODE_LEN: usize = 19;
pub const QRCODE_MIN_LEN: usize = 77;

/// Decode a 19-character one-dimensional invoice barcode.
pub fn decode_barcode(input: &str) -> Result<Barcode, DecodeError> {
    let chars: Vec<char> = input.chars().collect();
    if chars.len() != BARCODE_LEN {
        return Err(DecodeError::BarcodeLength {
            actual: chars.len(),
        });
    }

    Ok(Barcode {
        period: field(&chars, 0..5),
        invoice_number: field(&chars, 5..15),
        random_number: field(&chars, 15..19),
    })
}

/// Decode the fixed 77-character prefix of an invoice QR code.
pub fn decode_qrcode(input: &str) -> Result<QrCode, DecodeError> {
    let chars: Vec<char> = input.chars().collect();
    if chars.len() < QRCODE_MIN_LEN {
        return Err(DecodeError::QrCodeLength {
            actual: chars.len(),
        });
    }

    Ok(QrCode {
        invoice_number: field(&chars, 0..10),
        invoice_date: field(&chars, 10..17),
        random_number: field(&chars, 17..21),
        amount1: field(&chars, 21..29),
        amount2: field(&chars, 29..37),
        buyer_tax_id: field(&chars, 37..45),
        seller_tax_id: field(&chars, 45..53),
        encrypted_digest: field(&chars, 53..77),
    })
}

// Callers check the length first, so the range is always in bounds.
fn field(chars: &[char], range: Range<usize>) -> String {
    chars[range].iter().collect()
}
