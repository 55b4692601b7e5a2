//! Amount in words, Indian numbering (thousand, lakh, crore).

use crate::money::Money;

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

fn below_hundred(n: u128, out: &mut Vec<&'static str>) {
    let n = n as usize;
    if n < 20 {
        if n > 0 {
            out.push(ONES[n]);
        }
    } else {
        out.push(TENS[n / 10]);
        if n % 10 > 0 {
            out.push(ONES[n % 10]);
        }
    }
}

fn push_words(n: u128, out: &mut Vec<&'static str>) {
    let crore = n / 10_000_000;
    let lakh = (n / 100_000) % 100;
    let thousand = (n / 1_000) % 100;
    let hundred = (n / 100) % 10;
    let rest = n % 100;

    if crore > 0 {
        push_words(crore, out);
        out.push("Crore");
    }
    if lakh > 0 {
        below_hundred(lakh, out);
        out.push("Lakh");
    }
    if thousand > 0 {
        below_hundred(thousand, out);
        out.push("Thousand");
    }
    if hundred > 0 {
        out.push(ONES[hundred as usize]);
        out.push("Hundred");
    }
    below_hundred(rest, out);
}

/// Spells a whole number the way Indian invoices print it.
///
/// ```rust
/// use gstdesk_core::words::number_in_words;
///
/// assert_eq!(number_in_words(125_050), "One Lakh Twenty Five Thousand Fifty");
/// ```
pub fn number_in_words(n: u128) -> String {
    if n == 0 {
        return "Zero".to_string();
    }
    let mut out = Vec::new();
    push_words(n, &mut out);
    out.join(" ")
}

/// "Rupees … Only" line for the grand total, rounded to the whole rupee.
pub fn amount_in_words(total: Money) -> String {
    let whole = total.round_to_unit();
    let mut rupees = whole.abs().amount();
    rupees.rescale(0);
    let words = number_in_words(rupees.mantissa().unsigned_abs());

    if whole.is_negative() {
        format!("Minus Rupees {} Only", words)
    } else {
        format!("Rupees {} Only", words)
    }
}
