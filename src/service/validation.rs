use crate::domain::payment::CardDetails;
use chrono::{Datelike, Utc};
use regex::Regex;
use std::sync::LazyLock;

static VPA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+@[A-Za-z0-9]+$").expect("vpa pattern"));

static MASTERCARD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^5[1-5]").expect("mastercard pattern"));
static AMEX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^3[47]").expect("amex pattern"));
static RUPAY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(60|65|8[1-9])").expect("rupay pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardError {
    /// Number fails the 16-digit/Luhn check or the expiry is unusable.
    Invalid,
    /// CVV or holder name absent. These never reach storage, but a payment
    /// cannot be attempted without them.
    MissingHolderDetails,
}

pub fn is_valid_vpa(vpa: &str) -> bool {
    !vpa.trim().is_empty() && VPA_RE.is_match(vpa)
}

pub fn luhn_check(digits: &str) -> bool {
    let mut sum = 0u32;
    let mut double = false;
    for c in digits.chars().rev() {
        let Some(d) = c.to_digit(10) else {
            return false;
        };
        let mut d = d;
        if double {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
        double = !double;
    }
    sum % 10 == 0
}

pub fn is_valid_card_number(number: &str) -> bool {
    let digits: String = number.chars().filter(|c| !c.is_whitespace()).collect();
    digits.len() == 16 && digits.chars().all(|c| c.is_ascii_digit()) && luhn_check(&digits)
}

pub fn is_valid_expiry(month: &str, year: &str) -> bool {
    let (Ok(m), Ok(y)) = (month.trim().parse::<i32>(), year.trim().parse::<i32>()) else {
        return false;
    };
    if !(1..=12).contains(&m) {
        return false;
    }
    let now = Utc::now();
    (y, m) >= (now.year(), now.month() as i32)
}

pub fn is_valid_card(card: &CardDetails) -> bool {
    is_valid_card_number(&card.number) && is_valid_expiry(&card.expiry_month, &card.expiry_year)
}

/// Single entry point for the card method. All card checks live here so the
/// transport never re-implements any of them.
pub fn validate_card(card: &CardDetails) -> Result<(), CardError> {
    if !is_valid_card(card) {
        return Err(CardError::Invalid);
    }
    let cvv_present = card.cvv.as_deref().is_some_and(|v| !v.trim().is_empty());
    let holder_present = card.holder_name.as_deref().is_some_and(|v| !v.trim().is_empty());
    if !cvv_present || !holder_present {
        return Err(CardError::MissingHolderDetails);
    }
    Ok(())
}

fn strip_separators(number: &str) -> String {
    number.chars().filter(|c| !c.is_whitespace() && *c != '-').collect()
}

pub fn detect_card_network(number: &str) -> &'static str {
    let c = strip_separators(number);
    if c.starts_with('4') {
        "visa"
    } else if MASTERCARD_RE.is_match(&c) {
        "mastercard"
    } else if AMEX_RE.is_match(&c) {
        "amex"
    } else if RUPAY_RE.is_match(&c) {
        "rupay"
    } else {
        "unknown"
    }
}

pub fn card_last4(number: &str) -> String {
    let c = strip_separators(number);
    if c.len() >= 4 {
        c[c.len() - 4..].to_string()
    } else {
        "0000".to_string()
    }
}
