//! 钱包资料校验规则

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::model::{RequestedInfo, WalletAddress};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

const MAX_EMAIL_LEN: usize = 254;
const BLOCKED_EMAIL_DOMAINS: [&str; 2] = ["@example.com", "@test.com"];
const RESTRICTED_COUNTRIES: [&str; 2] = ["XX", "YY"];

#[derive(Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<&'static str>,
}

impl AddressErrors {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_address: Option<AddressErrors>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.physical_address.is_none()
    }
}

/// 后面的规则覆盖前面的结果
pub fn validate_email(email: &str) -> Option<&'static str> {
    let mut error = None;
    if BLOCKED_EMAIL_DOMAINS.iter().any(|d| email.ends_with(d)) {
        error = Some("Please use a valid email address");
    }
    if email.chars().count() > MAX_EMAIL_LEN {
        error = Some("Email address too long");
    }
    if !EMAIL_RE.is_match(email) {
        error = Some("Please enter a valid email address");
    }
    error
}

fn trimmed_len(value: &Option<String>) -> usize {
    value.as_deref().map_or(0, |v| v.trim().chars().count())
}

pub fn validate_address(addr: &WalletAddress) -> AddressErrors {
    let mut errors = AddressErrors::default();

    if trimmed_len(&addr.address1) < 5 {
        errors.address1 = Some("Street address must be at least 5 characters");
    }
    if trimmed_len(&addr.city) < 2 {
        errors.city = Some("City is required");
    }
    if trimmed_len(&addr.state) < 2 {
        errors.state = Some("State/Province is required");
    }
    if trimmed_len(&addr.postal_code) < 3 {
        errors.postal_code = Some("Valid postal code is required");
    }
    if trimmed_len(&addr.country_code) != 2 {
        errors.country_code = Some("Valid country code is required");
    }

    let restricted = addr.country_code.as_deref().is_some_and(|code| {
        RESTRICTED_COUNTRIES
            .iter()
            .any(|r| r.eq_ignore_ascii_case(code.trim()))
    });
    if restricted {
        errors.country_code = Some("Sorry, we don't ship to this country yet");
    }

    errors
}

pub fn validate(info: &RequestedInfo) -> ValidationErrors {
    ValidationErrors {
        email: info.email.as_deref().filter(|e| !e.is_empty()).and_then(validate_email),
        physical_address: info
            .address()
            .map(validate_address)
            .filter(|errors| !errors.is_empty()),
    }
}
