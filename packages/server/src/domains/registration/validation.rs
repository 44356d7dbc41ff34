//! Intake validation.
//!
//! Every rule runs on every submission and the messages are collected in field
//! order, so the form can show all problems at once. Nothing here touches I/O.

use bytes::Bytes;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use super::models::Sex;

pub const MIN_AGE: i32 = 13;
pub const MAX_AGE: i32 = 100;
pub const MAX_RECEIPT_BYTES: usize = 5 * 1024 * 1024;
pub const ALLOWED_RECEIPT_TYPES: [&str; 3] = ["image/jpeg", "image/png", "application/pdf"];

pub const FULL_NAME_REQUIRED: &str = "Full name is required.";
pub const TP_NUMBER_REQUIRED: &str = "TP Number is required.";
pub const TP_NUMBER_TOO_SHORT: &str = "TP Number looks too short.";
pub const SEX_INVALID: &str = "Sex is invalid.";
pub const AGE_INVALID: &str = "Age is invalid.";
pub const EMAIL_INVALID: &str = "Valid email is required.";
pub const PHONE_INVALID: &str = "Valid phone number is required.";
pub const NATIONALITY_REQUIRED: &str = "Nationality is required.";
pub const RECEIPT_REQUIRED: &str = "Payment receipt is required.";
pub const RECEIPT_TYPE_NOT_ALLOWED: &str = "Receipt file type is not allowed.";
pub const RECEIPT_TOO_LARGE: &str = "Receipt file is too large (max 5MB).";

lazy_static! {
    // local@domain.tld with no whitespace and a single '@'
    static ref EMAIL: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Uploaded proof of payment, as received from the client
#[derive(Debug, Clone)]
pub struct ReceiptUpload {
    /// Client-side filename, if the browser sent one
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Bytes,
}

impl ReceiptUpload {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Raw form fields, untrimmed and unparsed
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub full_name: String,
    pub tp_number: String,
    pub sex: String,
    pub age: String,
    pub email: String,
    pub phone: String,
    pub nationality: String,
    pub receipt: Option<ReceiptUpload>,
}

/// A submission that passed every rule, normalized for storage
#[derive(Debug, Clone)]
pub struct ValidatedRegistration {
    pub full_name: String,
    pub tp_number: String,
    pub sex: Sex,
    pub age: i32,
    pub email: String,
    pub phone: String,
    pub nationality: String,
    pub receipt: ReceiptUpload,
}

/// Ordered, user-facing validation messages
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", .0.join(" "))]
pub struct ValidationErrors(pub Vec<String>);

impl ValidationErrors {
    pub fn messages(&self) -> &[String] {
        &self.0
    }

    pub fn into_messages(self) -> Vec<String> {
        self.0
    }
}

pub fn validate(form: RegistrationForm) -> Result<ValidatedRegistration, ValidationErrors> {
    let mut errors: Vec<String> = Vec::new();

    let full_name = form.full_name.trim().to_string();
    if full_name.chars().count() < 2 {
        errors.push(FULL_NAME_REQUIRED.into());
    }

    let tp_number = form.tp_number.trim().to_string();
    if tp_number.is_empty() {
        errors.push(TP_NUMBER_REQUIRED.into());
    } else if tp_number.chars().count() < 5 {
        errors.push(TP_NUMBER_TOO_SHORT.into());
    }

    let sex = form.sex.trim().parse::<Sex>().ok();
    if sex.is_none() {
        errors.push(SEX_INVALID.into());
    }

    let age = parse_age(&form.age);
    if age.is_none() {
        errors.push(AGE_INVALID.into());
    }

    let email = form.email.trim().to_string();
    if !is_valid_email(&email) {
        errors.push(EMAIL_INVALID.into());
    }

    let phone = form.phone.trim().to_string();
    if phone.chars().count() < 7 {
        errors.push(PHONE_INVALID.into());
    }

    let nationality = form.nationality.trim().to_string();
    if nationality.is_empty() {
        errors.push(NATIONALITY_REQUIRED.into());
    }

    match &form.receipt {
        None => errors.push(RECEIPT_REQUIRED.into()),
        Some(receipt) => errors.extend(receipt_errors(receipt)),
    }

    match (errors.is_empty(), sex, age, form.receipt) {
        (true, Some(sex), Some(age), Some(receipt)) => Ok(ValidatedRegistration {
            full_name,
            tp_number,
            sex,
            age,
            email,
            phone,
            nationality,
            receipt,
        }),
        _ => Err(ValidationErrors(errors)),
    }
}

/// Integer age within [MIN_AGE, MAX_AGE]
pub fn parse_age(raw: &str) -> Option<i32> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|age| (MIN_AGE..=MAX_AGE).contains(age))
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Type and size checks; both run so an oversized file of the wrong type reports twice.
pub fn receipt_errors(receipt: &ReceiptUpload) -> Vec<String> {
    let mut errors = Vec::new();

    if !ALLOWED_RECEIPT_TYPES.contains(&receipt.content_type.as_str()) {
        errors.push(RECEIPT_TYPE_NOT_ALLOWED.to_string());
    }
    if receipt.size() > MAX_RECEIPT_BYTES {
        errors.push(RECEIPT_TOO_LARGE.to_string());
    }

    errors
}
