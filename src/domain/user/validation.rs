//! User validation rules

use once_cell::sync::Lazy;
use regex::Regex;

use super::entity::{Address, Name, UserInput, UserProfile, UserRole, UserStatus};
use crate::domain::validation::{ValidationReport, Validator};

const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 50;
const MAX_EMAIL_LENGTH: usize = 100;
const MIN_PASSWORD_LENGTH: usize = 8;
const MIN_PERSON_NAME_LENGTH: usize = 3;
const MAX_PERSON_NAME_LENGTH: usize = 50;
const MIN_STREET_LENGTH: usize = 3;
const MAX_STREET_LENGTH: usize = 100;
const MIN_CITY_LENGTH: usize = 2;
const MAX_CITY_LENGTH: usize = 50;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

// E.164: optional plus, no leading zero, at most 15 digits
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9]\d{1,14}$").unwrap());

static ZIPCODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{5}-?\d{3}$").unwrap());

/// Validates everything a caller submits for a user
#[derive(Debug, Clone, Copy, Default)]
pub struct UserValidator;

impl Validator<UserInput> for UserValidator {
    fn validate(&self, input: &UserInput) -> ValidationReport {
        let mut report = ValidationReport::new();
        validate_profile(&input.profile, &mut report);
        validate_password(&input.password, &mut report);
        report
    }
}

/// Validate profile fields, recording every failure in `report`
pub fn validate_profile(profile: &UserProfile, report: &mut ValidationReport) {
    validate_username(&profile.username, report);
    validate_email(&profile.email, report);
    validate_phone(&profile.phone, report);
    validate_name(&profile.name, report);
    validate_address(&profile.address, report);

    report.ensure(
        profile.status != UserStatus::Unknown,
        "status",
        "Status must be one of: active, inactive, suspended",
    );
    report.ensure(
        profile.role != UserRole::None,
        "role",
        "Role must be one of: customer, manager, admin",
    );
}

pub fn validate_username(username: &str, report: &mut ValidationReport) {
    if username.trim().is_empty() {
        report.add("username", "Username cannot be empty");
        return;
    }

    check_length(
        username,
        MIN_USERNAME_LENGTH,
        MAX_USERNAME_LENGTH,
        "username",
        "Username",
        report,
    );
}

pub fn validate_email(email: &str, report: &mut ValidationReport) {
    if email.trim().is_empty() {
        report.add("email", "Email cannot be empty");
        return;
    }

    report.ensure(
        EMAIL_PATTERN.is_match(email),
        "email",
        "Email is not a valid email address",
    );
    report.ensure(
        email.chars().count() <= MAX_EMAIL_LENGTH,
        "email",
        &format!("Email exceeds maximum length of {MAX_EMAIL_LENGTH} characters"),
    );
}

pub fn validate_phone(phone: &str, report: &mut ValidationReport) {
    report.ensure(
        PHONE_PATTERN.is_match(phone),
        "phone",
        "Phone must be in international format, e.g. +5511912345678",
    );
}

/// Password strength: minimum length plus upper, lower, digit and symbol
pub fn validate_password(password: &str, report: &mut ValidationReport) {
    const FIELD: &str = "password";

    if password.is_empty() {
        report.add(FIELD, "Password cannot be empty");
        return;
    }

    report.ensure(
        password.chars().count() >= MIN_PASSWORD_LENGTH,
        FIELD,
        &format!("Password must be at least {MIN_PASSWORD_LENGTH} characters long"),
    );
    report.ensure(
        password.chars().any(|c| c.is_uppercase()),
        FIELD,
        "Password must contain at least one uppercase letter",
    );
    report.ensure(
        password.chars().any(|c| c.is_lowercase()),
        FIELD,
        "Password must contain at least one lowercase letter",
    );
    report.ensure(
        password.chars().any(|c| c.is_ascii_digit()),
        FIELD,
        "Password must contain at least one number",
    );
    report.ensure(
        password.chars().any(|c| !c.is_alphanumeric()),
        FIELD,
        "Password must contain at least one special character",
    );
}

fn validate_name(name: &Name, report: &mut ValidationReport) {
    check_length(
        &name.firstname,
        MIN_PERSON_NAME_LENGTH,
        MAX_PERSON_NAME_LENGTH,
        "name.firstname",
        "First name",
        report,
    );
    check_length(
        &name.lastname,
        MIN_PERSON_NAME_LENGTH,
        MAX_PERSON_NAME_LENGTH,
        "name.lastname",
        "Last name",
        report,
    );
}

fn validate_address(address: &Address, report: &mut ValidationReport) {
    if address.street.trim().is_empty() {
        report.add("address.street", "Street cannot be empty");
    } else {
        check_length(
            &address.street,
            MIN_STREET_LENGTH,
            MAX_STREET_LENGTH,
            "address.street",
            "Street",
            report,
        );
    }

    if address.city.trim().is_empty() {
        report.add("address.city", "City cannot be empty");
    } else {
        check_length(
            &address.city,
            MIN_CITY_LENGTH,
            MAX_CITY_LENGTH,
            "address.city",
            "City",
            report,
        );
    }

    report.ensure(
        ZIPCODE_PATTERN.is_match(&address.zipcode),
        "address.zipcode",
        "Zipcode must have the format 00000-000",
    );

    let geo = address.geolocation;
    report.ensure(
        (-90.0..=90.0).contains(&geo.lat),
        "address.geolocation.lat",
        "Latitude must be between -90 and 90",
    );
    report.ensure(
        (-180.0..=180.0).contains(&geo.long),
        "address.geolocation.long",
        "Longitude must be between -180 and 180",
    );
}

fn check_length(
    value: &str,
    min: usize,
    max: usize,
    field: &str,
    label: &str,
    report: &mut ValidationReport,
) {
    let len = value.chars().count();

    if len < min {
        report.add(field, format!("{label} is too short. Minimum length is {min} characters"));
    } else if len > max {
        report.add(field, format!("{label} exceeds maximum length of {max} characters"));
    }
}
