//! Request validation for point submissions.

use crate::error::AppError;
use crate::model::{parse_item_ids, NewPoint};
use regex::Regex;
use std::collections::HashMap;

/// Per-field rule. Text fields arrive as strings from multipart forms.
#[derive(Clone, Debug, Default)]
pub struct ValidationRule {
    pub required: bool,
    pub format: Option<&'static str>,
    pub max_length: Option<usize>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

/// Field rules for `POST /points`.
pub fn point_rules() -> Vec<(&'static str, ValidationRule)> {
    let required = || ValidationRule {
        required: true,
        ..Default::default()
    };
    vec![
        ("name", required()),
        (
            "email",
            ValidationRule {
                format: Some("email"),
                ..required()
            },
        ),
        ("whatsapp", required()),
        (
            "latitude",
            ValidationRule {
                format: Some("number"),
                minimum: Some(-90.0),
                maximum: Some(90.0),
                ..required()
            },
        ),
        (
            "longitude",
            ValidationRule {
                format: Some("number"),
                minimum: Some(-180.0),
                maximum: Some(180.0),
                ..required()
            },
        ),
        ("city", required()),
        (
            "uf",
            ValidationRule {
                max_length: Some(2),
                ..required()
            },
        ),
        ("items", required()),
    ]
}

pub struct RequestValidator;

impl RequestValidator {
    /// Validate form fields against rules, in rule order. Blank counts as missing.
    pub fn validate(
        fields: &HashMap<String, String>,
        rules: &[(&'static str, ValidationRule)],
    ) -> Result<(), AppError> {
        for (col, rule) in rules {
            let val = fields.get(*col).map(|s| s.trim()).filter(|s| !s.is_empty());
            match val {
                None if rule.required => {
                    return Err(AppError::Validation(format!("{} is required", col)));
                }
                None => {}
                Some(v) => validate_field(col, v, rule)?,
            }
        }
        Ok(())
    }

    /// Validate and convert submitted fields into a [`NewPoint`] with the given stored image name.
    pub fn new_point(fields: &HashMap<String, String>, image: String) -> Result<NewPoint, AppError> {
        Self::validate(fields, &point_rules())?;
        let text = |k: &str| fields.get(k).map(|s| s.trim().to_string()).unwrap_or_default();
        let number = |k: &str| -> Result<f64, AppError> {
            text(k)
                .parse()
                .map_err(|_| AppError::Validation(format!("{} must be a number", k)))
        };
        let items = parse_item_ids(&text("items")).map_err(AppError::Validation)?;
        if items.is_empty() {
            return Err(AppError::Validation("items must list at least one item".into()));
        }
        Ok(NewPoint {
            image,
            name: text("name"),
            email: text("email"),
            whatsapp: text("whatsapp"),
            latitude: number("latitude")?,
            longitude: number("longitude")?,
            city: text("city"),
            uf: text("uf").to_uppercase(),
            items,
        })
    }
}

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

fn validate_field(col: &str, v: &str, rule: &ValidationRule) -> Result<(), AppError> {
    if let Some(format) = rule.format {
        validate_format(col, v, format)?;
    }
    if let Some(max) = rule.max_length {
        if v.chars().count() > max {
            return Err(AppError::Validation(format!(
                "{} must be at most {} characters",
                col, max
            )));
        }
    }
    if rule.minimum.is_some() || rule.maximum.is_some() {
        let n: f64 = v
            .parse()
            .map_err(|_| AppError::Validation(format!("{} must be a number", col)))?;
        if let Some(min) = rule.minimum {
            if n < min {
                return Err(AppError::Validation(format!("{} must be at least {}", col, min)));
            }
        }
        if let Some(max) = rule.maximum {
            if n > max {
                return Err(AppError::Validation(format!("{} must be at most {}", col, max)));
            }
        }
    }
    Ok(())
}

fn validate_format(col: &str, v: &str, format: &str) -> Result<(), AppError> {
    match format {
        "email" => {
            let re = Regex::new(EMAIL_PATTERN)
                .map_err(|_| AppError::Validation(format!("invalid pattern for {}", col)))?;
            if !re.is_match(v) {
                return Err(AppError::Validation(format!("{} must be a valid email", col)));
            }
        }
        "number" => {
            if !v.parse::<f64>().map(f64::is_finite).unwrap_or(false) {
                return Err(AppError::Validation(format!("{} must be a number", col)));
            }
        }
        _ => {}
    }
    Ok(())
}
