use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Currency,
    Percent,
    Integer,
    Year,
}

#[derive(Copy, Clone, Debug)]
pub struct FieldSpec {
    pub id: &'static str,
    pub kind: FieldKind,
    pub min: f64,
    pub max: f64,
    pub required: bool,
}

impl FieldSpec {
    pub const fn currency(id: &'static str, max: f64) -> Self {
        FieldSpec {
            id,
            kind: FieldKind::Currency,
            min: 0.0,
            max,
            required: false,
        }
    }

    pub const fn percent(id: &'static str, max: f64) -> Self {
        FieldSpec {
            id,
            kind: FieldKind::Percent,
            min: 0.0,
            max,
            required: false,
        }
    }

    pub const fn integer(id: &'static str, min: f64, max: f64) -> Self {
        FieldSpec {
            id,
            kind: FieldKind::Integer,
            min,
            max,
            required: false,
        }
    }

    pub const fn years(id: &'static str, min: f64, max: f64) -> Self {
        FieldSpec {
            id,
            kind: FieldKind::Year,
            min,
            max,
            required: false,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

// Untagged: JSON numbers land in `Number`; query-string values always
// arrive as `Text`.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    Number(f64),
    Text(String),
}

#[derive(Clone, Debug, Serialize)]
pub struct Advisory {
    pub field: &'static str,
    pub message: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

enum Parsed {
    Missing,
    Unreadable,
    Value(f64),
}

// Out-of-range values are corrected and noted as advisories; only missing
// required fields and cross-field checks become errors.
#[derive(Debug, Default)]
pub struct SanitizedForm {
    advisories: Vec<Advisory>,
    errors: Vec<FieldError>,
}

impl SanitizedForm {
    pub fn new() -> Self {
        SanitizedForm::default()
    }

    pub fn value(&mut self, spec: &FieldSpec, raw: Option<&RawField>) -> f64 {
        match parse_raw(spec.kind, raw) {
            Parsed::Missing => {
                if spec.required {
                    self.error(spec.id, format!("{} is required", spec.id));
                }
                0.0
            }
            Parsed::Unreadable => {
                self.advise(
                    spec.id,
                    format!("{} could not be read as a number, using 0", spec.id),
                );
                self.bound(spec, 0.0)
            }
            Parsed::Value(value) => self.bound(spec, value),
        }
    }

    // Bounds on integer and year fields keep the cast in range.
    pub fn count(&mut self, spec: &FieldSpec, raw: Option<&RawField>) -> u32 {
        self.value(spec, raw) as u32
    }

    // An absent list is empty, not an error.
    pub fn values(&mut self, spec: &FieldSpec, raw: Option<&[RawField]>) -> Vec<f64> {
        let Some(items) = raw else {
            return Vec::new();
        };
        items
            .iter()
            .map(|item| self.value(spec, Some(item)))
            .collect()
    }

    pub fn advise(&mut self, field: &'static str, message: impl Into<String>) {
        self.advisories.push(Advisory {
            field,
            message: message.into(),
        });
    }

    pub fn error(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn finish(self) -> Result<Vec<Advisory>, Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(self.advisories)
        } else {
            Err(self.errors)
        }
    }

    fn bound(&mut self, spec: &FieldSpec, value: f64) -> f64 {
        if value > spec.max {
            self.advise(
                spec.id,
                format!("{} capped at the maximum of {}", spec.id, spec.max),
            );
            return spec.max;
        }
        if value < spec.min {
            match spec.kind {
                // Negative amounts behave like an emptied input box rather
                // than being clamped to a boundary value.
                FieldKind::Currency => {
                    if spec.required {
                        self.error(spec.id, format!("{} must be zero or more", spec.id));
                    } else {
                        self.advise(spec.id, format!("{} ignored a negative amount", spec.id));
                    }
                    return 0.0;
                }
                FieldKind::Percent | FieldKind::Integer | FieldKind::Year => {
                    self.advise(
                        spec.id,
                        format!("{} raised to the minimum of {}", spec.id, spec.min),
                    );
                    return spec.min;
                }
            }
        }
        value
    }
}

fn parse_raw(kind: FieldKind, raw: Option<&RawField>) -> Parsed {
    let Some(raw) = raw else {
        return Parsed::Missing;
    };
    match raw {
        RawField::Number(value) => {
            if !value.is_finite() {
                return Parsed::Unreadable;
            }
            match kind {
                FieldKind::Integer | FieldKind::Year => Parsed::Value(value.trunc()),
                FieldKind::Currency | FieldKind::Percent => Parsed::Value(*value),
            }
        }
        RawField::Text(text) => {
            if text.trim().is_empty() {
                return Parsed::Missing;
            }
            match kind {
                FieldKind::Currency | FieldKind::Integer | FieldKind::Year => digits_only(text),
                FieldKind::Percent => digits_and_first_point(text),
            }
        }
    }
}

// "$1,234.56" reads as 123456; the input boxes reformat pasted text the
// same way.
fn digits_only(text: &str) -> Parsed {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Parsed::Unreadable;
    }
    match digits.parse::<f64>() {
        Ok(value) => Parsed::Value(value),
        Err(_) => Parsed::Unreadable,
    }
}

// "7.5.3" reads as 7.53; later decimal points are dropped.
fn digits_and_first_point(text: &str) -> Parsed {
    let mut cleaned = String::with_capacity(text.len());
    let mut seen_point = false;
    for c in text.chars() {
        if c.is_ascii_digit() {
            cleaned.push(c);
        } else if c == '.' && !seen_point {
            cleaned.push(c);
            seen_point = true;
        }
    }
    if cleaned.is_empty() || cleaned == "." {
        return Parsed::Unreadable;
    }
    match cleaned.parse::<f64>() {
        Ok(value) => Parsed::Value(value),
        Err(_) => Parsed::Unreadable,
    }
}
