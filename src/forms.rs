//! Binding of raw JSON submissions to cleaned model values.
//!
//! A form only accepts the fields it declares. Every field is checked and all
//! problems are reported together, keyed by field name, with anything that is
//! not about a single field collected under `non_field_errors`.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::product::{Price, Product, ProductChanges, TITLE_MAX_LENGTH};

pub const NON_FIELD_ERRORS: &str = "non_field_errors";

const REQUIRED: &str = "This field is required.";
const MAY_NOT_BE_NULL: &str = "This field may not be null.";
const MAY_NOT_BE_BLANK: &str = "This field may not be blank.";
const NOT_A_STRING: &str = "Not a valid string.";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{}: {}", field, messages.join(" "))?;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

/// A form over a fixed list of editable model fields.
pub trait ModelForm: Sized {
    /// The only keys a submission may contain.
    const FIELDS: &'static [&'static str];

    /// Cleans the already field-checked submission. With `partial` set, a
    /// missing field is left untouched instead of being required.
    fn clean(data: &Map<String, Value>, partial: bool, errors: &mut FormErrors) -> Self;

    fn bind(data: &Value) -> Result<Self, FormErrors> {
        bind_form(data, false)
    }

    fn bind_partial(data: &Value) -> Result<Self, FormErrors> {
        bind_form(data, true)
    }
}

fn bind_form<F: ModelForm>(data: &Value, partial: bool) -> Result<F, FormErrors> {
    let mut errors = FormErrors::default();

    let Some(object) = data.as_object() else {
        errors.add(NON_FIELD_ERRORS, "Invalid data. Expected a JSON object.");
        return Err(errors);
    };

    let mut unknown: Vec<&str> = object
        .keys()
        .map(String::as_str)
        .filter(|key| !F::FIELDS.contains(key))
        .collect();
    unknown.sort_unstable();
    if !unknown.is_empty() {
        errors.add(
            NON_FIELD_ERRORS,
            format!(
                "Unexpected field(s): {}. Allowed fields are: {}.",
                unknown.join(", "),
                F::FIELDS.join(", ")
            ),
        );
    }

    let form = F::clean(object, partial, &mut errors);

    if errors.is_empty() {
        Ok(form)
    } else {
        Err(errors)
    }
}

/// Editable product fields: title, content and price.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub title: Option<String>,
    pub content: Option<Option<String>>,
    pub price: Option<Price>,
}

impl ModelForm for ProductForm {
    const FIELDS: &'static [&'static str] = &["title", "content", "price"];

    fn clean(data: &Map<String, Value>, partial: bool, errors: &mut FormErrors) -> Self {
        let title = match data.get("title") {
            None if partial => None,
            None => {
                errors.add("title", REQUIRED);
                None
            }
            Some(Value::Null) => {
                errors.add("title", MAY_NOT_BE_NULL);
                None
            }
            Some(Value::String(raw)) => {
                let title = raw.trim();
                if title.is_empty() {
                    errors.add("title", MAY_NOT_BE_BLANK);
                    None
                } else if title.chars().count() > TITLE_MAX_LENGTH {
                    errors.add(
                        "title",
                        format!("Ensure this field has no more than {} characters.", TITLE_MAX_LENGTH),
                    );
                    None
                } else {
                    Some(title.to_string())
                }
            }
            Some(_) => {
                errors.add("title", NOT_A_STRING);
                None
            }
        };

        // Blank content is stored as NULL
        let content = match data.get("content") {
            None if partial => None,
            None | Some(Value::Null) => Some(None),
            Some(Value::String(raw)) => {
                let content = raw.trim();
                Some((!content.is_empty()).then(|| content.to_string()))
            }
            Some(_) => {
                errors.add("content", NOT_A_STRING);
                None
            }
        };

        let price = match data.get("price") {
            None if partial => None,
            None => Some(Price::DEFAULT),
            Some(Value::Null) => {
                errors.add("price", MAY_NOT_BE_NULL);
                None
            }
            Some(value) => match Price::from_json(value) {
                Ok(price) => Some(price),
                Err(err) => {
                    errors.add("price", err.to_string());
                    None
                }
            },
        };

        if partial && title.is_none() && content.is_none() && price.is_none() && errors.is_empty() {
            errors.add(NON_FIELD_ERRORS, "At least one field must be provided for update.");
        }

        ProductForm { title, content, price }
    }
}

impl ProductForm {
    /// Builds an unsaved product from a fully bound form.
    pub fn into_product(self) -> Product {
        Product::new(
            self.title.unwrap_or_default(),
            self.content.flatten(),
            self.price.unwrap_or(Price::DEFAULT),
        )
    }

    pub fn into_changes(self) -> ProductChanges {
        ProductChanges {
            title: self.title,
            content: self.content,
            price: self.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_form_accepts_declared_fields() {
        let form = ProductForm::bind(&json!({
            "title": "hello World",
            "content": "I do not like you",
            "price": 10
        }))
        .expect("form should be valid");

        let product = form.into_product();
        assert_eq!(product.title, "hello World");
        assert_eq!(product.content.as_deref(), Some("I do not like you"));
        assert_eq!(product.price, Price::from_cents(1_000));
        assert!(!product.is_saved());
    }

    #[test]
    fn test_product_form_rejects_undeclared_fields() {
        let errors = ProductForm::bind(&json!({
            "title": "hello World",
            "price": 10,
            "sale_price": "1.00",
            "id": 99
        }))
        .unwrap_err();

        let messages = errors.get(NON_FIELD_ERRORS).expect("non-field error expected");
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("id, sale_price"));
        assert!(errors.get("title").is_none());
    }

    #[test]
    fn test_product_form_rejects_derived_field_alone() {
        let errors = ProductForm::bind(&json!({"title": "Lamp", "my_discount": "5.00"})).unwrap_err();
        assert!(errors.get(NON_FIELD_ERRORS).is_some());
    }

    #[test]
    fn test_product_form_defaults() {
        let product = ProductForm::bind(&json!({"title": "Lamp"})).unwrap().into_product();

        assert_eq!(product.price, Price::DEFAULT);
        assert_eq!(product.content, None);
    }

    #[test]
    fn test_product_form_collects_every_error() {
        let errors = ProductForm::bind(&json!({"title": "   ", "content": 5, "price": "1.999"})).unwrap_err();

        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["content", "price", "title"]);
        assert_eq!(errors.get("title").unwrap()[0], MAY_NOT_BE_BLANK);
        assert_eq!(
            errors.get("price").unwrap()[0],
            "Ensure that there are no more than 2 decimal places."
        );
    }

    #[test]
    fn test_product_form_requires_title() {
        let errors = ProductForm::bind(&json!({"price": 3})).unwrap_err();
        assert_eq!(errors.get("title").unwrap()[0], REQUIRED);
    }

    #[test]
    fn test_product_form_title_length() {
        let title = "t".repeat(TITLE_MAX_LENGTH + 1);
        assert!(ProductForm::bind(&json!({ "title": title })).is_err());
    }

    #[test]
    fn test_product_form_rejects_non_object() {
        let errors = ProductForm::bind(&json!(["title"])).unwrap_err();
        assert!(errors.get(NON_FIELD_ERRORS).is_some());
    }

    #[test]
    fn test_partial_binding() {
        let changes = ProductForm::bind_partial(&json!({"price": "12.50"})).unwrap().into_changes();

        assert_eq!(changes.title, None);
        assert_eq!(changes.content, None);
        assert_eq!(changes.price, Some(Price::from_cents(1_250)));
    }

    #[test]
    fn test_partial_binding_clears_content() {
        let changes = ProductForm::bind_partial(&json!({"content": ""})).unwrap().into_changes();
        assert_eq!(changes.content, Some(None));
    }

    #[test]
    fn test_partial_binding_requires_something() {
        let errors = ProductForm::bind_partial(&json!({})).unwrap_err();
        assert!(errors.get(NON_FIELD_ERRORS).is_some());
    }

    #[test]
    fn test_form_errors_display() {
        let mut errors = FormErrors::default();
        errors.add("price", "A valid number is required.");
        errors.add("title", "This field is required.");

        assert_eq!(
            errors.to_string(),
            "price: A valid number is required.; title: This field is required."
        );
    }
}
