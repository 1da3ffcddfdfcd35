use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Maximum number of digits a price may carry, cents included.
pub const PRICE_MAX_DIGITS: usize = 15;
pub const PRICE_DECIMAL_PLACES: usize = 2;
pub const TITLE_MAX_LENGTH: usize = 120;

/// A non-negative amount of money stored as whole cents.
///
/// Rendered as a decimal string with two places (`"10.00"`) and accepted from
/// JSON as either a number or a numeric string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price {
    cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    Invalid,
    Negative,
    TooManyDecimalPlaces,
    TooManyDigits,
}

impl fmt::Display for PriceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceError::Invalid => write!(f, "A valid number is required."),
            PriceError::Negative => write!(f, "Ensure this value is greater than or equal to 0."),
            PriceError::TooManyDecimalPlaces => write!(
                f,
                "Ensure that there are no more than {} decimal places.",
                PRICE_DECIMAL_PLACES
            ),
            PriceError::TooManyDigits => write!(
                f,
                "Ensure that there are no more than {} digits in total.",
                PRICE_MAX_DIGITS
            ),
        }
    }
}

impl std::error::Error for PriceError {}

impl Price {
    pub const DEFAULT: Price = Price { cents: 9_999 };

    pub fn from_cents(cents: i64) -> Self {
        Price { cents }
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Price after the standing 20% sale, rounded half-up to the cent.
    pub fn sale(&self) -> Price {
        Price::from_cents((self.cents * 8 + 5) / 10)
    }

    /// Parses a JSON value the way a decimal form field would.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, PriceError> {
        match value {
            serde_json::Value::String(s) => s.trim().parse(),
            serde_json::Value::Number(n) => n.to_string().parse(),
            _ => Err(PriceError::Invalid),
        }
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with('-') {
            return Err(PriceError::Negative);
        }
        let s = s.strip_prefix('+').unwrap_or(s);

        let (whole, fraction) = match s.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (s, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(PriceError::Invalid);
        }
        if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
            return Err(PriceError::Invalid);
        }

        // Trailing zeros in the fraction carry no precision
        let fraction = fraction.trim_end_matches('0');
        if fraction.len() > PRICE_DECIMAL_PLACES {
            return Err(PriceError::TooManyDecimalPlaces);
        }

        let whole = whole.trim_start_matches('0');
        if whole.len() > PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES {
            return Err(PriceError::TooManyDigits);
        }

        let whole_cents = if whole.is_empty() {
            0
        } else {
            whole.parse::<i64>().map_err(|_| PriceError::Invalid)? * 100
        };
        let fraction_cents = format!("{:0<2}", fraction)
            .parse::<i64>()
            .map_err(|_| PriceError::Invalid)?;

        Ok(Price::from_cents(whole_cents + fraction_cents))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Price::from_json(&value).map_err(serde::de::Error::custom)
    }
}

/// A catalogue product. `id` stays `None` until the row has been saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<i64>,
    pub title: String,
    pub content: Option<String>,
    pub price: Price,
}

impl Product {
    pub fn new(title: String, content: Option<String>, price: Price) -> Self {
        Product {
            id: None,
            title,
            content,
            price,
        }
    }

    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    pub fn sale_price(&self) -> Price {
        self.price.sale()
    }

    /// Amount knocked off the list price by the sale.
    pub fn get_discount(&self) -> Price {
        Price::from_cents(self.price.cents() - self.sale_price().cents())
    }
}

/// Cleaned field values for a product update; `None` leaves a column alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub title: Option<String>,
    pub content: Option<Option<String>>,
    pub price: Option<Price>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.price.is_none()
    }
}

impl From<Product> for ProductChanges {
    fn from(product: Product) -> Self {
        ProductChanges {
            title: Some(product.title),
            content: Some(product.content),
            price: Some(product.price),
        }
    }
}
