//! Outgoing representations that need more than a plain `#[derive(Serialize)]`.

use serde::Serialize;

use crate::forms::ProductForm;
use crate::models::product::{Price, Product};

/// What a product serializer may be asked to render: a model instance, or
/// submitted form data that never became one.
#[derive(Debug, Clone, Copy)]
pub enum ProductSource<'a> {
    Instance(&'a Product),
    Data(&'a ProductForm),
}

impl<'a> From<&'a Product> for ProductSource<'a> {
    fn from(product: &'a Product) -> Self {
        ProductSource::Instance(product)
    }
}

impl<'a> From<&'a ProductForm> for ProductSource<'a> {
    fn from(form: &'a ProductForm) -> Self {
        ProductSource::Data(form)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRepresentation {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub price: Option<Price>,
    pub sale_price: Option<Price>,
    /// Read-only; see [`ProductSerializer::get_my_discount`].
    pub my_discount: Option<Price>,
}

pub struct ProductSerializer;

impl ProductSerializer {
    pub const FIELDS: &'static [&'static str] =
        &["id", "title", "content", "price", "sale_price", "my_discount"];

    pub fn to_representation<'a>(source: impl Into<ProductSource<'a>>) -> ProductRepresentation {
        let source = source.into();

        match source {
            ProductSource::Instance(product) => ProductRepresentation {
                id: product.id,
                title: Some(product.title.clone()),
                content: product.content.clone(),
                price: Some(product.price),
                sale_price: Some(product.sale_price()),
                my_discount: Self::get_my_discount(source),
            },
            ProductSource::Data(form) => ProductRepresentation {
                id: None,
                title: form.title.clone(),
                content: form.content.clone().flatten(),
                price: form.price,
                sale_price: form.price.map(|price| price.sale()),
                my_discount: Self::get_my_discount(source),
            },
        }
    }

    pub fn many(products: &[Product]) -> Vec<ProductRepresentation> {
        products.iter().map(|product| Self::to_representation(product)).collect()
    }

    /// The discount is only known for products that have been saved.
    pub fn get_my_discount(source: ProductSource<'_>) -> Option<Price> {
        match source {
            ProductSource::Instance(product) if product.is_saved() => Some(product.get_discount()),
            _ => None,
        }
    }
}
