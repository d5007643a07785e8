//! Shop product model.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation failures for product fields.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProductValidationError {
    #[error("product name must not be empty")]
    EmptyName,
    #[error("price must be a finite number of at least zero, got {0}")]
    InvalidPrice(f64),
    #[error("stock must be at least zero, got {0}")]
    NegativeStock(i64),
}

impl ProductValidationError {
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::InvalidPrice(_) => "price",
            Self::NegativeStock(_) => "stock",
        }
    }
}

/// Product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ProductId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated product fields before an identifier is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    name: String,
    description: String,
    price: f64,
    category: String,
    stock: i64,
    image_url: String,
}

impl ProductDraft {
    /// Validate raw product fields.
    ///
    /// # Examples
    /// ```
    /// use petapedia::domain::ProductDraft;
    ///
    /// let draft = ProductDraft::try_from_parts("Kopi", "", 25_000.0, "drinks", 3, "").unwrap();
    /// assert_eq!(draft.name(), "Kopi");
    /// assert!(ProductDraft::try_from_parts("  ", "", 1.0, "", 0, "").is_err());
    /// ```
    pub fn try_from_parts(
        name: &str,
        description: &str,
        price: f64,
        category: &str,
        stock: i64,
        image_url: &str,
    ) -> Result<Self, ProductValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProductValidationError::EmptyName);
        }
        if !price.is_finite() || price < 0.0 {
            return Err(ProductValidationError::InvalidPrice(price));
        }
        if stock < 0 {
            return Err(ProductValidationError::NegativeStock(stock));
        }
        Ok(Self {
            name: name.to_owned(),
            description: description.to_owned(),
            price,
            category: category.trim().to_owned(),
            stock,
            image_url: image_url.trim().to_owned(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Assign an identifier.
    #[must_use]
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            stock: self.stock,
            image_url: self.image_url,
        }
    }
}

/// Stored product as listed to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store identifier.
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Unit price, never negative.
    pub price: f64,
    pub category: String,
    /// Units on hand, never negative.
    pub stock: i64,
    pub image_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("", 1.0, 0, "name")]
    #[case("Teh", -0.01, 0, "price")]
    #[case("Teh", f64::NAN, 0, "price")]
    #[case("Teh", 1.0, -1, "stock")]
    fn invalid_drafts(
        #[case] name: &str,
        #[case] price: f64,
        #[case] stock: i64,
        #[case] field: &str,
    ) {
        let err = ProductDraft::try_from_parts(name, "", price, "", stock, "")
            .expect_err("invalid draft");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    fn free_products_are_allowed() {
        assert!(ProductDraft::try_from_parts("Sample", "", 0.0, "", 0, "").is_ok());
    }

    #[rstest]
    fn product_serialises_snake_case() {
        let id = ProductId::from(Uuid::nil());
        let product = ProductDraft::try_from_parts(" Kopi ", "Arabica", 25_000.0, "drinks", 3, "")
            .expect("valid draft")
            .into_product(id);
        let value = serde_json::to_value(&product).expect("product serialises");
        assert_eq!(value["id"], json!(Uuid::nil().to_string()));
        assert_eq!(value["name"], json!("Kopi"));
        assert_eq!(value["image_url"], json!(""));
    }
}
