//! Product wire types for the remote AgroCart API.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A catalog product as returned by `GET /api/products`.
///
/// The server assigns identifiers; the client only ever holds a transient
/// cached copy of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub description: String,
}

/// Body for `POST /api/products` and `PUT /api/products/{id}`.
///
/// Identifier-less: creation gets one assigned by the server, updates carry
/// the identifier in the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub price: Price,
    pub description: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_json_shape() {
        let json = r#"{"id":3,"name":"Tomato","price":2.5,"description":"Fresh"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.name, "Tomato");
        assert_eq!(product.price.display(), "$2.50");
    }

    #[test]
    fn test_input_has_no_id() {
        let input = ProductInput {
            name: "Potato".to_string(),
            price: "1.2".parse().unwrap(),
            description: "Per kg".to_string(),
        };
        let value = serde_json::to_value(&input).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["name"], "Potato");
    }
}
