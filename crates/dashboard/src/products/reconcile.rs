//! Local reconciliation of acknowledged mutations.
//!
//! Used by [`SyncMode::Reconcile`](crate::config::SyncMode::Reconcile) in
//! place of a full re-fetch. The result matches what a consistent backend
//! would return, minus any server-side defaults the client does not know.

use product_dashboard_core::{Product, ProductId};

/// A mutation the backend has acknowledged.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// A product was created with this content.
    Created(Product),
    /// Every editable field of a product was replaced.
    Updated(Product),
    /// A product was deleted.
    Deleted(ProductId),
}

/// Apply `mutation` to `collection`.
///
/// Creating an identifier that already exists replaces it; updating an
/// unknown identifier leaves the collection alone.
#[must_use]
pub fn apply_mutation(mut collection: Vec<Product>, mutation: Mutation) -> Vec<Product> {
    match mutation {
        Mutation::Created(product) => {
            match collection.iter_mut().find(|p| p.id == product.id) {
                Some(existing) => *existing = product,
                None => collection.push(product),
            }
        }
        Mutation::Updated(product) => {
            if let Some(existing) = collection.iter_mut().find(|p| p.id == product.id) {
                *existing = product;
            }
        }
        Mutation::Deleted(id) => collection.retain(|p| p.id != id),
    }
    collection
}

#[cfg(test)]
mod tests {
    use product_dashboard_core::ProductFields;

    use super::*;

    fn product(id: i64, name: &str) -> Product {
        Product::from_fields(
            ProductId::from(id),
            &ProductFields {
                name: name.to_string(),
                price: 1.0,
                description: String::new(),
                color: "Red".to_string(),
            },
        )
    }

    #[test]
    fn test_created_appends() {
        let result = apply_mutation(vec![product(1, "a")], Mutation::Created(product(2, "b")));
        assert_eq!(result.len(), 2);
        assert_eq!(result.last().map(|p| p.display_name()), Some("b"));
    }

    #[test]
    fn test_created_existing_id_replaces() {
        let result = apply_mutation(vec![product(1, "a")], Mutation::Created(product(1, "z")));
        assert_eq!(result, vec![product(1, "z")]);
    }

    #[test]
    fn test_updated_replaces_in_place() {
        let result = apply_mutation(
            vec![product(1, "a"), product(2, "b")],
            Mutation::Updated(product(1, "c")),
        );
        assert_eq!(result, vec![product(1, "c"), product(2, "b")]);
    }

    #[test]
    fn test_updated_unknown_is_noop() {
        let result = apply_mutation(vec![product(1, "a")], Mutation::Updated(product(5, "x")));
        assert_eq!(result, vec![product(1, "a")]);
    }

    #[test]
    fn test_deleted_removes() {
        let result = apply_mutation(
            vec![product(1, "a"), product(2, "b")],
            Mutation::Deleted(ProductId::from(1)),
        );
        assert_eq!(result, vec![product(2, "b")]);
    }
}
