//! Filtering and sorting of the product table.
//!
//! Pure functions of `(collection, filter term, sort key)`: no state, no side
//! effects, and applying them twice gives the same rows as applying them once.

use core::cmp::Ordering;
use core::fmt;
use std::str::FromStr;

use product_dashboard_core::Product;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Sort order of the product table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Name (A-Z).
    #[default]
    NameAsc,
    /// Name (Z-A).
    NameDesc,
    /// Price (low to high).
    PriceAsc,
    /// Price (high to low).
    PriceDesc,
}

impl SortKey {
    /// All sort keys, in menu order.
    pub const ALL: [Self; 4] = [Self::NameAsc, Self::NameDesc, Self::PriceAsc, Self::PriceDesc];

    /// Stable identifier (`name_asc`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NameAsc => "name_asc",
            Self::NameDesc => "name_desc",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
        }
    }

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NameAsc => "Name (A-Z)",
            Self::NameDesc => "Name (Z-A)",
            Self::PriceAsc => "Price (Low to High)",
            Self::PriceDesc => "Price (High to Low)",
        }
    }

    /// Compare two products under this order.
    #[must_use]
    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::NameAsc => collate(a.name_or_empty(), b.name_or_empty()),
            Self::NameDesc => collate(b.name_or_empty(), a.name_or_empty()),
            Self::PriceAsc => a.price_or_zero().total_cmp(&b.price_or_zero()),
            Self::PriceDesc => b.price_or_zero().total_cmp(&a.price_or_zero()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("unknown sort key '{s}'"))
    }
}

/// Locale-style string collation.
///
/// Compares base letters case-insensitively, ignoring accents, so "Éclair"
/// sorts among the E's. Ties are broken by accents (unaccented first), then
/// by case (lower-case first). Equal only for identical strings.
#[must_use]
pub fn collate(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| b.cmp(a))
}

/// Lower-cased characters with combining marks stripped.
fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    folded(s).filter(|c| !is_combining_mark(*c))
}

/// Lower-cased canonical decomposition.
fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

/// Whether `product` passes the filter. `needle` must already be lower-case.
fn matches(product: &Product, needle: &str) -> bool {
    let contains = |field: Option<&str>| field.is_some_and(|s| s.to_lowercase().contains(needle));
    contains(product.name.as_deref()) || contains(product.description.as_deref())
}

/// Products whose name or description contains `term`, case-insensitively.
///
/// Absent fields never match, so a product with neither a name nor a
/// description is hidden even when the term is empty.
#[must_use]
pub fn filter<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    let needle = term.to_lowercase();
    products.iter().filter(|p| matches(p, &needle)).collect()
}

/// Sort in place. Stable, so equal keys keep their incoming order.
pub fn sort(products: &mut [&Product], key: SortKey) {
    products.sort_by(|a, b| key.compare(a, b));
}

/// Filter, then sort: the rows the table shows.
#[must_use]
pub fn filter_and_sort<'a>(products: &'a [Product], term: &str, key: SortKey) -> Vec<&'a Product> {
    let mut rows = filter(products, term);
    sort(&mut rows, key);
    rows
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use product_dashboard_core::ProductId;

    use super::*;

    fn product(id: i64, name: Option<&str>, price: Option<f64>, description: Option<&str>) -> Product {
        Product {
            id: ProductId::from(id),
            name: name.map(String::from),
            price,
            description: description.map(String::from),
            color: None,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, Some("banana"), Some(2.5), Some("Yellow fruit")),
            product(2, Some("Apple"), Some(1.0), None),
            product(3, Some("cherry"), None, Some("Small red FRUIT")),
            product(4, None, Some(9.0), Some("mystery box")),
            product(5, Some("apple"), Some(1.0), Some("green")),
            product(6, None, Some(3.0), None),
        ]
    }

    fn ids(rows: &[&Product]) -> Vec<ProductId> {
        rows.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_sort_key_round_trip_names() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
        assert!("price".parse::<SortKey>().is_err());
        assert_eq!(SortKey::default(), SortKey::NameAsc);
    }

    #[test]
    fn test_collate() {
        assert_eq!(collate("apple", "Banana"), Ordering::Less);
        assert_eq!(collate("Banana", "apple"), Ordering::Greater);
        assert_eq!(collate("apple", "Apple"), Ordering::Less);
        assert_eq!(collate("", "a"), Ordering::Less);
        assert_eq!(collate("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_collate_ignores_accents_first() {
        assert_eq!(collate("Éclair", "Zebra"), Ordering::Less);
        assert_eq!(collate("éclair", "Donut"), Ordering::Greater);
        assert_eq!(collate("Crème", "Crepe"), Ordering::Less);
        assert_eq!(collate("e", "é"), Ordering::Less);
        assert_eq!(collate("é", "E"), Ordering::Greater);

        let products = vec![
            product(1, Some("Zebra"), None, None),
            product(2, Some("Éclair"), None, None),
            product(3, Some("apple"), None, None),
        ];
        let rows = filter_and_sort(&products, "", SortKey::NameAsc);
        assert_eq!(
            ids(&rows),
            vec![ProductId::from(3), ProductId::from(2), ProductId::from(1)]
        );
    }

    #[test]
    fn test_filter_matches_name_or_description() {
        let products = catalog();
        let rows = filter(&products, "FRUIT");
        assert_eq!(ids(&rows), vec![ProductId::from(1), ProductId::from(3)]);

        let rows = filter(&products, "box");
        assert_eq!(ids(&rows), vec![ProductId::from(4)]);
    }

    #[test]
    fn test_filter_is_exact_for_every_term() {
        let products = catalog();
        for term in ["", "a", "APP", "e", "zzz", "red", "Box"] {
            let needle = term.to_lowercase();
            let rows = filter(&products, term);
            for p in &products {
                let expected = p
                    .name
                    .as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(&needle))
                    || p
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle));
                assert_eq!(rows.iter().any(|r| r.id == p.id), expected, "term {term:?}");
            }
        }
    }

    #[test]
    fn test_empty_term_hides_products_without_text() {
        let products = catalog();
        let rows = filter(&products, "");
        assert_eq!(rows.len(), 5);
        assert!(!rows.iter().any(|p| p.id == ProductId::from(6)));
    }

    #[test]
    fn test_sort_by_name() {
        let products = catalog();
        let rows = filter_and_sort(&products, "", SortKey::NameAsc);
        // Missing name sorts as empty, ahead of everything.
        assert_eq!(
            ids(&rows),
            vec![
                ProductId::from(4),
                ProductId::from(5),
                ProductId::from(2),
                ProductId::from(1),
                ProductId::from(3),
            ]
        );

        let rows = filter_and_sort(&products, "", SortKey::NameDesc);
        assert_eq!(rows.first().unwrap().id, ProductId::from(3));
        assert_eq!(rows.last().unwrap().id, ProductId::from(4));
    }

    #[test]
    fn test_sort_by_price() {
        let products = catalog();
        let rows = filter_and_sort(&products, "", SortKey::PriceAsc);
        let prices: Vec<f64> = rows.iter().map(|p| p.price_or_zero()).collect();
        assert_eq!(prices, vec![0.0, 1.0, 1.0, 2.5, 9.0]);

        let rows = filter_and_sort(&products, "", SortKey::PriceDesc);
        let prices: Vec<f64> = rows.iter().map(|p| p.price_or_zero()).collect();
        assert_eq!(prices, vec![9.0, 2.5, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_sort_is_ordered_and_idempotent() {
        let products = catalog();
        for key in SortKey::ALL {
            let mut rows = filter(&products, "");
            sort(&mut rows, key);
            for pair in rows.windows(2) {
                if let [a, b] = pair {
                    assert_ne!(key.compare(a, b), Ordering::Greater, "{key}");
                }
            }

            let once = ids(&rows);
            sort(&mut rows, key);
            assert_eq!(ids(&rows), once, "{key}");
        }
    }

    #[test]
    fn test_filter_and_sort_does_not_touch_input() {
        let products = catalog();
        let before = products.clone();
        let _ = filter_and_sort(&products, "a", SortKey::PriceDesc);
        assert_eq!(products, before);
    }
}
