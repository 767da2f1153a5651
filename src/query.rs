use crate::store::Product;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 5;

/// Listing query parameters.
///
/// `page` and `limit` arrive as raw strings: malformed values degrade to the
/// defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    /// Exact category match, case-insensitive.
    #[serde(default)]
    pub category: Option<String>,

    /// Substring match on the product name, case-insensitive.
    #[serde(default)]
    pub search: Option<String>,

    #[serde(default)]
    pub page: Option<String>,

    #[serde(default)]
    pub limit: Option<String>,
}

/// One page of filtered results. `total` counts every record that survived
/// filtering, before pagination, so clients can derive the page count.
#[derive(Debug, Serialize)]
pub struct ProductPage {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub data: Vec<Product>,
}

fn parse_page(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.parse::<usize>().ok())
        .filter(|&page| page >= 1)
        .unwrap_or(DEFAULT_PAGE)
}

fn parse_limit(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_LIMIT)
}

/// Apply category filter, name search and pagination to a snapshot.
///
/// A `limit` of 0 yields an empty page, and a start past the end of the
/// filtered set yields an empty page with `total` intact.
pub fn apply(snapshot: Vec<Product>, query: &ProductQuery) -> ProductPage {
    let mut filtered = snapshot;

    if let Some(category) = &query.category {
        let wanted = category.to_lowercase();
        filtered.retain(|p| p.category.to_lowercase() == wanted);
    }

    if let Some(search) = &query.search {
        let needle = search.to_lowercase();
        filtered.retain(|p| p.name.to_lowercase().contains(&needle));
    }

    let total = filtered.len();
    let page = parse_page(query.page.as_deref());
    let limit = parse_limit(query.limit.as_deref());

    let start = (page - 1).saturating_mul(limit);
    let data: Vec<Product> = filtered.into_iter().skip(start).take(limit).collect();

    ProductPage {
        total,
        page,
        limit,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, category: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            price: 10.0,
            category: category.to_string(),
            in_stock: true,
        }
    }

    fn query(category: Option<&str>, search: Option<&str>, page: Option<&str>, limit: Option<&str>) -> ProductQuery {
        ProductQuery {
            category: category.map(str::to_string),
            search: search.map(str::to_string),
            page: page.map(str::to_string),
            limit: limit.map(str::to_string),
        }
    }

    fn seven_shirts() -> Vec<Product> {
        (1..=7)
            .map(|i| product(&i.to_string(), &format!("Camiseta {i}"), "Roupas"))
            .collect()
    }

    #[test]
    fn no_parameters_returns_first_default_page_in_order() {
        let page = apply(seven_shirts(), &ProductQuery::default());

        assert_eq!(page.total, 7);
        assert_eq!(page.page, DEFAULT_PAGE);
        assert_eq!(page.limit, DEFAULT_LIMIT);
        let ids: Vec<&str> = page.data.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn category_filter_is_case_insensitive_exact_match() {
        let snapshot = vec![
            product("1", "Camiseta", "Roupas"),
            product("2", "Notebook", "Eletrônicos"),
            product("3", "Calça", "Roupas"),
        ];

        let upper = apply(snapshot.clone(), &query(Some("Roupas"), None, None, None));
        let lower = apply(snapshot.clone(), &query(Some("roupas"), None, None, None));
        assert_eq!(upper.data, lower.data);
        assert_eq!(upper.total, 2);

        // Exact match, not substring.
        let partial = apply(snapshot, &query(Some("Roupa"), None, None, None));
        assert_eq!(partial.total, 0);
    }

    #[test]
    fn search_matches_case_insensitive_substring_of_name() {
        let snapshot = vec![
            product("1", "Notebook", "Eletrônicos"),
            product("2", "Camiseta", "Roupas"),
        ];

        let page = apply(snapshot, &query(None, Some("note"), None, None));
        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].name, "Notebook");
    }

    #[test]
    fn second_page_holds_the_remainder() {
        let page = apply(seven_shirts(), &query(None, None, Some("2"), Some("5")));

        assert_eq!(page.total, 7);
        assert_eq!(page.page, 2);
        assert_eq!(page.limit, 5);
        let ids: Vec<&str> = page.data.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["6", "7"]);
    }

    #[test]
    fn total_reflects_filtering_before_pagination() {
        let mut snapshot = seven_shirts();
        snapshot.push(product("8", "Notebook", "Eletrônicos"));

        let page = apply(snapshot, &query(Some("roupas"), None, Some("1"), Some("3")));
        assert_eq!(page.total, 7);
        assert_eq!(page.data.len(), 3);
    }

    #[test]
    fn malformed_page_and_limit_fall_back_to_defaults() {
        let page = apply(seven_shirts(), &query(None, None, Some("abc"), Some("3.7")));
        assert_eq!(page.page, DEFAULT_PAGE);
        assert_eq!(page.limit, DEFAULT_LIMIT);

        // A parsed page below 1 falls back as well.
        let page = apply(seven_shirts(), &query(None, None, Some("0"), None));
        assert_eq!(page.page, 1);
        assert_eq!(page.data.len(), 5);
    }

    #[test]
    fn page_past_the_end_is_empty_with_total_intact() {
        let page = apply(seven_shirts(), &query(None, None, Some("4"), Some("5")));
        assert_eq!(page.total, 7);
        assert!(page.data.is_empty());
    }

    #[test]
    fn limit_zero_yields_an_empty_page() {
        let page = apply(seven_shirts(), &query(None, None, None, Some("0")));
        assert_eq!(page.limit, 0);
        assert_eq!(page.total, 7);
        assert!(page.data.is_empty());
    }

    #[test]
    fn filters_compose() {
        let snapshot = vec![
            product("1", "Camiseta Azul", "Roupas"),
            product("2", "Camiseta Preta", "Roupas"),
            product("3", "Camiseta Gamer", "Eletrônicos"),
            product("4", "Calça", "Roupas"),
        ];

        let page = apply(snapshot, &query(Some("roupas"), Some("camiseta"), None, None));
        assert_eq!(page.total, 2);
        let ids: Vec<&str> = page.data.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }
}
