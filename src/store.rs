use crate::error::{ServerError, ServerResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

const NOT_FOUND_MSG: &str = "Produto não encontrado";

/// A single catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Globally unique, assigned at insertion.
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(rename = "inStock")]
    pub in_stock: bool,
}

/// Input for [`ProductStore::insert`]. Defaults for the optional fields are
/// applied by the store.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub in_stock: Option<bool>,
}

/// Partial update applied as a shallow merge: every present field overwrites
/// the stored one, including `id`; absent fields are preserved.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "inStock")]
    pub in_stock: Option<bool>,
}

/// Owner of the in-memory product collection.
///
/// Insertion order is preserved and observable in listings. Compound
/// operations hold the write lock for their full duration so every id stays
/// unique under the multi-threaded runtime.
pub struct ProductStore {
    products: RwLock<Vec<Product>>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self {
            products: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> ServerResult<RwLockReadGuard<'_, Vec<Product>>> {
        self.products
            .read()
            .map_err(|_| ServerError::Internal("poisoned product lock".to_string()))
    }

    fn write(&self) -> ServerResult<RwLockWriteGuard<'_, Vec<Product>>> {
        self.products
            .write()
            .map_err(|_| ServerError::Internal("poisoned product lock".to_string()))
    }

    /// Snapshot of the full collection in insertion order.
    pub fn list(&self) -> ServerResult<Vec<Product>> {
        Ok(self.read()?.clone())
    }

    /// Linear lookup by id.
    pub fn get(&self, id: &str) -> ServerResult<Product> {
        self.read()?
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ServerError::NotFound(NOT_FOUND_MSG.to_string()))
    }

    /// Append a new record with a freshly generated id.
    pub fn insert(&self, new: NewProduct) -> ServerResult<Product> {
        let product = Product {
            id: uuid::Uuid::new_v4().to_string(),
            name: new.name,
            description: new.description.unwrap_or_default(),
            price: new.price,
            category: new.category,
            in_stock: new.in_stock.unwrap_or(true),
        };

        self.write()?.push(product.clone());
        tracing::debug!(id = %product.id, "product inserted");
        Ok(product)
    }

    /// Shallow-merge `patch` over the record with `id`. The merged record
    /// replaces the original in place, keeping its position.
    pub fn update(&self, id: &str, patch: ProductPatch) -> ServerResult<Product> {
        let mut products = self.write()?;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ServerError::NotFound(NOT_FOUND_MSG.to_string()))?;

        if let Some(new_id) = patch.id {
            product.id = new_id;
        }
        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(description) = patch.description {
            product.description = description;
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(category) = patch.category {
            product.category = category;
        }
        if let Some(in_stock) = patch.in_stock {
            product.in_stock = in_stock;
        }

        tracing::debug!(id = %product.id, "product updated");
        Ok(product.clone())
    }

    /// Remove the record with `id`, shifting later records left.
    pub fn remove(&self, id: &str) -> ServerResult<()> {
        let mut products = self.write()?;
        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| ServerError::NotFound(NOT_FOUND_MSG.to_string()))?;

        products.remove(index);
        tracing::debug!(id, "product removed");
        Ok(())
    }

    /// Category → record count over the full collection.
    pub fn category_counts(&self) -> ServerResult<HashMap<String, usize>> {
        let mut counts = HashMap::new();
        for product in self.read()?.iter() {
            *counts.entry(product.category.clone()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// Starter catalog loaded at server startup. Tests build fresh empty
    /// stores instead.
    pub fn seed_demo(&self) -> ServerResult<()> {
        let mut products = self.write()?;
        products.push(Product {
            id: "1".to_string(),
            name: "Camiseta".to_string(),
            description: "Camiseta 100% algodão".to_string(),
            price: 20.0,
            category: "Roupas".to_string(),
            in_stock: true,
        });
        products.push(Product {
            id: "2".to_string(),
            name: "Notebook".to_string(),
            description: "Notebook Dell Inspiron".to_string(),
            price: 1200.0,
            category: "Eletrônicos".to_string(),
            in_stock: true,
        });
        Ok(())
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sample(name: &str, category: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: None,
            price: 10.0,
            category: category.to_string(),
            in_stock: None,
        }
    }

    #[test]
    fn insert_generates_unique_ids_and_applies_defaults() {
        let store = ProductStore::new();

        let mut ids = HashSet::new();
        for i in 0..10 {
            let product = store.insert(sample(&format!("p{i}"), "Roupas")).expect("insert");
            assert!(ids.insert(product.id.clone()), "duplicate id {}", product.id);
            assert_eq!(product.description, "");
            assert!(product.in_stock);
        }

        assert_eq!(store.list().expect("list").len(), 10);
    }

    #[test]
    fn list_preserves_insertion_order() {
        let store = ProductStore::new();
        for name in ["a", "b", "c"] {
            store.insert(sample(name, "Roupas")).expect("insert");
        }

        let names: Vec<String> = store
            .list()
            .expect("list")
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn get_missing_id_is_not_found() {
        let store = ProductStore::new();
        let err = store.get("missing").expect_err("lookup should fail");
        assert!(matches!(err, ServerError::NotFound(_)));
    }

    #[test]
    fn update_merges_only_present_fields() {
        let store = ProductStore::new();
        store.insert(sample("first", "Roupas")).expect("insert");
        let target = store.insert(sample("Camiseta", "Roupas")).expect("insert");

        let merged = store
            .update(
                &target.id,
                ProductPatch {
                    price: Some(99.0),
                    ..ProductPatch::default()
                },
            )
            .expect("update");

        assert_eq!(merged.price, 99.0);
        assert_eq!(merged.name, "Camiseta");
        assert_eq!(merged.category, "Roupas");
        assert!(merged.in_stock);

        // Position in the collection is unchanged.
        let listed = store.list().expect("list");
        assert_eq!(listed[1], merged);
    }

    #[test]
    fn update_can_overwrite_the_id() {
        let store = ProductStore::new();
        let product = store.insert(sample("Camiseta", "Roupas")).expect("insert");

        let merged = store
            .update(
                &product.id,
                ProductPatch {
                    id: Some("custom-id".to_string()),
                    ..ProductPatch::default()
                },
            )
            .expect("update");

        assert_eq!(merged.id, "custom-id");
        assert!(store.get("custom-id").is_ok());
        assert!(store.get(&product.id).is_err());
    }

    #[test]
    fn update_missing_id_is_not_found() {
        let store = ProductStore::new();
        let err = store
            .update("missing", ProductPatch::default())
            .expect_err("update should fail");
        assert!(matches!(err, ServerError::NotFound(_)));
    }

    #[test]
    fn remove_twice_fails_the_second_time() {
        let store = ProductStore::new();
        let product = store.insert(sample("Camiseta", "Roupas")).expect("insert");

        store.remove(&product.id).expect("first remove");
        let err = store.remove(&product.id).expect_err("second remove");
        assert!(matches!(err, ServerError::NotFound(_)));
    }

    #[test]
    fn remove_preserves_order_of_remaining_records() {
        let store = ProductStore::new();
        let mut ids = Vec::new();
        for name in ["a", "b", "c"] {
            ids.push(store.insert(sample(name, "Roupas")).expect("insert").id);
        }

        store.remove(&ids[1]).expect("remove");

        let names: Vec<String> = store
            .list()
            .expect("list")
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn category_counts_scan_the_full_collection() {
        let store = ProductStore::new();
        store.insert(sample("Notebook", "Eletrônicos")).expect("insert");
        store.insert(sample("Mouse", "Eletrônicos")).expect("insert");
        store.insert(sample("Camiseta", "Roupas")).expect("insert");

        let counts = store.category_counts().expect("counts");
        assert_eq!(counts.get("Eletrônicos"), Some(&2));
        assert_eq!(counts.get("Roupas"), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn seed_demo_loads_the_starter_catalog() {
        let store = ProductStore::new();
        store.seed_demo().expect("seed");

        let products = store.list().expect("list");
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Camiseta");
        assert_eq!(products[1].name, "Notebook");
    }
}
