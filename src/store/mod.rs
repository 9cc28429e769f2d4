use indexmap::IndexMap;

use crate::error::{AppError, AppResult};
use crate::models::{NewProduct, Product, ProductPatch};

/// In-memory product catalog.
///
/// Backed by an `IndexMap` keyed by id: lookups are O(1) and iteration follows
/// insertion order, which is also the order the API lists products in.
/// Removal uses `shift_remove` so the remaining entries keep their order.
#[derive(Debug, Default)]
pub struct ProductStore {
    products: IndexMap<i64, Product>,
}

impl ProductStore {
    /// Build a store from seed records, rejecting duplicate ids.
    pub fn from_products(products: Vec<Product>) -> anyhow::Result<Self> {
        let mut map = IndexMap::with_capacity(products.len());
        for product in products {
            let id = product.id;
            if map.insert(id, product).is_some() {
                anyhow::bail!("duplicate product id {} in seed data", id);
            }
        }
        Ok(Self { products: map })
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn list_all(&self) -> Vec<Product> {
        self.products.values().cloned().collect()
    }

    pub fn find_by_id(&self, id: i64) -> AppResult<&Product> {
        self.products.get(&id).ok_or(AppError::NotFound(id))
    }

    /// Next id is one past the largest id currently stored, starting at 1.
    fn next_id(&self) -> AppResult<i64> {
        match self.products.keys().max() {
            None => Ok(1),
            Some(max) => max.checked_add(1).ok_or(AppError::IdsExhausted),
        }
    }

    /// Append a new product and return the full updated list.
    pub fn create(&mut self, new: NewProduct) -> AppResult<Vec<Product>> {
        let id = self.next_id()?;
        self.products.insert(id, new.with_id(id));
        Ok(self.list_all())
    }

    pub fn delete_by_id(&mut self, id: i64) -> AppResult<Product> {
        self.products.shift_remove(&id).ok_or(AppError::NotFound(id))
    }

    pub fn update_by_id(&mut self, id: i64, patch: ProductPatch) -> AppResult<Product> {
        let product = self.products.get_mut(&id).ok_or(AppError::NotFound(id))?;
        product.apply(patch);
        Ok(product.clone())
    }
}
