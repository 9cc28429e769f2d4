use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Catalog entry. `id` is owned by the store; everything else is client data.
///
/// Numeric fields are kept as `serde_json::Number` so integers and decimals are
/// served back exactly as they were received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub price: Number,
    pub description: String,
    pub category: String,
    /// URI of the product image
    pub image: String,
    pub rating: Rating,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: Number,
    pub count: Number,
}

impl Product {
    /// Overwrite every field present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(rating) = patch.rating {
            if let Some(rate) = rating.rate {
                self.rating.rate = rate;
            }
            if let Some(count) = rating.count {
                self.rating.count = count;
            }
        }
    }
}

// ── Request payloads ─────────────────────────────────────────────────────────

/// Body of `POST /api/products`. Any `id` sent by the client is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub price: Number,
    pub description: String,
    pub category: String,
    pub image: String,
    pub rating: Rating,
}

impl NewProduct {
    pub fn with_id(self, id: i64) -> Product {
        Product {
            id,
            title: self.title,
            price: self.price,
            description: self.description,
            category: self.category,
            image: self.image,
            rating: self.rating,
        }
    }
}

/// Body of `PUT /api/products/:id` once it has passed the update schema.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub price: Option<Number>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub rating: Option<RatingPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RatingPatch {
    pub rate: Option<Number>,
    pub count: Option<Number>,
}
