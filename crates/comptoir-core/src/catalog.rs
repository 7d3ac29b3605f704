//! # Catalog Store
//!
//! Holds categories and products and enforces the catalog invariants.
//!
//! ## Invariants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product.category_id ──► Category   checked at add/update time only    │
//! │  Category referenced by ≥1 product  ──► delete refused (CategoryInUse) │
//! │  stock / total_sales                ──► moved together only by         │
//! │                                         adjust_stock_for_sale          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Deleting a product never touches sale history: sales carry their own
//! snapshot of the name and price.
//!
//! New categories and products are appended, so list order is creation order.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::new_id;
use crate::types::{Category, NewCategory, NewProduct, Product, ProductFilter};
use crate::validation::{
    validate_new_category, validate_new_product, validate_product, validate_quantity,
};

// =============================================================================
// Catalog
// =============================================================================

/// The set of categories and products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
    products: Vec<Product>,
}

/// A category together with the number of products filed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CategoryUsage {
    pub category: Category,
    pub product_count: usize,
}

impl Catalog {
    /// Rebuilds a catalog from persisted records.
    ///
    /// Records are taken as-is: a product whose category was removed behind
    /// our back stays loadable.
    pub fn from_parts(categories: Vec<Category>, products: Vec<Product>) -> Self {
        Catalog {
            categories,
            products,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    // -------------------------------------------------------------------------
    // Categories
    // -------------------------------------------------------------------------

    /// Creates a category with a fresh id.
    pub fn add_category(&mut self, input: NewCategory) -> CoreResult<Category> {
        let input = validate_new_category(&input)?;
        let category = Category {
            id: new_id(),
            name: input.name,
            icon: input.icon,
        };
        self.categories.push(category.clone());
        Ok(category)
    }

    /// Removes a category that no product references.
    ///
    /// ## Errors
    /// - `CategoryNotFound` when the id is unknown
    /// - `CategoryInUse` when at least one product still references it
    pub fn delete_category(&mut self, id: &str) -> CoreResult<Category> {
        let index = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| CoreError::CategoryNotFound(id.to_string()))?;

        let product_count = self.product_count(id);
        if product_count > 0 {
            return Err(CoreError::CategoryInUse {
                category: self.categories[index].name.clone(),
                product_count,
            });
        }

        Ok(self.categories.remove(index))
    }

    /// Number of products referencing `category_id`.
    pub fn product_count(&self, category_id: &str) -> usize {
        self.products
            .iter()
            .filter(|p| p.category_id == category_id)
            .count()
    }

    /// Every category with its product count, in category order.
    pub fn product_counts(&self) -> Vec<CategoryUsage> {
        self.categories
            .iter()
            .map(|category| CategoryUsage {
                category: category.clone(),
                product_count: self.product_count(&category.id),
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    /// Creates a product with a fresh id and `total_sales = 0`.
    pub fn add_product(&mut self, input: NewProduct) -> CoreResult<Product> {
        let input = validate_new_product(&input)?;
        self.ensure_category(&input.category_id)?;

        let product = Product {
            id: new_id(),
            name: input.name,
            category_id: input.category_id,
            stock: input.stock,
            sale_price: input.sale_price,
            purchase_price: input.purchase_price,
            total_sales: 0,
        };
        self.products.push(product.clone());
        Ok(product)
    }

    /// Replaces a product by id.
    ///
    /// This is a full replace: `stock` and `total_sales` are overwritten too.
    /// It is a separate path from sales and never raises stock alerts.
    pub fn update_product(&mut self, product: Product) -> CoreResult<Product> {
        let product = validate_product(&product)?;
        let index = self.product_index(&product.id)?;
        self.ensure_category(&product.category_id)?;

        self.products[index] = product.clone();
        Ok(product)
    }

    /// Removes a product by id. Sale history is left untouched.
    pub fn delete_product(&mut self, id: &str) -> CoreResult<Product> {
        let index = self.product_index(id)?;
        Ok(self.products.remove(index))
    }

    /// Moves `quantity` units from stock to total sales.
    ///
    /// The only path that changes both counters together. Checked again here
    /// so a caller that skipped validation still cannot oversell. Both new
    /// values are computed before either field is written.
    pub fn adjust_stock_for_sale(&mut self, product_id: &str, quantity: i64) -> CoreResult<Product> {
        validate_quantity(quantity)?;
        let index = self.product_index(product_id)?;
        let product = &mut self.products[index];

        if quantity > product.stock {
            return Err(CoreError::InsufficientStock {
                product: product.name.clone(),
                available: product.stock,
                requested: quantity,
            });
        }

        let stock = product
            .stock
            .checked_sub(quantity)
            .ok_or_else(|| ValidationError::out_of_range("stock"))?;
        let total_sales = product
            .total_sales
            .checked_add(quantity)
            .ok_or_else(|| ValidationError::out_of_range("totalSales"))?;

        product.stock = stock;
        product.total_sales = total_sales;
        Ok(product.clone())
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Products matching the name fragment and category, in catalog order.
    ///
    /// ```rust
    /// use comptoir_core::catalog::Catalog;
    /// use comptoir_core::ProductFilter;
    ///
    /// let catalog = Catalog::default();
    /// assert!(catalog.search(&ProductFilter::default()).is_empty());
    /// ```
    pub fn search(&self, filter: &ProductFilter) -> Vec<&Product> {
        let needle = filter.name.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
            .filter(|p| match &filter.category_id {
                Some(category_id) => &p.category_id == category_id,
                None => true,
            })
            .collect()
    }

    fn product_index(&self, id: &str) -> CoreResult<usize> {
        self.products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    fn ensure_category(&self, category_id: &str) -> CoreResult<()> {
        if self.category(category_id).is_none() {
            return Err(CoreError::UnknownCategory(category_id.to_string()));
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
