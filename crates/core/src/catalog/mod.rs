//! Read-only product catalog.
//!
//! The catalog is seeded once at startup and never mutated, so it can be shared behind an
//! `Arc` without synchronization.

mod seed;

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::product::{Product, ProductId};
use crate::random::RandomSource;

/// Filters for a catalog listing. Blank strings count as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuery {
    pub limit: Option<usize>,
    /// Case-insensitive substring of the product's joined tags.
    pub tag: Option<String>,
    /// Exact, case-sensitive category.
    pub category: Option<String>,
}

impl ProductQuery {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    fn tag_filter(&self) -> Option<String> {
        self.tag.as_deref().filter(|tag| !tag.is_empty()).map(str::to_lowercase)
    }

    fn category_filter(&self) -> Option<&str> {
        self.category.as_deref().filter(|category| !category.is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The built-in demo catalog.
    pub fn sample() -> Self {
        Self::new(seed::sample_products())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == *id)
    }

    /// Products for the given ids in request order; unknown and repeated ids are skipped.
    pub fn find_many(&self, ids: &[ProductId]) -> Vec<Product> {
        let mut seen = HashSet::new();
        ids.iter()
            .filter(|id| seen.insert(*id))
            .filter_map(|id| self.find(id).cloned())
            .collect()
    }

    /// Filtered listing. Without any filter the order is reshuffled on every call, which is
    /// not deterministic unless `random` is.
    pub fn query(&self, query: &ProductQuery, random: &dyn RandomSource) -> Vec<Product> {
        let tag = query.tag_filter();
        let category = query.category_filter();

        let mut products: Vec<Product> = self
            .products
            .iter()
            .filter(|product| tag.as_deref().map_or(true, |tag| product.tag_text().contains(tag)))
            .filter(|product| category.map_or(true, |category| product.category == category))
            .cloned()
            .collect();

        if tag.is_none() && category.is_none() {
            products = shuffled(products, random);
        }

        if let Some(limit) = query.limit {
            products.truncate(limit);
        }

        products
    }

    /// Products sharing the category or at least one tag with `id`, most similar first.
    ///
    /// Ranking: tag Jaccard overlap descending, then same category first, then catalog order.
    /// Returns an empty list for unknown ids.
    pub fn similar_to(&self, id: &ProductId) -> Vec<Product> {
        let Some(target) = self.find(id) else {
            return Vec::new();
        };
        let target_tags = lowered_tags(target);

        let mut candidates: Vec<(usize, Similarity)> = self
            .products
            .iter()
            .enumerate()
            .filter(|(_, product)| product.id != target.id)
            .map(|(position, product)| {
                (position, Similarity::between(&target_tags, target, product))
            })
            .filter(|(_, similarity)| similarity.is_related())
            .collect();

        candidates.sort_by(|(left_pos, left), (right_pos, right)| {
            right.cmp_overlap(left).then(right.same_category.cmp(&left.same_category)).then(
                left_pos.cmp(right_pos),
            )
        });

        candidates.into_iter().map(|(position, _)| self.products[position].clone()).collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct Similarity {
    shared_tags: usize,
    union_tags: usize,
    same_category: bool,
}

impl Similarity {
    fn between(target_tags: &HashSet<String>, target: &Product, candidate: &Product) -> Self {
        let candidate_tags = lowered_tags(candidate);
        Self {
            shared_tags: target_tags.intersection(&candidate_tags).count(),
            union_tags: target_tags.union(&candidate_tags).count(),
            same_category: target.category == candidate.category,
        }
    }

    fn is_related(&self) -> bool {
        self.same_category || self.shared_tags > 0
    }

    /// Compares Jaccard ratios exactly by cross-multiplying.
    fn cmp_overlap(&self, other: &Self) -> Ordering {
        let left = self.shared_tags * other.union_tags.max(1);
        let right = other.shared_tags * self.union_tags.max(1);
        left.cmp(&right)
    }
}

fn lowered_tags(product: &Product) -> HashSet<String> {
    product.tags.iter().map(|tag| tag.to_lowercase()).collect()
}

fn shuffled(products: Vec<Product>, random: &dyn RandomSource) -> Vec<Product> {
    let mut slots: Vec<Option<Product>> = products.into_iter().map(Some).collect();
    random.permutation(slots.len()).into_iter().filter_map(|index| slots[index].take()).collect()
}
