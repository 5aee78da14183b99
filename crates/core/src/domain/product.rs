use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::review::ReviewSummary;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Stores a product can be bought from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marketplace {
    Ozon,
    Wildberries,
    YandexMarket,
    MegaMarket,
    AliExpress,
}

impl Marketplace {
    pub const ALL: [Marketplace; 5] = [
        Marketplace::Ozon,
        Marketplace::Wildberries,
        Marketplace::YandexMarket,
        Marketplace::MegaMarket,
        Marketplace::AliExpress,
    ];

    /// Display label, also used as the wire value.
    pub fn label(self) -> &'static str {
        match self {
            Marketplace::Ozon => "Ozon",
            Marketplace::Wildberries => "Wildberries",
            Marketplace::YandexMarket => "Яндекс Маркет",
            Marketplace::MegaMarket => "Мегамаркет",
            Marketplace::AliExpress => "AliExpress",
        }
    }
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Marketplace {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Marketplace::ALL
            .into_iter()
            .find(|marketplace| marketplace.label().to_lowercase() == trimmed.to_lowercase())
            .ok_or_else(|| trimmed.to_owned())
    }
}

/// Inclusive range of recipient ages a product suits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: u32,
    pub max: u32,
}

impl AgeRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, age: u32) -> bool {
        self.min <= age && age <= self.max
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: u32,
    pub currency: String,
    pub image_url: String,
    pub marketplace: Marketplace,
    pub category: String,
    pub tags: Vec<String>,
    /// Precomputed blurb explaining why the product makes a good gift.
    pub reason: String,
    pub age_range: AgeRange,
    pub min_budget: u32,
    pub description: Option<String>,
    pub reviews: Option<ReviewSummary>,
}

impl Product {
    /// Lower-cased tags joined by spaces; all tag matching runs against this string.
    pub fn tag_text(&self) -> String {
        self.tags.iter().map(|tag| tag.to_lowercase()).collect::<Vec<_>>().join(" ")
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|candidate| candidate.to_lowercase() == tag.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::{AgeRange, Marketplace};

    #[test]
    fn marketplace_parses_labels_case_insensitively() {
        assert_eq!("ozon".parse::<Marketplace>(), Ok(Marketplace::Ozon));
        assert_eq!(" Wildberries ".parse::<Marketplace>(), Ok(Marketplace::Wildberries));
        assert_eq!("Яндекс Маркет".parse::<Marketplace>(), Ok(Marketplace::YandexMarket));
        assert_eq!("eBay".parse::<Marketplace>(), Err("eBay".to_owned()));
    }

    #[test]
    fn age_range_is_inclusive() {
        let range = AgeRange::new(18, 99);
        assert!(range.contains(18));
        assert!(range.contains(99));
        assert!(!range.contains(17));
    }
}
