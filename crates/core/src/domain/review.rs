use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Platform the reviews were collected from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewSource {
    Ozon,
    Wildberries,
    YandexMarket,
    Otzovik,
    Irecommend,
}

impl ReviewSource {
    pub const ALL: [ReviewSource; 5] = [
        ReviewSource::Ozon,
        ReviewSource::Wildberries,
        ReviewSource::YandexMarket,
        ReviewSource::Otzovik,
        ReviewSource::Irecommend,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReviewSource::Ozon => "Ozon",
            ReviewSource::Wildberries => "Wildberries",
            ReviewSource::YandexMarket => "Яндекс Маркет",
            ReviewSource::Otzovik => "Отзовик",
            ReviewSource::Irecommend => "IRecommend",
        }
    }
}

impl fmt::Display for ReviewSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReviewSource {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        ReviewSource::ALL
            .into_iter()
            .find(|source| source.label().to_lowercase() == trimmed.to_lowercase())
            .ok_or_else(|| trimmed.to_owned())
    }
}

/// Aggregate review data for a product.
///
/// `total_count` is the platform-wide total; `items` is only a sample of it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub average_rating: f32,
    pub total_count: u32,
    pub source: Option<ReviewSource>,
    pub highlights: Option<Vec<String>>,
    pub items: Vec<Review>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub author: String,
    /// 1..=5
    pub rating: u8,
    pub date: String,
    pub text: String,
    /// Categorical label such as "Купил в подарок".
    pub tag: Option<String>,
    pub photos: Option<Vec<String>>,
}
