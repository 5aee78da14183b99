//! Backend record shapes and their conversion to domain records.
//!
//! Wire records use the flat naming of the backend API. Everything entering the domain goes
//! through [`product_from_wire`], which rejects labels outside the known marketplace and review
//! source sets instead of guessing.

use serde::{Deserialize, Serialize};

use crate::domain::product::{AgeRange, Marketplace, Product, ProductId};
use crate::domain::recommendation::RecommendationResult;
use crate::domain::review::{Review, ReviewSource, ReviewSummary};
use crate::errors::MappingError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductWire {
    pub id: String,
    pub title: String,
    pub price_value: u32,
    pub currency: String,
    pub image_url: String,
    pub marketplace_name: String,
    pub category_name: String,
    pub tags_list: Vec<String>,
    pub ai_reason: String,
    pub min_age: u32,
    pub max_age: u32,
    pub min_budget: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews_data: Option<ReviewsWire>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewsWire {
    pub average_rating: f32,
    pub total_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_highlights: Option<Vec<String>>,
    #[serde(default)]
    pub reviews_list: Vec<ReviewItemWire>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewItemWire {
    pub id: String,
    pub author_name: String,
    pub rating_val: u8,
    pub created_at: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_urls: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationWire {
    pub featured_gift_id: String,
    pub gift_ids: Vec<String>,
    pub total: usize,
}

pub fn product_from_wire(wire: ProductWire) -> Result<Product, MappingError> {
    let marketplace = wire.marketplace_name.parse::<Marketplace>().map_err(|value| {
        MappingError::UnknownMarketplace { product_id: wire.id.clone(), value }
    })?;

    if wire.min_age > wire.max_age {
        return Err(MappingError::InvalidAgeRange {
            product_id: wire.id,
            min_age: wire.min_age,
            max_age: wire.max_age,
        });
    }

    let reviews = match wire.reviews_data {
        Some(reviews) => Some(reviews_from_wire(&wire.id, reviews)?),
        None => None,
    };

    Ok(Product {
        id: ProductId(wire.id),
        title: wire.title,
        price: wire.price_value,
        currency: wire.currency,
        image_url: wire.image_url,
        marketplace,
        category: wire.category_name,
        tags: wire.tags_list,
        reason: wire.ai_reason,
        age_range: AgeRange::new(wire.min_age, wire.max_age),
        min_budget: wire.min_budget,
        description: wire.full_description,
        reviews,
    })
}

pub fn product_to_wire(product: &Product) -> ProductWire {
    ProductWire {
        id: product.id.0.clone(),
        title: product.title.clone(),
        price_value: product.price,
        currency: product.currency.clone(),
        image_url: product.image_url.clone(),
        marketplace_name: product.marketplace.label().to_owned(),
        category_name: product.category.clone(),
        tags_list: product.tags.clone(),
        ai_reason: product.reason.clone(),
        min_age: product.age_range.min,
        max_age: product.age_range.max,
        min_budget: product.min_budget,
        full_description: product.description.clone(),
        reviews_data: product.reviews.as_ref().map(reviews_to_wire),
    }
}

pub fn recommendation_from_wire(wire: RecommendationWire) -> RecommendationResult {
    RecommendationResult {
        featured: ProductId(wire.featured_gift_id),
        ranked: wire.gift_ids.into_iter().map(ProductId).collect(),
        total: wire.total,
    }
}

pub fn recommendation_to_wire(result: &RecommendationResult) -> RecommendationWire {
    RecommendationWire {
        featured_gift_id: result.featured.0.clone(),
        gift_ids: result.ranked.iter().map(|id| id.0.clone()).collect(),
        total: result.total,
    }
}

fn reviews_from_wire(product_id: &str, wire: ReviewsWire) -> Result<ReviewSummary, MappingError> {
    if !(0.0..=5.0).contains(&wire.average_rating) {
        return Err(MappingError::InvalidAverageRating {
            product_id: product_id.to_owned(),
            value: wire.average_rating.to_string(),
        });
    }

    let source = wire
        .source_platform
        .map(|label| {
            label.parse::<ReviewSource>().map_err(|value| MappingError::UnknownReviewSource {
                product_id: product_id.to_owned(),
                value,
            })
        })
        .transpose()?;

    let items = wire.reviews_list.into_iter().map(review_from_wire).collect::<Result<_, _>>()?;

    Ok(ReviewSummary {
        average_rating: wire.average_rating,
        total_count: wire.total_count,
        source,
        highlights: wire.top_highlights,
        items,
    })
}

fn review_from_wire(wire: ReviewItemWire) -> Result<Review, MappingError> {
    if !(1..=5).contains(&wire.rating_val) {
        return Err(MappingError::InvalidRating { review_id: wire.id, rating: wire.rating_val });
    }

    Ok(Review {
        id: wire.id,
        author: wire.author_name,
        rating: wire.rating_val,
        date: wire.created_at,
        text: wire.content,
        tag: wire.tag_label,
        photos: wire.photo_urls,
    })
}

fn reviews_to_wire(summary: &ReviewSummary) -> ReviewsWire {
    ReviewsWire {
        average_rating: summary.average_rating,
        total_count: summary.total_count,
        source_platform: summary.source.map(|source| source.label().to_owned()),
        top_highlights: summary.highlights.clone(),
        reviews_list: summary.items.iter().map(review_to_wire).collect(),
    }
}

fn review_to_wire(review: &Review) -> ReviewItemWire {
    ReviewItemWire {
        id: review.id.clone(),
        author_name: review.author.clone(),
        rating_val: review.rating,
        created_at: review.date.clone(),
        content: review.text.clone(),
        tag_label: review.tag.clone(),
        photo_urls: review.photos.clone(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        product_from_wire, product_to_wire, recommendation_from_wire, recommendation_to_wire,
        ProductWire,
    };
    use crate::catalog::Catalog;
    use crate::domain::product::ProductId;
    use crate::domain::recommendation::RecommendationResult;
    use crate::errors::MappingError;

    fn wire_fixture() -> ProductWire {
        serde_json::from_value(json!({
            "id": "42",
            "title": "Тестовый подарок",
            "price_value": 2500,
            "currency": "RUB",
            "image_url": "https://example.test/42.jpg",
            "marketplace_name": "Wildberries",
            "category_name": "Дом",
            "tags_list": ["уют", "мама"],
            "ai_reason": "Просто потому что",
            "min_age": 18,
            "max_age": 80,
            "min_budget": 2000,
            "reviews_data": {
                "average_rating": 4.5,
                "total_count": 120,
                "source_platform": "Отзовик",
                "reviews_list": [{
                    "id": "r-1",
                    "author_name": "Оля",
                    "rating_val": 5,
                    "created_at": "1 мая 2026",
                    "content": "Отлично",
                    "tag_label": "Купил в подарок"
                }]
            }
        }))
        .expect("fixture should deserialize")
    }

    #[test]
    fn every_sample_product_survives_the_round_trip() {
        for product in Catalog::sample().products() {
            let mapped = product_from_wire(product_to_wire(product)).expect("valid product");
            assert_eq!(&mapped, product);
        }
    }

    #[test]
    fn wire_fields_are_renamed_into_domain_shape() {
        let product = product_from_wire(wire_fixture()).expect("fixture maps");

        assert_eq!(product.id, ProductId::from("42"));
        assert_eq!(product.price, 2500);
        assert_eq!((product.age_range.min, product.age_range.max), (18, 80));
        assert_eq!(product.description, None);

        let reviews = product.reviews.expect("reviews present");
        assert_eq!(reviews.total_count, 120);
        assert_eq!(reviews.items.len(), 1, "items are a sample of the total");
        assert_eq!(reviews.items[0].author, "Оля");
        assert_eq!(reviews.items[0].tag.as_deref(), Some("Купил в подарок"));
        assert_eq!(reviews.highlights, None);
    }

    #[test]
    fn absent_review_block_stays_absent() {
        let mut wire = wire_fixture();
        wire.reviews_data = None;

        let product = product_from_wire(wire).expect("maps without reviews");
        assert!(product.reviews.is_none());
    }

    #[test]
    fn unknown_marketplace_is_rejected() {
        let mut wire = wire_fixture();
        wire.marketplace_name = "eBay".to_owned();

        assert_eq!(
            product_from_wire(wire),
            Err(MappingError::UnknownMarketplace {
                product_id: "42".to_owned(),
                value: "eBay".to_owned()
            })
        );
    }

    #[test]
    fn unknown_review_source_is_rejected() {
        let mut wire = wire_fixture();
        if let Some(reviews) = wire.reviews_data.as_mut() {
            reviews.source_platform = Some("Amazon".to_owned());
        }

        assert!(matches!(
            product_from_wire(wire),
            Err(MappingError::UnknownReviewSource { ref value, .. }) if value == "Amazon"
        ));
    }

    #[test]
    fn inverted_age_range_and_bad_ratings_are_rejected() {
        let mut inverted = wire_fixture();
        inverted.min_age = 60;
        inverted.max_age = 10;
        assert!(matches!(product_from_wire(inverted), Err(MappingError::InvalidAgeRange { .. })));

        let mut bad_rating = wire_fixture();
        if let Some(reviews) = bad_rating.reviews_data.as_mut() {
            reviews.reviews_list[0].rating_val = 0;
        }
        assert!(matches!(product_from_wire(bad_rating), Err(MappingError::InvalidRating { .. })));
    }

    #[test]
    fn average_rating_outside_scale_is_rejected() {
        for average in [5.5_f32, -0.1, f32::NAN] {
            let mut wire = wire_fixture();
            if let Some(reviews) = wire.reviews_data.as_mut() {
                reviews.average_rating = average;
            }

            let result = product_from_wire(wire);
            assert!(matches!(
                result,
                Err(MappingError::InvalidAverageRating { ref product_id, .. })
                    if product_id == "42"
            ));
        }
    }

    #[test]
    fn optional_wire_fields_are_omitted_when_absent() {
        let product = Catalog::sample().find(&ProductId::from("3")).cloned().expect("seeded");
        let value = serde_json::to_value(product_to_wire(&product)).expect("serializes");

        assert!(value.get("reviews_data").is_none());
        assert_eq!(value["marketplace_name"], "Яндекс Маркет");
        assert_eq!(value["tags_list"][0], "творчество");
    }

    #[test]
    fn recommendation_wire_maps_both_ways() {
        let result = RecommendationResult {
            featured: ProductId::from("5"),
            ranked: vec![ProductId::from("5"), ProductId::from("13")],
            total: 2,
        };
        let wire = recommendation_to_wire(&result);

        assert_eq!(wire.featured_gift_id, "5");
        assert_eq!(wire.gift_ids, vec!["5", "13"]);
        assert_eq!(recommendation_from_wire(wire), result);
    }
}
