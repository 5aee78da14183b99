//! Sample catalog loaded at startup.

use crate::domain::product::{AgeRange, Marketplace, Product, ProductId};
use crate::domain::review::{Review, ReviewSource, ReviewSummary};

#[derive(Debug, Clone, Copy)]
struct ProductSeed {
    id: &'static str,
    title: &'static str,
    price: u32,
    image_url: &'static str,
    marketplace: Marketplace,
    category: &'static str,
    tags: &'static [&'static str],
    reason: &'static str,
    min_age: u32,
    max_age: u32,
    min_budget: u32,
    description: Option<&'static str>,
    reviews: Option<ReviewSeed>,
}

#[derive(Debug, Clone, Copy)]
struct ReviewSeed {
    average_rating: f32,
    total_count: u32,
    source: Option<ReviewSource>,
    highlights: Option<&'static [&'static str]>,
    items: &'static [ReviewItemSeed],
}

#[derive(Debug, Clone, Copy)]
struct ReviewItemSeed {
    id: &'static str,
    author: &'static str,
    rating: u8,
    date: &'static str,
    text: &'static str,
    tag: Option<&'static str>,
    photos: Option<&'static [&'static str]>,
}

const CURRENCY: &str = "RUB";

const PRODUCT_SEEDS: &[ProductSeed] = &[
    ProductSeed {
        id: "1",
        title: "Беспроводные наушники с шумоподавлением",
        price: 7_990,
        image_url: "https://images.giftwise.local/headphones.jpg",
        marketplace: Marketplace::Ozon,
        category: "Электроника",
        tags: &["музыка", "техника", "спорт", "парню", "брат"],
        reason: "Музыка без лишнего шума: в дороге, на тренировке и дома.",
        min_age: 14,
        max_age: 45,
        min_budget: 5_000,
        description: Some(
            "Активное шумоподавление, до 30 часов работы и быстрая зарядка за 10 минут.",
        ),
        reviews: Some(ReviewSeed {
            average_rating: 4.7,
            total_count: 1_284,
            source: Some(ReviewSource::Ozon),
            highlights: Some(&["Отличный звук", "Долго держат заряд"]),
            items: &[
                ReviewItemSeed {
                    id: "r1-1",
                    author: "Дмитрий",
                    rating: 5,
                    date: "12 января 2026",
                    text: "Подарил брату, теперь не снимает их в метро.",
                    tag: Some("Купил в подарок"),
                    photos: None,
                },
                ReviewItemSeed {
                    id: "r1-2",
                    author: "Ксения",
                    rating: 4,
                    date: "3 февраля 2026",
                    text: "Звук хороший, кейс немного царапается.",
                    tag: None,
                    photos: Some(&["https://images.giftwise.local/reviews/r1-2.jpg"]),
                },
            ],
        }),
    },
    ProductSeed {
        id: "2",
        title: "Умная гирлянда",
        price: 12_000,
        image_url: "https://images.giftwise.local/garland.jpg",
        marketplace: Marketplace::Wildberries,
        category: "Декор",
        tags: &["дом", "зима", "праздник", "техника"],
        reason: "Сотни эффектов из приложения превращают любую комнату в праздник.",
        min_age: 10,
        max_age: 99,
        min_budget: 10_000,
        description: None,
        reviews: Some(ReviewSeed {
            average_rating: 4.5,
            total_count: 312,
            source: Some(ReviewSource::Wildberries),
            highlights: None,
            items: &[ReviewItemSeed {
                id: "r2-1",
                author: "Алексей",
                rating: 5,
                date: "28 декабря 2025",
                text: "Настроил за пять минут, дети в восторге.",
                tag: None,
                photos: None,
            }],
        }),
    },
    ProductSeed {
        id: "3",
        title: "Набор для рисования в кейсе",
        price: 2_400,
        image_url: "https://images.giftwise.local/art-set.jpg",
        marketplace: Marketplace::YandexMarket,
        category: "Хобби",
        tags: &["творчество", "рисование", "ребенок", "сестра"],
        reason: "Всё для первых шедевров в одном аккуратном чемоданчике.",
        min_age: 6,
        max_age: 16,
        min_budget: 2_000,
        description: Some("150 предметов: карандаши, фломастеры, пастель и акварель."),
        reviews: None,
    },
    ProductSeed {
        id: "4",
        title: "Капсульная кофемашина",
        price: 15_990,
        image_url: "https://images.giftwise.local/coffee-machine.jpg",
        marketplace: Marketplace::MegaMarket,
        category: "Кухня",
        tags: &["кофе", "кухня", "дом", "папа", "для него"],
        reason: "Свежий эспрессо каждое утро без лишних хлопот.",
        min_age: 18,
        max_age: 99,
        min_budget: 10_000,
        description: None,
        reviews: Some(ReviewSeed {
            average_rating: 4.8,
            total_count: 2_045,
            source: Some(ReviewSource::Otzovik),
            highlights: Some(&["Быстро готовит", "Компактная"]),
            items: &[],
        }),
    },
    ProductSeed {
        id: "5",
        title: "Уютный плед",
        price: 3_500,
        image_url: "https://images.giftwise.local/blanket.jpg",
        marketplace: Marketplace::Ozon,
        category: "Дом",
        tags: &["уют", "мама", "бабушка", "дом", "зима"],
        reason: "Мягкий и тёплый: лучший способ сказать «береги себя».",
        min_age: 18,
        max_age: 99,
        min_budget: 2_000,
        description: Some("Плед из микрофибры 150×200 см, не линяет после стирки."),
        reviews: Some(ReviewSeed {
            average_rating: 4.9,
            total_count: 5_410,
            source: Some(ReviewSource::Ozon),
            highlights: Some(&["Очень мягкий", "Не электризуется"]),
            items: &[
                ReviewItemSeed {
                    id: "r5-1",
                    author: "Марина",
                    rating: 5,
                    date: "5 марта 2026",
                    text: "Маме очень понравился, теперь вечера только с ним.",
                    tag: Some("Купил в подарок"),
                    photos: Some(&[
                        "https://images.giftwise.local/reviews/r5-1a.jpg",
                        "https://images.giftwise.local/reviews/r5-1b.jpg",
                    ]),
                },
                ReviewItemSeed {
                    id: "r5-2",
                    author: "Игорь",
                    rating: 4,
                    date: "19 февраля 2026",
                    text: "Тёплый, но цвет чуть темнее, чем на фото.",
                    tag: None,
                    photos: None,
                },
            ],
        }),
    },
    ProductSeed {
        id: "6",
        title: "Настольная игра «Каркассон»",
        price: 2_990,
        image_url: "https://images.giftwise.local/carcassonne.jpg",
        marketplace: Marketplace::Wildberries,
        category: "Игры",
        tags: &["игры", "друзья", "семья", "брат", "сестра"],
        reason: "Классика для вечеров с семьёй и друзьями.",
        min_age: 8,
        max_age: 99,
        min_budget: 2_000,
        description: None,
        reviews: Some(ReviewSeed {
            average_rating: 4.8,
            total_count: 967,
            source: Some(ReviewSource::Irecommend),
            highlights: None,
            items: &[ReviewItemSeed {
                id: "r6-1",
                author: "Светлана",
                rating: 5,
                date: "2 января 2026",
                text: "Играем всей семьёй каждые выходные.",
                tag: Some("Купил в подарок"),
                photos: None,
            }],
        }),
    },
    ProductSeed {
        id: "7",
        title: "Сертификат в SPA-салон",
        price: 6_000,
        image_url: "https://images.giftwise.local/spa.jpg",
        marketplace: Marketplace::YandexMarket,
        category: "Впечатления",
        tags: &["романтика", "девушке", "жена", "отдых", "красота", "для нее"],
        reason: "Время только для себя: массаж, ароматы и тишина.",
        min_age: 18,
        max_age: 65,
        min_budget: 5_000,
        description: Some("Действует 6 месяцев в салонах сети по всей России."),
        reviews: None,
    },
    ProductSeed {
        id: "8",
        title: "Электронная книга",
        price: 13_990,
        image_url: "https://images.giftwise.local/ereader.jpg",
        marketplace: Marketplace::Ozon,
        category: "Электроника",
        tags: &["книги", "чтение", "техника", "дедушка", "бабушка"],
        reason: "Целая библиотека в кармане и экран, который не утомляет глаза.",
        min_age: 12,
        max_age: 99,
        min_budget: 10_000,
        description: None,
        reviews: Some(ReviewSeed {
            average_rating: 4.6,
            total_count: 743,
            source: Some(ReviewSource::YandexMarket),
            highlights: Some(&["Крупный шрифт", "Подсветка"]),
            items: &[],
        }),
    },
    ProductSeed {
        id: "9",
        title: "Набор для выращивания трав",
        price: 1_800,
        image_url: "https://images.giftwise.local/herbs.jpg",
        marketplace: Marketplace::AliExpress,
        category: "Дом и сад",
        tags: &["растения", "сад", "кухня", "мама"],
        reason: "Базилик и мята на подоконнике круглый год.",
        min_age: 10,
        max_age: 99,
        min_budget: 1_000,
        description: None,
        reviews: None,
    },
    ProductSeed {
        id: "10",
        title: "Термокружка с гравировкой",
        price: 1_500,
        image_url: "https://images.giftwise.local/mug.jpg",
        marketplace: Marketplace::Wildberries,
        category: "Аксессуары",
        tags: &["кофе", "путешествия", "зима", "коллеге", "папа"],
        reason: "Горячий чай в дороге и именная надпись на память.",
        min_age: 16,
        max_age: 99,
        min_budget: 1_000,
        description: None,
        reviews: None,
    },
    ProductSeed {
        id: "11",
        title: "Фитнес-браслет",
        price: 4_500,
        image_url: "https://images.giftwise.local/band.jpg",
        marketplace: Marketplace::MegaMarket,
        category: "Спорт",
        tags: &["спорт", "здоровье", "техника", "парню", "муж"],
        reason: "Следит за шагами, сном и пульсом без лишнего внимания.",
        min_age: 14,
        max_age: 70,
        min_budget: 3_000,
        description: None,
        reviews: Some(ReviewSeed {
            average_rating: 4.4,
            total_count: 3_120,
            source: None,
            highlights: None,
            items: &[ReviewItemSeed {
                id: "r11-1",
                author: "Павел",
                rating: 4,
                date: "14 апреля 2026",
                text: "Батарея держит неделю, приложение удобное.",
                tag: None,
                photos: None,
            }],
        }),
    },
    ProductSeed {
        id: "12",
        title: "Конструктор LEGO Technic",
        price: 8_990,
        image_url: "https://images.giftwise.local/lego.jpg",
        marketplace: Marketplace::Ozon,
        category: "Игры",
        tags: &["конструктор", "техника", "ребенок", "сын", "брат"],
        reason: "Настоящая механика: шестерёнки, подвеска и рулевое управление.",
        min_age: 9,
        max_age: 16,
        min_budget: 5_000,
        description: None,
        reviews: None,
    },
    ProductSeed {
        id: "13",
        title: "Ароматическая свеча",
        price: 1_200,
        image_url: "https://images.giftwise.local/candle.jpg",
        marketplace: Marketplace::Wildberries,
        category: "Дом",
        tags: &["уют", "романтика", "девушке", "дом"],
        reason: "Тёплый свет и аромат ванили для спокойных вечеров.",
        min_age: 16,
        max_age: 99,
        min_budget: 1_000,
        description: None,
        reviews: None,
    },
    ProductSeed {
        id: "14",
        title: "Кожаный ежедневник",
        price: 2_700,
        image_url: "https://images.giftwise.local/planner.jpg",
        marketplace: Marketplace::YandexMarket,
        category: "Канцелярия",
        tags: &["работа", "коллеге", "папа", "для него"],
        reason: "Солидный помощник для планов и идей.",
        min_age: 18,
        max_age: 99,
        min_budget: 2_000,
        description: Some("Натуральная кожа, датированный блок на 2027 год."),
        reviews: None,
    },
];

pub(crate) fn sample_products() -> Vec<Product> {
    PRODUCT_SEEDS.iter().map(ProductSeed::to_product).collect()
}

impl ProductSeed {
    fn to_product(&self) -> Product {
        Product {
            id: ProductId::new(self.id),
            title: self.title.to_owned(),
            price: self.price,
            currency: CURRENCY.to_owned(),
            image_url: self.image_url.to_owned(),
            marketplace: self.marketplace,
            category: self.category.to_owned(),
            tags: owned(self.tags),
            reason: self.reason.to_owned(),
            age_range: AgeRange::new(self.min_age, self.max_age),
            min_budget: self.min_budget,
            description: self.description.map(str::to_owned),
            reviews: self.reviews.map(|reviews| reviews.to_summary()),
        }
    }
}

impl ReviewSeed {
    fn to_summary(self) -> ReviewSummary {
        ReviewSummary {
            average_rating: self.average_rating,
            total_count: self.total_count,
            source: self.source,
            highlights: self.highlights.map(owned),
            items: self.items.iter().map(ReviewItemSeed::to_review).collect(),
        }
    }
}

impl ReviewItemSeed {
    fn to_review(&self) -> Review {
        Review {
            id: self.id.to_owned(),
            author: self.author.to_owned(),
            rating: self.rating,
            date: self.date.to_owned(),
            text: self.text.to_owned(),
            tag: self.tag.map(str::to_owned),
            photos: self.photos.map(owned),
        }
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}
