//! Additive point scoring for a single product

use super::signals::AnswerSignals;
use super::types::ScoreBreakdown;
use crate::domain::product::Product;

/// Points awarded by each scoring rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringWeights {
    /// Price within 120% of the budget ceiling (default: +5)
    pub within_budget: i32,
    /// Price above 120% of the budget ceiling (default: -10)
    pub over_budget: i32,
    /// Relationship label found in the tags (default: +5)
    pub relationship_match: i32,
    /// Partner relationship with romance or spouse tags (default: +3)
    pub partner_bonus: i32,
    /// Grandparent or sibling relationship with the matching tag (default: +5)
    pub family_bonus: i32,
    /// Parent relationship with a gendered tag (default: +2)
    pub parent_bonus: i32,
    /// Interest token found in the tags (default: +4)
    pub interest_in_tags: i32,
    /// Interest token found in the title, on top of the tag match (default: +3)
    pub interest_in_title: i32,
    /// Target age inside the product's age range (default: +3)
    pub age_fit: i32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        super::DEFAULT_WEIGHTS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BonusKind {
    Partner,
    Family,
    Parent,
}

/// Fires when the relationship label contains any label marker and the tag text contains any
/// tag marker.
#[derive(Debug, Clone, Copy)]
struct RelationshipBonus {
    kind: BonusKind,
    label_markers: &'static [&'static str],
    tag_markers: &'static [&'static str],
}

const RELATIONSHIP_BONUSES: &[RelationshipBonus] = &[
    RelationshipBonus {
        kind: BonusKind::Partner,
        label_markers: &[
            "партн", "девушк", "парень", "парня", "жена", "жене", "муж", "любим", "partner",
            "wife", "husband", "girlfriend", "boyfriend",
        ],
        tag_markers: &[
            "романтик", "любим", "жена", "муж", "девушке", "парню", "romance", "spouse",
        ],
    },
    RelationshipBonus {
        kind: BonusKind::Family,
        label_markers: &["бабушк", "grandma", "grandmother"],
        tag_markers: &["бабушка", "grandma", "grandmother"],
    },
    RelationshipBonus {
        kind: BonusKind::Family,
        label_markers: &["дедушк", "grandpa", "grandfather"],
        tag_markers: &["дедушка", "grandpa", "grandfather"],
    },
    RelationshipBonus {
        kind: BonusKind::Family,
        label_markers: &["брат", "brother"],
        tag_markers: &["брат", "brother"],
    },
    RelationshipBonus {
        kind: BonusKind::Family,
        label_markers: &["сестр", "sister"],
        tag_markers: &["сестра", "sister"],
    },
    RelationshipBonus {
        kind: BonusKind::Parent,
        label_markers: &["мам", "мать", "mom", "mother"],
        tag_markers: &["для нее", "для неё", "женщине", "for her"],
    },
    RelationshipBonus {
        kind: BonusKind::Parent,
        label_markers: &["пап", "отец", "отц", "dad", "father"],
        tag_markers: &["для него", "мужчине", "for him"],
    },
];

/// Score calculator for gift recommendations
#[derive(Debug, Clone)]
pub struct ScoreCalculator {
    weights: ScoringWeights,
}

impl ScoreCalculator {
    /// Create a new score calculator with default weights
    pub fn new() -> Self {
        Self { weights: ScoringWeights::default() }
    }

    /// Create with custom weights
    pub fn with_weights(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Apply every rule in order: budget, relationship, interests, age.
    pub fn score(&self, signals: &AnswerSignals, product: &Product) -> ScoreBreakdown {
        let tag_text = product.tag_text();

        ScoreBreakdown {
            budget: self.budget_score(signals, product),
            relationship: self.relationship_score(signals, &tag_text),
            interests: self.interest_score(signals, product, &tag_text),
            age: self.age_score(signals, product),
        }
    }

    /// Reward or penalty; over-budget products are disfavored, never excluded.
    pub fn budget_score(&self, signals: &AnswerSignals, product: &Product) -> i32 {
        if signals.budget.admits(product.price) {
            self.weights.within_budget
        } else {
            self.weights.over_budget
        }
    }

    pub fn relationship_score(&self, signals: &AnswerSignals, tag_text: &str) -> i32 {
        let relationship = signals.relationship.as_str();
        if relationship.is_empty() {
            return 0;
        }

        let mut score = 0;
        if tag_text.contains(relationship) {
            score += self.weights.relationship_match;
        }

        for bonus in RELATIONSHIP_BONUSES {
            let label_hit = bonus.label_markers.iter().any(|marker| relationship.contains(marker));
            let tag_hit = bonus.tag_markers.iter().any(|marker| tag_text.contains(marker));
            if label_hit && tag_hit {
                score += self.bonus_points(bonus.kind);
            }
        }

        score
    }

    pub fn interest_score(
        &self,
        signals: &AnswerSignals,
        product: &Product,
        tag_text: &str,
    ) -> i32 {
        let title = product.title.to_lowercase();

        signals
            .interests
            .iter()
            .map(|token| {
                let mut points = 0;
                if tag_text.contains(token.as_str()) {
                    points += self.weights.interest_in_tags;
                }
                if title.contains(token.as_str()) {
                    points += self.weights.interest_in_title;
                }
                points
            })
            .sum()
    }

    pub fn age_score(&self, signals: &AnswerSignals, product: &Product) -> i32 {
        match signals.target_age {
            Some(age) if product.age_range.contains(age) => self.weights.age_fit,
            _ => 0,
        }
    }

    fn bonus_points(&self, kind: BonusKind) -> i32 {
        match kind {
            BonusKind::Partner => self.weights.partner_bonus,
            BonusKind::Family => self.weights.family_bonus,
            BonusKind::Parent => self.weights.parent_bonus,
        }
    }
}

impl Default for ScoreCalculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::domain::answers::QuizAnswers;
    use crate::domain::product::ProductId;

    fn product(id: &str) -> Product {
        Catalog::sample().find(&ProductId::from(id)).cloned().expect("seeded product")
    }

    fn signals(age: &str, relationship: &str, budget: &str, interests: &str) -> AnswerSignals {
        AnswerSignals::from_answers(&QuizAnswers::new("Тест", age, relationship, budget, interests))
    }

    #[test]
    fn test_default_weights_match_documented_values() {
        let weights = ScoringWeights::default();
        assert_eq!(weights.within_budget, 5);
        assert_eq!(weights.over_budget, -10);
        assert_eq!(weights.relationship_match, 5);
        assert_eq!(weights.partner_bonus, 3);
        assert_eq!(weights.family_bonus, 5);
        assert_eq!(weights.parent_bonus, 2);
        assert_eq!(weights.interest_in_tags, 4);
        assert_eq!(weights.interest_in_title, 3);
        assert_eq!(weights.age_fit, 3);
    }

    #[test]
    fn test_cozy_blanket_breakdown_for_mother() {
        let calculator = ScoreCalculator::new();
        let breakdown =
            calculator.score(&signals("16-24", "Мама", "2 000 - 5 000", "уют"), &product("5"));

        assert_eq!(breakdown, ScoreBreakdown { budget: 5, relationship: 5, interests: 7, age: 3 });
        assert_eq!(breakdown.total(), 20);
    }

    #[test]
    fn test_partner_bonus_stacks_on_romance_tags() {
        let calculator = ScoreCalculator::new();
        let spa_tags = product("7").tag_text();

        assert_eq!(calculator.relationship_score(&signals("", "Жена", "", ""), &spa_tags), 8);
        assert_eq!(calculator.relationship_score(&signals("", "Девушка", "", ""), &spa_tags), 3);
    }

    #[test]
    fn test_family_and_parent_bonuses() {
        let calculator = ScoreCalculator::new();

        let ereader = product("8");
        assert_eq!(
            calculator.relationship_score(&signals("", "Дедушка", "", ""), &ereader.tag_text()),
            10
        );

        let planner = product("14");
        assert_eq!(
            calculator.relationship_score(&signals("", "Папа", "", ""), &planner.tag_text()),
            7
        );
    }

    #[test]
    fn test_parent_bonus_fires_without_relationship_tag() {
        let calculator = ScoreCalculator::new();
        let breakdown =
            calculator.score(&signals("16-24", "Мама", "2 000 - 5 000", "уют"), &product("7"));

        assert_eq!(breakdown, ScoreBreakdown { budget: 5, relationship: 2, interests: 0, age: 3 });
    }

    #[test]
    fn test_teen_group_fits_headphones_age_range() {
        let calculator = ScoreCalculator::new();
        let headphones = product("1");

        assert_eq!(calculator.age_score(&signals("13-17", "", "", ""), &headphones), 3);
        assert_eq!(calculator.age_score(&signals("45-54", "", "", ""), &headphones), 0);
    }

    #[test]
    fn test_interest_in_title_adds_to_tag_match() {
        let calculator = ScoreCalculator::new();
        let mug = product("10");
        let tags = mug.tag_text();

        assert_eq!(calculator.interest_score(&signals("", "", "", "кофе"), &mug, &tags), 4);
        assert_eq!(calculator.interest_score(&signals("", "", "", "термокружка"), &mug, &tags), 3);
        assert_eq!(calculator.interest_score(&signals("", "", "", "кофе, кофе"), &mug, &tags), 8);
    }

    #[test]
    fn test_empty_answers_only_score_budget() {
        let calculator = ScoreCalculator::new();
        let breakdown = calculator.score(&signals("", "", "", ""), &product("2"));

        assert_eq!(breakdown, ScoreBreakdown { budget: 5, relationship: 0, interests: 0, age: 0 });
    }
}
