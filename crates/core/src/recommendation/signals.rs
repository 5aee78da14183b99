//! Interpretation of free-text questionnaire labels

use serde::{Deserialize, Serialize};

use super::{
    ADULT_AGE, BUDGET_BREAKPOINTS, BUDGET_TOLERANCE_PERCENT, CHILD_AGE, MIN_INTEREST_TOKEN_CHARS,
    SENIOR_AGE, YOUNG_AGE,
};
use crate::domain::answers::QuizAnswers;

/// Spending limit derived from a budget label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetCeiling {
    Limited(u32),
    Unbounded,
}

impl BudgetCeiling {
    /// Resolves labels such as "до 2 000", "2 000 - 5 000" or "30 000+".
    ///
    /// The largest number in the label snaps up to the first breakpoint covering it. Open-ended
    /// labels, amounts above the last breakpoint and labels without numbers are unbounded.
    pub fn from_label(label: &str) -> Self {
        let normalized = label.trim().to_lowercase();
        let numbers = label_numbers(&normalized);

        let Some(largest) = numbers.iter().copied().max() else {
            return Self::Unbounded;
        };
        if numbers.len() == 1 && is_open_ended(&normalized) {
            return Self::Unbounded;
        }

        BUDGET_BREAKPOINTS
            .into_iter()
            .find(|breakpoint| u64::from(*breakpoint) >= largest)
            .map_or(Self::Unbounded, Self::Limited)
    }

    /// Whether `price` is within the tolerated overshoot of the ceiling.
    pub fn admits(&self, price: u32) -> bool {
        match self {
            Self::Limited(ceiling) => {
                u64::from(price) * 100 <= u64::from(*ceiling) * BUDGET_TOLERANCE_PERCENT
            }
            Self::Unbounded => true,
        }
    }
}

/// Answer fields pre-processed once per scoring run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSignals {
    pub budget: BudgetCeiling,
    /// Lower-cased, trimmed relationship label
    pub relationship: String,
    pub interests: Vec<String>,
    pub target_age: Option<u32>,
}

impl AnswerSignals {
    pub fn from_answers(answers: &QuizAnswers) -> Self {
        Self {
            budget: BudgetCeiling::from_label(&answers.budget),
            relationship: answers.relationship.trim().to_lowercase(),
            interests: interest_tokens(&answers.interests),
            target_age: target_age(&answers.age_group),
        }
    }
}

/// Splits interests on whitespace and commas, strips trailing punctuation and drops short
/// tokens. Repeated tokens are kept and score repeatedly.
pub fn interest_tokens(interests: &str) -> Vec<String> {
    interests
        .split(|c: char| c.is_whitespace() || c == ',')
        .map(|token| token.trim_end_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|token| token.chars().count() >= MIN_INTEREST_TOKEN_CHARS)
        .collect()
}

/// Representative age for an age-group label, `None` when the label says nothing usable.
///
/// Numeric labels resolve to the first anchor age inside the stated range, or to the range
/// midpoint when no anchor falls inside. A single number with an open-ended marker ("55+")
/// has no upper bound.
pub fn target_age(age_group: &str) -> Option<u32> {
    let normalized = age_group.trim().to_lowercase();
    let numbers = label_numbers(&normalized);

    if let (Some(low), Some(high)) = (numbers.iter().min(), numbers.iter().max()) {
        let (low, high) = (*low, *high);
        let open = numbers.len() == 1 && is_open_ended(&normalized);
        let inside = |age: &u32| {
            let age = u64::from(*age);
            age >= low && (open || age <= high)
        };

        let anchor = [CHILD_AGE, YOUNG_AGE, ADULT_AGE, SENIOR_AGE].into_iter().find(inside);
        let midpoint = u32::try_from(low + (high - low) / 2).unwrap_or(u32::MAX);
        return Some(anchor.unwrap_or(midpoint));
    }

    let anchors = [
        (["ребен", "ребён", "дет", "child", "kid"].as_slice(), CHILD_AGE),
        (["подрост", "молод", "студент", "teen", "young"].as_slice(), YOUNG_AGE),
        (["взросл", "adult"].as_slice(), ADULT_AGE),
        (["пенс", "пожил", "senior", "elder"].as_slice(), SENIOR_AGE),
    ];

    anchors
        .into_iter()
        .find(|(markers, _)| markers.iter().any(|marker| normalized.contains(marker)))
        .map(|(_, age)| age)
}

/// Numbers in a label; digit groups joined by spaces, NBSP or commas read as one number.
fn label_numbers(label: &str) -> Vec<u64> {
    let chars: Vec<char> = label.chars().collect();
    let mut numbers = Vec::new();
    let mut current: Option<u64> = None;

    for (index, ch) in chars.iter().enumerate() {
        if let Some(digit) = ch.to_digit(10) {
            let value = current.unwrap_or(0).saturating_mul(10).saturating_add(u64::from(digit));
            current = Some(value);
            continue;
        }

        let joins_group = current.is_some()
            && is_group_separator(*ch)
            && chars.get(index + 1).is_some_and(char::is_ascii_digit);
        if joins_group {
            continue;
        }

        if let Some(number) = current.take() {
            numbers.push(number);
        }
    }

    numbers.extend(current);
    numbers
}

fn is_group_separator(ch: char) -> bool {
    matches!(ch, ' ' | '\u{a0}' | '\u{202f}' | ',' | '\'')
}

fn is_open_ended(normalized: &str) -> bool {
    normalized.contains('+')
        || normalized.starts_with("от ")
        || ["более", "больше", "свыше", "over", "from"]
            .iter()
            .any(|marker| normalized.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::{interest_tokens, label_numbers, target_age, AnswerSignals, BudgetCeiling};
    use crate::domain::answers::QuizAnswers;
    use crate::recommendation::{ADULT_AGE, CHILD_AGE, SENIOR_AGE, YOUNG_AGE};

    #[test]
    fn budget_labels_snap_to_breakpoints() {
        assert_eq!(BudgetCeiling::from_label("до 2 000"), BudgetCeiling::Limited(2_000));
        assert_eq!(BudgetCeiling::from_label("2 000 - 5 000"), BudgetCeiling::Limited(5_000));
        assert_eq!(
            BudgetCeiling::from_label("5\u{a0}000 – 10\u{a0}000 ₽"),
            BudgetCeiling::Limited(10_000)
        );
        assert_eq!(BudgetCeiling::from_label("10 000 - 30 000"), BudgetCeiling::Limited(30_000));
        assert_eq!(BudgetCeiling::from_label("4500"), BudgetCeiling::Limited(5_000));
    }

    #[test]
    fn open_ended_and_unparseable_budgets_are_unbounded() {
        assert_eq!(BudgetCeiling::from_label("30 000+"), BudgetCeiling::Unbounded);
        assert_eq!(BudgetCeiling::from_label("от 30 000"), BudgetCeiling::Unbounded);
        assert_eq!(BudgetCeiling::from_label("50 000 - 100 000"), BudgetCeiling::Unbounded);
        assert_eq!(BudgetCeiling::from_label("не важно"), BudgetCeiling::Unbounded);
        assert_eq!(BudgetCeiling::from_label(""), BudgetCeiling::Unbounded);
    }

    #[test]
    fn budget_tolerance_is_twenty_percent() {
        let ceiling = BudgetCeiling::Limited(5_000);
        assert!(ceiling.admits(6_000));
        assert!(!ceiling.admits(6_001));
        assert!(BudgetCeiling::Unbounded.admits(u32::MAX));
    }

    #[test]
    fn label_numbers_do_not_merge_across_dashes() {
        assert_eq!(label_numbers("2 000 - 5 000"), vec![2_000, 5_000]);
        assert_eq!(label_numbers("16-24"), vec![16, 24]);
        assert_eq!(label_numbers("1,500 or 2,000"), vec![1_500, 2_000]);
    }

    #[test]
    fn interests_are_tokenized_and_short_tokens_dropped() {
        assert_eq!(
            interest_tokens("Уют, кофе!  и музыка... IT, спорт"),
            vec!["уют", "кофе", "музыка", "спорт"]
        );
        assert!(interest_tokens("").is_empty());
    }

    #[test]
    fn age_groups_resolve_to_anchors() {
        assert_eq!(target_age("0-12"), Some(CHILD_AGE));
        assert_eq!(target_age("16-24"), Some(YOUNG_AGE));
        assert_eq!(target_age("25-45"), Some(ADULT_AGE));
        assert_eq!(target_age("55+"), Some(SENIOR_AGE));
        assert_eq!(target_age("Пенсионер"), Some(SENIOR_AGE));
        assert_eq!(target_age("Ребёнок"), Some(CHILD_AGE));
        assert_eq!(target_age(""), None);
    }

    #[test]
    fn age_groups_stay_inside_their_own_range() {
        assert_eq!(target_age("13-17"), Some(15));
        assert_eq!(target_age("25-34"), Some(29));
        assert_eq!(target_age("45-54"), Some(49));
        assert_eq!(target_age("35-44"), Some(ADULT_AGE));
        assert_eq!(target_age("70+"), Some(70));
        assert_eq!(target_age("10"), Some(10));
    }

    #[test]
    fn signals_lowercase_relationship() {
        let signals = AnswerSignals::from_answers(&QuizAnswers::new(
            "Анна",
            "16-24",
            "  Мама ",
            "2 000 - 5 000",
            "уют",
        ));

        assert_eq!(signals.relationship, "мама");
        assert_eq!(signals.budget, BudgetCeiling::Limited(5_000));
        assert_eq!(signals.interests, vec!["уют"]);
        assert_eq!(signals.target_age, Some(YOUNG_AGE));
    }
}
