//! Add-Reading Wizard
//!
//! Finite-state machine behind the multi-step logging form. Steps are
//! linear with no skipping; a step must hold a valid value before the
//! wizard advances past it, and submission is only possible from the
//! review step with every prior step valid.

use chrono::{DateTime, Utc};

use crate::model::{level_in_domain, MealContext, ReadingDraft};

/// Quick note tags offered on the notes step.
pub const QUICK_TAGS: [&str; 6] = [
    "Exercise",
    "Stress",
    "Medication",
    "Sleep",
    "Illness",
    "Travel",
];

/// Ordered steps of the add-reading flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WizardStep {
    MealContext,
    TestTime,
    Level,
    Notes,
    Review,
}

impl WizardStep {
    pub const SEQUENCE: [WizardStep; 5] = [
        WizardStep::MealContext,
        WizardStep::TestTime,
        WizardStep::Level,
        WizardStep::Notes,
        WizardStep::Review,
    ];

    /// 1-based position for the progress indicator.
    pub fn position(self) -> usize {
        Self::SEQUENCE.iter().position(|s| *s == self).unwrap_or(0) + 1
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::MealContext => "When did you take this reading?",
            WizardStep::TestTime => "What time was the test?",
            WizardStep::Level => "What's your glucose level?",
            WizardStep::Notes => "Anything to note?",
            WizardStep::Review => "Review your entry",
        }
    }

    fn next(self) -> Option<Self> {
        let idx = Self::SEQUENCE.iter().position(|s| *s == self)?;
        Self::SEQUENCE.get(idx + 1).copied()
    }

    fn previous(self) -> Option<Self> {
        let idx = Self::SEQUENCE.iter().position(|s| *s == self)?;
        idx.checked_sub(1).and_then(|i| Self::SEQUENCE.get(i)).copied()
    }
}

/// Form state for one pass through the wizard.
#[derive(Clone, Debug, PartialEq)]
pub struct Wizard {
    pub step: WizardStep,
    pub meal_type: Option<MealContext>,
    pub test_time: DateTime<Utc>,
    pub level: Option<f64>,
    pub note: String,
    pub tags: Vec<String>,
}

impl Wizard {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            step: WizardStep::MealContext,
            meal_type: None,
            test_time: now,
            level: None,
            note: String::new(),
            tags: Vec::new(),
        }
    }

    /// Whether the current step holds a valid value.
    pub fn step_valid(&self, now: DateTime<Utc>) -> bool {
        match self.step {
            WizardStep::MealContext => self.meal_type.is_some(),
            WizardStep::TestTime => self.test_time <= now,
            WizardStep::Level => self.level.is_some_and(level_in_domain),
            // Notes are optional; review has no input of its own
            WizardStep::Notes | WizardStep::Review => true,
        }
    }

    /// Move forward one step. Returns `false` when blocked, either by an
    /// invalid current step or because the wizard is already on review.
    pub fn advance(&mut self, now: DateTime<Utc>) -> bool {
        if !self.step_valid(now) {
            return false;
        }
        match self.step.next() {
            Some(next) => {
                self.step = next;
                true
            }
            None => false,
        }
    }

    /// Move back one step; never moves before the first step.
    pub fn back(&mut self) -> bool {
        match self.step.previous() {
            Some(prev) => {
                self.step = prev;
                true
            }
            None => false,
        }
    }

    fn all_valid(&self, now: DateTime<Utc>) -> bool {
        self.meal_type.is_some()
            && self.test_time <= now
            && self.level.is_some_and(level_in_domain)
    }

    /// Submission is enabled only from the review step and only when every
    /// prior step holds a valid value.
    pub fn can_submit(&self, now: DateTime<Utc>) -> bool {
        self.step == WizardStep::Review && self.all_valid(now)
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(idx) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(idx);
        } else {
            self.tags.push(tag.to_string());
        }
    }

    /// Combined note: free text first, then the selected quick tags,
    /// separated by " | ". Empty pieces are dropped.
    pub fn combined_note(&self) -> Option<String> {
        let mut parts: Vec<&str> = Vec::new();
        let trimmed = self.note.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed);
        }
        parts.extend(self.tags.iter().map(String::as_str));
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" | "))
        }
    }

    /// Build the creation payload. Only meaningful once `can_submit` is
    /// true; the level falls back to 0 (which the API client rejects) so
    /// this never panics.
    pub fn draft(&self) -> ReadingDraft {
        ReadingDraft {
            level: self.level.unwrap_or(0.0),
            logged_at: self.test_time,
            meal_type: self.meal_type,
            note: self.combined_note(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn complete_wizard(now: DateTime<Utc>) -> Wizard {
        let mut w = Wizard::new(now);
        w.meal_type = Some(MealContext::BeforeMeal);
        w.level = Some(110.0);
        w
    }

    #[test]
    fn test_linear_forward_path() {
        let now = Utc::now();
        let mut w = complete_wizard(now);

        let mut visited = vec![w.step];
        while w.advance(now) {
            visited.push(w.step);
        }
        assert_eq!(visited, WizardStep::SEQUENCE.to_vec());
        assert_eq!(w.step, WizardStep::Review);
    }

    #[test]
    fn test_cannot_advance_without_meal_context() {
        let now = Utc::now();
        let mut w = Wizard::new(now);
        assert!(!w.advance(now));
        assert_eq!(w.step, WizardStep::MealContext);

        w.meal_type = Some(MealContext::AfterMeal);
        assert!(w.advance(now));
        assert_eq!(w.step, WizardStep::TestTime);
    }

    #[test]
    fn test_future_test_time_blocks_advance() {
        let now = Utc::now();
        let mut w = complete_wizard(now);
        assert!(w.advance(now));

        w.test_time = now + Duration::minutes(5);
        assert!(!w.advance(now));
        assert_eq!(w.step, WizardStep::TestTime);

        // Backdated entries are allowed
        w.test_time = now - Duration::days(3);
        assert!(w.advance(now));
    }

    #[test]
    fn test_level_boundaries_gate_advance() {
        let now = Utc::now();
        let mut w = complete_wizard(now);
        w.advance(now);
        w.advance(now);
        assert_eq!(w.step, WizardStep::Level);

        w.level = Some(9.0);
        assert!(!w.advance(now));

        w.level = Some(10.0);
        assert!(w.advance(now));

        w.back();
        w.level = Some(600.0);
        assert!(w.advance(now));

        w.back();
        w.level = Some(601.0);
        assert!(!w.advance(now));
    }

    #[test]
    fn test_back_stops_at_first_step() {
        let now = Utc::now();
        let mut w = complete_wizard(now);
        assert!(!w.back());
        assert_eq!(w.step, WizardStep::MealContext);

        w.advance(now);
        assert!(w.back());
        assert_eq!(w.step, WizardStep::MealContext);
    }

    #[test]
    fn test_submit_only_from_valid_review() {
        let now = Utc::now();
        let mut w = complete_wizard(now);
        assert!(!w.can_submit(now));

        while w.advance(now) {}
        assert!(w.can_submit(now));

        // Invalidating an earlier step disables submission even on review
        w.level = Some(5.0);
        assert!(!w.can_submit(now));
    }

    #[test]
    fn test_combined_note_joins_tags() {
        let now = Utc::now();
        let mut w = Wizard::new(now);
        assert_eq!(w.combined_note(), None);

        w.note = "Felt dizzy".to_string();
        w.toggle_tag("Exercise");
        w.toggle_tag("Stress");
        assert_eq!(
            w.combined_note().as_deref(),
            Some("Felt dizzy | Exercise | Stress")
        );

        w.toggle_tag("Exercise");
        assert_eq!(w.combined_note().as_deref(), Some("Felt dizzy | Stress"));
    }

    #[test]
    fn test_draft_carries_form_values() {
        let now = Utc::now();
        let mut w = complete_wizard(now);
        w.test_time = now - Duration::hours(2);
        w.note = "post run".to_string();

        let draft = w.draft();
        assert_eq!(draft.level, 110.0);
        assert_eq!(draft.logged_at, now - Duration::hours(2));
        assert_eq!(draft.meal_type, Some(MealContext::BeforeMeal));
        assert_eq!(draft.note.as_deref(), Some("post run"));
    }
}
