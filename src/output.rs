//! The analysis result and its editing helpers.

use crate::config::Language;
use serde::{Deserialize, Serialize};

/// Listing suggestions produced by one analysis.
///
/// Field names match the JSON the model is asked to return, so a validated
/// response deserialises straight into this type. Values are kept exactly as
/// decoded; edits made afterwards belong to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub suggested_category: String,
    pub suggested_condition: String,
    /// Title options in display order.
    pub suggested_titles: Vec<String>,
    pub suggested_description: String,
}

impl AnalysisResult {
    /// Replace the title at `index`. Returns `false` (and changes nothing)
    /// when the index is out of range.
    pub fn set_title(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.suggested_titles.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    pub fn set_category(&mut self, value: impl Into<String>) {
        self.suggested_category = value.into();
    }

    pub fn set_condition(&mut self, value: impl Into<String>) {
        self.suggested_condition = value.into();
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.suggested_description = value.into();
    }

    /// The title used when posting: the first option.
    pub fn primary_title(&self) -> &str {
        self.suggested_titles.first().map(String::as_str).unwrap_or("")
    }

    /// Render the "copy all" block pasted into the sharing app.
    pub fn to_listing_text(&self, language: Language) -> String {
        self.render_listing(language, self.primary_title())
    }

    /// Same block, headed by the title option at `index` instead of the first.
    /// `None` when the index is out of range. The result itself is untouched.
    pub fn to_listing_text_with_title(&self, language: Language, index: usize) -> Option<String> {
        let title = self.suggested_titles.get(index)?;
        Some(self.render_listing(language, title))
    }

    fn render_listing(&self, language: Language, chosen_title: &str) -> String {
        let [title, category, condition, description] = language.listing_labels();
        format!(
            "{title}: {chosen_title}\n{category}: {}\n{condition}: {}\n\n{description}:\n{}",
            self.suggested_category,
            self.suggested_condition,
            self.suggested_description,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AnalysisResult {
        AnalysisResult {
            suggested_category: "Kitchenware".into(),
            suggested_condition: "Gently Used".into(),
            suggested_titles: vec![
                "Rice cooker for your next kain".into(),
                "Reliable 5-cup rice cooker".into(),
                "Pre-loved rice cooker, works great".into(),
            ],
            suggested_description: "A trusty rice cooker. Works well.".into(),
        }
    }

    #[test]
    fn set_title_by_index() {
        let mut r = sample();
        assert!(r.set_title(1, "Compact rice cooker"));
        assert_eq!(r.suggested_titles[1], "Compact rice cooker");
        assert_eq!(r.suggested_titles[0], "Rice cooker for your next kain");
    }

    #[test]
    fn set_title_out_of_range_is_rejected() {
        let mut r = sample();
        let before = r.clone();
        assert!(!r.set_title(3, "nope"));
        assert_eq!(r, before);
    }

    #[test]
    fn listing_text_english() {
        let text = sample().to_listing_text(Language::En);
        assert_eq!(
            text,
            "Title: Rice cooker for your next kain\n\
             Category: Kitchenware\n\
             Condition: Gently Used\n\
             \n\
             Description:\n\
             A trusty rice cooker. Works well."
        );
    }

    #[test]
    fn listing_text_filipino_uses_edited_values() {
        let mut r = sample();
        r.set_title(0, "Rice cooker na maaasahan");
        r.set_condition("Halos Bago");
        let text = r.to_listing_text(Language::Fil);
        assert!(text.starts_with("Pamagat: Rice cooker na maaasahan\n"));
        assert!(text.contains("Kondisyon: Halos Bago"));
        assert!(text.contains("\n\nDeskripsyon:\n"));
    }

    #[test]
    fn listing_with_chosen_title_keeps_title_order() {
        let r = sample();
        let text = r.to_listing_text_with_title(Language::En, 1).unwrap();
        assert!(text.starts_with("Title: Reliable 5-cup rice cooker\n"), "got: {text}");
        assert_eq!(r, sample());

        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["suggested_titles"][0], "Rice cooker for your next kain");
        assert_eq!(json["suggested_titles"][1], "Reliable 5-cup rice cooker");
    }

    #[test]
    fn listing_with_chosen_title_out_of_range() {
        assert_eq!(sample().to_listing_text_with_title(Language::En, 3), None);
        assert_eq!(
            sample().to_listing_text_with_title(Language::Fil, 0),
            Some(sample().to_listing_text(Language::Fil))
        );
    }

    #[test]
    fn serde_uses_wire_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("suggested_titles").is_some());
        assert!(json.get("suggested_description").is_some());
    }
}
