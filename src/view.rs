//! Client-side view model shared by every listing page.
//!
//! Each page owns one [`ListView`] holding the subscription's latest full
//! result set plus the active filters. Re-derivation is synchronous and
//! total: every change to the source list, selected category, or search
//! text recomputes the visible subset from scratch. Lists are personal-site
//! scale (tens of items), so there is no incremental diffing.

/// What a list entry exposes to the generic filter/search machinery.
pub trait CardItem {
    /// Category used for equality filtering and the derived vocabulary.
    fn category(&self) -> Option<&str>;

    /// Tags also satisfy the category filter and the search match.
    fn tags(&self) -> &[String] {
        &[]
    }

    /// Text fields searched by case-insensitive substring match.
    fn search_fields(&self) -> Vec<&str>;
}

// ============================================================================
// List View
// ============================================================================

/// Per-page list state: source items, active filters, derived visible set.
#[derive(Debug, Clone)]
pub struct ListView<T> {
    items: Vec<T>,
    category: Option<String>,
    search: String,
    visible: Vec<usize>,
}

impl<T: CardItem> Default for ListView<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: CardItem> ListView<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            category: None,
            search: String::new(),
            visible: Vec::new(),
        }
    }

    /// Replace the source list (typically from a subscription snapshot).
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.refresh();
    }

    /// Select a category, or `None` to show all.
    pub fn set_category(&mut self, category: Option<&str>) {
        self.category = category.map(str::to_string);
        self.refresh();
    }

    /// Set the search text. Empty or whitespace-only text matches everything.
    pub fn set_search(&mut self, query: &str) {
        self.search = query.to_string();
        self.refresh();
    }

    pub fn clear_filters(&mut self) {
        self.category = None;
        self.search.clear();
        self.refresh();
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// The full source list, unfiltered.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The visible subset in source order.
    pub fn visible(&self) -> impl Iterator<Item = &T> + '_ {
        self.visible.iter().map(|&i| &self.items[i])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Distinct categories observed across the current source list, sorted.
    ///
    /// Items without an explicit category contribute their first tag, so
    /// untagged uncategorized items simply do not appear in the vocabulary.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = self
            .items
            .iter()
            .filter_map(|item| item.category().or_else(|| item.tags().first().map(String::as_str)))
            .collect();
        seen.sort_unstable();
        seen.dedup();
        seen
    }

    fn refresh(&mut self) {
        let query = self.search.trim().to_lowercase();
        let category = self.category.as_deref();
        let visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| category.map_or(true, |c| matches_category(*item, c)))
            .filter(|(_, item)| query.is_empty() || matches_search(*item, &query))
            .map(|(i, _)| i)
            .collect();
        self.visible = visible;
    }
}

/// Equality on the category, or membership in the item's tags.
fn matches_category<T: CardItem>(item: &T, selected: &str) -> bool {
    item.category() == Some(selected) || item.tags().iter().any(|t| t == selected)
}

/// Case-insensitive substring match over searchable fields and tags.
/// `needle` must already be lowercased.
fn matches_search<T: CardItem>(item: &T, needle: &str) -> bool {
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
        || item.tags().iter().any(|t| t.to_lowercase().contains(needle))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Card {
        title: String,
        category: Option<String>,
        tags: Vec<String>,
    }

    fn card(title: &str, category: Option<&str>, tags: &[&str]) -> Card {
        Card {
            title: title.to_string(),
            category: category.map(str::to_string),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    impl CardItem for Card {
        fn category(&self) -> Option<&str> {
            self.category
                .as_deref()
                .or_else(|| self.tags.first().map(String::as_str))
        }

        fn tags(&self) -> &[String] {
            &self.tags
        }

        fn search_fields(&self) -> Vec<&str> {
            vec![&self.title]
        }
    }

    fn titles<'a>(view: &'a ListView<Card>) -> Vec<&'a str> {
        view.visible().map(|c| c.title.as_str()).collect()
    }

    #[test]
    fn test_no_filters_shows_everything_in_order() {
        let mut view = ListView::new();
        view.set_items(vec![
            card("One", Some("a"), &[]),
            card("Two", Some("b"), &[]),
        ]);
        assert_eq!(titles(&view), vec!["One", "Two"]);
    }

    #[test]
    fn test_category_filter_preserves_relative_order() {
        let mut view = ListView::new();
        view.set_items(vec![
            card("First A", Some("a"), &[]),
            card("Second A", Some("a"), &[]),
            card("Only B", Some("b"), &[]),
        ]);

        view.set_category(Some("a"));
        assert_eq!(titles(&view), vec!["First A", "Second A"]);
    }

    #[test]
    fn test_category_with_no_matches_yields_empty_not_error() {
        let mut view = ListView::new();
        view.set_items(vec![card("One", Some("a"), &[])]);

        view.set_category(Some("nope"));
        assert!(view.is_empty());
        assert_eq!(view.visible_len(), 0);
    }

    #[test]
    fn test_tag_membership_satisfies_category_filter() {
        let mut view = ListView::new();
        view.set_items(vec![
            card("Tagged", Some("posts"), &["swimming"]),
            card("Untagged", Some("posts"), &[]),
        ]);

        view.set_category(Some("swimming"));
        assert_eq!(titles(&view), vec!["Tagged"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let mut view = ListView::new();
        view.set_items(vec![
            card("Swim Meet", None, &[]),
            card("Guitar Recital", None, &[]),
        ]);

        view.set_search("swim");
        assert_eq!(titles(&view), vec!["Swim Meet"]);

        view.set_search("MEET");
        assert_eq!(titles(&view), vec!["Swim Meet"]);
    }

    #[test]
    fn test_search_matches_tags() {
        let mut view = ListView::new();
        view.set_items(vec![
            card("Photo", None, &["freestyle"]),
            card("Other", None, &["guitar"]),
        ]);

        view.set_search("FREE");
        assert_eq!(titles(&view), vec!["Photo"]);
    }

    #[test]
    fn test_blank_search_matches_everything() {
        let mut view = ListView::new();
        view.set_items(vec![card("One", None, &[]), card("Two", None, &[])]);

        view.set_search("   ");
        assert_eq!(view.visible_len(), 2);
    }

    #[test]
    fn test_filters_compose() {
        let mut view = ListView::new();
        view.set_items(vec![
            card("Swim Meet", Some("swimming"), &[]),
            card("Swim Gala", Some("swimming"), &[]),
            card("Swim Article", Some("writing"), &[]),
        ]);

        view.set_category(Some("swimming"));
        view.set_search("meet");
        assert_eq!(titles(&view), vec!["Swim Meet"]);

        view.clear_filters();
        assert_eq!(view.visible_len(), 3);
    }

    #[test]
    fn test_categories_vocabulary_sorted_with_first_tag_fallback() {
        let mut view = ListView::new();
        view.set_items(vec![
            card("One", Some("writing"), &[]),
            card("Two", None, &["swimming", "training"]),
            card("Three", Some("writing"), &[]),
            card("Four", None, &[]),
        ]);

        assert_eq!(view.categories(), vec!["swimming", "writing"]);
    }

    #[test]
    fn test_vocabulary_recomputed_on_new_items() {
        let mut view = ListView::new();
        view.set_items(vec![card("One", Some("a"), &[])]);
        assert_eq!(view.categories(), vec!["a"]);

        view.set_items(vec![card("Two", Some("b"), &[])]);
        assert_eq!(view.categories(), vec!["b"]);
    }
}
