//! Per-view query state: search text, field filter and current page.

use serde::{Deserialize, Deserializer, Serialize};

use crate::listing::FilterField;

/// Query-string shape of a [`QueryState`], e.g.
/// `/activity?search=bali&filter=city&value=Bali&page=2`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ListParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_page",
        skip_serializing_if = "Option::is_none"
    )]
    pub page: Option<usize>,
}

/// Accepts `page=`, `page=abc` and `page=0` as "no page requested".
fn deserialize_page<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|page| *page > 0))
}

/// View-local selections driving what a list screen displays.
///
/// Created fresh for every request from the URL and discarded afterwards.
/// The mutators are pure state transitions and never touch the data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState<F> {
    search_text: String,
    filter_field: F,
    selected_filter: Option<String>,
    page: usize,
}

impl<F: FilterField> Default for QueryState<F> {
    fn default() -> Self {
        Self::new(F::default())
    }
}

impl<F: FilterField> QueryState<F> {
    pub fn new(filter_field: F) -> Self {
        Self {
            search_text: String::new(),
            filter_field,
            selected_filter: None,
            page: 1,
        }
    }

    /// Seeds the state from query parameters.
    ///
    /// Unknown field names fall back to the default field; the page is kept
    /// as requested and clamped once the filtered length is known.
    pub fn from_params(params: &ListParams) -> Self {
        let filter_field = params
            .filter
            .as_deref()
            .and_then(F::parse)
            .unwrap_or_default();

        Self {
            search_text: params.search.clone().unwrap_or_default(),
            filter_field,
            selected_filter: params
                .value
                .clone()
                .filter(|value| !value.is_empty()),
            page: params.page.unwrap_or(1).max(1),
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn filter_field(&self) -> F {
        self.filter_field
    }

    pub fn selected_filter(&self) -> Option<&str> {
        self.selected_filter.as_deref()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Replaces the search text; the dropdown selection and page reset.
    pub fn set_search_text(&mut self, search_text: impl Into<String>) {
        self.search_text = search_text.into();
        self.selected_filter = None;
        self.page = 1;
    }

    /// Selects an exact-match value for the filter field. An empty value
    /// clears the selection. The page is left alone and clamped on render.
    pub fn set_selected_filter(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.selected_filter = (!value.is_empty()).then_some(value);
    }

    /// Switches the field searched and filtered on. The previous dropdown
    /// selection belongs to the old field, so it is dropped with the page.
    pub fn set_filter_field(&mut self, field: F) {
        if self.filter_field != field {
            self.filter_field = field;
            self.selected_filter = None;
            self.page = 1;
        }
    }

    /// Moves to `page`, clamped into `[1, total_pages]`.
    pub fn set_page(&mut self, page: usize, total_pages: usize) {
        self.page = page.clamp(1, total_pages.max(1));
    }

    /// Re-applies the page bounds after the filtered length changed.
    pub fn clamp_page(&mut self, total_pages: usize) {
        self.set_page(self.page, total_pages);
    }

    /// Query-string form, omitting defaults.
    pub fn to_params(&self) -> ListParams {
        let search = Some(self.search_text.clone()).filter(|s| !s.is_empty());
        let filter = (self.filter_field != F::default())
            .then(|| self.filter_field.as_str().to_string());
        ListParams {
            search,
            filter,
            value: self.selected_filter.clone(),
            page: (self.page > 1).then_some(self.page),
        }
    }

    /// Builds a link to `base` carrying this state.
    pub fn href(&self, base: &str) -> String {
        match serde_html_form::to_string(self.to_params()) {
            Ok(query) if query.is_empty() => base.to_string(),
            Ok(query) => format!("{base}?{query}"),
            Err(err) => {
                log::warn!("Failed to encode list query for {base}: {err}");
                base.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    enum Field {
        #[default]
        Title,
        City,
    }

    impl FilterField for Field {
        const ALL: &'static [Self] = &[Field::Title, Field::City];

        fn as_str(self) -> &'static str {
            match self {
                Field::Title => "title",
                Field::City => "city",
            }
        }

        fn label(self) -> &'static str {
            match self {
                Field::Title => "Title",
                Field::City => "City",
            }
        }
    }

    fn seeded() -> QueryState<Field> {
        QueryState::from_params(&ListParams {
            search: Some("ba".into()),
            filter: Some("city".into()),
            value: Some("Bali".into()),
            page: Some(3),
        })
    }

    #[test]
    fn defaults_to_first_page_and_default_field() {
        let state = QueryState::<Field>::default();
        assert_eq!(state.page(), 1);
        assert_eq!(state.filter_field(), Field::Title);
        assert_eq!(state.search_text(), "");
        assert_eq!(state.selected_filter(), None);
    }

    #[test]
    fn seeding_parses_field_and_falls_back_on_unknown() {
        let state = seeded();
        assert_eq!(state.filter_field(), Field::City);
        assert_eq!(state.selected_filter(), Some("Bali"));
        assert_eq!(state.page(), 3);

        let unknown = QueryState::<Field>::from_params(&ListParams {
            filter: Some("price".into()),
            value: Some(String::new()),
            ..ListParams::default()
        });
        assert_eq!(unknown.filter_field(), Field::Title);
        assert_eq!(unknown.selected_filter(), None);
    }

    #[test]
    fn search_change_resets_selection_and_page() {
        let mut state = seeded();
        state.set_search_text("jak");
        assert_eq!(state.search_text(), "jak");
        assert_eq!(state.selected_filter(), None);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn selecting_filter_keeps_page() {
        let mut state = seeded();
        state.set_selected_filter("Jakarta");
        assert_eq!(state.selected_filter(), Some("Jakarta"));
        assert_eq!(state.page(), 3);

        state.set_selected_filter("");
        assert_eq!(state.selected_filter(), None);
    }

    #[test]
    fn field_change_drops_selection() {
        let mut state = seeded();
        state.set_filter_field(Field::City);
        assert_eq!(state.selected_filter(), Some("Bali"));

        state.set_filter_field(Field::Title);
        assert_eq!(state.selected_filter(), None);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn set_page_clamps_into_range() {
        let mut state = QueryState::<Field>::default();
        state.set_page(5, 2);
        assert_eq!(state.page(), 2);
        state.set_page(0, 2);
        assert_eq!(state.page(), 1);
        state.set_page(4, 0);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn href_round_trips_non_default_fields() {
        let state = seeded();
        assert_eq!(
            state.href("/activity"),
            "/activity?search=ba&filter=city&value=Bali&page=3"
        );
        assert_eq!(QueryState::<Field>::default().href("/activity"), "/activity");
    }

    #[test]
    fn malformed_page_is_ignored() {
        let params: ListParams = serde_html_form::from_str("search=x&page=abc").unwrap();
        assert_eq!(params.page, None);
        let params: ListParams = serde_html_form::from_str("page=").unwrap();
        assert_eq!(params.page, None);
        let params: ListParams = serde_html_form::from_str("page=0").unwrap();
        assert_eq!(params.page, None);
    }
}
