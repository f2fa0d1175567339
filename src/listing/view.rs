//! Filter + paginate façade used by every list screen.

use serde::Serialize;

use crate::listing::{FieldOption, FilterEngine, FilterField, Filterable, QueryState, field_options};
use crate::pagination::{Paginated, Paginator};

/// One entry of the rendered page-number list. `number == None` is an ellipsis.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageLink {
    pub number: Option<usize>,
    pub href: Option<String>,
    pub current: bool,
}

/// One distinct value offered by the dropdown filter.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub href: String,
    pub selected: bool,
}

/// Everything a template needs to draw a filtered, paginated list.
#[derive(Debug, Clone, Serialize)]
pub struct ListPage<T> {
    #[serde(flatten)]
    pub paginated: Paginated<T>,
    pub total_matches: usize,
    pub show_controls: bool,
    pub links: Vec<PageLink>,
    pub previous_href: Option<String>,
    pub next_href: Option<String>,
    pub search: String,
    pub filter: &'static str,
    pub value: Option<String>,
    pub fields: Vec<FieldOption>,
    pub filter_options: Vec<FilterOption>,
    pub clear_filter_href: String,
}

impl<T> ListPage<T> {
    pub fn items(&self) -> &[T] {
        &self.paginated.items
    }

    pub fn page(&self) -> usize {
        self.paginated.page
    }

    pub fn total_pages(&self) -> usize {
        self.paginated.total_pages
    }
}

/// A [`FilterEngine`] paired with the [`Paginator`] of one screen.
#[derive(Debug, Clone, Copy)]
pub struct ListView<F: 'static> {
    engine: FilterEngine<F>,
    paginator: Paginator,
}

impl<F: FilterField> ListView<F> {
    pub const fn new(page_size: usize) -> Self {
        Self {
            engine: FilterEngine::new(),
            paginator: Paginator::new(page_size),
        }
    }

    /// Search text matches any of `fields`; the dropdown still targets the
    /// state's filter field.
    pub const fn widened(page_size: usize, fields: &'static [F]) -> Self {
        Self {
            engine: FilterEngine::any_of(fields),
            paginator: Paginator::new(page_size),
        }
    }

    pub fn engine(&self) -> &FilterEngine<F> {
        &self.engine
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    /// Runs search, distinct-value extraction, the dropdown selection and
    /// pagination over `records`. The page in `state` is clamped to the
    /// filtered result; `records` itself is never modified.
    pub fn render<R>(&self, records: &[R], state: &mut QueryState<F>, base: &str) -> ListPage<R>
    where
        R: Filterable<Field = F> + Clone,
    {
        let searched = self.engine.search(records, state);
        let distinct = self.engine.distinct_values(&searched, state.filter_field());
        let filtered = self.engine.narrow(searched, state);

        let total_matches = filtered.len();
        let total_pages = self.paginator.total_pages(total_matches);
        state.clamp_page(total_pages);

        let items = self
            .paginator
            .page_slice(&filtered, state.page())
            .iter()
            .map(|record| (*record).clone())
            .collect();

        let paginated = Paginated::new(items, state.page(), total_pages, total_matches);

        let page_href = |page: usize| {
            let mut target = state.clone();
            target.set_page(page, total_pages);
            target.href(base)
        };

        let links = paginated
            .pages
            .iter()
            .map(|number| PageLink {
                number: *number,
                href: number.map(&page_href),
                current: *number == Some(paginated.page),
            })
            .collect();

        let previous_href = paginated
            .has_previous
            .then(|| page_href(paginated.page - 1));
        let next_href = paginated.has_next.then(|| page_href(paginated.page + 1));

        let filter_options = distinct
            .into_iter()
            .map(|value| {
                let mut target = state.clone();
                target.set_selected_filter(value.clone());
                FilterOption {
                    selected: state.selected_filter() == Some(value.as_str()),
                    href: target.href(base),
                    value,
                }
            })
            .collect();

        let mut cleared = state.clone();
        cleared.set_selected_filter("");

        ListPage {
            show_controls: paginated.show_controls(),
            paginated,
            total_matches,
            links,
            previous_href,
            next_href,
            search: state.search_text().to_string(),
            filter: state.filter_field().as_str(),
            value: state.selected_filter().map(str::to_string),
            fields: field_options(state.filter_field()),
            filter_options,
            clear_filter_href: cleared.href(base),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;
    use crate::listing::ListParams;

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

    #[derive(Debug, Clone, PartialEq)]
    struct Trip {
        title: String,
        city: String,
    }

    impl Filterable for Trip {
        type Field = Field;

        fn field_value(&self, field: Field) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(match field {
                Field::Title => self.title.as_str(),
                Field::City => self.city.as_str(),
            }))
        }
    }

    fn trips(n: usize) -> Vec<Trip> {
        (1..=n)
            .map(|i| Trip {
                title: format!("Trip {i}"),
                city: if i % 2 == 0 { "Bali" } else { "Jakarta" }.to_string(),
            })
            .collect()
    }

    fn state(query: &str) -> QueryState<Field> {
        let params: ListParams = serde_html_form::from_str(query).unwrap();
        QueryState::from_params(&params)
    }

    #[test]
    fn out_of_range_page_is_clamped() {
        let records = trips(7);
        let mut state = state("page=5");
        let page = ListView::new(6).render(&records, &mut state, "/activity");

        assert_eq!(state.page(), 2);
        assert_eq!(page.page(), 2);
        assert_eq!(page.items().len(), 1);
        assert_eq!(page.items()[0].title, "Trip 7");
        assert!(page.next_href.is_none());
        assert_eq!(page.previous_href.as_deref(), Some("/activity"));
    }

    #[test]
    fn options_and_links_carry_state() {
        let records = trips(4);
        let mut state = state("search=a&filter=city&value=Bali");
        let page = ListView::new(6).render(&records, &mut state, "/activity");

        assert_eq!(page.total_matches, 2);
        let values: Vec<_> = page.filter_options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["Jakarta", "Bali"]);
        assert!(page.filter_options[1].selected);
        assert_eq!(
            page.filter_options[0].href,
            "/activity?search=a&filter=city&value=Jakarta"
        );
        assert_eq!(page.clear_filter_href, "/activity?search=a&filter=city");
        assert_eq!(page.filter, "city");
        assert!(page.fields.iter().any(|f| f.value == "city" && f.selected));
    }

    #[test]
    fn empty_universe_hides_controls() {
        let mut state = state("");
        let page = ListView::<Field>::new(6).render(&Vec::<Trip>::new(), &mut state, "/x");

        assert_eq!(page.total_pages(), 0);
        assert!(!page.show_controls);
        assert!(page.links.is_empty());
        assert!(page.items().is_empty());
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn page_links_mark_current_page() {
        let records = trips(30);
        let mut state = state("page=2");
        let page = ListView::new(6).render(&records, &mut state, "/x");

        let current: Vec<_> = page.links.iter().filter(|l| l.current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].number, Some(2));
        assert_eq!(page.links[0].href.as_deref(), Some("/x"));
        assert_eq!(page.next_href.as_deref(), Some("/x?page=3"));
    }
}
