//! Filter engine: narrows a record universe by search text and an optional
//! exact-match field selection.

use std::collections::HashSet;

use crate::listing::{FilterField, Filterable, QueryState};

/// Pure filtering over an ordered record universe.
///
/// By default the search text targets the state's filter field. A widened
/// engine ([`FilterEngine::any_of`]) searches several fields instead and a
/// record passes when any of them matches. The dropdown selection always
/// applies to the state's filter field.
#[derive(Debug, Clone, Copy)]
pub struct FilterEngine<F: 'static> {
    widened: &'static [F],
}

impl<F: FilterField> Default for FilterEngine<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FilterField> FilterEngine<F> {
    pub const fn new() -> Self {
        Self { widened: &[] }
    }

    pub const fn any_of(fields: &'static [F]) -> Self {
        Self { widened: fields }
    }

    fn search_fields<'s>(&'s self, field: &'s F) -> &'s [F] {
        if self.widened.is_empty() {
            std::slice::from_ref(field)
        } else {
            self.widened
        }
    }

    /// Records whose searched field contains the trimmed, lower-cased search
    /// text. Blank search text keeps everything. Relative order is preserved.
    pub fn search<'a, R>(&self, records: &'a [R], state: &QueryState<F>) -> Vec<&'a R>
    where
        R: Filterable<Field = F>,
    {
        let needle = state.search_text().trim().to_lowercase();
        if needle.is_empty() {
            return records.iter().collect();
        }

        let filter_field = state.filter_field();
        let fields = self.search_fields(&filter_field);
        let mut missing = 0usize;

        let matched = records
            .iter()
            .filter(|record| {
                fields.iter().any(|field| match record.field_value(*field) {
                    Some(value) => value.to_lowercase().contains(&needle),
                    None => {
                        missing += 1;
                        false
                    }
                })
            })
            .collect();

        if missing > 0 {
            log::warn!(
                "{missing} field value(s) missing while searching {}; treated as empty",
                fields
                    .iter()
                    .map(|field| field.as_str())
                    .collect::<Vec<_>>()
                    .join("/")
            );
        }

        matched
    }

    /// Narrows an already searched sequence to records whose filter field
    /// equals the selected value exactly. No selection keeps everything.
    pub fn narrow<'a, R>(&self, searched: Vec<&'a R>, state: &QueryState<F>) -> Vec<&'a R>
    where
        R: Filterable<Field = F>,
    {
        let Some(selected) = state.selected_filter() else {
            return searched;
        };
        let field = state.filter_field();

        searched
            .into_iter()
            .filter(|record| record.field_value(field).as_deref().unwrap_or("") == selected)
            .collect()
    }

    /// Search followed by the dropdown selection.
    pub fn apply<'a, R>(&self, records: &'a [R], state: &QueryState<F>) -> Vec<&'a R>
    where
        R: Filterable<Field = F>,
    {
        let searched = self.search(records, state);
        self.narrow(searched, state)
    }

    /// Distinct values of `field` across `searched`, in order of first
    /// occurrence.
    ///
    /// Missing values compare as `""` everywhere else, but an empty string
    /// is never offered as a dropdown option: records missing the field or
    /// holding an empty value contribute nothing here.
    pub fn distinct_values<R>(&self, searched: &[&R], field: F) -> Vec<String>
    where
        R: Filterable<Field = F>,
    {
        let mut seen = HashSet::new();
        let mut values = Vec::new();

        for record in searched {
            let Some(value) = record.field_value(field) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            if seen.insert(value.to_string()) {
                values.push(value.into_owned());
            }
        }

        values
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
        Name,
        City,
        Code,
    }

    impl FilterField for Field {
        const ALL: &'static [Self] = &[Field::Name, Field::City, Field::Code];

        fn as_str(self) -> &'static str {
            match self {
                Field::Name => "name",
                Field::City => "city",
                Field::Code => "code",
            }
        }

        fn label(self) -> &'static str {
            self.as_str()
        }
    }

    #[derive(Debug, PartialEq)]
    struct Row {
        name: &'static str,
        city: Option<&'static str>,
        code: &'static str,
    }

    impl Filterable for Row {
        type Field = Field;

        fn field_value(&self, field: Field) -> Option<Cow<'_, str>> {
            match field {
                Field::Name => Some(Cow::Borrowed(self.name)),
                Field::City => self.city.map(Cow::Borrowed),
                Field::Code => Some(Cow::Borrowed(self.code)),
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Snorkeling", city: Some("Bali"), code: "A1" },
            Row { name: "City tour", city: Some("Jakarta"), code: "B2" },
            Row { name: "Temple", city: None, code: "C3" },
            Row { name: "Surf camp", city: Some("Bali"), code: "D4" },
        ]
    }

    fn state(search: &str, filter: &str, value: &str) -> QueryState<Field> {
        QueryState::from_params(&ListParams {
            search: Some(search.to_string()),
            filter: Some(filter.to_string()),
            value: Some(value.to_string()),
            page: None,
        })
    }

    #[test]
    fn blank_search_keeps_everything_in_order() {
        let rows = rows();
        let result = FilterEngine::new().search(&rows, &state("   ", "name", ""));
        assert_eq!(result.len(), rows.len());
        assert_eq!(result[0].name, "Snorkeling");
        assert_eq!(result[3].name, "Surf camp");
    }

    #[test]
    fn missing_field_never_matches_non_empty_search() {
        let rows = rows();
        let result = FilterEngine::new().search(&rows, &state("e", "city", ""));
        let names: Vec<_> = result.iter().map(|r| r.name).collect();
        assert!(!names.contains(&"Temple"));
    }

    #[test]
    fn selection_is_exact_and_case_sensitive() {
        let rows = rows();
        let engine = FilterEngine::new();
        let result = engine.apply(&rows, &state("", "city", "Bali"));
        assert_eq!(result.len(), 2);

        let result = engine.apply(&rows, &state("", "city", "bali"));
        assert!(result.is_empty());
    }

    #[test]
    fn widened_search_matches_any_listed_field() {
        const FIELDS: &[Field] = &[Field::Name, Field::Code];
        let rows = rows();
        let result = FilterEngine::any_of(FIELDS).search(&rows, &state("c3", "city", ""));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Temple");

        let result = FilterEngine::any_of(FIELDS).search(&rows, &state("tour", "city", ""));
        assert_eq!(result[0].name, "City tour");
    }

    #[test]
    fn distinct_values_follow_first_occurrence() {
        let rows = rows();
        let engine = FilterEngine::new();
        let searched = engine.search(&rows, &state("", "city", "Jakarta"));
        let values = engine.distinct_values(&searched, Field::City);
        assert_eq!(values, vec!["Bali".to_string(), "Jakarta".to_string()]);
    }

    #[test]
    fn blank_values_are_not_dropdown_options() {
        let rows = vec![
            Row { name: "Snorkeling", city: Some(""), code: "A1" },
            Row { name: "Temple", city: None, code: "C3" },
            Row { name: "Surf camp", city: Some("Bali"), code: "D4" },
        ];
        let engine = FilterEngine::new();
        let searched = engine.search(&rows, &state("", "city", ""));

        assert_eq!(searched.len(), 3);
        assert_eq!(engine.distinct_values(&searched, Field::City), vec!["Bali".to_string()]);
    }
}
