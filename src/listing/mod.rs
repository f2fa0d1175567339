//! Client-side list filtering shared by every catalog and dashboard screen.
//!
//! A screen fetches its whole record universe once, then narrows it with a
//! [`FilterEngine`] driven by a per-request [`QueryState`], and slices the
//! result with a [`crate::pagination::Paginator`]. [`ListView`] bundles the
//! three steps.

use std::borrow::Cow;

use serde::Serialize;

pub mod filter;
pub mod query;
pub mod view;

pub use filter::FilterEngine;
pub use query::{ListParams, QueryState};
pub use view::{ListPage, ListView};

/// A closed set of record fields a screen can search or filter on.
///
/// Implemented by small `Copy` enums; the string form is what appears in the
/// `filter` query parameter.
pub trait FilterField: Copy + Eq + Default + Send + Sync + 'static {
    /// Every variant, in the order offered to the user.
    const ALL: &'static [Self];

    /// Query-string name of the field.
    fn as_str(self) -> &'static str;

    /// Human readable label used by templates.
    fn label(self) -> &'static str;

    /// Parses a query-string name, returning `None` for unknown names.
    fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.as_str().eq_ignore_ascii_case(value))
    }
}

/// Records that expose named fields to the filter engine.
pub trait Filterable {
    type Field: FilterField;

    /// Returns the value of `field`, or `None` when the record lacks it.
    fn field_value(&self, field: Self::Field) -> Option<Cow<'_, str>>;
}

impl<T: Filterable + ?Sized> Filterable for &T {
    type Field = T::Field;

    fn field_value(&self, field: Self::Field) -> Option<Cow<'_, str>> {
        (**self).field_value(field)
    }
}

/// Option entry describing one searchable field for select boxes.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Lists every field of `F`, marking `current` as selected.
pub fn field_options<F: FilterField>(current: F) -> Vec<FieldOption> {
    F::ALL
        .iter()
        .map(|field| FieldOption {
            value: field.as_str(),
            label: field.label(),
            selected: *field == current,
        })
        .collect()
}

/// A fetched record universe as handed to a screen.
///
/// A failed fetch yields an empty universe plus a user-facing message so the
/// filter and pagination steps still run with `n = 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub data: Vec<T>,
    pub error: Option<String>,
}

impl<T> Fetched<T> {
    pub fn ok(data: Vec<T>) -> Self {
        Self { data, error: None }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            data: Vec::new(),
            error: Some(message.into()),
        }
    }

    /// Converts a fetch result, logging and flattening the error.
    pub fn from_result<E: std::fmt::Display>(result: Result<Vec<T>, E>, what: &str) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => {
                log::error!("Failed to fetch {what}: {err}");
                Self::failed(format!("Failed to load {what}."))
            }
        }
    }
}

impl<T> Default for Fetched<T> {
    fn default() -> Self {
        Self::ok(Vec::new())
    }
}
