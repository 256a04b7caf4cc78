//! Orderings for the `projects` array

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::Error;
use crate::config::ProjectRecord;

/// How [`sort_projects`](super::sort_projects) reorders projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Case-insensitive by package name
    Alphabetically,
    /// By position of the review category in the configured list, then by name
    ReviewCategory,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alphabetically => "alphabetically",
            Self::ReviewCategory => "review-category",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alphabetically" => Ok(Self::Alphabetically),
            "review-category" => Ok(Self::ReviewCategory),
            other => Err(Error::Invalid(format!(
                "unknown sort order \"{other}\" (expected \"alphabetically\" or \"review-category\")"
            ))),
        }
    }
}

/// Case-insensitive comparison of package names.
pub fn compare_alphabetically(a: &ProjectRecord, b: &ProjectRecord) -> Ordering {
    a.package_name
        .to_uppercase()
        .cmp(&b.package_name.to_uppercase())
}

/// Comparator over review categories listed in priority order.
///
/// - a project with a category sorts before one without
/// - projects in the same category (ignoring case) sort by name
/// - otherwise the category listed earlier wins
///
/// A category missing from the list has position -1 and therefore sorts
/// before every listed category. Two unlisted categories tie and fall back
/// to the name.
#[derive(Debug, Clone)]
pub struct ReviewCategoryOrder {
    priorities: Vec<String>,
}

impl ReviewCategoryOrder {
    pub fn new<S: AsRef<str>>(categories: &[S]) -> Self {
        Self {
            priorities: categories
                .iter()
                .map(|c| c.as_ref().to_uppercase())
                .collect(),
        }
    }

    /// Position of `category` in the priority list, or -1.
    pub fn position(&self, category: &str) -> i64 {
        let upper = category.to_uppercase();
        self.priorities
            .iter()
            .position(|c| *c == upper)
            .map_or(-1, |i| i as i64)
    }

    pub fn compare(&self, a: &ProjectRecord, b: &ProjectRecord) -> Ordering {
        match (a.review_category(), b.review_category()) {
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => compare_alphabetically(a, b),
            (Some(cat_a), Some(cat_b)) => {
                if cat_a.to_uppercase() == cat_b.to_uppercase() {
                    return compare_alphabetically(a, b);
                }
                let pos_a = self.position(cat_a);
                let pos_b = self.position(cat_b);
                if pos_a == pos_b {
                    return compare_alphabetically(a, b);
                }
                pos_a.cmp(&pos_b)
            }
        }
    }

    /// A key whose natural order agrees with [`compare`](Self::compare).
    pub fn sort_key(&self, record: &ProjectRecord) -> (bool, i64, String) {
        let position = record
            .review_category()
            .map_or(0, |category| self.position(category));
        (
            record.review_category().is_none(),
            position,
            record.package_name.to_uppercase(),
        )
    }
}

/// Stable in-place sort of project records.
///
/// Keys are computed once per record.
pub fn sort_records(records: &mut [ProjectRecord], order: SortOrder, categories: &[String]) {
    match order {
        SortOrder::Alphabetically => {
            records.sort_by_cached_key(|record| record.package_name.to_uppercase())
        }
        SortOrder::ReviewCategory => {
            let order = ReviewCategoryOrder::new(categories);
            records.sort_by_cached_key(|record| order.sort_key(record));
        }
    }
}
