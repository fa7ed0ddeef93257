//! Category label <-> URL slug translation.
//!
//! `CATEGORY_TABLE` is the only place categories are declared. The reverse
//! direction is derived from it when the table is first consulted, so the two
//! lookups cannot drift apart. Unknown inputs fall back to the `other` row
//! instead of failing; use `is_known_label` / `is_known_slug` when a caller
//! needs to reject them.

use crate::error::SlugTableError;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::error;

/// Slug returned for labels that are not in the table.
pub const DEFAULT_SLUG: &str = "other";
/// Label returned for slugs that are not in the table.
pub const DEFAULT_LABEL: &str = "other";

/// Forward table in route order: `(label, slug)`.
pub const CATEGORY_TABLE: &[(&str, &str)] = &[
    ("layout & positioning", "layout"),
    ("box model", "box-model"),
    ("flexbox", "flexbox"),
    ("grid", "grid"),
    ("typography", "typography"),
    ("color & background", "color-background"),
    ("borders & shadows", "borders-shadows"),
    ("transforms", "transforms"),
    ("transitions & animation", "animation"),
    ("visual effects", "effects"),
    ("interaction", "interaction"),
    (DEFAULT_LABEL, DEFAULT_SLUG),
];

#[derive(Debug)]
pub struct SlugTable {
    rows: &'static [(&'static str, &'static str)],
    by_label: BTreeMap<&'static str, &'static str>,
    by_slug: BTreeMap<&'static str, &'static str>,
}

impl SlugTable {
    /// Build a table and check that both directions are one-to-one, every
    /// slug is URL-safe, and the default row is present.
    pub fn new(rows: &'static [(&'static str, &'static str)]) -> Result<Self, SlugTableError> {
        let mut by_label = BTreeMap::new();
        let mut by_slug = BTreeMap::new();
        for &(label, slug) in rows {
            if !is_valid_slug(slug) {
                return Err(SlugTableError::InvalidSlug(slug.to_string()));
            }
            if by_label.insert(label, slug).is_some() {
                return Err(SlugTableError::DuplicateLabel(label.to_string()));
            }
            if by_slug.insert(slug, label).is_some() {
                return Err(SlugTableError::DuplicateSlug(slug.to_string()));
            }
        }
        if by_label.get(DEFAULT_LABEL) != Some(&DEFAULT_SLUG) {
            return Err(SlugTableError::MissingDefault {
                label: DEFAULT_LABEL.to_string(),
                slug: DEFAULT_SLUG.to_string(),
            });
        }
        Ok(Self {
            rows,
            by_label,
            by_slug,
        })
    }

    // Unchecked build, used only when the built-in table fails validation so
    // lookups stay total.
    fn derive(rows: &'static [(&'static str, &'static str)]) -> Self {
        let by_label = rows.iter().copied().collect();
        let by_slug = rows.iter().map(|&(label, slug)| (slug, label)).collect();
        Self {
            rows,
            by_label,
            by_slug,
        }
    }

    pub fn label_to_slug(&self, label: &str) -> &'static str {
        self.by_label.get(label).copied().unwrap_or(DEFAULT_SLUG)
    }

    pub fn slug_to_label(&self, slug: &str) -> &'static str {
        self.by_slug.get(slug).copied().unwrap_or(DEFAULT_LABEL)
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.by_label.contains_key(label)
    }

    pub fn contains_slug(&self, slug: &str) -> bool {
        self.by_slug.contains_key(slug)
    }

    /// Slugs in declared order.
    pub fn slugs(&self) -> Vec<&'static str> {
        self.rows.iter().map(|&(_, slug)| slug).collect()
    }
}

fn builtin() -> &'static SlugTable {
    static TABLE: OnceLock<SlugTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        SlugTable::new(CATEGORY_TABLE).unwrap_or_else(|err| {
            error!(%err, "built-in category table is inconsistent");
            SlugTable::derive(CATEGORY_TABLE)
        })
    })
}

pub fn label_to_slug(label: &str) -> &'static str {
    builtin().label_to_slug(label)
}

pub fn slug_to_label(slug: &str) -> &'static str {
    builtin().slug_to_label(slug)
}

/// Every category slug, in table order, for static route generation.
pub fn all_slugs() -> Vec<&'static str> {
    builtin().slugs()
}

pub fn is_known_label(label: &str) -> bool {
    builtin().contains_label(label)
}

pub fn is_known_slug(slug: &str) -> bool {
    builtin().contains_slug(slug)
}

/// Return `true` when `value` is trimmed, non-empty, and made of lowercase
/// ASCII letters, digits and hyphens.
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value.trim() == value
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}
