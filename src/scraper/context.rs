//! Year lookup around a table.
//!
//! Starting at the table, every preceding sibling element is searched
//! (nearest first) for a `20xx` token; with no hit the cursor moves to its
//! parent and repeats. The walk stops after [`MAX_ASCENSIONS`] levels or when
//! the parent is `<body>`, and then yields [`Year::unknown`].

use crate::models::Year;
use crate::scraper::stripped_text;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;
use tracing::info;

pub const MAX_ASCENSIONS: usize = 15;

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(20\d{2})\b").unwrap());

/// Tree navigation needed by the year walk.
pub trait ContextNode: Sized {
    /// Preceding sibling elements, nearest first.
    fn preceding_siblings(&self) -> Vec<Self>;
    fn parent_element(&self) -> Option<Self>;
    fn is_body(&self) -> bool;
    fn context_text(&self) -> String;
}

impl<'a> ContextNode for ElementRef<'a> {
    fn preceding_siblings(&self) -> Vec<Self> {
        self.prev_siblings().filter_map(ElementRef::wrap).collect()
    }

    fn parent_element(&self) -> Option<Self> {
        self.parent().and_then(ElementRef::wrap)
    }

    fn is_body(&self) -> bool {
        self.value().name() == "body"
    }

    fn context_text(&self) -> String {
        stripped_text(*self)
    }
}

pub fn find_year_token(text: &str) -> Option<&str> {
    YEAR_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn resolve_year<N: ContextNode>(table: N) -> Year {
    let mut cursor = Some(table);
    let mut ascensions = 0;

    while let Some(node) = cursor.take() {
        if ascensions >= MAX_ASCENSIONS {
            break;
        }

        for sibling in node.preceding_siblings() {
            if let Some(token) = find_year_token(&sibling.context_text()) {
                return Year::new(token);
            }
        }

        match node.parent_element() {
            Some(parent) if parent.is_body() => break,
            parent => cursor = parent,
        }
        ascensions += 1;
    }

    info!("Year not found in parent tree, using '{}'", Year::UNKNOWN);
    Year::unknown()
}
