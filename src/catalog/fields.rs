//! Declarative field mapping and its interpreter
//!
//! Each optional field of a detail-page record is described once, as a
//! [`Field`]: its column name, where its value lives ([`Source`]), and
//! accessors into the record. [`apply`] evaluates a whole table against a
//! page region. A field whose source is missing is left `None`; its siblings
//! are unaffected.

use crate::document::{Locator, Node};

/// Words the catalog uses to describe camera module counts
pub const CAMERA_LAYOUTS: &[&str] = &["Single", "Dual", "Triple", "Quad"];

/// How to read one field out of a page region
#[derive(Debug, Clone, Copy)]
pub enum Source {
    /// Text of the first element matching the locator
    Text(Locator),

    /// Text of the nearest following sibling (with the given tag) of the
    /// element matching the locator, e.g. the unit next to a value
    SiblingText(Locator, &'static str),

    /// Text of the first glossary anchor (the locator) whose visible text names
    /// a camera layout
    CameraLayout(Locator),
}

impl Source {
    /// `<tag data-spec="marker">` text
    pub const fn marked(tag: &'static str, marker: &'static str) -> Self {
        Self::Text(Locator::marked(tag, marker))
    }

    /// Following `<span>` of `<span data-spec="marker">`
    pub const fn unit_of(marker: &'static str) -> Self {
        Self::SiblingText(Locator::marked("span", marker), "span")
    }

    /// `<a href="glossary.php3?term=...">` naming a camera layout
    pub const fn camera_layout(glossary_href: &'static str) -> Self {
        Self::CameraLayout(Locator::tag("a").attr("href", glossary_href))
    }

    /// The element whose presence decides this field
    pub fn locator(&self) -> &Locator {
        match self {
            Self::Text(locator) | Self::SiblingText(locator, _) | Self::CameraLayout(locator) => {
                locator
            }
        }
    }
}

/// One table-driven field of record type `R`
pub struct Field<R> {
    /// Column name
    pub name: &'static str,
    pub source: Source,
    pub get: fn(&R) -> &Option<String>,
    pub set: fn(&mut R) -> &mut Option<String>,
}

impl<R> std::fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("source", &self.source)
            .finish()
    }
}

/// Declares a [`Field`] whose column name is the record's field name
macro_rules! field {
    ($name:ident, $source:expr) => {
        $crate::catalog::fields::Field {
            name: stringify!($name),
            source: $source,
            get: |record| &record.$name,
            set: |record| &mut record.$name,
        }
    };
}

pub(crate) use field;

/// Reads the value described by `source` below `scope`
pub fn evaluate<N: Node>(scope: &N, source: &Source) -> Option<String> {
    match source {
        Source::Text(locator) => scope.find(locator).map(|node| node.text()),
        Source::SiblingText(locator, tag) => scope
            .find(locator)?
            .find_next_sibling(tag)
            .map(|node| node.text()),
        Source::CameraLayout(locator) => scope
            .find_where(locator, |node| {
                let text = node.text();
                CAMERA_LAYOUTS.iter().any(|layout| text.contains(layout))
            })
            .map(|node| node.text()),
    }
}

/// Fills every field of `table` on `record` from `scope`
///
/// Returns how many fields were found.
pub fn apply<R, N: Node>(record: &mut R, scope: &N, table: &[Field<R>]) -> usize {
    let mut found = 0;
    for field in table {
        let value = evaluate(scope, &field.source);
        if value.is_some() {
            found += 1;
        }
        *(field.set)(record) = value;
    }
    found
}
