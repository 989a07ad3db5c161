/// Most attribute constraints any catalog lookup needs
const MAX_ATTRS: usize = 3;

/// Where to find an element: a tag name plus attribute constraints
///
/// A `class` constraint matches when the element's class list contains the
/// value; any other attribute must be equal to the value.
///
/// Locators are plain data and can be built in `const` context:
///
/// ```
/// use handset_harvest::document::Locator;
///
/// const NEXT_PAGE: Locator = Locator::tag("a")
///     .class("prevnextbutton")
///     .attr("title", "Next page");
/// assert_eq!(NEXT_PAGE.attr_value("title"), Some("Next page"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locator {
    tag: &'static str,
    attrs: [Option<(&'static str, &'static str)>; MAX_ATTRS],
}

impl Locator {
    /// Matches any element with this tag
    pub const fn tag(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: [None; MAX_ATTRS],
        }
    }

    /// Matches a `tag` carrying the catalog's `data-spec` marker attribute
    pub const fn marked(tag: &'static str, marker: &'static str) -> Self {
        Self::tag(tag).attr("data-spec", marker)
    }

    /// Adds an attribute constraint
    pub const fn attr(mut self, name: &'static str, value: &'static str) -> Self {
        let mut i = 0;
        while i < MAX_ATTRS {
            if self.attrs[i].is_none() {
                self.attrs[i] = Some((name, value));
                return self;
            }
            i += 1;
        }
        panic!("too many attribute constraints on locator");
    }

    /// Adds a class constraint
    pub const fn class(self, class: &'static str) -> Self {
        self.attr("class", class)
    }

    /// Adds an id constraint
    pub const fn id(self, id: &'static str) -> Self {
        self.attr("id", id)
    }

    pub fn tag_name(&self) -> &'static str {
        self.tag
    }

    /// Value this locator requires for `name`, if it constrains that attribute
    pub fn attr_value(&self, name: &str) -> Option<&'static str> {
        self.attrs
            .iter()
            .flatten()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    /// CSS selector text for this locator
    ///
    /// Classes and ids that are plain identifiers use the `.class` / `#id`
    /// shorthand; everything else becomes a quoted attribute selector.
    ///
    /// ```
    /// use handset_harvest::document::Locator;
    ///
    /// let region = Locator::tag("div").class("section-body").id("review-body");
    /// assert_eq!(region.css(), "div.section-body#review-body");
    /// assert_eq!(Locator::marked("span", "os-hl").css(), r#"span[data-spec="os-hl"]"#);
    /// ```
    pub fn css(&self) -> String {
        let mut css = String::from(self.tag);
        for (name, value) in self.attrs.iter().flatten() {
            match *name {
                "class" if is_identifier(value) => {
                    css.push('.');
                    css.push_str(value);
                }
                "class" => css.push_str(&format!("[class~=\"{}\"]", quote(value))),
                "id" if is_identifier(value) => {
                    css.push('#');
                    css.push_str(value);
                }
                _ => css.push_str(&format!("[{}=\"{}\"]", name, quote(value))),
            }
        }
        css
    }
}

/// Whether `value` can be written bare after `.` or `#`
fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        }
        _ => false,
    }
}

/// Escapes a value for use inside a double-quoted CSS string
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                quoted.push('\\');
                quoted.push(c);
            }
            '\n' => quoted.push_str("\\a "),
            _ => quoted.push(c),
        }
    }
    quoted
}
