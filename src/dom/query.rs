use scraper::{ElementRef, Html, node::Element};

/// Identifies an element by tag name and its exact `class` attribute
///
/// The class string is compared as a whole (token order matters) after collapsing whitespace,
/// so `"card  table"` matches the signature `"card table"` but `"table card"` does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassSignature {
    pub tag: &'static str,
    pub class: &'static str,
}

impl ClassSignature {
    pub const fn new(tag: &'static str, class: &'static str) -> Self {
        Self { tag, class }
    }

    /// Check whether an element carries this signature
    pub fn matches(&self, element: &Element) -> bool {
        if !element.name().eq_ignore_ascii_case(self.tag) {
            return false;
        }

        match element.attr("class") {
            Some(class) => class.split_whitespace().eq(self.class.split_whitespace()),
            None => false,
        }
    }
}

/// Parsed HTML document
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse a full HTML document; malformed markup is repaired rather than rejected
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// First element in document order carrying `signature`
    pub fn find(&self, signature: &ClassSignature) -> Option<ElementRef<'_>> {
        self.elements().find(|el| signature.matches(el.value()))
    }

    /// All elements carrying `signature`, in document order
    pub fn find_all(&self, signature: &ClassSignature) -> Vec<ElementRef<'_>> {
        self.elements().filter(|el| signature.matches(el.value())).collect()
    }

    fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.html.tree.root().descendants().filter_map(ElementRef::wrap)
    }
}

/// Descendant elements of `parent` with the given tag name, excluding `parent` itself
pub fn descendants_by_tag<'a>(parent: ElementRef<'a>, tag: &'a str) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    parent
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(move |el| el.value().name().eq_ignore_ascii_case(tag))
}

/// All text beneath an element, trimmed
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
