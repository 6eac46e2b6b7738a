use crate::dom::{ClassSignature, Document};
use crate::error::{Result, ScraperError};
use url::Url;

/// The "go to company" card on the search results page
pub const DETAIL_CARD: ClassSignature = ClassSignature::new("a", "block no-underline hover:no-underline trademark-card");

/// Build the search URL for a company name
///
/// The name is appended as-is, without percent-encoding; the browser encodes it on navigation.
pub fn search_url(base: &str, company: &str) -> String {
    format!("{}{}", base, company)
}

/// Find the detail link on a search results page
///
/// Returns `None` when the site has no matching company card, or the card carries no `href`.
pub fn resolve_detail_link(search_html: &str) -> Option<String> {
    let doc = Document::parse(search_html);
    let card = doc.find(&DETAIL_CARD)?;
    card.value().attr("href").map(str::to_string)
}

/// Make a detail link absolute relative to the search page it was found on
pub fn absolutize(search_url: &str, href: &str) -> Result<String> {
    let base = Url::parse(search_url)
        .map_err(|e| ScraperError::InvalidUrl { url: search_url.to_string(), reason: e.to_string() })?;
    let joined = base
        .join(href)
        .map_err(|e| ScraperError::InvalidUrl { url: href.to_string(), reason: e.to_string() })?;

    // Host is not enforced, only reported
    if joined.host_str() != base.host_str() {
        log::warn!("Detail link {} points away from search host {:?}", joined, base.host_str());
    }

    Ok(joined.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.indiafilings.com/check-company-name-availability/name?search_text=";

    #[test]
    fn test_search_url_keeps_name_unescaped() {
        assert_eq!(
            search_url(BASE, "Acme Pvt Ltd"),
            "https://www.indiafilings.com/check-company-name-availability/name?search_text=Acme Pvt Ltd"
        );
    }

    #[test]
    fn test_resolve_detail_link_found() {
        let html = r#"<html><body>
            <a class="block no-underline hover:no-underline trademark-card" href="https://www.indiafilings.com/company/acme-pvt-ltd">
                <div>ACME PVT LTD</div>
            </a>
            <a class="block no-underline hover:no-underline trademark-card" href="/company/acme-2">second</a>
        </body></html>"#;

        assert_eq!(
            resolve_detail_link(html),
            Some("https://www.indiafilings.com/company/acme-pvt-ltd".to_string())
        );
    }

    #[test]
    fn test_resolve_detail_link_missing() {
        let html = r#"<html><body><p>No results found</p><a class="block" href="/elsewhere">x</a></body></html>"#;
        assert_eq!(resolve_detail_link(html), None);
    }

    #[test]
    fn test_resolve_detail_link_without_href() {
        let html = r#"<a class="block no-underline hover:no-underline trademark-card">no link</a>"#;
        assert_eq!(resolve_detail_link(html), None);
    }

    #[test]
    fn test_absolutize_relative_link() {
        let search = search_url(BASE, "Acme");
        let url = absolutize(&search, "/company/acme-pvt-ltd").unwrap();
        assert_eq!(url, "https://www.indiafilings.com/company/acme-pvt-ltd");
    }

    #[test]
    fn test_absolutize_keeps_foreign_host() {
        let search = search_url(BASE, "Acme");
        let url = absolutize(&search, "https://mirror.example.org/company/acme").unwrap();
        assert_eq!(url, "https://mirror.example.org/company/acme");
    }

    #[test]
    fn test_absolutize_rejects_bad_base() {
        let err = absolutize("not a url", "/company/acme").unwrap_err();
        assert!(matches!(err, ScraperError::InvalidUrl { .. }));
    }
}
