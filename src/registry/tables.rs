use crate::dom::{ClassSignature, Document, descendants_by_tag, text_of};
use crate::registry::record::{CompanyRecord, Roster};
use indexmap::IndexMap;
use scraper::ElementRef;

/// Key/value table with the company's registration attributes
pub const PROFILE_TABLE: ClassSignature =
    ClassSignature::new("table", "card min-w-full table-border align-middle border-collapse text-sm");

/// Officer/director listing
pub const ROSTER_TABLE: ClassSignature =
    ClassSignature::new("table", "table table-row-dashed table-border align-middle fs-6 gy-4 my-0 pb-3");

/// Extract the company record from a detail page
///
/// Missing tables are not errors: an absent profile table yields no profile fields and an absent
/// or empty roster yields no roster columns.
pub fn extract_record(detail_html: &str) -> CompanyRecord {
    let doc = Document::parse(detail_html);

    let profile = doc.find(&PROFILE_TABLE).map(extract_profile).unwrap_or_default();
    let roster = doc.find(&ROSTER_TABLE).map(extract_roster);

    log::debug!(
        "Extracted {} profile fields and {} roster entries",
        profile.len(),
        roster.as_ref().map_or(0, Roster::len)
    );

    CompanyRecord::new(profile, roster)
}

/// Label/value pairs from every row with exactly two cells
pub fn extract_profile(table: ElementRef<'_>) -> IndexMap<String, String> {
    let mut profile = IndexMap::new();

    for row in descendants_by_tag(table, "tr") {
        let cells = row_cells(row);
        if let [label, value] = cells.as_slice() {
            profile.insert(label.clone(), value.clone());
        }
    }

    profile
}

/// Roster entries from every row after the header that has exactly three cells
pub fn extract_roster(table: ElementRef<'_>) -> Roster {
    let mut roster = Roster::default();

    for row in descendants_by_tag(table, "tr").skip(1) {
        let cells = row_cells(row);
        if let [identifier, name, begin_date] = cells.as_slice() {
            roster.push(identifier.clone(), name.clone(), begin_date.clone());
        }
    }

    roster
}

fn row_cells(row: ElementRef<'_>) -> Vec<String> {
    descendants_by_tag(row, "td").map(text_of).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE_HTML: &str = r#"
        <table class="card min-w-full table-border align-middle border-collapse text-sm">
            <tr><td> CIN </td><td> U74999MH2016PTC123456 </td></tr>
            <tr><td>Company Status</td><td>Active</td></tr>
            <tr><td colspan="2">Registration details</td></tr>
            <tr><td>ROC</td><td>RoC-Mumbai</td></tr>
            <tr><td>a</td><td>b</td><td>c</td></tr>
        </table>"#;

    const ROSTER_HTML: &str = r#"
        <table class="table table-row-dashed table-border align-middle fs-6 gy-4 my-0 pb-3">
            <tr><th>DIN/PAN</th><th>Name</th><th>Begin Date</th></tr>
            <tr><td>01234567</td><td> Jane Doe </td><td>01/04/2015</td></tr>
            <tr><td>only</td><td>two</td></tr>
            <tr><td>07654321</td><td>John Roe</td><td>12/09/2019</td></tr>
        </table>"#;

    fn page(body: &str) -> String {
        format!("<html><body>{}</body></html>", body)
    }

    #[test]
    fn test_profile_uses_two_cell_rows_only() {
        let record = extract_record(&page(PROFILE_HTML));

        assert_eq!(record.profile.len(), 3);
        assert_eq!(record.profile["CIN"], "U74999MH2016PTC123456");
        assert_eq!(record.profile["Company Status"], "Active");
        assert_eq!(record.profile["ROC"], "RoC-Mumbai");
        assert!(record.roster.is_none());
    }

    #[test]
    fn test_profile_repeated_label_last_wins() {
        let html = page(
            r#"<table class="card min-w-full table-border align-middle border-collapse text-sm">
                <tr><td>Status</td><td>Strike Off</td></tr>
                <tr><td>CIN</td><td>U1</td></tr>
                <tr><td>Status</td><td>Active</td></tr>
            </table>"#,
        );
        let record = extract_record(&html);

        assert_eq!(record.profile.len(), 2);
        assert_eq!(record.profile["Status"], "Active");
        assert_eq!(record.profile.get_index(0).map(|(k, _)| k.as_str()), Some("Status"));
    }

    #[test]
    fn test_roster_skips_header_and_short_rows() {
        let record = extract_record(&page(ROSTER_HTML));
        let roster = record.roster.expect("roster should be present");

        assert_eq!(roster.identifiers, vec!["01234567", "07654321"]);
        assert_eq!(roster.names, vec!["Jane Doe", "John Roe"]);
        assert_eq!(roster.begin_dates, vec!["01/04/2015", "12/09/2019"]);
    }

    #[test]
    fn test_roster_header_row_skipped_even_with_td_cells() {
        let html = page(
            r#"<table class="table table-row-dashed table-border align-middle fs-6 gy-4 my-0 pb-3">
                <tr><td>DIN/PAN</td><td>Name</td><td>Begin Date</td></tr>
                <tr><td>1</td><td>A</td><td>2020</td></tr>
            </table>"#,
        );
        let roster = extract_record(&html).roster.unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.identifiers, vec!["1"]);
    }

    #[test]
    fn test_roster_with_only_header_is_absent() {
        let html = page(
            r#"<table class="table table-row-dashed table-border align-middle fs-6 gy-4 my-0 pb-3">
                <tr><th>DIN/PAN</th><th>Name</th><th>Begin Date</th></tr>
            </table>"#,
        );
        let record = extract_record(&html);
        assert!(record.roster.is_none());
        assert!(!record.columns().iter().any(|c| c == "DIN/PAN"));
    }

    #[test]
    fn test_both_tables_merge_into_one_row() {
        let record = extract_record(&page(&format!("{}{}", PROFILE_HTML, ROSTER_HTML)));

        assert_eq!(
            record.columns(),
            vec!["CIN", "Company Status", "ROC", "DIN/PAN", "Name", "Begin Date"]
        );
        assert_eq!(record.values()[3], "01234567, 07654321");
    }

    #[test]
    fn test_no_tables_yields_empty_record() {
        let record = extract_record("<html><body><h1>Acme</h1></body></html>");
        assert!(record.is_empty());
    }

    #[test]
    fn test_table_with_different_class_is_ignored() {
        let html = page(r#"<table class="card"><tr><td>CIN</td><td>U1</td></tr></table>"#);
        assert!(extract_record(&html).profile.is_empty());
    }
}
