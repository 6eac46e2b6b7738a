use indexmap::IndexMap;
use serde::Serialize;

/// Column names of the collapsed roster, in output order
pub const ROSTER_COLUMNS: [&str; 3] = ["DIN/PAN", "Name", "Begin Date"];

/// Separator between per-person values in a roster column
pub const ROSTER_SEPARATOR: &str = ", ";

/// Officer/director entries collected column-wise from the roster table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Roster {
    pub identifiers: Vec<String>,
    pub names: Vec<String>,
    pub begin_dates: Vec<String>,
}

impl Roster {
    pub fn push(&mut self, identifier: String, name: String, begin_date: String) {
        self.identifiers.push(identifier);
        self.names.push(name);
        self.begin_dates.push(begin_date);
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// The three roster columns with their comma-joined values
    pub fn collapsed(&self) -> [(&'static str, String); 3] {
        [
            (ROSTER_COLUMNS[0], self.identifiers.join(ROSTER_SEPARATOR)),
            (ROSTER_COLUMNS[1], self.names.join(ROSTER_SEPARATOR)),
            (ROSTER_COLUMNS[2], self.begin_dates.join(ROSTER_SEPARATOR)),
        ]
    }
}

/// One output row: profile label/value pairs followed by the optional roster columns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompanyRecord {
    /// Labels in first-seen order; a repeated label keeps its position and takes the later value
    pub profile: IndexMap<String, String>,

    /// `None` when the roster table is absent or has no data rows
    pub roster: Option<Roster>,
}

impl CompanyRecord {
    pub fn new(profile: IndexMap<String, String>, roster: Option<Roster>) -> Self {
        // An empty roster is indistinguishable from a missing one in the output
        let roster = roster.filter(|r| !r.is_empty());
        Self { profile, roster }
    }

    /// Flat (column, value) list in output order
    ///
    /// Column names are not deduplicated: a profile label equal to a roster column appears twice.
    pub fn fields(&self) -> Vec<(String, String)> {
        let mut fields: Vec<(String, String)> =
            self.profile.iter().map(|(label, value)| (label.clone(), value.clone())).collect();

        if let Some(roster) = &self.roster {
            fields.extend(roster.collapsed().into_iter().map(|(column, value)| (column.to_string(), value)));
        }

        fields
    }

    pub fn columns(&self) -> Vec<String> {
        self.fields().into_iter().map(|(column, _)| column).collect()
    }

    pub fn values(&self) -> Vec<String> {
        self.fields().into_iter().map(|(_, value)| value).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.profile.is_empty() && self.roster.is_none()
    }
}
