use crate::error::Result;
use crate::registry::CompanyRecord;
use std::{fs::{File, OpenOptions},
          path::{Path, PathBuf}};

/// How a record's values are laid out under an existing header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnPolicy {
    /// Write values in the record's own order; rows with a different label set misalign
    #[default]
    Positional,

    /// Place values under the header column of the same name; unknown columns are dropped and
    /// missing ones left empty
    Aligned,
}

/// Whether the output table has been started in this run, and with which columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderState {
    columns: Option<Vec<String>>,
}

impl HeaderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_written(&self) -> bool {
        self.columns.is_some()
    }

    pub fn columns(&self) -> Option<&[String]> {
        self.columns.as_deref()
    }
}

/// Appends company records to a CSV file
#[derive(Debug, Clone)]
pub struct RowWriter {
    path: PathBuf,
    policy: ColumnPolicy,
}

impl RowWriter {
    pub fn new(path: impl Into<PathBuf>, policy: ColumnPolicy) -> Self {
        Self { path: path.into(), policy }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist one record
    ///
    /// The first record of a run truncates the file and defines the header; later records are
    /// appended below it. The write is flushed before returning.
    pub fn write(&self, company: &str, record: &CompanyRecord, header: &mut HeaderState) -> Result<()> {
        let fields = record.fields();

        if !header.is_written() {
            let columns: Vec<String> = fields.iter().map(|(column, _)| column.clone()).collect();
            self.start(&columns)?;
            header.columns = Some(columns);

            let row: Vec<String> = fields.into_iter().map(|(_, value)| value).collect();
            return self.append(&row);
        }

        let row = self.layout(company, header.columns().unwrap_or_default(), fields);
        self.append(&row)
    }

    /// Truncate the file and write the header line
    fn start(&self, columns: &[String]) -> Result<()> {
        let file = File::create(&self.path)?;
        let mut writer = csv::WriterBuilder::new().from_writer(file);
        writer.write_record(columns)?;
        writer.flush()?;

        log::info!("Started {} with {} columns", self.path.display(), columns.len());
        Ok(())
    }

    fn append(&self, row: &[String]) -> Result<()> {
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new().from_writer(file);
        writer.write_record(row)?;
        writer.flush()?;
        Ok(())
    }

    fn layout(&self, company: &str, columns: &[String], fields: Vec<(String, String)>) -> Vec<String> {
        let same_shape = fields.len() == columns.len() && fields.iter().zip(columns).all(|((c, _), h)| c == h);
        if same_shape {
            return fields.into_iter().map(|(_, value)| value).collect();
        }

        match self.policy {
            ColumnPolicy::Positional => {
                log::warn!(
                    "Columns for {} differ from the header ({} vs {}); values written positionally may misalign",
                    company,
                    fields.len(),
                    columns.len()
                );
                fields.into_iter().map(|(_, value)| value).collect()
            }
            ColumnPolicy::Aligned => {
                let mut remaining = fields;
                let row = columns
                    .iter()
                    .map(|column| match remaining.iter().position(|(c, _)| c == column) {
                        Some(i) => remaining.remove(i).1,
                        None => String::new(),
                    })
                    .collect();

                if !remaining.is_empty() {
                    let dropped: Vec<&str> = remaining.iter().map(|(c, _)| c.as_str()).collect();
                    log::warn!("Dropping columns not in header for {}: {}", company, dropped.join(", "));
                }

                row
            }
        }
    }
}
