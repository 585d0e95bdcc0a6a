use csv::StringRecord;
use std::fmt;
use std::path::PathBuf;

/// In-memory tabular data: ordered column names plus rows of text cells.
///
/// Every stage materializes a full `Table` before handing it on; rows keep
/// their insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<StringRecord>,
}

impl Table {
    /// Builds a table, rejecting rows whose width differs from the header.
    pub fn new(columns: Vec<String>, rows: Vec<StringRecord>) -> crate::Result<Self> {
        if let Some((line, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(crate::EtlError::ProcessingError {
                message: format!(
                    "row {} has {} fields, expected {}",
                    line,
                    row.len(),
                    columns.len()
                ),
            });
        }
        Ok(Self { columns, rows })
    }

    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn push_row<I, S>(&mut self, row: I) -> crate::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let record: StringRecord = row.into_iter().collect();
        if record.len() != self.columns.len() {
            return Err(crate::EtlError::ProcessingError {
                message: format!(
                    "row has {} fields, expected {}",
                    record.len(),
                    self.columns.len()
                ),
            });
        }
        self.rows.push(record);
        Ok(())
    }

    /// Removes the named column from the header and every row.
    /// Returns `false` when the column is not present.
    pub fn drop_column(&mut self, name: &str) -> bool {
        let Some(index) = self.column_index(name) else {
            return false;
        };
        self.columns.remove(index);
        for row in &mut self.rows {
            *row = row
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, field)| field)
                .collect();
        }
        true
    }

    pub fn rename_columns<F>(&mut self, mut rename: F)
    where
        F: FnMut(&str) -> String,
    {
        for column in &mut self.columns {
            *column = rename(column);
        }
    }

    /// Appends rows produced under the same header. Callers check the schema.
    pub fn extend_rows(&mut self, rows: Vec<StringRecord>) {
        self.rows.extend(rows);
    }

    pub fn into_rows(self) -> Vec<StringRecord> {
        self.rows
    }

    /// Header plus the first `n` rows, one line each, for log output.
    pub fn preview(&self, n: usize) -> String {
        let mut lines = Vec::with_capacity(n + 1);
        lines.push(self.columns.join(" | "));
        for row in self.rows.iter().take(n) {
            lines.push(row.iter().collect::<Vec<_>>().join(" | "));
        }
        lines.join("\n")
    }
}

/// Remote datasets mirrored by the fetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Places,
    Categories,
}

impl Dataset {
    /// Download order.
    pub const ALL: [Dataset; 2] = [Dataset::Places, Dataset::Categories];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::Places => "places",
            Dataset::Categories => "categories",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one external sync invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncStatus {
    pub remote: String,
    pub local: PathBuf,
    /// `None` when the process could not be spawned or was killed by a signal.
    pub exit_code: Option<i32>,
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchReport {
    /// The marker file was already present.
    Skipped { marker: PathBuf },
    /// Downloading was turned off in configuration.
    Disabled,
    Synced(Vec<SyncStatus>),
}

impl FetchReport {
    pub fn statuses(&self) -> &[SyncStatus] {
        match self {
            FetchReport::Synced(statuses) => statuses,
            _ => &[],
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &SyncStatus> {
        self.statuses().iter().filter(|s| !s.success)
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }
}
