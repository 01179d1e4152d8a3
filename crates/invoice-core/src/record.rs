use chrono::{DateTime, Local};

use crate::Profile;

/// One typed cell of an output row.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Number(f64),
    Timestamp(DateTime<Local>),
}

/// One extracted row, positionally aligned with its profile's column
/// list. A field the extractors did not find is `None`; the column is
/// never dropped. Immutable after assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    profile: Profile,
    cells: Vec<Option<CellValue>>,
}

impl Record {
    /// Assemble a record. `cells` must cover every column of `profile`,
    /// in column order.
    pub fn new(profile: Profile, cells: Vec<Option<CellValue>>) -> Self {
        assert_eq!(
            cells.len(),
            profile.columns().len(),
            "record cells must cover the full {:?} schema",
            profile
        );
        Self { profile, cells }
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn cells(&self) -> &[Option<CellValue>] {
        &self.cells
    }

    /// Look a cell up by column name.
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        let idx = self.profile.columns().iter().position(|c| *c == column)?;
        self.cells[idx].as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customs_cells() -> Vec<Option<CellValue>> {
        vec![
            Some(CellValue::Timestamp(Local::now())),
            Some(CellValue::Text("inv.pdf".into())),
            Some(CellValue::Text("13-001".into())),
            Some(CellValue::Number(100.0)),
            None,
            None,
            Some(CellValue::Number(45.0)),
        ]
    }

    #[test]
    fn record_covers_full_schema() {
        let record = Record::new(Profile::Customs, customs_cells());
        assert_eq!(record.cells().len(), Profile::Customs.columns().len());
        assert_eq!(
            record.get("Reference"),
            Some(&CellValue::Text("13-001".into()))
        );
        assert_eq!(record.get("Duties"), None);
        assert_eq!(record.get("NoSuchColumn"), None);
    }

    #[test]
    #[should_panic(expected = "full Customs schema")]
    fn short_cell_list_is_rejected() {
        Record::new(Profile::Customs, vec![None, None]);
    }
}
