//! CSV import service
//!
//! Reads expense rows with the header `date,payer,amount,category[,memo]`.
//! Columns are located by header name, so their order does not matter. A row
//! that fails to parse is reported with its line number and skipped; the rest
//! of the file is still imported.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::config::Settings;
use crate::error::{KakeiboError, KakeiboResult};
use crate::models::{Amount, ExpenseRecord};
use crate::services::expense::{CreateExpenseInput, ExpenseService};
use crate::storage::Storage;

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub date: usize,
    pub payer: usize,
    pub amount: usize,
    pub category: usize,
    pub memo: Option<usize>,
}

impl ColumnMapping {
    /// Locate the required columns in a header row (case-insensitive)
    pub fn from_headers(headers: &StringRecord) -> KakeiboResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let require = |name: &str| {
            find(name).ok_or_else(|| {
                KakeiboError::Import(format!("CSV header is missing the '{}' column", name))
            })
        };

        Ok(Self {
            date: require("date")?,
            payer: require("payer")?,
            amount: require("amount")?,
            category: require("category")?,
            memo: find("memo"),
        })
    }
}

/// Outcome of an import run
#[derive(Debug, Default)]
pub struct ImportResult {
    /// Records written to the store
    pub imported: Vec<ExpenseRecord>,
    /// Rows that were skipped, as `InvalidRecord` errors
    pub errors: Vec<KakeiboError>,
}

impl ImportResult {
    /// Number of skipped rows
    pub fn skipped(&self) -> usize {
        self.errors.len()
    }
}

/// Service for CSV import
pub struct ImportService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Parse CSV rows into validated records without storing them
    ///
    /// Line numbers count the header as line 1.
    pub fn parse<R: Read>(&self, input: R) -> KakeiboResult<Vec<KakeiboResult<ExpenseRecord>>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(input);

        let mapping = ColumnMapping::from_headers(reader.headers()?)?;
        let expenses = ExpenseService::new(self.storage, self.settings);

        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            // Quoted fields can span lines
            let fallback = idx + 2;
            let row = result
                .map_err(|e| KakeiboError::InvalidRecord {
                    line: e.position().map_or(fallback, |p| p.line() as usize),
                    reason: e.to_string(),
                })
                .and_then(|record| {
                    let line = record.position().map_or(fallback, |p| p.line() as usize);
                    parse_row(&record, &mapping, line).map(|input| (line, input))
                })
                .and_then(|(line, input)| {
                    expenses
                        .prepare(input)
                        .map_err(|e| KakeiboError::InvalidRecord {
                            line,
                            reason: e.to_string(),
                        })
                });
            rows.push(row);
        }
        Ok(rows)
    }

    /// Import every valid row from a reader
    pub fn import_from_reader<R: Read>(&self, input: R) -> KakeiboResult<ImportResult> {
        let mut result = ImportResult::default();
        for row in self.parse(input)? {
            match row {
                Ok(record) => result.imported.push(record),
                Err(e) => {
                    log::warn!("Skipping row: {}", e);
                    result.errors.push(e);
                }
            }
        }

        if !result.imported.is_empty() {
            ExpenseService::new(self.storage, self.settings)
                .create_many(result.imported.clone())?;
        }

        log::info!(
            "Imported {} expenses, skipped {} rows",
            result.imported.len(),
            result.skipped()
        );
        Ok(result)
    }

    /// Import every valid row from a CSV file
    pub fn import_file(&self, path: &Path) -> KakeiboResult<ImportResult> {
        let file = std::fs::File::open(path).map_err(|e| {
            KakeiboError::Import(format!("Cannot open {}: {}", path.display(), e))
        })?;
        self.import_from_reader(file)
    }
}

fn parse_row(
    record: &StringRecord,
    mapping: &ColumnMapping,
    line: usize,
) -> KakeiboResult<CreateExpenseInput> {
    let invalid = |reason: String| KakeiboError::InvalidRecord { line, reason };
    let field = |idx: usize, name: &str| {
        record
            .get(idx)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| invalid(format!("missing {}", name)))
    };

    let date_str = field(mapping.date, "date")?;
    let date = ExpenseRecord::parse_date(date_str)
        .map_err(|_| invalid(format!("invalid date '{}'", date_str)))?;

    let amount_str = field(mapping.amount, "amount")?;
    let amount = Amount::parse(amount_str)
        .map_err(|e| invalid(format!("invalid amount '{}': {}", amount_str, e)))?;

    Ok(CreateExpenseInput {
        date,
        payer: field(mapping.payer, "payer")?.to_string(),
        amount,
        category: field(mapping.category, "category")?.to_string(),
        memo: mapping
            .memo
            .and_then(|idx| record.get(idx))
            .map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::KakeiboPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage, Settings) {
        let temp_dir = TempDir::new().unwrap();
        let paths = KakeiboPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let mut settings = Settings::default();
        settings.participants = vec!["A".into(), "B".into(), "C".into()];
        (temp_dir, storage, settings)
    }

    #[test]
    fn test_detect_mapping_any_order() {
        let headers = StringRecord::from(vec!["Amount", "Category", "Date", "Payer", "Memo"]);
        let mapping = ColumnMapping::from_headers(&headers).unwrap();

        assert_eq!(mapping.date, 2);
        assert_eq!(mapping.payer, 3);
        assert_eq!(mapping.amount, 0);
        assert_eq!(mapping.category, 1);
        assert_eq!(mapping.memo, Some(4));
    }

    #[test]
    fn test_missing_column_is_import_error() {
        let (_temp_dir, storage, settings) = create_test_storage();
        let service = ImportService::new(&storage, &settings);

        let err = service
            .import_from_reader("date,payer,amount\n2024-03-01,A,100\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, KakeiboError::Import(_)));
    }

    #[test]
    fn test_import_valid_rows() {
        let (_temp_dir, storage, settings) = create_test_storage();
        let service = ImportService::new(&storage, &settings);

        let csv = "date,payer,amount,category,memo\n\
                   2024-03-01,A,1200,Food,groceries\n\
                   2024-03-02,B,\"1,500\",Utilities,\n";
        let result = service.import_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(result.imported.len(), 2);
        assert_eq!(result.skipped(), 0);
        assert_eq!(storage.expenses.count().unwrap(), 2);
        assert_eq!(result.imported[0].memo, "groceries");
        assert_eq!(result.imported[1].amount, Amount::new(1500.0));
    }

    #[test]
    fn test_bad_rows_are_skipped_with_line_numbers() {
        let (_temp_dir, storage, settings) = create_test_storage();
        let service = ImportService::new(&storage, &settings);

        let csv = "date,payer,amount,category\n\
                   2024-02-30,A,100,Food\n\
                   2024-03-01,Dave,100,Food\n\
                   2024-03-01,A,abc,Food\n\
                   2024-03-02,C,300,Household\n";
        let result = service.import_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(result.imported.len(), 1);
        assert_eq!(storage.expenses.count().unwrap(), 1);

        let lines: Vec<usize> = result
            .errors
            .iter()
            .map(|e| match e {
                KakeiboError::InvalidRecord { line, .. } => *line,
                other => panic!("unexpected error {other:?}"),
            })
            .collect();
        assert_eq!(lines, vec![2, 3, 4]);
        assert!(result.errors[0].to_string().contains("2024-02-30"));
    }

    #[test]
    fn test_line_numbers_follow_multiline_memos() {
        let (_temp_dir, storage, settings) = create_test_storage();
        let service = ImportService::new(&storage, &settings);

        let csv = "date,payer,amount,category,memo\n\
                   2024-03-01,A,100,Food,\"two\nlines\"\n\
                   2024-03-02,Dave,100,Food,\n";
        let result = service.import_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(result.imported.len(), 1);
        assert_eq!(result.imported[0].memo, "two\nlines");
        assert!(matches!(
            result.errors.as_slice(),
            [KakeiboError::InvalidRecord { line: 4, .. }]
        ));
    }

    #[test]
    fn test_all_rows_invalid_writes_nothing() {
        let (_temp_dir, storage, settings) = create_test_storage();
        let service = ImportService::new(&storage, &settings);

        let result = service
            .import_from_reader("date,payer,amount,category\nnope,A,1,Food\n".as_bytes())
            .unwrap();
        assert!(result.imported.is_empty());
        assert!(!storage.paths().expenses_file().exists());
    }
}
