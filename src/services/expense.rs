//! Expense service
//!
//! CRUD over the record store, checking payers and categories against the
//! configured participants and categories before anything is persisted.

use chrono::NaiveDate;

use crate::config::Settings;
use crate::error::{KakeiboError, KakeiboResult};
use crate::models::{Amount, ExpenseId, ExpenseRecord, Period};
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

/// Options for filtering expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Only expenses inside this period
    pub period: Option<Period>,
    /// Only expenses paid by this participant
    pub payer: Option<String>,
    /// Only expenses in this category
    pub category: Option<String>,
    /// Maximum number of expenses to return
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by period
    pub fn period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    /// Filter by payer
    pub fn payer(mut self, payer: impl Into<String>) -> Self {
        self.payer = Some(payer.into());
        self
    }

    /// Filter by category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Input for creating a new expense
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub date: NaiveDate,
    pub payer: String,
    pub amount: Amount,
    pub category: String,
    pub memo: Option<String>,
}

/// Fields to change on an existing expense; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct UpdateExpenseInput {
    pub date: Option<NaiveDate>,
    pub payer: Option<String>,
    pub amount: Option<Amount>,
    pub category: Option<String>,
    pub memo: Option<String>,
}

impl UpdateExpenseInput {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.payer.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.memo.is_none()
    }
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    fn check_payer(&self, payer: &str) -> KakeiboResult<()> {
        if self.settings.participants.iter().any(|p| p == payer) {
            Ok(())
        } else {
            Err(KakeiboError::Validation(format!(
                "Unknown payer '{}'. Configured participants: {}",
                payer,
                self.settings.participants.join(", ")
            )))
        }
    }

    fn check_category(&self, category: &str) -> KakeiboResult<()> {
        if self.settings.has_category(category) {
            Ok(())
        } else {
            Err(KakeiboError::Validation(format!(
                "Unknown category '{}'. Configured categories: {}",
                category,
                self.settings.categories.join(", ")
            )))
        }
    }

    /// Build a validated record without persisting it
    pub fn prepare(&self, input: CreateExpenseInput) -> KakeiboResult<ExpenseRecord> {
        let payer = input.payer.trim().to_string();
        let category = input.category.trim().to_string();
        self.check_payer(&payer)?;
        self.check_category(&category)?;

        let mut record = ExpenseRecord::new(input.date, payer, input.amount, category);
        if let Some(memo) = input.memo {
            record.memo = memo.trim().to_string();
        }
        Ok(record)
    }

    /// Create and persist a new expense
    pub fn create(&self, input: CreateExpenseInput) -> KakeiboResult<ExpenseRecord> {
        let record = self.prepare(input)?;

        self.storage.expenses.upsert(record.clone())?;
        self.storage.expenses.save()?;

        log::info!("Recorded expense {}: {}", record.id, record);
        Ok(record)
    }

    /// Persist a batch of already validated records with a single write
    pub fn create_many(&self, records: Vec<ExpenseRecord>) -> KakeiboResult<usize> {
        let count = records.len();
        for record in records {
            self.storage.expenses.upsert(record)?;
        }
        self.storage.expenses.save()?;

        log::info!("Recorded {} expenses", count);
        Ok(count)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> KakeiboResult<Option<ExpenseRecord>> {
        self.storage.expenses.get(id)
    }

    /// Find an expense by full or short ID
    pub fn find(&self, identifier: &str) -> KakeiboResult<Option<ExpenseRecord>> {
        self.storage.expenses.find(identifier)
    }

    /// Find an expense or fail with "not found"
    pub fn require(&self, identifier: &str) -> KakeiboResult<ExpenseRecord> {
        self.find(identifier)?
            .ok_or_else(|| KakeiboError::expense_not_found(identifier))
    }

    /// Full snapshot of every stored expense, newest first
    pub fn snapshot(&self) -> KakeiboResult<Vec<ExpenseRecord>> {
        self.storage.expenses.get_all()
    }

    /// List expenses with optional filtering, newest first
    pub fn list(&self, filter: ExpenseFilter) -> KakeiboResult<Vec<ExpenseRecord>> {
        let mut expenses = match filter.period {
            Some(period) => self
                .storage
                .expenses
                .get_by_date_range(period.start, period.end)?,
            None => self.storage.expenses.get_all()?,
        };

        if let Some(payer) = &filter.payer {
            expenses.retain(|e| &e.payer == payer);
        }
        if let Some(category) = &filter.category {
            expenses.retain(|e| &e.category == category);
        }
        if let Some(limit) = filter.limit {
            expenses.truncate(limit);
        }

        Ok(expenses)
    }

    /// Update an expense
    pub fn update(&self, id: ExpenseId, input: UpdateExpenseInput) -> KakeiboResult<ExpenseRecord> {
        let mut record = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| KakeiboError::expense_not_found(id.to_string()))?;

        if input.is_empty() {
            return Err(KakeiboError::Validation("Nothing to update".into()));
        }

        let mut changes = Vec::new();

        if let Some(date) = input.date {
            changes.push(format!("date: {} -> {}", record.date, date));
            record.date = date;
        }
        if let Some(payer) = input.payer {
            let payer = payer.trim().to_string();
            self.check_payer(&payer)?;
            changes.push(format!("payer: {} -> {}", record.payer, payer));
            record.payer = payer;
        }
        if let Some(amount) = input.amount {
            changes.push(format!("amount: {} -> {}", record.amount, amount));
            record.amount = amount;
        }
        if let Some(category) = input.category {
            let category = category.trim().to_string();
            self.check_category(&category)?;
            changes.push(format!("category: {} -> {}", record.category, category));
            record.category = category;
        }
        if let Some(memo) = input.memo {
            changes.push("memo changed".to_string());
            record.memo = memo.trim().to_string();
        }

        record.touch();

        self.storage.expenses.upsert(record.clone())?;
        self.storage.expenses.save()?;

        log::info!("Updated expense {} ({})", record.id, changes.join(", "));
        Ok(record)
    }

    /// Delete an expense, returning the removed record
    pub fn delete(&self, id: ExpenseId) -> KakeiboResult<ExpenseRecord> {
        let record = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| KakeiboError::expense_not_found(id.to_string()))?;

        self.storage.expenses.delete(id)?;
        self.storage.expenses.save()?;

        log::info!("Deleted expense {}: {}", record.id, record);
        Ok(record)
    }
}
