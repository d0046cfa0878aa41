//! # Reports
//!
//! Read-only views over the ledger: the admin transaction report (with CSV export), a user's own
//! history, and the dashboard figures. Rows are joined with reagent, category, machine and user
//! names at read time, so renamed catalog entries show their current names.

use crate::clients::{
    CategoryClient, MachineClient, ProfileClient, ReagentClient, TransactionClient,
};
use crate::error::{InventoryError, Result};
use crate::model::{
    CategoryId, MachineId, Profile, ProfileId, Reagent, ReagentId, StockTransaction, TransactionId,
    TransactionKind,
};
use crate::session::Session;
use actor_framework::{ActorClient, Filter};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// How many of a user's own transactions the history view shows.
pub const HISTORY_LIMIT: usize = 100;

const DASHBOARD_ROWS: usize = 5;

const CSV_HEADERS: [&str; 11] = [
    "Date", "Time", "Reagent", "Category", "Machine", "Type", "Quantity", "Previous", "New", "User",
    "Reason",
];

/// A ledger entry with names resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRow {
    pub transaction_id: TransactionId,
    pub created_at: DateTime<Utc>,
    pub reagent_id: ReagentId,
    pub reagent_name: String,
    pub unit: String,
    pub category_name: Option<String>,
    pub machine_name: Option<String>,
    pub kind: TransactionKind,
    pub quantity: u32,
    pub previous_stock: u32,
    pub new_stock: u32,
    pub user_name: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportFilter {
    pub kind: Option<TransactionKind>,
    /// Case-insensitive substring of the reagent name.
    pub search: Option<String>,
    pub start_date: Option<NaiveDate>,
    /// Inclusive: the whole end day counts.
    pub end_date: Option<NaiveDate>,
}

impl ReportFilter {
    pub fn matches(&self, row: &TransactionRow) -> bool {
        if self.kind.is_some_and(|kind| kind != row.kind) {
            return false;
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            if !row
                .reagent_name
                .to_lowercase()
                .contains(&search.to_lowercase())
            {
                return false;
            }
        }
        let day = row.created_at.date_naive();
        if self.start_date.is_some_and(|start| day < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| day > end) {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_reagents: usize,
    pub low_stock_count: usize,
    pub active_users: usize,
    pub today_transactions: usize,
    /// Lowest stock first.
    pub low_stock: Vec<Reagent>,
    pub recent_transactions: Vec<TransactionRow>,
}

#[derive(Clone)]
pub struct ReportService {
    transactions: TransactionClient,
    reagents: ReagentClient,
    categories: CategoryClient,
    machines: MachineClient,
    profiles: ProfileClient,
    limit: usize,
}

/// Name lookups for one report run.
struct Directory {
    reagents: HashMap<ReagentId, Reagent>,
    categories: HashMap<CategoryId, String>,
    machines: HashMap<MachineId, String>,
    users: HashMap<ProfileId, String>,
}

impl Directory {
    fn row(&self, entry: StockTransaction) -> TransactionRow {
        let reagent = self.reagents.get(&entry.reagent_id);
        TransactionRow {
            transaction_id: entry.id,
            created_at: entry.created_at,
            reagent_id: entry.reagent_id,
            reagent_name: reagent
                .map(|r| r.name.clone())
                .unwrap_or_else(|| entry.reagent_id.to_string()),
            unit: reagent.map(|r| r.unit.clone()).unwrap_or_default(),
            category_name: reagent.and_then(|r| self.categories.get(&r.category_id).cloned()),
            machine_name: reagent
                .and_then(|r| r.machine_id)
                .and_then(|m| self.machines.get(&m).cloned()),
            kind: entry.kind,
            quantity: entry.quantity,
            previous_stock: entry.previous_stock,
            new_stock: entry.new_stock,
            user_name: self.users.get(&entry.user_id).cloned(),
            reason: entry.reason,
        }
    }
}

impl ReportService {
    pub fn new(
        transactions: TransactionClient,
        reagents: ReagentClient,
        categories: CategoryClient,
        machines: MachineClient,
        profiles: ProfileClient,
        limit: usize,
    ) -> Self {
        Self {
            transactions,
            reagents,
            categories,
            machines,
            profiles,
            limit,
        }
    }

    /// Admin only. The most recent `limit` entries, newest first, then filtered.
    #[instrument(skip(self, admin))]
    pub async fn transaction_report(
        &self,
        admin: &Session,
        filter: &ReportFilter,
    ) -> Result<Vec<TransactionRow>> {
        admin.require_admin()?;
        let entries = self.transactions.recent(self.limit).await?;
        let directory = self.directory().await?;
        let rows: Vec<_> = entries
            .into_iter()
            .map(|entry| directory.row(entry))
            .filter(|row| filter.matches(row))
            .collect();
        debug!(rows = rows.len(), "Report built");
        Ok(rows)
    }

    /// The signed-in user's own entries, newest first.
    #[instrument(skip(self, session), fields(user_id = %session.profile_id))]
    pub async fn user_history(&self, session: &Session) -> Result<Vec<TransactionRow>> {
        let entries = self.transactions.for_user(session.profile_id).await?;
        let directory = self.directory().await?;
        Ok(entries
            .into_iter()
            .take(HISTORY_LIMIT)
            .map(|entry| directory.row(entry))
            .collect())
    }

    #[instrument(skip(self, admin))]
    pub async fn dashboard(&self, admin: &Session) -> Result<DashboardStats> {
        admin.require_admin()?;
        let reagents = self.reagents.active().await?;
        let active_users = self
            .profiles
            .list(Filter::new(|p: &Profile| p.is_active))
            .await?
            .len();

        let today = Utc::now().date_naive();
        let today_transactions = self
            .transactions
            .list(Filter::new(move |t: &StockTransaction| {
                t.created_at.date_naive() == today
            }))
            .await?
            .len();
        let recent = self.transactions.recent(DASHBOARD_ROWS).await?;

        let mut low_stock: Vec<Reagent> =
            reagents.iter().filter(|r| r.is_low_stock()).cloned().collect();
        low_stock.sort_by_key(|r| r.current_stock);
        let low_stock_count = low_stock.len();
        low_stock.truncate(DASHBOARD_ROWS);

        let directory = self.directory().await?;
        let recent_transactions = recent
            .into_iter()
            .take(DASHBOARD_ROWS)
            .map(|entry| directory.row(entry))
            .collect();

        Ok(DashboardStats {
            total_reagents: reagents.len(),
            low_stock_count,
            active_users,
            today_transactions,
            low_stock,
            recent_transactions,
        })
    }

    async fn directory(&self) -> Result<Directory> {
        let reagents = self.reagents.list(Filter::all()).await?;
        let categories = self.categories.list(Filter::all()).await?;
        let machines = self.machines.list(Filter::all()).await?;
        let users = self.profiles.all().await?;

        Ok(Directory {
            reagents: reagents.into_iter().map(|r| (r.id, r)).collect(),
            categories: categories.into_iter().map(|c| (c.id, c.name)).collect(),
            machines: machines.into_iter().map(|m| (m.id, m.name)).collect(),
            users: users.into_iter().map(|p| (p.id, p.full_name)).collect(),
        })
    }
}

/// Render report rows as CSV, header first.
pub fn export_csv(rows: &[TransactionRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS).map_err(csv_error)?;

    for row in rows {
        writer
            .write_record([
                row.created_at.format("%Y-%m-%d").to_string(),
                row.created_at.format("%H:%M:%S").to_string(),
                row.reagent_name.clone(),
                row.category_name.clone().unwrap_or_default(),
                row.machine_name.clone().unwrap_or_default(),
                row.kind.to_string(),
                row.quantity.to_string(),
                row.previous_stock.to_string(),
                row.new_stock.to_string(),
                row.user_name.clone().unwrap_or_default(),
                row.reason.clone().unwrap_or_default(),
            ])
            .map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| InventoryError::Store(format!("CSV export failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| InventoryError::Store(format!("CSV export failed: {e}")))
}

fn csv_error(e: csv::Error) -> InventoryError {
    InventoryError::Store(format!("CSV export failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(name: &str, kind: TransactionKind, at: DateTime<Utc>) -> TransactionRow {
        TransactionRow {
            transaction_id: TransactionId(1),
            created_at: at,
            reagent_id: ReagentId(1),
            reagent_name: name.to_string(),
            unit: "bottles".into(),
            category_name: Some("Hematology".into()),
            machine_name: None,
            kind,
            quantity: 6,
            previous_stock: 10,
            new_stock: 4,
            user_name: Some("Ana Ruiz".into()),
            reason: Some("QC, morning run".into()),
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 30, 0).unwrap()
    }

    #[test]
    fn filter_combines_kind_search_and_dates() {
        let r = row("CBC Diluent", TransactionKind::Withdraw, at(2026, 3, 10, 23));

        assert!(ReportFilter::default().matches(&r));
        assert!(ReportFilter {
            search: Some("diluent".into()),
            ..Default::default()
        }
        .matches(&r));
        assert!(!ReportFilter {
            kind: Some(TransactionKind::Add),
            ..Default::default()
        }
        .matches(&r));

        let day = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        // End date covers the whole day
        assert!(ReportFilter {
            start_date: Some(day),
            end_date: Some(day),
            ..Default::default()
        }
        .matches(&r));
        assert!(!ReportFilter {
            start_date: day.succ_opt(),
            ..Default::default()
        }
        .matches(&r));
    }

    #[test]
    fn csv_has_header_and_quotes_fields() {
        let csv = export_csv(&[row("CBC Diluent", TransactionKind::Withdraw, at(2026, 3, 10, 9))])
            .unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next(),
            Some("Date,Time,Reagent,Category,Machine,Type,Quantity,Previous,New,User,Reason")
        );
        assert_eq!(
            lines.next(),
            Some("2026-03-10,09:30:00,CBC Diluent,Hematology,,withdraw,6,10,4,Ana Ruiz,\"QC, morning run\"")
        );
        assert_eq!(lines.next(), None);
    }
}
