//! Commission page handlers.

use std::collections::BTreeMap;

use commdash_client::ApiClient;
use commdash_core::{format_currency, format_number, ChartDefaults, CommissionSummary, Page};
use commdash_export::CsvExporter;
use commdash_ui::{BoxFuture, PageHandler};
use parking_lot::RwLock;
use serde_json::{Map, Value};
use tracing::info;

const UNKNOWN_GROUP: &str = "Unknown";

/// How a data page groups commission amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakdown {
    /// `YYYY-MM` periods.
    Period,
    /// Product category.
    Category,
    /// Personality type.
    Personality,
}

impl Breakdown {
    /// Breakdown shown on `page`. The summary page has none.
    pub fn for_page(page: Page) -> Option<Self> {
        match page {
            Page::Summary => None,
            Page::Trends => Some(Self::Period),
            Page::GrossCommission => Some(Self::Category),
            Page::NetCommission => Some(Self::Personality),
        }
    }

    fn key(&self, row: &Map<String, Value>) -> String {
        match self {
            Self::Period => match (
                row.get("Year").and_then(Value::as_i64),
                row.get("Month").and_then(Value::as_i64),
            ) {
                (Some(year), Some(month)) => format!("{year:04}-{month:02}"),
                _ => UNKNOWN_GROUP.to_string(),
            },
            Self::Category => text(row, "ProductCategoryDescription"),
            Self::Personality => text(row, "Personality_To_Use"),
        }
    }
}

fn text(row: &Map<String, Value>, column: &str) -> String {
    match row.get(column) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => UNKNOWN_GROUP.to_string(),
    }
}

/// Sum `Amount` per group. Missing or unparseable amounts count as zero.
pub fn amount_totals(rows: &[Map<String, Value>], breakdown: Breakdown) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for row in rows {
        let amount = row
            .get("Amount")
            .and_then(commdash_core::parse_amount)
            .filter(|a| a.is_finite())
            .unwrap_or(0.0);
        *totals.entry(breakdown.key(row)).or_insert(0.0) += amount;
    }
    totals
}

#[derive(Default)]
struct PageState {
    summary: Option<CommissionSummary>,
    rows: Vec<Map<String, Value>>,
}

/// Loads one dashboard page from the backend and exports what it loaded.
pub struct CommissionPage {
    page: Page,
    client: ApiClient,
    exporter: CsvExporter,
    state: RwLock<PageState>,
}

impl CommissionPage {
    pub fn new(page: Page, client: ApiClient, exporter: CsvExporter) -> Self {
        Self {
            page,
            client,
            exporter,
            state: RwLock::new(PageState::default()),
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    /// Rows loaded by the last successful refresh.
    pub fn rows(&self) -> Vec<Map<String, Value>> {
        self.state.read().rows.clone()
    }

    pub fn summary(&self) -> Option<CommissionSummary> {
        self.state.read().summary.clone()
    }

    async fn load_summary(&self) -> anyhow::Result<()> {
        let summary = self.client.commission_summary().await?;
        info!(
            total_amount = %format_currency(Some(summary.total_amount)),
            new_business_premium = %format_currency(Some(summary.total_new_business_premium)),
            clients = %format_number(Some(summary.total_clients as f64)),
            products = %format_number(Some(summary.total_products as f64)),
            categories = summary.product_categories_count,
            personalities = summary.personality_types_count,
            records = summary.total_records,
            "Summary loaded"
        );
        self.state.write().summary = Some(summary);
        Ok(())
    }

    async fn load_rows(&self, breakdown: Breakdown) -> anyhow::Result<()> {
        let rows = self.client.commission_rows().await?;
        let totals = amount_totals(&rows, breakdown);
        for (group, total) in &totals {
            info!(
                page = %self.page,
                "{}",
                ChartDefaults::tooltip_label(group, Some(*total))
            );
        }
        info!(page = %self.page, rows = rows.len(), groups = totals.len(), "Commission data loaded");
        self.state.write().rows = rows;
        Ok(())
    }

    fn export_loaded(&self) -> anyhow::Result<()> {
        let filename = self.page.export_filename();
        match self.page {
            Page::Summary => {
                let summary: Vec<CommissionSummary> = self.summary().into_iter().collect();
                self.exporter.export_serialized(&summary, Some(filename.as_str()))?;
            }
            _ => {
                let rows = self.rows();
                self.exporter.export(&rows, Some(filename.as_str()))?;
            }
        }
        Ok(())
    }
}

impl PageHandler for CommissionPage {
    fn refresh(&self) -> BoxFuture<'_, anyhow::Result<()>> {
        Box::pin(async move {
            match Breakdown::for_page(self.page) {
                None => self.load_summary().await,
                Some(breakdown) => self.load_rows(breakdown).await,
            }
        })
    }

    fn export(&self) -> BoxFuture<'_, anyhow::Result<()>> {
        Box::pin(async move { self.export_loaded() })
    }
}
