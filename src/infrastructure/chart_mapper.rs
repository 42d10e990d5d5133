// Mapper to convert domain reports to the chart front end's JSON shape
use crate::domain::analytics::AccountSummary;
use crate::domain::dashboard::DashboardReport;
use crate::domain::series::{Dataset, Series};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPayload {
    pub platform: &'static str,
    pub summary: SummaryPayload,
    pub publications: ChartPayload,
    pub growth: ChartPayload,
    pub degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryPayload {
    pub display_name: String,
    pub current_total: u64,
    pub created_at: Option<String>,
    pub view_count: Option<u64>,
    pub content_count: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct ChartPayload {
    pub labels: Vec<String>,
    pub datasets: Vec<DatasetPayload>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetPayload {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(rename = "yAxisID")]
    pub y_axis_id: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
}

pub fn dashboard_to_payload(report: DashboardReport) -> DashboardPayload {
    DashboardPayload {
        platform: report.platform.as_str(),
        summary: summary_to_payload(report.summary),
        publications: series_to_payload(report.publications),
        growth: series_to_payload(report.growth),
        degraded: report.degraded,
        message: report.message,
    }
}

fn summary_to_payload(summary: AccountSummary) -> SummaryPayload {
    SummaryPayload {
        display_name: summary.display_name,
        current_total: summary.current_total,
        created_at: summary.created_at.map(|d| d.format("%Y-%m-%d").to_string()),
        view_count: summary.view_count,
        content_count: summary.content_count,
    }
}

fn series_to_payload(series: Series) -> ChartPayload {
    ChartPayload {
        labels: series.labels,
        datasets: series.datasets.into_iter().map(dataset_to_payload).collect(),
    }
}

fn dataset_to_payload(dataset: Dataset) -> DatasetPayload {
    DatasetPayload {
        label: dataset.name,
        data: dataset.values,
        y_axis_id: dataset.axis.id(),
        border_color: dataset.color,
    }
}
