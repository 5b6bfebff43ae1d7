//! # Chart Configuration Builders
//!
//! Turns an [`Aggregate`] into the declarative configuration object a
//! Chart.js-style library consumes. This module is pure: it builds the
//! config, it never touches a canvas. Actual mounting/destroying lives in
//! the reports crate behind the `ChartBackend` trait.
//!
//! ## Serialized shape
//! The structs serialize to the exact JSON the charting library expects
//! (`type`, `data.labels`, `data.datasets[].backgroundColor`, ...), and
//! `ts-rs` exports matching TypeScript types for the frontend.
//!
//! ## Palette
//! A fixed 5-color palette; dataset N takes color N mod 5, so legends stay
//! stable across re-renders regardless of how many stores a tenant has.

use serde::Serialize;
use ts_rs::TS;

use crate::aggregate::{Aggregate, TimeDimension};
use crate::calendar::MonthWindow;

// =============================================================================
// Palette
// =============================================================================

/// Fill colors, cycled with modulo.
pub const PALETTE: [&str; 5] = [
    "rgba(255, 99, 132, 0.6)",
    "rgba(54, 162, 235, 0.6)",
    "rgba(255, 206, 86, 0.6)",
    "rgba(75, 192, 192, 0.6)",
    "rgba(153, 102, 255, 0.6)",
];

/// Border colors, same hues at full opacity.
pub const PALETTE_BORDER: [&str; 5] = [
    "rgba(255, 99, 132, 1)",
    "rgba(54, 162, 235, 1)",
    "rgba(255, 206, 86, 1)",
    "rgba(75, 192, 192, 1)",
    "rgba(153, 102, 255, 1)",
];

// =============================================================================
// Configuration Types
// =============================================================================

/// Top-level chart configuration.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    /// Chart kind. Every report view renders bars.
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    /// Category labels: day numbers, hour labels, or employee names.
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// One labeled series.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: String,
    pub border_color: String,
    pub border_width: u32,
    /// Which value axis the series binds to ("y" left, "y1" right).
    /// Only the dual-axis employee chart sets it.
    #[serde(rename = "yAxisID", skip_serializing_if = "Option::is_none")]
    pub y_axis_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub plugins: PluginOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PluginOptions {
    pub title: TitleOptions,
    pub legend: LegendOptions,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TitleOptions {
    pub display: bool,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LegendOptions {
    pub display: bool,
}

/// Value axes. `y1` only exists on the dual-axis employee chart.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Scales {
    pub y: AxisOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y1: Option<AxisOptions>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AxisOptions {
    pub position: String,
    pub begin_at_zero: bool,
    pub grid: GridOptions,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GridOptions {
    pub draw_on_chart_area: bool,
}

impl AxisOptions {
    fn left() -> Self {
        AxisOptions {
            position: "left".to_string(),
            begin_at_zero: true,
            grid: GridOptions {
                draw_on_chart_area: true,
            },
        }
    }

    /// Right axis with gridlines suppressed so the two grids don't overlap.
    fn right_no_grid() -> Self {
        AxisOptions {
            position: "right".to_string(),
            begin_at_zero: true,
            grid: GridOptions {
                draw_on_chart_area: false,
            },
        }
    }
}

// =============================================================================
// Builders
// =============================================================================

/// Builds the by-store bar chart for a time dimension.
///
/// One dataset per store (insertion order, palette cycled modulo 5), bucket
/// counts as values. Returns `None` for an empty aggregate; the caller is
/// responsible for showing a placeholder instead.
pub fn store_time_chart(
    agg: &Aggregate,
    dim: TimeDimension,
    window: &MonthWindow,
    title: &str,
) -> Option<ChartConfig> {
    if agg.is_empty() {
        return None;
    }

    let labels = match dim {
        TimeDimension::DayOfMonth => (1..=window.days()).map(|d| d.to_string()).collect(),
        TimeDimension::HourOfDay => (0..24).map(|h| format!("{h}:00")).collect(),
    };

    let datasets = agg
        .groups()
        .iter()
        .enumerate()
        .map(|(i, group)| Dataset {
            label: group.name().to_string(),
            data: group.buckets().iter().map(|b| b.count as f64).collect(),
            background_color: PALETTE[i % PALETTE.len()].to_string(),
            border_color: PALETTE_BORDER[i % PALETTE_BORDER.len()].to_string(),
            border_width: 1,
            y_axis_id: None,
        })
        .collect();

    Some(ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData { labels, datasets },
        options: ChartOptions {
            plugins: PluginOptions {
                title: TitleOptions {
                    display: true,
                    text: title.to_string(),
                },
                legend: LegendOptions { display: true },
            },
            scales: Some(Scales {
                y: AxisOptions::left(),
                y1: None,
            }),
        },
    })
}

/// Builds the employee bar chart: employees as categories, two datasets
/// sharing the category axis with independent value axes — unit counts on
/// the left, money (major units) on the right with its gridlines off.
///
/// Returns `None` for an empty aggregate.
pub fn employee_chart(agg: &Aggregate, title: &str) -> Option<ChartConfig> {
    if agg.is_empty() {
        return None;
    }

    let labels = agg
        .groups()
        .iter()
        .map(|g| g.name().to_string())
        .collect();

    let counts = Dataset {
        label: "Unidades vendidas".to_string(),
        data: agg
            .groups()
            .iter()
            .map(|g| g.cumulative_count() as f64)
            .collect(),
        background_color: PALETTE[0].to_string(),
        border_color: PALETTE_BORDER[0].to_string(),
        border_width: 1,
        y_axis_id: Some("y".to_string()),
    };

    let totals = Dataset {
        label: "Total vendido".to_string(),
        data: agg
            .groups()
            .iter()
            .map(|g| g.cumulative_total().to_major_units())
            .collect(),
        background_color: PALETTE[1].to_string(),
        border_color: PALETTE_BORDER[1].to_string(),
        border_width: 1,
        y_axis_id: Some("y1".to_string()),
    };

    Some(ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels,
            datasets: vec![counts, totals],
        },
        options: ChartOptions {
            plugins: PluginOptions {
                title: TitleOptions {
                    display: true,
                    text: title.to_string(),
                },
                legend: LegendOptions { display: true },
            },
            scales: Some(Scales {
                y: AxisOptions::left(),
                y1: Some(AxisOptions::right_no_grid()),
            }),
        },
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{by_employee, by_store};
    use crate::types::{EmployeeRef, EntityRef, SaleRecord};
    use chrono::{TimeZone, Utc};

    fn window() -> MonthWindow {
        MonthWindow::containing(Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap())
    }

    fn store_sale(day: u32, store_id: &str) -> SaleRecord {
        SaleRecord {
            id: format!("s-{day}-{store_id}"),
            sold_at: Utc.with_ymd_and_hms(2026, 8, day, 12, 0, 0).unwrap(),
            unit_price: Some(10.0),
            quantity: Some(1),
            store: Some(EntityRef {
                id: store_id.to_string(),
                name: format!("Store {store_id}"),
            }),
            warehouse: None,
            employee: None,
        }
    }

    fn employee_sale(employee: (&str, &str), qty: i64, price: f64) -> SaleRecord {
        SaleRecord {
            id: format!("s-{}", employee.0),
            sold_at: Utc.with_ymd_and_hms(2026, 8, 9, 12, 0, 0).unwrap(),
            unit_price: Some(price),
            quantity: Some(qty),
            store: None,
            warehouse: None,
            employee: Some(EmployeeRef {
                id: employee.0.to_string(),
                name: employee.1.to_string(),
                code: None,
            }),
        }
    }

    #[test]
    fn test_empty_aggregate_builds_no_chart() {
        let agg = by_store(&[], TimeDimension::DayOfMonth, &window());
        assert!(store_time_chart(&agg, TimeDimension::DayOfMonth, &window(), "t").is_none());

        let agg = by_employee(&[]);
        assert!(employee_chart(&agg, "t").is_none());
    }

    #[test]
    fn test_day_labels_cover_whole_month() {
        let agg = by_store(&[store_sale(3, "a")], TimeDimension::DayOfMonth, &window());
        let cfg = store_time_chart(&agg, TimeDimension::DayOfMonth, &window(), "Ventas").unwrap();

        assert_eq!(cfg.data.labels.len(), 31);
        assert_eq!(cfg.data.labels.first().map(String::as_str), Some("1"));
        assert_eq!(cfg.data.labels.last().map(String::as_str), Some("31"));
        assert_eq!(cfg.data.datasets[0].data.len(), 31);
        assert_eq!(cfg.data.datasets[0].data[2], 1.0);
    }

    #[test]
    fn test_hour_labels() {
        let agg = by_store(&[store_sale(3, "a")], TimeDimension::HourOfDay, &window());
        let cfg = store_time_chart(&agg, TimeDimension::HourOfDay, &window(), "Horas").unwrap();

        assert_eq!(cfg.data.labels.len(), 24);
        assert_eq!(cfg.data.labels[0], "0:00");
        assert_eq!(cfg.data.labels[23], "23:00");
    }

    /// Six stores: the sixth dataset wraps back to the first palette entry.
    #[test]
    fn test_palette_cycles_with_modulo() {
        let sales: Vec<SaleRecord> = (0..6)
            .map(|i| store_sale(1 + i as u32, &format!("s{i}")))
            .collect();
        let agg = by_store(&sales, TimeDimension::DayOfMonth, &window());
        let cfg = store_time_chart(&agg, TimeDimension::DayOfMonth, &window(), "t").unwrap();

        assert_eq!(cfg.data.datasets.len(), 6);
        assert_eq!(cfg.data.datasets[5].background_color, PALETTE[0]);
        assert_eq!(cfg.data.datasets[4].background_color, PALETTE[4]);
    }

    #[test]
    fn test_employee_chart_dual_axis() {
        let sales = vec![
            employee_sale(("e1", "Marta"), 3, 10.0),
            employee_sale(("e2", "Julián"), 1, 99.5),
        ];
        let agg = by_employee(&sales);
        let cfg = employee_chart(&agg, "Empleados").unwrap();

        assert_eq!(cfg.data.labels, vec!["Marta", "Julián"]);
        assert_eq!(cfg.data.datasets.len(), 2);

        let counts = &cfg.data.datasets[0];
        assert_eq!(counts.y_axis_id.as_deref(), Some("y"));
        assert_eq!(counts.data, vec![3.0, 1.0]);

        let totals = &cfg.data.datasets[1];
        assert_eq!(totals.y_axis_id.as_deref(), Some("y1"));
        assert_eq!(totals.data, vec![30.0, 99.5]);

        let scales = cfg.options.scales.unwrap();
        let y1 = scales.y1.unwrap();
        assert_eq!(y1.position, "right");
        assert!(!y1.grid.draw_on_chart_area);
        assert!(scales.y.grid.draw_on_chart_area);
    }

    /// The serialized JSON must match the charting library's field names.
    #[test]
    fn test_serialized_shape() {
        let agg = by_store(&[store_sale(3, "a")], TimeDimension::DayOfMonth, &window());
        let cfg = store_time_chart(&agg, TimeDimension::DayOfMonth, &window(), "t").unwrap();

        let json = serde_json::to_value(&cfg).unwrap();
        assert_eq!(json["type"], "bar");
        assert!(json["data"]["datasets"][0]["backgroundColor"].is_string());
        assert!(json["data"]["datasets"][0]["borderColor"].is_string());
        assert_eq!(json["options"]["plugins"]["title"]["text"], "t");
        assert_eq!(
            json["options"]["scales"]["y"]["grid"]["drawOnChartArea"],
            true
        );
        // Single-axis chart: no yAxisID on the dataset, no y1 scale
        assert!(json["data"]["datasets"][0].get("yAxisID").is_none());
        assert!(json["options"]["scales"].get("y1").is_none());
    }
}
