//! Typed per-column rendering of stock rows.
//!
//! Each column turns a [`StockRow`] into a [`CellView`]: plain data plus the
//! styling the grid applies. The Leptos list and the JS binding both render
//! from these descriptions.

use crate::domain::market_data::{StockRow, Trend};
use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, AsRefStr, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StockColumn {
    Ticker,
    Sparkline,
    Price,
}

impl StockColumn {
    /// Fixed width in pixels; `None` means the column takes the remaining space.
    pub fn width_px(&self) -> Option<u32> {
        match self {
            StockColumn::Ticker => Some(55),
            StockColumn::Sparkline => None,
            StockColumn::Price => Some(65),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellView {
    Ticker {
        text: String,
        bold: bool,
        small: bool,
    },
    Sparkline {
        values: Vec<f64>,
        trend: Trend,
    },
    Price {
        /// Empty while the symbol has no price yet.
        text: String,
        background: &'static str,
        color: &'static str,
        bold: bool,
        border_radius_px: u32,
        padding: &'static str,
    },
}

impl CellView {
    pub fn text(&self) -> Option<&str> {
        match self {
            CellView::Ticker { text, .. } | CellView::Price { text, .. } => Some(text.as_str()),
            CellView::Sparkline { .. } => None,
        }
    }

    /// Inline style for the cell element.
    pub fn style(&self) -> String {
        match self {
            CellView::Ticker { bold, small, .. } => format!(
                "font-weight: {}; font-size: {};",
                if *bold { "bold" } else { "normal" },
                if *small { "small" } else { "inherit" }
            ),
            CellView::Sparkline { .. } => String::new(),
            CellView::Price { background, color, bold, border_radius_px, padding, .. } => format!(
                "background-color: {}; border-radius: {}px; color: {}; font-weight: {}; padding: {};",
                background,
                border_radius_px,
                color,
                if *bold { "bold" } else { "normal" },
                padding
            ),
        }
    }
}

pub fn render_cell(column: StockColumn, row: &StockRow) -> CellView {
    match column {
        StockColumn::Ticker => CellView::Ticker { text: row.ticker().to_string(), bold: true, small: true },
        StockColumn::Sparkline => CellView::Sparkline { values: row.history.clone(), trend: row.trend },
        StockColumn::Price => CellView::Price {
            text: row.formatted_price.clone().unwrap_or_default(),
            background: row.trend.color(),
            color: "white",
            bold: true,
            border_radius_px: 5,
            padding: "5px 10px 5px 10px",
        },
    }
}

/// One cell per column, in column order.
pub fn render_row(row: &StockRow) -> Vec<(StockColumn, CellView)> {
    StockColumn::iter().map(|column| (column, render_cell(column, row))).collect()
}

/// Scales a series into an SVG box of `width` x `height`, y growing downward.
///
/// A constant series sits on the vertical middle; a single value is
/// centered horizontally.
pub fn sparkline_points(values: &[f64], width: f64, height: f64) -> Vec<(f64, f64)> {
    if values.is_empty() {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    let step = if values.len() > 1 { width / (values.len() - 1) as f64 } else { 0.0 };

    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let x = if values.len() > 1 { i as f64 * step } else { width / 2.0 };
            let y = if range > 0.0 { height - (value - min) / range * height } else { height / 2.0 };
            (x, y)
        })
        .collect()
}

/// `points` attribute of an SVG polyline.
pub fn sparkline_polyline(values: &[f64], width: f64, height: f64) -> String {
    sparkline_points(values, width, height)
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparkline_spans_box() {
        let points = sparkline_points(&[1.0, 3.0, 2.0], 100.0, 20.0);
        assert_eq!(points, vec![(0.0, 20.0), (50.0, 0.0), (100.0, 10.0)]);
    }

    #[test]
    fn flat_and_single_sparklines_are_centered() {
        assert_eq!(sparkline_points(&[4.0, 4.0], 10.0, 8.0), vec![(0.0, 4.0), (10.0, 4.0)]);
        assert_eq!(sparkline_points(&[4.0], 10.0, 8.0), vec![(5.0, 4.0)]);
        assert!(sparkline_points(&[], 10.0, 8.0).is_empty());
    }

    #[test]
    fn polyline_formatting() {
        assert_eq!(sparkline_polyline(&[1.0, 2.0], 10.0, 4.0), "0.0,4.0 10.0,0.0");
    }
}
