//! Read-only rendering helpers for presentation consumers.

use crate::core::{ChannelCatalog, Row};

/// Visible x-axis span, in logical seconds.
pub const DEFAULT_X_SPAN: f64 = 30.0;

const GAP: &str = "-";

pub fn format_step(step: f64) -> String {
    format!("{:.1}s", step)
}

/// Chart x-axis domain ending at the latest step.
pub fn x_domain(latest_step: f64, span: f64) -> (f64, f64) {
    ((latest_step - span).max(0.0), latest_step)
}

pub fn prediction_banner(latest: Option<f64>) -> String {
    match latest {
        Some(value) => format!("Latest Stroke Volume: {} mL", value),
        None => "Latest Stroke Volume: Waiting...".to_string(),
    }
}

/// Renders rows as a text table with one column per catalog channel.
/// Gaps print as `-`; channels outside the catalog are not shown.
pub fn render_table(rows: &[Row], catalog: &ChannelCatalog) -> String {
    let mut header = vec!["Time".to_string()];
    header.extend(catalog.channels().iter().map(|c| c.name.clone()));

    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let mut cells = vec![format_step(row.step)];
            cells.extend(catalog.channels().iter().map(|c| {
                row.get(&c.id)
                    .map(|v| format!("{:.2}", v))
                    .unwrap_or_else(|| GAP.to_string())
            }));
            cells
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            body.iter()
                .map(|cells| cells[i].chars().count())
                .chain(std::iter::once(header[i].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:>width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    let mut out = format_line(&header);
    out.push('\n');
    for cells in &body {
        out.push_str(&format_line(cells));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ChannelSpec;

    #[test]
    fn test_x_domain_clamps_at_zero() {
        assert_eq!(x_domain(12.5, DEFAULT_X_SPAN), (0.0, 12.5));
        assert_eq!(x_domain(45.0, DEFAULT_X_SPAN), (15.0, 45.0));
    }

    #[test]
    fn test_banner() {
        assert_eq!(prediction_banner(Some(42.0)), "Latest Stroke Volume: 42 mL");
        assert_eq!(prediction_banner(None), "Latest Stroke Volume: Waiting...");
    }

    #[test]
    fn test_table_shows_gaps_not_zero() {
        let catalog = ChannelCatalog::new(vec![
            ChannelSpec::new("hr", "HR"),
            ChannelSpec::new("stroke_volume", "SV"),
        ]);
        let mut row = Row::new(1.5);
        row.set("hr", 70.0);

        let table = render_table(&[row], &catalog);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("HR"));
        assert!(lines[1].contains("1.5s"));
        assert!(lines[1].contains("70.00"));
        assert!(lines[1].trim_end().ends_with('-'));
    }
}
