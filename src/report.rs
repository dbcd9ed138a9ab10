//! Links Notation (Lino) Growth Report
//!
//! Collects the average series of several algorithms into one report that can
//! be saved as Links Notation and converted to Markdown. Links Notation
//! represents structured data as indented links between references:
//!
//! ```text
//! growth_report:
//!   timestamp '2026-10-16T09:30:00Z'
//!   description 'Quadratic sort growth'
//!
//! curves:
//!   bubble_sort:
//!     trials 100
//!     max_n 5
//!     averages 1 1 3 7 12
//! ```

use std::fmt::Write;
use std::fs;
use std::io;
use std::path::Path;

use crate::aggregate::AverageSeries;

/// Mean operation counts of one algorithm, indexed by prefix length.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthCurve {
    /// Algorithm identifier (e.g. "bubble_sort")
    pub algorithm: String,
    /// Number of trials averaged into each point
    pub num_trials: usize,
    /// Mean count at each prefix length
    pub averages: Vec<u64>,
}

impl GrowthCurve {
    pub fn new(algorithm: impl Into<String>, num_trials: usize, series: &AverageSeries) -> Self {
        GrowthCurve {
            algorithm: algorithm.into(),
            num_trials,
            averages: series.values().to_vec(),
        }
    }

    /// Number of measured prefix lengths.
    pub fn max_n(&self) -> usize {
        self.averages.len()
    }

    /// Mean count at the largest measured prefix length.
    pub fn final_mean(&self) -> Option<u64> {
        self.averages.last().copied()
    }

    /// `T(n) / T(n / 2)` for the largest measured `n`.
    ///
    /// Close to 4 for quadratic growth, 2 for linear growth.
    pub fn doubling_ratio(&self) -> Option<f64> {
        let n = self.averages.len().checked_sub(1)?;
        let half = n / 2;
        if half == 0 || self.averages[half] == 0 {
            return None;
        }
        Some(self.averages[n] as f64 / self.averages[half] as f64)
    }

    /// Growth exponent implied by the doubling ratio.
    pub fn estimated_exponent(&self) -> Option<f64> {
        self.doubling_ratio().map(f64::log2)
    }
}

/// A set of growth curves with run metadata.
#[derive(Debug, Clone)]
pub struct GrowthReport {
    /// When the report was generated (ISO 8601, UTC)
    pub timestamp: String,
    pub description: String,
    pub curves: Vec<GrowthCurve>,
}

impl GrowthReport {
    pub fn new(description: &str) -> Self {
        GrowthReport {
            timestamp: utc_timestamp(),
            description: description.to_string(),
            curves: Vec::new(),
        }
    }

    pub fn add_curve(&mut self, curve: GrowthCurve) {
        self.curves.push(curve);
    }

    /// Generate the report in Links Notation format
    pub fn to_lino(&self) -> String {
        let mut output = String::new();

        writeln!(output, "growth_report:").unwrap();
        writeln!(output, "  timestamp '{}'", self.timestamp).unwrap();
        writeln!(output, "  description '{}'", escape_lino_string(&self.description)).unwrap();

        writeln!(output).unwrap();
        writeln!(output, "curves:").unwrap();
        for curve in &self.curves {
            writeln!(output, "  {}:", curve.algorithm).unwrap();
            writeln!(output, "    trials {}", curve.num_trials).unwrap();
            writeln!(output, "    max_n {}", curve.max_n()).unwrap();
            let values: Vec<String> = curve.averages.iter().map(u64::to_string).collect();
            writeln!(output, "    averages {}", values.join(" ")).unwrap();
        }

        // Derived figures; the parser ignores this section.
        writeln!(output).unwrap();
        writeln!(output, "growth:").unwrap();
        for curve in &self.curves {
            writeln!(output, "  {}:", curve.algorithm).unwrap();
            if let Some(mean) = curve.final_mean() {
                writeln!(output, "    final_mean {}", mean).unwrap();
            }
            if let Some(ratio) = curve.doubling_ratio() {
                writeln!(output, "    doubling_ratio {:.2}", ratio).unwrap();
            }
            if let Some(exponent) = curve.estimated_exponent() {
                writeln!(output, "    exponent {:.2}", exponent).unwrap();
            }
        }

        let ranking = self.ranking();
        if !ranking.is_empty() {
            writeln!(output).unwrap();
            writeln!(output, "ranking:").unwrap();
            for (place, curve) in ranking.iter().enumerate() {
                writeln!(output, "  {} {}", place + 1, curve.algorithm).unwrap();
            }
        }

        output
    }

    /// Curves ordered from fewest to most operations at their largest size.
    pub fn ranking(&self) -> Vec<&GrowthCurve> {
        let mut ranked: Vec<&GrowthCurve> = self
            .curves
            .iter()
            .filter(|c| c.final_mean().is_some())
            .collect();
        ranked.sort_by_key(|c| c.final_mean());
        ranked
    }

    pub fn save_lino(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_lino())
    }

    /// Generate a markdown summary of the report
    pub fn to_markdown_table(&self) -> String {
        let mut output = String::new();

        writeln!(output, "# Quadratic Sort Growth Report").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "**Timestamp:** {}", self.timestamp).unwrap();
        writeln!(output, "**Description:** {}", self.description).unwrap();
        writeln!(output).unwrap();

        writeln!(output, "## Mean Operation Counts").unwrap();
        writeln!(output).unwrap();

        let mut header = String::from("| n |");
        let mut rule = String::from("|---|");
        for curve in &self.curves {
            write!(header, " {} |", curve.algorithm).unwrap();
            rule.push_str("---|");
        }
        writeln!(output, "{}", header).unwrap();
        writeln!(output, "{}", rule).unwrap();

        let longest = self.curves.iter().map(GrowthCurve::max_n).max().unwrap_or(0);
        for n in sample_points(longest) {
            let mut row = format!("| {} |", n);
            for curve in &self.curves {
                match curve.averages.get(n) {
                    Some(value) => write!(row, " {} |", value).unwrap(),
                    None => row.push_str(" N/A |"),
                }
            }
            writeln!(output, "{}", row).unwrap();
        }
        writeln!(output).unwrap();

        writeln!(output, "## Growth").unwrap();
        writeln!(output).unwrap();
        writeln!(
            output,
            "| Algorithm | Trials | Max n | Final mean | Doubling ratio | Exponent |"
        )
        .unwrap();
        writeln!(output, "|-----------|--------|-------|------------|----------------|----------|").unwrap();
        for curve in &self.curves {
            writeln!(
                output,
                "| {} | {} | {} | {} | {} | {} |",
                curve.algorithm,
                curve.num_trials,
                curve.max_n(),
                curve
                    .final_mean()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "N/A".to_string()),
                curve
                    .doubling_ratio()
                    .map(|r| format!("{:.2}", r))
                    .unwrap_or_else(|| "N/A".to_string()),
                curve
                    .estimated_exponent()
                    .map(|e| format!("{:.2}", e))
                    .unwrap_or_else(|| "N/A".to_string()),
            )
            .unwrap();
        }

        writeln!(output).unwrap();
        writeln!(output, "---").unwrap();
        writeln!(output, "*Report generated by quad-sort-growth*").unwrap();

        output
    }

    pub fn save_markdown(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_markdown_table())
    }
}

/// Prefix lengths shown in the markdown table: about ten evenly spaced rows
/// plus the last one.
fn sample_points(len: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let step = (len / 10).max(1);
    let mut points: Vec<usize> = (0..len).step_by(step).collect();
    if points.last() != Some(&(len - 1)) {
        points.push(len - 1);
    }
    points
}

/// Escape a string for use in Links Notation (handle single quotes)
fn escape_lino_string(s: &str) -> String {
    s.replace('\'', "\\'")
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SSZ`.
fn utc_timestamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format_timestamp(secs)
}

fn format_timestamp(secs: u64) -> String {
    let (year, month, day) = civil_from_days((secs / 86_400) as i64);
    let time_of_day = secs % 86_400;

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        year,
        month,
        day,
        time_of_day / 3600,
        (time_of_day % 3600) / 60,
        time_of_day % 60
    )
}

/// Proleptic Gregorian date of a day count since 1970-01-01.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

/// Parse a Links Notation growth report.
///
/// Only the metadata and the `curves:` section are read; derived sections are
/// recomputed from the curves. Returns `None` when no curve is found.
pub fn parse_lino_report(content: &str) -> Option<GrowthReport> {
    let mut report = GrowthReport::new("Parsed report");
    let mut current: Option<GrowthCurve> = None;
    let mut in_curves_section = false;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        // Any unindented `name:` starts a new section.
        if !line.starts_with(' ') && trimmed.ends_with(':') {
            if let Some(curve) = current.take() {
                report.curves.push(curve);
            }
            in_curves_section = trimmed == "curves:";
            continue;
        }

        if trimmed.starts_with("timestamp '") {
            if let Some(ts) = extract_quoted_value(trimmed, "timestamp") {
                report.timestamp = ts;
            }
            continue;
        }
        if trimmed.starts_with("description '") {
            if let Some(desc) = extract_quoted_value(trimmed, "description") {
                report.description = desc;
            }
            continue;
        }

        if !in_curves_section {
            continue;
        }

        if trimmed.ends_with(':') && !trimmed.contains(' ') {
            if let Some(curve) = current.take() {
                report.curves.push(curve);
            }
            current = Some(GrowthCurve {
                algorithm: trimmed.trim_end_matches(':').to_string(),
                num_trials: 0,
                averages: Vec::new(),
            });
            continue;
        }

        if let Some(ref mut curve) = current {
            if let Some(rest) = trimmed.strip_prefix("trials ") {
                curve.num_trials = rest.trim().parse().ok()?;
            } else if let Some(rest) = trimmed.strip_prefix("averages") {
                curve.averages = rest
                    .split_whitespace()
                    .map(str::parse)
                    .collect::<Result<Vec<u64>, _>>()
                    .ok()?;
            }
        }
    }

    if let Some(curve) = current {
        report.curves.push(curve);
    }

    if report.curves.is_empty() {
        None
    } else {
        Some(report)
    }
}

fn extract_quoted_value(line: &str, prefix: &str) -> Option<String> {
    let after_prefix = line.strip_prefix(prefix)?.trim();
    let inner = after_prefix.strip_prefix('\'')?.strip_suffix('\'')?;
    Some(inner.replace("\\'", "'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quadratic_curve(name: &str, len: u64) -> GrowthCurve {
        GrowthCurve {
            algorithm: name.to_string(),
            num_trials: 10,
            averages: (0..len).map(|n| n * n).collect(),
        }
    }

    #[test]
    fn test_curve_from_series() {
        let series = AverageSeries::from(vec![1, 1, 3]);
        let curve = GrowthCurve::new("bubble_sort", 50, &series);
        assert_eq!(curve.max_n(), 3);
        assert_eq!(curve.final_mean(), Some(3));
        assert_eq!(curve.num_trials, 50);
    }

    #[test]
    fn test_doubling_ratio() {
        let curve = quadratic_curve("selection_sort", 101);
        let ratio = curve.doubling_ratio().unwrap();
        assert!((ratio - 4.0).abs() < 1e-9);
        assert!((curve.estimated_exponent().unwrap() - 2.0).abs() < 1e-9);

        let short = quadratic_curve("selection_sort", 2);
        assert_eq!(short.doubling_ratio(), None);
    }

    #[test]
    fn test_report_to_lino() {
        let mut report = GrowthReport::new("Test growth");
        report.add_curve(quadratic_curve("bubble_sort", 5));

        let lino = report.to_lino();
        assert!(lino.contains("growth_report:"));
        assert!(lino.contains("  bubble_sort:"));
        assert!(lino.contains("    averages 0 1 4 9 16"));
        assert!(lino.contains("doubling_ratio 4.00"));
    }

    #[test]
    fn test_ranking() {
        let mut report = GrowthReport::new("Ranking");
        report.add_curve(quadratic_curve("bubble_sort", 10));
        report.add_curve(quadratic_curve("insertion_sort", 5));

        let ranked: Vec<&str> = report.ranking().iter().map(|c| c.algorithm.as_str()).collect();
        assert_eq!(ranked, vec!["insertion_sort", "bubble_sort"]);
    }

    #[test]
    fn test_parse_lino_roundtrip() {
        let mut report = GrowthReport::new("It's quadratic");
        report.add_curve(quadratic_curve("bubble_sort", 8));
        report.add_curve(quadratic_curve("opt_bubble_sort", 6));

        let parsed = parse_lino_report(&report.to_lino()).unwrap();

        assert_eq!(parsed.timestamp, report.timestamp);
        assert_eq!(parsed.description, "It's quadratic");
        assert_eq!(parsed.curves, report.curves);
    }

    #[test]
    fn test_parse_rejects_empty_report() {
        assert!(parse_lino_report("growth_report:\n  description 'x'\n").is_none());
        assert!(parse_lino_report("curves:\n  bubble_sort:\n    averages 1 x\n").is_none());
    }

    #[test]
    fn test_markdown_table() {
        let mut report = GrowthReport::new("Markdown");
        report.add_curve(quadratic_curve("bubble_sort", 25));
        report.add_curve(quadratic_curve("selection_sort", 20));

        let md = report.to_markdown_table();
        assert!(md.contains("| n | bubble_sort | selection_sort |"));
        assert!(md.contains("| 0 | 0 | 0 |"));
        assert!(md.contains("| 24 | 576 | N/A |"));
        assert!(md.contains("| bubble_sort | 10 | 25 | 576 |"));
    }

    #[test]
    fn test_sample_points() {
        assert_eq!(sample_points(0), Vec::<usize>::new());
        assert_eq!(sample_points(3), vec![0, 1, 2]);
        assert_eq!(sample_points(25), vec![0, 2, 4, 6, 8, 10, 12, 14, 16, 18, 20, 22, 24]);
        assert_eq!(sample_points(100).len(), 11);
    }

    #[test]
    fn test_escape_lino_string() {
        assert_eq!(escape_lino_string("hello"), "hello");
        assert_eq!(escape_lino_string("it's"), "it\\'s");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1970-01-01T00:00:00Z");
        assert_eq!(format_timestamp(1_704_067_200), "2024-01-01T00:00:00Z");
        assert_eq!(format_timestamp(951_868_800 + 3_723), "2000-03-01T01:02:03Z");
        assert_eq!(format_timestamp(951_782_400), "2000-02-29T00:00:00Z");
    }
}
