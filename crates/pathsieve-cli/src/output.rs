//! Rendering of scan reports.

use pathsieve_core::{Error, Result};
use pathsieve_scanner::ScanReport;

pub fn print_json(report: &ScanReport) -> Result<()> {
    let json =
        serde_json::to_string_pretty(report).map_err(|e| Error::Serialization(e.to_string()))?;
    println!("{json}");
    Ok(())
}

pub fn print_plain(report: &ScanReport) {
    for file in &report.files {
        println!("{}", file.path);
    }
}

pub fn print_table(report: &ScanReport) {
    println!("{:<7} {:>10} {:<17} PATH", "KIND", "SIZE", "MODIFIED");
    for file in &report.files {
        println!(
            "{:<7} {:>10} {:<17} {}",
            file.kind.to_string(),
            file.size,
            format_mtime(file.mtime),
            file.path
        );
    }
    println!(
        "\n{} files accepted ({} sources, {} tests ignored)",
        report.len(),
        report.ignored_sources,
        report.ignored_tests
    );
}

fn format_mtime(mtime: i64) -> String {
    chrono::DateTime::from_timestamp(mtime, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::format_mtime;

    #[test]
    fn test_format_mtime_epoch() {
        assert_eq!(format_mtime(0), "1970-01-01 00:00");
    }

    #[test]
    fn test_format_mtime_out_of_range() {
        assert_eq!(format_mtime(i64::MAX), "");
    }
}
