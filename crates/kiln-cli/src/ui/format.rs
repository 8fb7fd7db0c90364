//! Formatting utilities for sizes, durations, and build summaries.

use std::path::Path;
use std::time::Duration;

use kiln_bundler::BuildContext;
use owo_colors::OwoColorize;

use super::{colors_enabled, is_quiet};

/// Format file size in human-readable format.
///
/// ```
/// use kiln_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1024), "1.00 KB");
/// assert_eq!(format_size(1_048_576), "1.00 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", size as u64, UNITS[unit_idx])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// Format duration in human-readable format.
///
/// ```
/// use std::time::Duration;
/// use kiln_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Print the files a build wrote, relative to the output directory.
pub fn print_build_summary(context: &BuildContext) {
    if is_quiet() {
        return;
    }

    for output in context.outputs() {
        let size = std::fs::metadata(output).map(|m| m.len()).unwrap_or(0);
        let name = display_relative(output, context.outdir());
        let size = format_size(size);
        if colors_enabled() {
            eprintln!("  {:<40} {}", name.cyan(), size.dimmed());
        } else {
            eprintln!("  {:<40} {}", name, size);
        }
    }

    eprintln!(
        "  {} files, {} total",
        context.outputs().len(),
        format_size(context.total_output_bytes())
    );
}

fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024), "5.00 GB");
    }

    #[test]
    fn test_format_duration_boundaries() {
        assert_eq!(format_duration(Duration::from_millis(999)), "999ms");
        assert_eq!(format_duration(Duration::from_secs(1)), "1.00s");
        assert_eq!(format_duration(Duration::from_secs(60)), "1m 0s");
    }

    #[test]
    fn test_display_relative() {
        let base = PathBuf::from("/site/public");
        assert_eq!(
            display_relative(&base.join("css").join("app.css"), &base),
            "css/app.css"
        );
        assert_eq!(display_relative(Path::new("/elsewhere.txt"), &base), "/elsewhere.txt");
    }
}
