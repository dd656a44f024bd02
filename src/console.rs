use std::io::Write;

use anyhow::{Context, Result};

use crate::attendance::{format_duration, AttendanceReport};
use crate::filter::sort_for_listing;
use crate::time_entry::TimeEntry;

/// Consoleに勤怠記録を表示するためのtrait。
pub trait ConsolePresenter {
    /// 勤怠記録の一覧を表示する。
    ///
    /// # Arguments
    ///
    /// * `time_entries` - 表示する勤怠記録
    fn show_time_entries(&mut self, time_entries: &[TimeEntry]) -> Result<()>;

    /// 集計結果を表示する。
    ///
    /// # Arguments
    ///
    /// * `report` - 表示する集計結果
    fn show_report(&mut self, report: &AttendanceReport) -> Result<()>;
}

/// 勤怠記録をMarkdownのlist形式で表示する。
pub struct ConsoleMarkdownList<'a, W: Write> {
    writer: &'a mut W,
}

impl<'a, W: Write> ConsoleMarkdownList<'a, W> {
    /// 新しい`ConsoleMarkdownList`を返す。
    pub fn new(writer: &'a mut W) -> Self {
        Self { writer }
    }
}

impl<'a, W: Write> ConsolePresenter for ConsoleMarkdownList<'a, W> {
    // 勤怠記録を一覧表示用の並び順にしてからlist形式で表示する。
    fn show_time_entries(&mut self, time_entries: &[TimeEntry]) -> Result<()> {
        let mut sorted_entries = time_entries.to_vec();
        sort_for_listing(&mut sorted_entries);

        for entry in sorted_entries {
            let clock_out = entry.clock_out.as_deref().unwrap_or("now");
            writeln!(
                self.writer,
                "- {} {} ~ {} [{}]: {} ({}) @ {}",
                entry.date,
                entry.clock_in,
                clock_out,
                entry.status,
                entry.employee,
                entry.initials,
                entry.location
            )
            .with_context(|| format!("Failed to write time entry: {:?}", entry))?;
        }

        Ok(())
    }

    // 日毎の集計は日付の降順で表示する。
    fn show_report(&mut self, report: &AttendanceReport) -> Result<()> {
        let mut daily_totals = report.daily_totals.clone();
        daily_totals.sort_by(|left, right| right.date.cmp(&left.date));

        writeln!(self.writer, "## Daily totals").context("Failed to write header")?;
        for total in &daily_totals {
            writeln!(
                self.writer,
                "- {}: {}",
                total.date,
                format_duration(total.minutes as f64)
            )
            .with_context(|| format!("Failed to write daily total: {:?}", total))?;
        }

        writeln!(self.writer).context("Failed to write separator")?;
        writeln!(
            self.writer,
            "Weekly total: {}",
            format_duration(report.weekly_total_minutes as f64)
        )
        .context("Failed to write weekly total")?;

        let counts = &report.status_counts;
        writeln!(
            self.writer,
            "Clocked in: {}, On break: {}, Clocked out: {}",
            counts.clocked_in, counts.on_break, counts.clocked_out
        )
        .context("Failed to write status counts")?;

        Ok(())
    }
}
