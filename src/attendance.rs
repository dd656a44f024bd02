use chrono::NaiveDate;

use crate::time_entry::{Status, TimeEntry};

/// 1日分の労働時間の集計結果。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub minutes: i64,
}

/// 状態ごとの件数。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub clocked_in: usize,
    pub on_break: usize,
    pub clocked_out: usize,
}

/// フィルタ済みの勤怠記録から導出した表示用の集計結果。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttendanceReport {
    pub daily_totals: Vec<DailyTotal>,
    pub weekly_total_minutes: i64,
    pub status_counts: StatusCounts,
}

/// `H:MM`または`HH:MM`形式の文字列を0時からの経過分に変換する。
///
/// 時・分のどちらかが整数としてパースできない場合は`None`を返す。
/// 呼び出し側は`None`を「不明」として扱い、0分とは区別すること。
///
/// # Examples
///
/// ```
/// assert_eq!(parse_clock("08:30"), Some(510));
/// assert_eq!(parse_clock("8:30"), Some(510));
/// assert_eq!(parse_clock("abc"), None);
/// ```
pub fn parse_clock(clock: &str) -> Option<i64> {
    let (hours, minutes) = clock.split_once(':')?;
    let hours: i64 = hours.parse().ok()?;
    let minutes: i64 = minutes.parse().ok()?;

    Some(hours * 60 + minutes)
}

/// 1件の勤怠記録の労働時間を分単位で計算する。
///
/// 以下の場合は0分とする。
///
/// - `clock_in`がパースできない
/// - `clock_out`が未設定またはパースできない(退勤していないシフトは集計対象外)
/// - 退勤時刻が出勤時刻以前(日をまたぐシフトも0分に丸める)
pub fn worked_minutes(entry: &TimeEntry) -> i64 {
    let clock_in = match parse_clock(&entry.clock_in) {
        Some(minutes) => minutes,
        None => return 0,
    };
    let clock_out = match entry.clock_out.as_deref().and_then(parse_clock) {
        Some(minutes) => minutes,
        None => return 0,
    };

    (clock_out - clock_in).max(0)
}

/// 分単位の労働時間を`{h}h {mm}m`形式の文字列に変換する。
///
/// 小数は切り捨て、負の値は0分として扱う。
pub fn format_duration(minutes: f64) -> String {
    let total = minutes.max(0.0).floor() as i64;

    format!("{}h {:02}m", total / 60, total % 60)
}

/// 日毎の労働時間を集計する。
///
/// 出現した日付ごとに1行を返す。行の順序は入力で最初に日付が現れた順とし、
/// 表示用の並び替えは呼び出し側で行う。退勤していない記録しかない日も
/// `minutes = 0`の行として残す。
pub fn daily_totals(time_entries: &[TimeEntry]) -> Vec<DailyTotal> {
    time_entries.iter().fold(Vec::new(), |mut totals, entry| {
        let minutes = worked_minutes(entry);
        match totals.iter_mut().find(|total| total.date == entry.date) {
            Some(total) => total.minutes += minutes,
            None => totals.push(DailyTotal {
                date: entry.date,
                minutes,
            }),
        }
        totals
    })
}

/// 日毎の集計結果を合計して期間全体の労働時間を計算する。
pub fn range_total(totals: &[DailyTotal]) -> i64 {
    totals.iter().map(|total| total.minutes).sum()
}

/// 状態ごとの件数を数える。日付のグルーピングとは独立している。
pub fn status_counts(time_entries: &[TimeEntry]) -> StatusCounts {
    time_entries
        .iter()
        .fold(StatusCounts::default(), |mut counts, entry| {
            match entry.status {
                Status::ClockedIn => counts.clocked_in += 1,
                Status::OnBreak => counts.on_break += 1,
                Status::ClockedOut => counts.clocked_out += 1,
            }
            counts
        })
}

/// フィルタ済みの勤怠記録から表示用の集計結果をまとめて導出する。
pub fn summarize(time_entries: &[TimeEntry]) -> AttendanceReport {
    let daily_totals = daily_totals(time_entries);
    let weekly_total_minutes = range_total(&daily_totals);
    let status_counts = status_counts(time_entries);

    AttendanceReport {
        daily_totals,
        weekly_total_minutes,
        status_counts,
    }
}
