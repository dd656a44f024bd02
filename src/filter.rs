use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::time_entry::{Status, TimeEntry};

/// 状態での絞り込み条件。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(Status),
}

/// 勤怠記録一覧に適用する絞り込み条件。
///
/// グローバルな状態は持たず、常に引数として受け渡す。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    pub status: StatusFilter,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            query: String::new(),
            status: StatusFilter::All,
            from: None,
            to: None,
        }
    }
}

impl FilterState {
    /// 1件の勤怠記録が全ての絞り込み条件を満たすか判定する。
    pub fn matches(&self, entry: &TimeEntry) -> bool {
        self.matches_query(entry) && self.matches_status(entry) && self.matches_date(entry)
    }

    // 空のqueryは全件にマッチする。大文字小文字は区別しない。
    fn matches_query(&self, entry: &TimeEntry) -> bool {
        if self.query.is_empty() {
            return true;
        }

        let query = self.query.to_lowercase();
        [&entry.employee, &entry.initials, &entry.location]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }

    fn matches_status(&self, entry: &TimeEntry) -> bool {
        match self.status {
            StatusFilter::All => true,
            StatusFilter::Only(status) => entry.status == status,
        }
    }

    // 日付範囲は両端を含む。未設定の端は制限なしとして扱う。
    fn matches_date(&self, entry: &TimeEntry) -> bool {
        self.from.map_or(true, |from| entry.date >= from)
            && self.to.map_or(true, |to| entry.date <= to)
    }
}

/// 絞り込み条件を満たす勤怠記録だけを抽出する。
pub fn apply(time_entries: &[TimeEntry], filters: &FilterState) -> Vec<TimeEntry> {
    time_entries
        .iter()
        .filter(|entry| filters.matches(entry))
        .cloned()
        .collect()
}

/// 一覧表示用に勤怠記録を並び替える。
///
/// 日付の降順、出勤時刻の降順(`HH:MM`はゼロ埋めされているため辞書順で比較できる)、
/// idの降順の順に比較する。idが重複しない限り全順序になる。
pub fn sort_for_listing(time_entries: &mut [TimeEntry]) {
    time_entries.sort_by(|left, right| {
        right
            .date
            .cmp(&left.date)
            .then_with(|| right.clock_in.cmp(&left.clock_in))
            .then_with(|| right.id.cmp(&left.id))
    });
}

/// 絞り込み条件を指定するためのCLI引数。
#[derive(Debug, clap::Args)]
pub struct FilterArgs {
    #[clap(
        short = 'q',
        long = "query",
        help = "Matches employee, initials or location"
    )]
    query: Option<String>,

    #[clap(
        short = 's',
        long = "status",
        help = "Filter by status: clocked-in, on-break or clocked-out",
        parse(try_from_str)
    )]
    status: Option<Status>,

    #[clap(
        long = "from",
        help = "Start of the inclusive date range in the format YYYY-MM-DD",
        parse(try_from_str = parse_date),
    )]
    from: Option<NaiveDate>,

    #[clap(
        long = "to",
        help = "End of the inclusive date range in the format YYYY-MM-DD",
        parse(try_from_str = parse_date),
    )]
    to: Option<NaiveDate>,
}

impl FilterArgs {
    /// CLI引数から絞り込み条件を組み立てる。
    pub fn to_filter_state(&self) -> FilterState {
        FilterState {
            query: self.query.clone().unwrap_or_default(),
            status: match self.status {
                Some(status) => StatusFilter::Only(status),
                None => StatusFilter::All,
            },
            from: self.from,
            to: self.to,
        }
    }
}

/// 日付をパースする。
fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("Failed to parse date: {}", s))
}
