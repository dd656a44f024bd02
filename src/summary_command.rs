use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate};
use log::info;

use crate::api::TimesheetRepository;
use crate::attendance::{self, AttendanceReport};
use crate::datetime;
use crate::filter::{self, FilterArgs};

/// 期間の集計結果を出力するためのサブコマンド。
#[derive(Debug, clap::Args)]
pub struct SummaryArgs {
    #[clap(flatten)]
    filter: FilterArgs,
}

pub struct SummaryCommand<'a, T: TimesheetRepository> {
    repository: &'a T,
}

impl<'a, T: TimesheetRepository> SummaryCommand<'a, T> {
    /// 新しい`SummaryCommand`を返す。
    ///
    /// # Arguments
    /// * `repository` - 勤怠記録APIと通信するためのリポジトリ
    pub fn new(repository: &'a T) -> Self {
        Self { repository }
    }

    /// `summary`サブコマンドの処理を行う。
    ///
    /// 全件を取得し、絞り込み条件を満たす記録から日毎の合計、期間合計、
    /// 状態ごとの件数を導出する。日付範囲が指定されていない場合は、
    /// Localタイムゾーンで今日を含む週(月曜から日曜)を利用する。
    ///
    /// # Arguments
    ///
    /// * `args` - `summary`サブコマンドの引数
    pub async fn run(&self, args: SummaryArgs) -> Result<AttendanceReport> {
        let mut filters = args.filter.to_filter_state();
        if filters.from.is_none() && filters.to.is_none() {
            let (monday, sunday) = week_range(datetime::today());
            filters.from = Some(monday);
            filters.to = Some(sunday);
        }
        info!("Date range: {:?} ~ {:?}", filters.from, filters.to);

        let time_entries = self
            .repository
            .list_time_entries()
            .await
            .context("Failed to retrieve time entries")?;
        info!("Time entries retrieved successfully.");

        let visible = filter::apply(&time_entries, &filters);

        Ok(attendance::summarize(&visible))
    }
}

/// 指定した日付を含む週の月曜と日曜を返す。
fn week_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = date - Duration::days(date.weekday().num_days_from_monday() as i64);
    let sunday = monday + Duration::days(6);

    (monday, sunday)
}
