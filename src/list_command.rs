use anyhow::{Context, Result};
use log::info;

use crate::api::TimesheetRepository;
use crate::filter::{self, FilterArgs};
use crate::time_entry::TimeEntry;

/// 勤怠記録の一覧を出力するためのサブコマンド。
#[derive(Debug, clap::Args)]
pub struct ListArgs {
    #[clap(flatten)]
    filter: FilterArgs,
}

pub struct ListCommand<'a, T: TimesheetRepository> {
    repository: &'a T,
}

impl<'a, T: TimesheetRepository> ListCommand<'a, T> {
    /// 新しい`ListCommand`を返す。
    ///
    /// # Arguments
    /// * `repository` - 勤怠記録APIと通信するためのリポジトリ
    pub fn new(repository: &'a T) -> Self {
        Self { repository }
    }

    /// `list`サブコマンドの処理を行う。
    ///
    /// 全件を取得し、引数で指定された絞り込み条件を満たす記録だけを返す。
    /// 並び替えは表示側で行う。
    ///
    /// # Arguments
    ///
    /// * `args` - `list`サブコマンドの引数
    pub async fn run(&self, args: ListArgs) -> Result<Vec<TimeEntry>> {
        let filters = args.filter.to_filter_state();

        let time_entries = self
            .repository
            .list_time_entries()
            .await
            .context("Failed to retrieve time entries")?;
        info!("Time entries retrieved successfully.");

        let visible = filter::apply(&time_entries, &filters);
        info!("{} of {} time entries visible", visible.len(), time_entries.len());

        Ok(visible)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{ListArgs, ListCommand};
    use crate::api::MockTimesheetRepository;
    use crate::time_entry::{Status, TimeEntry};

    /// テスト用にListArgsをコマンドラインからパースする。
    #[derive(Debug, Parser)]
    struct TestArgs {
        #[clap(flatten)]
        list: ListArgs,
    }

    fn parse_args(argv: &[&str]) -> ListArgs {
        TestArgs::try_parse_from(std::iter::once("test").chain(argv.iter().copied()))
            .unwrap()
            .list
    }

    /// テスト用にダミーのTimeEntryを作成する。
    fn dummy_entry(pattern: u8) -> TimeEntry {
        match pattern {
            1 => TimeEntry {
                id: "e1".to_string(),
                employee: "Dana Reyes".to_string(),
                initials: "DR".to_string(),
                location: "Springfield depot".to_string(),
                date: "2024-03-04".parse().unwrap(),
                clock_in: "08:00".to_string(),
                clock_out: Some("16:00".to_string()),
                status: Status::ClockedOut,
            },
            2 => TimeEntry {
                id: "e2".to_string(),
                employee: "Miguel Ortiz".to_string(),
                initials: "MO".to_string(),
                location: "North service hub".to_string(),
                date: "2024-03-05".parse().unwrap(),
                clock_in: "09:30".to_string(),
                clock_out: None,
                status: Status::OnBreak,
            },
            _ => panic!("Invalid pattern: {}", pattern),
        }
    }

    /// 絞り込み条件なしで全件が返ることを確認する。
    #[tokio::test]
    async fn test_list_command_no_filter() {
        let args = parse_args(&[]);
        let mut repository = MockTimesheetRepository::new();
        repository
            .expect_list_time_entries()
            .times(1)
            .returning(|| Ok(vec![dummy_entry(1), dummy_entry(2)]));

        let command = ListCommand::new(&repository);
        let visible = command.run(args).await.unwrap();

        assert_eq!(visible.len(), 2);
    }

    /// 絞り込み条件を満たす記録だけが返ることを確認する。
    #[tokio::test]
    async fn test_list_command_with_filter() {
        let args = parse_args(&["--status", "on-break", "--from", "2024-03-05"]);
        let mut repository = MockTimesheetRepository::new();
        repository
            .expect_list_time_entries()
            .times(1)
            .returning(|| Ok(vec![dummy_entry(1), dummy_entry(2)]));

        let command = ListCommand::new(&repository);
        let visible = command.run(args).await.unwrap();

        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "e2");
    }

    /// 取得に失敗した場合はエラーが返ることを確認する。
    #[tokio::test]
    async fn test_list_command_fetch_error() {
        let args = parse_args(&[]);
        let mut repository = MockTimesheetRepository::new();
        repository
            .expect_list_time_entries()
            .times(1)
            .returning(|| Err(anyhow::anyhow!("connection refused")));

        let command = ListCommand::new(&repository);
        let result = command.run(args).await;

        assert!(result.is_err());
    }
}
