use anyhow::{ensure, Context, Result};
use log::info;

use crate::api::TimesheetRepository;
use crate::datetime;
use crate::time_entry::{NewTimeEntry, Status, TimeEntry};

/// 出勤を打刻するためのサブコマンド。
#[derive(Debug, clap::Args)]
pub struct ClockInArgs {
    #[clap(short = 'e', long = "employee", help = "Employee display name")]
    employee: String,

    #[clap(short = 'i', long = "initials", help = "Employee initials shown on the board")]
    initials: String,

    #[clap(short = 'l', long = "location", help = "Work location")]
    location: String,
}

pub struct ClockInCommand<'a, T: TimesheetRepository> {
    repository: &'a T,
}

impl<'a, T: TimesheetRepository> ClockInCommand<'a, T> {
    /// 新しい`ClockInCommand`を返す。
    pub fn new(repository: &'a T) -> Self {
        Self { repository }
    }

    /// `clock-in`サブコマンドの処理を行う。
    ///
    /// Localタイムゾーンの今日の日付と現在時刻で、退勤時刻が未設定の
    /// 勤怠記録を新規作成する。
    ///
    /// # Arguments
    ///
    /// * `args` - `clock-in`サブコマンドの引数
    pub async fn run(&self, args: ClockInArgs) -> Result<TimeEntry> {
        let draft = NewTimeEntry {
            employee: args.employee,
            initials: args.initials,
            location: args.location,
            date: datetime::today(),
            clock_in: datetime::current_clock(),
            clock_out: None,
            status: Status::ClockedIn,
        };

        let created = self
            .repository
            .create_time_entry(&draft)
            .await
            .context("Failed to create time entry")?;
        info!("Clocked in: {} at {}", created.employee, created.clock_in);

        Ok(created)
    }
}

/// 退勤を打刻するためのサブコマンド。
#[derive(Debug, clap::Args)]
pub struct ClockOutArgs {
    #[clap(long = "id", help = "Id of the time entry to close")]
    id: String,
}

pub struct ClockOutCommand<'a, T: TimesheetRepository> {
    repository: &'a T,
}

impl<'a, T: TimesheetRepository> ClockOutCommand<'a, T> {
    /// 新しい`ClockOutCommand`を返す。
    pub fn new(repository: &'a T) -> Self {
        Self { repository }
    }

    /// `clock-out`サブコマンドの処理を行う。
    ///
    /// 指定されたidの勤怠記録に現在時刻を退勤時刻として設定し、
    /// 状態を`clocked-out`に更新する。既に退勤済みの記録はエラーとする。
    ///
    /// # Arguments
    ///
    /// * `args` - `clock-out`サブコマンドの引数
    pub async fn run(&self, args: ClockOutArgs) -> Result<TimeEntry> {
        let time_entries = self
            .repository
            .list_time_entries()
            .await
            .context("Failed to retrieve time entries")?;
        let entry = time_entries
            .into_iter()
            .find(|entry| entry.id == args.id)
            .with_context(|| format!("Time entry not found: {}", args.id))?;
        ensure!(
            entry.clock_out.is_none(),
            "Time entry is already clocked out: {}",
            args.id
        );

        let closed = TimeEntry {
            clock_out: Some(datetime::current_clock()),
            status: Status::ClockedOut,
            ..entry
        };
        let updated = self
            .repository
            .update_time_entry(&closed)
            .await
            .context("Failed to update time entry")?;
        info!(
            "Clocked out: {} at {}",
            updated.employee,
            updated.clock_out.as_deref().unwrap_or("unknown")
        );

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::{ClockInArgs, ClockInCommand, ClockOutArgs, ClockOutCommand};
    use crate::api::MockTimesheetRepository;
    use crate::time_entry::{Status, TimeEntry};

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
                clock_out: None,
                status: Status::ClockedIn,
            },
            2 => TimeEntry {
                id: "e2".to_string(),
                employee: "Miguel Ortiz".to_string(),
                initials: "MO".to_string(),
                location: "North service hub".to_string(),
                date: "2024-03-04".parse().unwrap(),
                clock_in: "07:00".to_string(),
                clock_out: Some("15:00".to_string()),
                status: Status::ClockedOut,
            },
            _ => panic!("Invalid pattern: {}", pattern),
        }
    }

    /// 出勤の打刻で未退勤の記録が作成されることを確認する。
    #[tokio::test]
    async fn test_clock_in_creates_open_entry() {
        let args = ClockInArgs {
            employee: "Dana Reyes".to_string(),
            initials: "DR".to_string(),
            location: "Springfield depot".to_string(),
        };
        let mut repository = MockTimesheetRepository::new();
        repository
            .expect_create_time_entry()
            .times(1)
            .withf(|draft| {
                draft.employee == "Dana Reyes"
                    && draft.clock_out.is_none()
                    && draft.status == Status::ClockedIn
                    && draft.clock_in.len() == 5
            })
            .returning(|draft| {
                Ok(TimeEntry {
                    id: "e9".to_string(),
                    employee: draft.employee.clone(),
                    initials: draft.initials.clone(),
                    location: draft.location.clone(),
                    date: draft.date,
                    clock_in: draft.clock_in.clone(),
                    clock_out: draft.clock_out.clone(),
                    status: draft.status,
                })
            });

        let command = ClockInCommand::new(&repository);
        let created = command.run(args).await.unwrap();

        assert_eq!(created.id, "e9");
        assert_eq!(created.status, Status::ClockedIn);
        assert!(created.clock_out.is_none());
    }

    /// 退勤の打刻で記録が閉じられることを確認する。
    #[tokio::test]
    async fn test_clock_out_closes_entry() {
        let args = ClockOutArgs {
            id: "e1".to_string(),
        };
        let mut repository = MockTimesheetRepository::new();
        repository
            .expect_list_time_entries()
            .times(1)
            .returning(|| Ok(vec![dummy_entry(1), dummy_entry(2)]));
        repository
            .expect_update_time_entry()
            .times(1)
            .withf(|entry| {
                entry.id == "e1"
                    && entry.status == Status::ClockedOut
                    && entry.clock_out.is_some()
            })
            .returning(|entry| Ok(entry.clone()));

        let command = ClockOutCommand::new(&repository);
        let updated = command.run(args).await.unwrap();

        assert_eq!(updated.id, "e1");
        assert_eq!(updated.status, Status::ClockedOut);
    }

    /// 存在しないidの退勤打刻はエラーになることを確認する。
    #[tokio::test]
    async fn test_clock_out_unknown_id() {
        let args = ClockOutArgs {
            id: "missing".to_string(),
        };
        let mut repository = MockTimesheetRepository::new();
        repository
            .expect_list_time_entries()
            .times(1)
            .returning(|| Ok(vec![dummy_entry(1)]));

        let command = ClockOutCommand::new(&repository);
        let result = command.run(args).await;

        assert!(result.is_err());
    }

    /// 既に退勤済みの記録への打刻はエラーになることを確認する。
    #[tokio::test]
    async fn test_clock_out_already_closed() {
        let args = ClockOutArgs {
            id: "e2".to_string(),
        };
        let mut repository = MockTimesheetRepository::new();
        repository
            .expect_list_time_entries()
            .times(1)
            .returning(|| Ok(vec![dummy_entry(1), dummy_entry(2)]));

        let command = ClockOutCommand::new(&repository);
        let result = command.run(args).await;

        assert!(result.is_err());
    }
}
