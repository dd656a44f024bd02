use anyhow::{Context, Result};
use log::info;

use crate::api::TimesheetRepository;

/// 勤怠記録を削除するためのサブコマンド。
#[derive(Debug, clap::Args)]
pub struct RemoveArgs {
    #[clap(long = "id", help = "Id of the time entry to remove")]
    id: String,
}

pub struct RemoveCommand<'a, T: TimesheetRepository> {
    repository: &'a T,
}

impl<'a, T: TimesheetRepository> RemoveCommand<'a, T> {
    /// 新しい`RemoveCommand`を返す。
    pub fn new(repository: &'a T) -> Self {
        Self { repository }
    }

    /// `remove`サブコマンドの処理を行う。
    ///
    /// # Arguments
    ///
    /// * `args` - `remove`サブコマンドの引数
    pub async fn run(&self, args: RemoveArgs) -> Result<()> {
        self.repository
            .delete_time_entry(&args.id)
            .await
            .context("Failed to delete time entry")?;
        info!("Removed time entry: {}", args.id);

        Ok(())
    }
}
