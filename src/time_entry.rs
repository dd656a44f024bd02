use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 勤怠記録の状態を表す列挙型。
///
/// wire上はkebab-caseの文字列(`clocked-in`など)で表現される。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    ClockedIn,
    OnBreak,
    ClockedOut,
}

impl FromStr for Status {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clocked-in" => Ok(Status::ClockedIn),
            "on-break" => Ok(Status::OnBreak),
            "clocked-out" => Ok(Status::ClockedOut),
            _ => Err(anyhow!("Unknown status: {}", s)),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::ClockedIn => "clocked-in",
            Status::OnBreak => "on-break",
            Status::ClockedOut => "clocked-out",
        };
        write!(f, "{}", label)
    }
}

/// 1件の勤怠記録。
///
/// `clock_in`/`clock_out`は`HH:MM`形式の文字列のまま保持する。
/// パースできるかどうかは集計時にのみ問題になる。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: String,
    pub employee: String,
    pub initials: String,
    pub location: String,
    pub date: NaiveDate,
    pub clock_in: String,
    #[serde(default)]
    pub clock_out: Option<String>,
    pub status: Status,
}

/// 新規作成用の勤怠記録。idはサーバー側で採番される。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTimeEntry {
    pub employee: String,
    pub initials: String,
    pub location: String,
    pub date: NaiveDate,
    pub clock_in: String,
    #[serde(default)]
    pub clock_out: Option<String>,
    pub status: Status,
}
