use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, ensure, Result};

/// セッションのロール。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Admin,
    Manager,
}

/// ロールに割り当てられる操作権限。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    /// 勤怠記録の閲覧と集計。
    ViewTimesheet,
    /// 出退勤の打刻。
    RecordTime,
    /// 勤怠記録の削除などの管理操作。
    ManageTimesheet,
}

impl Role {
    /// ロールごとの権限の対応表。
    pub fn capabilities(self) -> &'static [Capability] {
        match self {
            Role::Admin => &[
                Capability::ViewTimesheet,
                Capability::RecordTime,
                Capability::ManageTimesheet,
            ],
            Role::Manager => &[Capability::ViewTimesheet, Capability::RecordTime],
        }
    }

    pub fn allows(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            _ => Err(anyhow!("Unknown role: {}", s)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
        };
        write!(f, "{}", label)
    }
}

/// ロールが権限を持っていることを確認する。持っていない場合はエラーを返す。
pub fn ensure_capability(role: Role, capability: Capability) -> Result<()> {
    ensure!(
        role.allows(capability),
        "Role {} is not allowed to perform this operation: {:?}",
        role,
        capability
    );

    Ok(())
}
