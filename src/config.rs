use std::{env, fs, path::PathBuf};

use anyhow::{Context, Result};

use crate::role::Role;

const DEFAULT_API_URL: &str = "https://api.fieldtime.app/v1";

/// 起動時に1回だけ読み込むセッション設定。
#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: String,
    pub api_token: String,
    pub role: Role,
}

impl Config {
    /// 環境変数から設定を読み込む。
    ///
    /// - `FIELDTIME_API_URL` - リソースAPIのベースURL。未設定ならホスト版を使う。
    /// - `FIELDTIME_API_TOKEN` - 認証トークン。未設定ならトークンファイルから読む。
    /// - `FIELDTIME_ROLE` - `admin`または`manager`。未設定なら`manager`。
    pub fn from_env() -> Result<Self> {
        let api_url = env::var("FIELDTIME_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_token = match env::var("FIELDTIME_API_TOKEN") {
            Ok(token) => token,
            Err(_) => read_token_file().context(
                "FIELDTIME_API_TOKEN must be set, or a token file must exist in the config directory",
            )?,
        };
        let role = match env::var("FIELDTIME_ROLE") {
            Ok(role) => role
                .parse()
                .with_context(|| format!("Failed to parse FIELDTIME_ROLE: {}", role))?,
            Err(_) => Role::Manager,
        };

        Ok(Self {
            api_url,
            api_token,
            role,
        })
    }
}

/// トークンファイルからトークンを読み込む。前後の空白と改行は取り除く。
fn read_token_file() -> Result<String> {
    let path = token_file_path().context("Failed to resolve the user config directory")?;
    let token = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read token file: {}", path.display()))?;

    Ok(token.trim().to_string())
}

fn token_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("fieldtime").join("token"))
}
