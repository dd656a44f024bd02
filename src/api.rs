use anyhow::{Context, Result};
use log::info;
use reqwest::{header::CONTENT_TYPE, Client};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::config::Config;
use crate::time_entry::{NewTimeEntry, TimeEntry};

/// 勤怠記録コレクションのリソース名。
const TIME_ENTRIES_RESOURCE: &str = "time-entries";

/// collection取得のレスポンス。
///
/// APIは配列そのものか`{"items": [...]}`のどちらかを返す。
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListPayload<T> {
    Envelope { items: Vec<T> },
    Plain(Vec<T>),
}

impl<T> ListPayload<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            ListPayload::Envelope { items } => items,
            ListPayload::Plain(items) => items,
        }
    }
}

/// 勤怠記録のCRUD操作を提供するリポジトリ。
///
/// コマンドはこのtraitにのみ依存し、通信の詳細には関与しない。
#[cfg_attr(test, mockall::automock)]
pub trait TimesheetRepository {
    /// 勤怠記録を全件取得する。絞り込みはクライアント側で行う。
    async fn list_time_entries(&self) -> Result<Vec<TimeEntry>>;

    /// 勤怠記録を新規作成し、採番された記録を返す。
    async fn create_time_entry(&self, draft: &NewTimeEntry) -> Result<TimeEntry>;

    /// 勤怠記録を更新し、更新後の記録を返す。
    async fn update_time_entry(&self, entry: &TimeEntry) -> Result<TimeEntry>;

    /// 勤怠記録を削除する。
    async fn delete_time_entry(&self, id: &str) -> Result<()>;
}

/// 汎用のRESTリソースAPIと通信するためのクライアント。
///
/// 名前付きコレクションに対するlist/create/update/deleteを提供する。
/// リトライは行わず、失敗はそのままエラーとして呼び出し側に返す。
pub struct RestClient {
    client: Client,
    api_url: String,
    api_token: String,
}

impl RestClient {
    /// 新しい`RestClient`を返す。
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_url: config.api_url.clone(),
            api_token: config.api_token.clone(),
        }
    }

    /// 指定したリソースの全件を取得する。
    async fn list<T: DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>> {
        let payload = self
            .client
            .get(format!("{}/{}", self.api_url, resource))
            .basic_auth(&self.api_token, Some("api-token"))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}/{}", self.api_url, resource))?
            .error_for_status()
            .context("Request returned an error status")?
            .json::<ListPayload<T>>()
            .await
            .context("Failed to deserialize response")?;

        Ok(payload.into_items())
    }

    /// 指定したリソースに1件追加する。レスポンスは作成された項目そのもの。
    async fn create<B, T>(&self, resource: &str, body: &B) -> Result<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let created = self
            .client
            .post(format!("{}/{}", self.api_url, resource))
            .basic_auth(&self.api_token, Some("api-token"))
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}/{}", self.api_url, resource))?
            .error_for_status()
            .context("Request returned an error status")?
            .json::<T>()
            .await
            .context("Failed to deserialize response")?;

        Ok(created)
    }

    /// 指定したリソースの1件を更新する。レスポンスは更新後の項目そのもの。
    async fn update<B, T>(&self, resource: &str, id: &str, body: &B) -> Result<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let updated = self
            .client
            .put(format!("{}/{}/{}", self.api_url, resource, id))
            .basic_auth(&self.api_token, Some("api-token"))
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .with_context(|| {
                format!("Failed to send request to {}/{}/{}", self.api_url, resource, id)
            })?
            .error_for_status()
            .context("Request returned an error status")?
            .json::<T>()
            .await
            .context("Failed to deserialize response")?;

        Ok(updated)
    }

    /// 指定したリソースの1件を削除する。レスポンスボディは確認応答として読み捨てる。
    async fn delete(&self, resource: &str, id: &str) -> Result<()> {
        self.client
            .delete(format!("{}/{}/{}", self.api_url, resource, id))
            .basic_auth(&self.api_token, Some("api-token"))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .with_context(|| {
                format!("Failed to send request to {}/{}/{}", self.api_url, resource, id)
            })?
            .error_for_status()
            .context("Request returned an error status")?;

        Ok(())
    }
}

impl TimesheetRepository for RestClient {
    async fn list_time_entries(&self) -> Result<Vec<TimeEntry>> {
        let time_entries = self
            .list::<TimeEntry>(TIME_ENTRIES_RESOURCE)
            .await
            .context("Failed to list time entries")?;
        info!("length of time entries: {}", time_entries.len());

        Ok(time_entries)
    }

    async fn create_time_entry(&self, draft: &NewTimeEntry) -> Result<TimeEntry> {
        self.create(TIME_ENTRIES_RESOURCE, draft)
            .await
            .context("Failed to create time entry")
    }

    async fn update_time_entry(&self, entry: &TimeEntry) -> Result<TimeEntry> {
        self.update(TIME_ENTRIES_RESOURCE, &entry.id, entry)
            .await
            .with_context(|| format!("Failed to update time entry: {}", entry.id))
    }

    async fn delete_time_entry(&self, id: &str) -> Result<()> {
        self.delete(TIME_ENTRIES_RESOURCE, id)
            .await
            .with_context(|| format!("Failed to delete time entry: {}", id))
    }
}
