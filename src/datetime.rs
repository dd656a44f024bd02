use chrono::{DateTime, Local, NaiveDate, Utc};

#[cfg(not(test))]
/// 現在のUTC時間を取得する。
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Localタイムゾーンでの今日の日付を取得する。
pub fn today() -> NaiveDate {
    now().with_timezone(&Local).date_naive()
}

/// Localタイムゾーンでの現在時刻を`HH:MM`形式で取得する。
pub fn current_clock() -> String {
    now().with_timezone(&Local).format("%H:%M").to_string()
}


#[cfg(test)]
pub use mock_datetime::now;

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Local, SecondsFormat, Utc};

    use super::{current_clock, mock_datetime, today};

    /// 何も設定しない場合は、現在時間が取得できることを確認する。
    ///
    ///  - 現在時刻での比較を行なっているため、秒単位で比較している。
    #[test]
    fn test_now() {
        mock_datetime::clear_mock_time();

        assert_eq!(
            mock_datetime::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
        );
    }

    /// モック時間を設定した時に、その時間が取得できることを確認する。
    #[test]
    fn test_now_specific_datetime() {
        let datetime = String::from("2024-03-04T12:00:00+00:00");
        mock_datetime::set_mock_time(
            DateTime::parse_from_rfc3339(datetime.as_str())
                .unwrap()
                .to_utc(),
        );

        assert_eq!(mock_datetime::now().to_rfc3339(), datetime);

        mock_datetime::clear_mock_time();
    }

    /// 今日の日付と現在時刻がモック時間のLocal換算と一致することを確認する。
    #[test]
    fn test_today_and_current_clock_follow_mock() {
        let datetime = DateTime::parse_from_rfc3339("2024-03-04T12:00:00+00:00")
            .unwrap()
            .to_utc();
        mock_datetime::set_mock_time(datetime);

        let local = datetime.with_timezone(&Local);
        assert_eq!(today(), local.date_naive());
        assert_eq!(current_clock(), local.format("%H:%M").to_string());

        mock_datetime::clear_mock_time();
    }
}
