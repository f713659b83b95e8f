use chrono::{DateTime, Local, Utc};

use crate::config::API_URL;

pub fn make_api_url(resource: &str) -> String {
    format!("http://{}/api/{}", API_URL.as_str(), resource)
}

/// Formats a todo timestamp in local time, e.g. `Sep 01, 2022 09:30`
pub fn format_timestamp(stamp: &DateTime<Utc>) -> String {
    stamp.with_timezone(&Local).format("%b %d, %Y %H:%M").to_string()
}

#[cfg(test)]
mod utils_test {
    use super::{format_timestamp, make_api_url};
    use crate::config::DEFAULT_API_URL;

    #[test]
    fn test_make_api_url() {
        let resource = "todos";

        let api_url = make_api_url(resource);

        let host = std::env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        assert_eq!(api_url, format!("http://{}/api/todos", host));
    }

    #[test]
    fn test_format_timestamp_has_year() {
        let stamp = chrono::DateTime::parse_from_rfc3339("2022-09-01T12:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);

        assert!(format_timestamp(&stamp).contains("2022"));
    }
}
