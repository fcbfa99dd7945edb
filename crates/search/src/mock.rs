//! 所有引擎都没有结果时的占位记录

use chatbox_types::SearchRecord;

use crate::fetcher::encode_query;

pub fn mock_records(query: &str) -> Vec<SearchRecord> {
    vec![
        SearchRecord {
            title: format!("نتایج جستجو برای: {}", query),
            url: format!("https://www.example.com/search?q={}", encode_query(query)),
            description: "این یک نتیجه نمونه است. هیچ‌کدام از موتورهای جستجو پاسخی برنگرداندند."
                .to_string(),
            search_time: String::new(),
            query: query.to_string(),
        },
        SearchRecord {
            title: "راهنمای تنظیم جستجو".to_string(),
            url: "https://www.example.com/search-help".to_string(),
            description: "اتصال اینترنت و بخش [search] فایل config.toml را بررسی کنید.".to_string(),
            search_time: String::new(),
            query: query.to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_reference_query() {
        let records = mock_records("هوش مصنوعی");
        assert_eq!(records.len(), 2);
        assert!(records[0].title.ends_with("هوش مصنوعی"));
        assert!(records[0].url.starts_with("https://www.example.com/search?q=%D9%87"));
        assert!(records.iter().all(|r| r.query == "هوش مصنوعی"));
    }
}
