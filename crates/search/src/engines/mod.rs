#[cfg(feature = "bing")]
pub mod bing;
#[cfg(feature = "duckduckgo")]
pub mod duckduckgo;
#[cfg(feature = "generic")]
pub mod generic;

use scraper::{ElementRef, Selector};

use crate::error::EngineError;

pub(crate) fn selector(css: &str) -> Result<Selector, EngineError> {
    Selector::parse(css).map_err(|e| EngineError::Markup(format!("{}: {}", css, e)))
}

/// 元素内全部文本，去掉首尾空白
pub(crate) fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
