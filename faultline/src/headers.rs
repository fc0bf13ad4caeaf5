pub(crate) const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
pub(crate) const JSON_CONTENT_TYPE: &str = "application/json";
