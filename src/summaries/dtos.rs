use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::Summary;

/// Trimmed, non-empty value of an optional request field.
pub(crate) fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SummarizeTextRequest {
    pub text: Option<String>,
    /// Target language code; English when absent.
    pub language: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SummarizeUrlRequest {
    pub url: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    pub text: Option<String>,
    pub target_language: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveSummaryRequest {
    pub original_text: Option<String>,
    pub summary_text: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub translated_text: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HistoryResponse {
    pub history: Vec<Summary>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteAllResponse {
    pub message: String,
    pub deleted: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_filters_blank() {
        assert_eq!(present(&None), None);
        assert_eq!(present(&Some("   ".into())), None);
        assert_eq!(present(&Some(" fr ".into())), Some("fr"));
    }

    #[test]
    fn test_translate_request_camel_case() {
        let request: TranslateRequest =
            serde_json::from_str(r#"{"text":"Hi","targetLanguage":"es"}"#).unwrap();
        assert_eq!(request.target_language.as_deref(), Some("es"));
    }

    #[test]
    fn test_save_request_missing_fields_are_none() {
        let request: SaveSummaryRequest =
            serde_json::from_str(r#"{"originalText":"A"}"#).unwrap();
        assert_eq!(request.original_text.as_deref(), Some("A"));
        assert!(request.summary_text.is_none());
        assert!(request.language.is_none());
    }
}
