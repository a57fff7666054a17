use crate::application::ports::CsrfTokenSource;

/// 設定やページから取得済みのCSRFトークン
#[derive(Debug, Clone, Default)]
pub struct StaticCsrfToken {
    token: Option<String>,
}

impl StaticCsrfToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn missing() -> Self {
        Self { token: None }
    }

    pub fn from_option(token: Option<String>) -> Self {
        Self {
            token: token.filter(|value| !value.trim().is_empty()),
        }
    }
}

impl CsrfTokenSource for StaticCsrfToken {
    fn csrf_token(&self) -> Option<String> {
        self.token.clone()
    }
}
