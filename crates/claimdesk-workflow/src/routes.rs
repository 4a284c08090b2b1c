//! Dashboard navigation paths.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    CreateClaim,
    ReviewClaims,
    ReviewDetail { claim_id: String },
    NotFound { path: String },
}

impl Route {
    /// Match a path. Query strings and fragments are ignored, as is a leading `#` from
    /// hash-based links and a trailing slash.
    pub fn parse(input: &str) -> Route {
        let trimmed = input.trim();
        let path = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };

        match path {
            "" | "/" => Route::Home,
            "/workflow/create" => Route::CreateClaim,
            "/workflow/review" => Route::ReviewClaims,
            other => match other.strip_prefix("/workflow/review/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Route::ReviewDetail {
                    claim_id: urlencoding::decode(id)
                        .map(|decoded| decoded.into_owned())
                        .unwrap_or_else(|_| id.to_string()),
                },
                _ => Route::NotFound {
                    path: input.to_string(),
                },
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::CreateClaim => "/workflow/create".to_string(),
            Route::ReviewClaims => "/workflow/review".to_string(),
            Route::ReviewDetail { claim_id } => {
                format!("/workflow/review/{}", urlencoding::encode(claim_id))
            }
            Route::NotFound { path } => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
