use std::env::var;

/// Where the remote payments API lives.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn init() -> ApiConfig {
        ApiConfig {
            base_url: normalize(
                var("ZENOPAY_API_BASE_URL").unwrap_or(String::from("https://api.zeno.africa")),
            ),
        }
    }

    pub fn new(base_url: impl Into<String>) -> ApiConfig {
        ApiConfig {
            base_url: normalize(base_url.into()),
        }
    }
}

// Request paths all start with "/", so the base must not end with one.
fn normalize(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}
