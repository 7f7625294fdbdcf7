use crate::utils::error::{MailError, Result};
use serde::{Deserialize, Serialize};
use url::{Origin, Url};

pub const LOCAL_ENDPOINT: &str = "http://localhost:5000/send-mail";
pub const PRODUCTION_ENDPOINT: &str = "https://vartiss-backend-2.onrender.com/send-mail";

const LOOPBACK_HOSTS: [&str; 2] = ["localhost", "127.0.0.1"];

/// Where the submitting page is running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    pub protocol: String,
    pub hostname: String,
    pub pathname: String,
    origin: Option<String>,
}

impl ExecutionContext {
    /// 從頁面網址建立執行環境
    pub fn from_url(page_url: &str) -> Result<Self> {
        let url = Url::parse(page_url).map_err(|e| MailError::InvalidConfigValueError {
            field: "page_url".to_string(),
            value: page_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        let origin = match url.origin() {
            origin @ Origin::Tuple(..) => Some(origin.ascii_serialization()),
            Origin::Opaque(_) => None,
        };

        Ok(Self {
            protocol: format!("{}:", url.scheme()),
            hostname: url.host_str().unwrap_or_default().to_string(),
            pathname: url.path().to_string(),
            origin,
        })
    }

    /// A context with no network origin, like a page opened from disk.
    pub fn detached() -> Self {
        Self {
            protocol: "file:".to_string(),
            hostname: String::new(),
            pathname: String::new(),
            origin: None,
        }
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn is_local(&self) -> bool {
        LOOPBACK_HOSTS.contains(&self.hostname.as_str())
            || self.protocol == "file:"
            || self.origin.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    #[serde(default = "default_local")]
    pub local: String,
    #[serde(default = "default_production")]
    pub production: String,
}

fn default_local() -> String {
    LOCAL_ENDPOINT.to_string()
}

fn default_production() -> String {
    PRODUCTION_ENDPOINT.to_string()
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            local: default_local(),
            production: default_production(),
        }
    }
}

impl Endpoints {
    pub fn new(local: impl Into<String>, production: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            production: production.into(),
        }
    }

    /// Pure function of the context; evaluated on every send.
    pub fn select(&self, context: &ExecutionContext) -> &str {
        if context.is_local() {
            &self.local
        } else {
            &self.production
        }
    }
}
