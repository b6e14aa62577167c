use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;

use crate::config::ExplorerConfig;
use crate::error::LoadError;

/// Something that can return the HTML body behind a URL.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<String, LoadError>;
}

/// Blocking HTTP fetcher; one GET per call, no retries.
pub struct HttpFetcher {
    client: Client,
    user_agent: String,
}

impl HttpFetcher {
    pub fn new(config: &ExplorerConfig) -> Result<Self, LoadError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(LoadError::Client)?;
        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
        })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, LoadError> {
        let http_err = |source| LoadError::Http {
            url: url.to_string(),
            source,
        };
        let resp = self
            .client
            .get(url)
            .header(USER_AGENT, self.user_agent.as_str())
            .send()
            .map_err(http_err)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        resp.text().map_err(http_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_client_builds() {
        assert!(HttpFetcher::new(&ExplorerConfig::default()).is_ok());
    }

    #[test]
    fn client_errors_do_not_pretend_to_be_requests() {
        // an unparseable URL fails before any I/O
        let source = reqwest::blocking::get("not a url").unwrap_err();
        let msg = LoadError::Client(source).to_string();
        assert!(msg.starts_with("could not set up the HTTP client: "), "{msg}");
        assert!(!msg.contains("request for"));
    }
}
