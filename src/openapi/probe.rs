use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{info, warn};

/// Connect and overall request timeout used when probing a host.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Answers whether something responds at a URL.
pub trait Probe {
    fn is_reachable(&self, url: &str) -> bool;
}

/// Probe backed by a blocking HTTP GET; any HTTP response counts.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Probe for HttpProbe {
    fn is_reachable(&self, url: &str) -> bool {
        match self.client.get(url).send() {
            Ok(response) => {
                info!(url, status = %response.status(), "host answered");
                true
            }
            Err(err) => {
                warn!(url, error = %err, "connection attempt failed");
                false
            }
        }
    }
}

/// Try `https://<host>` and then `http://<host>`; return the first that answers.
pub fn discover_scheme(host: &str, probe: &dyn Probe) -> Option<String> {
    ["https", "http"]
        .into_iter()
        .map(|scheme| format!("{scheme}://{host}"))
        .find(|candidate| probe.is_reachable(candidate))
}

pub(crate) fn http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()
}
