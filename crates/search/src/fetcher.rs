//! 共享 HTTP 抓取器：随机 User-Agent、请求前随机延迟、有限次重试

use rand::seq::SliceRandom;
use rand::Rng;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::config::SearchSettings;
use crate::error::EngineError;

/// 请求前随机延迟的上限（秒）
const MAX_DELAY_SECS: f64 = 60.0;

const FALLBACK_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub struct HttpFetcher {
    client: Client,
    user_agents: Vec<String>,
    min_delay: f64,
    max_delay: f64,
    max_attempts: u32,
    throttle_backoff: Duration,
}

impl HttpFetcher {
    /// 延迟必须是 [0, 60] 秒内的有限值，否则返回 `EngineError::Settings`
    pub fn new(settings: &SearchSettings) -> Result<Self, EngineError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        tracing::debug!(
            "Created HttpFetcher: timeout={}s, delay={:.1}-{:.1}s, attempts={}",
            settings.timeout_secs,
            settings.min_delay_secs,
            settings.max_delay_secs,
            settings.max_attempts
        );

        Ok(Self {
            client,
            user_agents: settings.user_agents.clone(),
            min_delay: checked_delay("min_delay_secs", settings.min_delay_secs)?,
            max_delay: checked_delay("max_delay_secs", settings.max_delay_secs)?,
            max_attempts: settings.max_attempts.max(1),
            throttle_backoff: Duration::from_secs(settings.throttle_backoff_secs),
        })
    }

    /// 随机选择一个 User-Agent
    fn pick_user_agent(&self) -> String {
        self.user_agents
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_else(|| FALLBACK_USER_AGENT.to_string())
    }

    /// 在 [min_delay, max_delay] 内均匀采样
    fn pick_delay(&self) -> Duration {
        let secs = if self.max_delay <= self.min_delay {
            self.min_delay
        } else {
            rand::thread_rng().gen_range(self.min_delay..=self.max_delay)
        };
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO)
    }

    /// GET 一个页面并返回正文，仅 200 视为成功
    pub async fn get_html(&self, url: &str) -> Result<String, EngineError> {
        let mut last_error = EngineError::Status(0);

        for attempt in 1..=self.max_attempts {
            tokio::time::sleep(self.pick_delay()).await;

            let response = self
                .client
                .get(url)
                .header(USER_AGENT, self.pick_user_agent())
                .header(
                    ACCEPT,
                    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
                )
                .header(ACCEPT_LANGUAGE, "en-US,en;q=0.5")
                .send()
                .await;

            let response = match response {
                Ok(response) => response,
                Err(e) => {
                    tracing::debug!("Request to {} failed (attempt {}): {}", url, attempt, e);
                    last_error = EngineError::Request(e);
                    continue;
                }
            };

            match response.status() {
                StatusCode::OK => return Ok(response.text().await?),
                StatusCode::TOO_MANY_REQUESTS => {
                    tracing::warn!(
                        "Throttled by {} (attempt {}), backing off {:?}",
                        url,
                        attempt,
                        self.throttle_backoff
                    );
                    last_error = EngineError::Throttled(attempt);
                    if attempt < self.max_attempts {
                        tokio::time::sleep(self.throttle_backoff).await;
                    }
                }
                status => {
                    tracing::debug!("{} returned HTTP {}", url, status);
                    return Err(EngineError::Status(status.as_u16()));
                }
            }
        }

        Err(last_error)
    }
}

fn checked_delay(name: &str, secs: f64) -> Result<f64, EngineError> {
    if secs.is_finite() && (0.0..=MAX_DELAY_SECS).contains(&secs) {
        Ok(secs)
    } else {
        Err(EngineError::Settings(format!(
            "{} must be between 0 and {} seconds, got {}",
            name, MAX_DELAY_SECS, secs
        )))
    }
}

/// 查询词 URL 编码（空格编码为 `+`）
pub fn encode_query(query: &str) -> String {
    url::form_urlencoded::byte_serialize(query.as_bytes()).collect()
}
