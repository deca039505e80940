use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::{ACCEPT, REFERER};
use tracing::{debug, info};

use vrs_config::Credentials;
use vrs_core::{AppError, AppointmentDay, AppointmentTime, Location};

use crate::gateway::AppointmentGateway;
use crate::portal::Portal;
use crate::scrape;
use crate::urls::{self, form_keys};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36";
const ACCEPT_JSON: &str = "application/json, text/javascript, */*; q=0.01";

/// Cookie-session portal driver over reqwest.
///
/// Tracks the current page URL the way a browser tab would, so the
/// appointment endpoints can send a plausible `Referer` and the csrf
/// scrape knows which page to re-fetch.
pub struct HttpPortal {
    client: reqwest::Client,
    base_url: String,
    current_url: String,
}

impl HttpPortal {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            current_url: base_url.to_string(),
        })
    }

    /// GET a page, follow redirects, record where we landed, and
    /// return the HTML.
    async fn visit(&mut self, url: &str) -> Result<String, AppError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(gateway_err)?
            .error_for_status()
            .map_err(gateway_err)?;

        self.current_url = response.url().to_string();
        response.text().await.map_err(gateway_err)
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        csrf_token: &str,
    ) -> Result<T, AppError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, ACCEPT_JSON)
            .header("X-CSRF-Token", csrf_token)
            .header("X-Requested-With", "XMLHttpRequest")
            .header(REFERER, &self.current_url)
            .send()
            .await
            .map_err(gateway_err)?
            .error_for_status()
            .map_err(gateway_err)?;

        response.json::<T>().await.map_err(gateway_err)
    }

    fn resolve(&self, href: &str) -> Result<String, AppError> {
        let page = reqwest::Url::parse(&self.current_url)
            .map_err(|e| AppError::NavigationFailed(e.to_string()))?;
        let absolute = page
            .join(href)
            .map_err(|e| AppError::NavigationFailed(e.to_string()))?;
        Ok(absolute.to_string())
    }
}

fn gateway_err(err: reqwest::Error) -> AppError {
    AppError::Gateway(err.to_string())
}

#[async_trait]
impl Portal for HttpPortal {
    async fn login(&mut self, credentials: &Credentials) -> Result<(), AppError> {
        let sign_in = urls::sign_in_url(&self.base_url);
        let page = self.visit(&sign_in).await?;

        let token = scrape::authenticity_token(&page).ok_or_else(|| {
            AppError::AuthenticationFailed("sign-in page has no authenticity_token".into())
        })?;

        let form = [
            (form_keys::AUTHENTICITY_TOKEN, token.as_str()),
            ("user[email]", credentials.email.as_str()),
            ("user[password]", credentials.password.as_str()),
            ("policy_confirmed", "1"),
            ("commit", "Sign In"),
        ];

        let response = self
            .client
            .post(&sign_in)
            .header(REFERER, &self.current_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::AuthenticationFailed(e.to_string()))?;

        let landed = response.url().to_string();
        if !urls::is_groups_url(&landed) {
            return Err(AppError::AuthenticationFailed(landed));
        }

        self.current_url = landed;
        info!(url = %self.current_url, "Logged in");
        Ok(())
    }

    async fn goto_reschedule(&mut self) -> Result<String, AppError> {
        let group_url = self.current_url.clone();
        let group_page = self.visit(&group_url).await.map_err(|e| {
            AppError::NavigationFailed(format!("could not load group page: {e}"))
        })?;

        let href = scrape::continue_href(&group_page).ok_or_else(|| {
            AppError::NavigationFailed(format!(
                "no continue link on page {}",
                self.current_url
            ))
        })?;

        let continue_url = self.resolve(&href)?;
        self.visit(&continue_url)
            .await
            .map_err(|e| AppError::NavigationFailed(e.to_string()))?;

        let action_id = urls::extract_action_id(&self.current_url).ok_or_else(|| {
            AppError::NavigationFailed(format!(
                "no action id in url {}",
                self.current_url
            ))
        })?;

        // Go directly to the appointment page with the action id.
        let appointment_url = urls::appointment_url(&self.base_url, &action_id);
        self.visit(&appointment_url)
            .await
            .map_err(|e| AppError::NavigationFailed(e.to_string()))?;

        if !urls::is_appointment_url(&self.current_url) {
            return Err(AppError::NavigationFailed(format!(
                "expected appointment page, landed on {}",
                self.current_url
            )));
        }

        info!(action_id = %action_id, "Navigated to reschedule appointment page");
        Ok(action_id)
    }

    async fn csrf_token(&mut self) -> Result<String, AppError> {
        let url = self.current_url.clone();
        let page = self.visit(&url).await?;
        scrape::csrf_token(&page).ok_or(AppError::TokenUnavailable)
    }

    async fn reload(&mut self) -> Result<(), AppError> {
        debug!(url = %self.current_url, "Reloading page");
        let url = self.current_url.clone();
        self.visit(&url).await?;
        Ok(())
    }

    fn current_url(&self) -> &str {
        &self.current_url
    }
}

#[async_trait]
impl AppointmentGateway for HttpPortal {
    async fn list_days(
        &self,
        action_id: &str,
        csrf_token: &str,
        location: Location,
    ) -> Result<Vec<AppointmentDay>, AppError> {
        let url = urls::days_url(&self.base_url, action_id, location.facility_id());
        self.fetch_json(&url, csrf_token).await
    }

    async fn list_times(
        &self,
        action_id: &str,
        csrf_token: &str,
        location: Location,
        date: NaiveDate,
    ) -> Result<AppointmentTime, AppError> {
        let url = urls::times_url(
            &self.base_url,
            action_id,
            location.facility_id(),
            &date.to_string(),
        );
        self.fetch_json(&url, csrf_token).await
    }

    async fn submit(
        &self,
        action_id: &str,
        csrf_token: &str,
        location: Location,
        date: NaiveDate,
        time: &str,
    ) -> Result<u16, AppError> {
        let url = urls::appointment_url(&self.base_url, action_id);
        let facility_id = location.facility_id().to_string();
        let date = date.to_string();

        let form = [
            (form_keys::AUTHENTICITY_TOKEN, csrf_token),
            (form_keys::CONFIRMED_LIMIT_MESSAGE, "1"),
            (form_keys::USE_CONSULATE_CAPACITY, "true"),
            (form_keys::FACILITY_ID, facility_id.as_str()),
            (form_keys::DATE, date.as_str()),
            (form_keys::TIME, time),
        ];

        let response = self
            .client
            .post(&url)
            .header(REFERER, &self.current_url)
            .form(&form)
            .send()
            .await
            .map_err(gateway_err)?;

        let status = response.status();
        info!(status = %status, "Submitted appointment");

        if !status.is_success() {
            return Err(AppError::SubmitRejected(status.as_u16()));
        }
        Ok(status.as_u16())
    }
}
