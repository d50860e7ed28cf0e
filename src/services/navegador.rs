use std::time::Duration;

use anyhow::Context;
use thirtyfour::{
    CapabilitiesHelper, ChromiumLikeCapabilities, DesiredCapabilities, PageLoadStrategy, WebDriver,
};
use tokio::sync::{Mutex, MutexGuard};

use crate::{configuration::NavegadorSettings, domain::ConsultaError};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const PAGE_LOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Managed browser session. At most one WebDriver session exists per process;
/// the mutex slot guards lazy initialization and serializes navigation, so
/// concurrent consultas never interleave on the shared page.
pub struct Navegador {
    driver: Mutex<Option<WebDriver>>,
    settings: NavegadorSettings,
}

impl Navegador {
    pub fn new(settings: NavegadorSettings) -> Self {
        Navegador {
            driver: Mutex::new(None),
            settings,
        }
    }

    /// Lazily launches the browser session. Calling this with a live session
    /// is a no-op; concurrent callers serialize on the slot and the second
    /// one finds the session already created.
    pub async fn inicializar(&self) -> Result<(), ConsultaError> {
        let mut slot = self.driver.lock().await;
        if slot.is_some() {
            return Ok(());
        }

        log::info!(
            "Launching headless browser session via {}",
            self.settings.webdriver_url
        );
        let driver = lancar_sessao(&self.settings)
            .await
            .map_err(|e| ConsultaError::Inicializacao(format!("{:#}", e)))?;
        *slot = Some(driver);

        Ok(())
    }

    pub async fn pronto(&self) -> bool {
        self.driver.lock().await.is_some()
    }

    /// Shuts the browser down if it is running. Idempotent.
    pub async fn fechar(&self) -> anyhow::Result<()> {
        let mut slot = self.driver.lock().await;
        if let Some(driver) = slot.take() {
            log::info!("Closing browser session");
            driver
                .quit()
                .await
                .context("Failed to quit the WebDriver session")?;
        }

        Ok(())
    }

    /// Exclusive access to the session slot for the duration of one consulta.
    pub(crate) async fn sessao(&self) -> MutexGuard<'_, Option<WebDriver>> {
        self.driver.lock().await
    }
}

async fn lancar_sessao(settings: &NavegadorSettings) -> anyhow::Result<WebDriver> {
    let mut caps = DesiredCapabilities::chrome();
    caps.add_arg("--headless=new")?;
    caps.add_arg("--no-sandbox")?;
    caps.add_arg("--disable-gpu")?;
    caps.add_arg("--disable-dev-shm-usage")?;
    caps.add_arg("--window-size=1366,768")?;
    caps.add_arg(&format!("--user-agent={}", USER_AGENT))?;
    // The page is scanned as text, so skip images to cut load time.
    caps.add_arg("--blink-settings=imagesEnabled=false")?;
    // DOM-ready is enough; the lookup page keeps loading subresources long
    // after the result table is parsed.
    caps.set_page_load_strategy(PageLoadStrategy::Eager)?;
    if let Some(path) = &settings.binary_path {
        caps.set_binary(path)?;
    }

    let driver = WebDriver::new(&settings.webdriver_url, caps)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to WebDriver at {}",
                settings.webdriver_url
            )
        })?;

    if let Err(e) = driver.set_page_load_timeout(PAGE_LOAD_TIMEOUT).await {
        // Leave no half-configured session behind.
        let _ = driver.quit().await;
        return Err(anyhow::Error::new(e).context("Failed to set the page load timeout"));
    }

    Ok(driver)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn navegador() -> Navegador {
        Navegador::new(NavegadorSettings {
            webdriver_url: "http://localhost:9515".to_string(),
            binary_path: None,
        })
    }

    #[tokio::test]
    async fn a_fresh_session_is_not_ready() {
        assert!(!navegador().pronto().await);
    }

    #[tokio::test]
    async fn closing_a_session_that_never_opened_is_a_no_op() {
        let navegador = navegador();

        navegador.fechar().await.unwrap();
        navegador.fechar().await.unwrap();

        assert!(!navegador.pronto().await);
    }
}
