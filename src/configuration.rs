use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub navegador: NavegadorSettings,
}

#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(Deserialize, Clone)]
pub struct NavegadorSettings {
    /// WebDriver endpoint the session connects to, e.g. a local chromedriver.
    pub webdriver_url: String,
    /// Chrome binary override for constrained deployment environments.
    pub binary_path: Option<String>,
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let builder = config::Config::builder()
        .set_default("application.host", "0.0.0.0")?
        .set_default("application.port", 3000)?
        .set_default("navegador.webdriver_url", "http://localhost:9515")?
        .add_source(config::File::with_name("configuration").required(false))
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        // Plain PORT wins, for platforms that inject it.
        .set_override_option("application.port", std::env::var("PORT").ok())?;

    builder.build()?.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_a_config_file() {
        let settings = get_configuration().expect("Failed to read configuration.");

        assert_eq!(settings.application.host, "0.0.0.0");
        assert_eq!(settings.navegador.webdriver_url, "http://localhost:9515");
        assert!(settings.navegador.binary_path.is_none());
    }
}
