use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct FarmwatchConfig {
    #[serde(default)]
    pub endpoint: EndpointSettings,
    #[serde(default)]
    pub poll: PollSettings,
    #[serde(default)]
    pub map: MapSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EndpointSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollSettings {
    /// Monitoring refresh cadence in seconds.
    #[serde(default = "default_monitoring_secs")]
    pub monitoring_secs: u64,
    /// Background metadata refresh cadence in seconds.
    #[serde(default = "default_metadata_secs")]
    pub metadata_secs: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            monitoring_secs: default_monitoring_secs(),
            metadata_secs: default_metadata_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MapSettings {
    #[serde(default = "default_lat")]
    pub default_lat: f64,
    #[serde(default = "default_lon")]
    pub default_lon: f64,
    #[serde(default = "default_zoom")]
    pub default_zoom: u8,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            default_lat: default_lat(),
            default_lon: default_lon(),
            default_zoom: default_zoom(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_monitoring_secs() -> u64 {
    5
}

fn default_metadata_secs() -> u64 {
    30
}

fn default_lat() -> f64 {
    19.4326
}

fn default_lon() -> f64 {
    -99.1332
}

fn default_zoom() -> u8 {
    15
}

/// Load `config/farmwatch.toml`, falling back to defaults when the file or
/// individual keys are absent.
pub fn load_config() -> anyhow::Result<FarmwatchConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/farmwatch").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = FarmwatchConfig::default();
        assert_eq!(cfg.endpoint.base_url, "http://127.0.0.1:5000");
        assert_eq!(cfg.poll.monitoring_secs, 5);
        assert_eq!(cfg.poll.metadata_secs, 30);
        assert_eq!(cfg.map.default_zoom, 15);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(
                "[endpoint]\nbase_url = \"http://farm.local:8080\"\n\n[poll]\nmonitoring_secs = 2\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let cfg: FarmwatchConfig = settings.try_deserialize().unwrap();

        assert_eq!(cfg.endpoint.base_url, "http://farm.local:8080");
        assert_eq!(cfg.poll.monitoring_secs, 2);
        assert_eq!(cfg.poll.metadata_secs, 30);
    }
}
