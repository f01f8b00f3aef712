//! Loading a realistic service configuration from file defaults and
//! environment overrides
//!
//! Tests use temporary directories with real YAML fixtures to verify:
//! - Dotted keys resolved through nested YAML mappings
//! - Environment overrides taking precedence over file values
//! - List values recovered with `split` and converted element-wise
//! - Optional sections with defaults and presence predicates

use confbind_core::transforms::{as_boolean, as_number, map, split, trim};
use confbind_core::{
    Binding, Configurable, Declaration, Error, Loadable, Optional, PresenceContext, Registry,
    Result, Value, assign_value,
};
use confbind_sources::{EnvSource, LayeredSource, MapSource, YamlSource};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
struct TlsConfig {
    cert: String,
    key: String,
}

impl Loadable for TlsConfig {
    fn assign(&mut self, field: &str, value: Value) -> Result<()> {
        match field {
            "cert" => assign_value(&mut self.cert, field, value),
            "key" => assign_value(&mut self.key, field, value),
            _ => Err(Error::unknown_field::<Self>(field)),
        }
    }
}

impl Configurable for TlsConfig {
    fn declare(decl: &mut Declaration<'_, Self>) -> Result<()> {
        decl.key("cert", "server.tls.cert")?
            .key("key", "server.tls.key")?;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct ServerConfig {
    host: String,
    port: u16,
    debug: bool,
    origins: Vec<String>,
    retry_delays: Vec<u64>,
    tls: Option<TlsConfig>,
}

impl Loadable for ServerConfig {
    fn assign(&mut self, field: &str, value: Value) -> Result<()> {
        match field {
            "host" => assign_value(&mut self.host, field, value),
            "port" => assign_value(&mut self.port, field, value),
            "debug" => assign_value(&mut self.debug, field, value),
            "origins" => assign_value(&mut self.origins, field, value),
            "retry_delays" => assign_value(&mut self.retry_delays, field, value),
            "tls" => assign_value(&mut self.tls, field, value),
            _ => Err(Error::unknown_field::<Self>(field)),
        }
    }
}

impl Configurable for ServerConfig {
    fn declare(decl: &mut Declaration<'_, Self>) -> Result<()> {
        decl.bind("host", Binding::key("server.host").transform(trim()))?
            .bind("port", Binding::key("server.port").transform(as_number()))?
            .optional("port", Optional::with_default(8080))
            .bind("debug", Binding::key("server.debug").transform(as_boolean()))?
            .optional("debug", Optional::with_default(false))
            .bind(
                "origins",
                Binding::key("server.origins")
                    .transform(split(","))
                    .transform(map(trim())),
            )?
            .optional("origins", Optional::present())
            .bind(
                "retry_delays",
                Binding::key("server.retry_delays")
                    .transform(split(","))
                    .transform(map(as_number())),
            )?
            .optional("retry_delays", Optional::with_default(vec![100, 500]))
            .nested::<TlsConfig>("tls")?
            .optional(
                "tls",
                Optional::predicate(|cx: &PresenceContext<'_>| cx.source.has("server.tls.cert")),
            );
        Ok(())
    }
}

fn registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .register::<TlsConfig>()
        .unwrap()
        .register::<ServerConfig>()
        .unwrap();
    registry
}

/// Route load events to the test writer; set `RUST_LOG=confbind_core=trace` to see them
fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

fn write_defaults(dir: &TempDir, yaml: &str) -> std::path::PathBuf {
    let path = dir.path().join("default.yaml");
    std::fs::write(&path, yaml).unwrap();
    path
}

#[tokio::test]
async fn test_load_from_yaml_file() -> anyhow::Result<()> {
    init_tracing();
    let dir = TempDir::new()?;
    let path = write_defaults(
        &dir,
        r#"
server:
  host: "  api.internal  "
  port: 9443
  debug: "TRUE"
  origins:
    - https://a.example
    - " https://b.example"
  retry_delays: 10, 20, 40
  tls:
    cert: /etc/tls/cert.pem
    key: /etc/tls/key.pem
"#,
    );

    let source = YamlSource::from_path(&path)?;
    let config: ServerConfig = registry().load_new(&source).await?;

    assert_eq!(config.host, "api.internal");
    assert_eq!(config.port, 9443);
    assert!(config.debug);
    assert_eq!(
        config.origins,
        vec!["https://a.example".to_string(), "https://b.example".to_string()]
    );
    assert_eq!(config.retry_delays, vec![10, 20, 40]);
    assert_eq!(
        config.tls,
        Some(TlsConfig {
            cert: "/etc/tls/cert.pem".to_string(),
            key: "/etc/tls/key.pem".to_string(),
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_defaults_fill_missing_optional_fields() -> anyhow::Result<()> {
    let source = YamlSource::parse("server:\n  host: localhost\n")?;
    let config: ServerConfig = registry().load_new(&source).await?;

    assert_eq!(config.host, "localhost");
    assert_eq!(config.port, 8080);
    assert!(!config.debug);
    assert!(config.origins.is_empty());
    assert_eq!(config.retry_delays, vec![100, 500]);
    assert!(config.tls.is_none());
    Ok(())
}

#[tokio::test]
async fn test_environment_overrides_file() -> anyhow::Result<()> {
    init_tracing();
    let dir = TempDir::new()?;
    let path = write_defaults(&dir, "server:\n  host: file-host\n  port: 80\n");

    let source = LayeredSource::new()
        .with(EnvSource::from_vars([
            ("APP_SERVER_PORT", "8443"),
            ("APP_SERVER_DEBUG", "true"),
        ])
        .with_prefix("APP"))
        .with(YamlSource::from_path(&path)?);

    let config: ServerConfig = registry().load_new(&source).await?;

    assert_eq!(config.host, "file-host");
    assert_eq!(config.port, 8443);
    assert!(config.debug);
    Ok(())
}

#[tokio::test]
async fn test_missing_required_key_fails() {
    let source = MapSource::new().with("server.port", "80");
    let err = registry()
        .load_new::<ServerConfig>(&source)
        .await
        .unwrap_err();
    assert!(err.is_source_error());
    assert!(err.to_string().contains("server.host"));
}

#[tokio::test]
async fn test_incomplete_tls_section_fails_whole_load() {
    let source = MapSource::new()
        .with("server.host", "h")
        .with("server.tls.cert", "/cert.pem");
    let err = registry()
        .load_new::<ServerConfig>(&source)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MissingKey { ref key } if key == "server.tls.key"));
}

#[tokio::test]
async fn test_bad_port_is_an_assignment_error() {
    let source = MapSource::new()
        .with("server.host", "h")
        .with("server.port", "not-a-port");
    let err = registry()
        .load_new::<ServerConfig>(&source)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Assign { ref field, .. } if field == "port"));
}
