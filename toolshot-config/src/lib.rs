//! Loader for the `toolshot.yaml` target manifest with environment overlays.
//!
//! Precedence: `TOOLSHOT_`-prefixed environment variables win over file
//! values, and `${VAR}` placeholders inside any string are expanded after
//! the sources are merged.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// Top-level manifest: the ordered target list plus browser/paths sections.
#[derive(Debug, Deserialize)]
pub struct ToolshotConfig {
    pub version: Option<String>,
    #[serde(default)]
    pub targets: Vec<TargetSpec>,
    #[serde(default)]
    pub browser: BrowserSpec,
    #[serde(default)]
    pub paths: PathsSpec,
}

/// One tool page to verify.
#[derive(Debug, Deserialize)]
pub struct TargetSpec {
    /// Path-safe identifier; resolves to `tools/<id>/index.html`.
    pub id: String,
    /// Optional expected display title, compared loosely after load.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Browser session settings.
#[derive(Debug, Deserialize)]
pub struct BrowserSpec {
    #[serde(default = "default_webdriver_endpoint")]
    pub webdriver_url: String,
    #[serde(default = "default_headless")]
    pub headless: bool,
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    #[serde(default = "default_window_height")]
    pub window_height: u32,
}

impl Default for BrowserSpec {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_endpoint(),
            headless: default_headless(),
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

/// Input/output directories for a run.
#[derive(Debug, Deserialize)]
pub struct PathsSpec {
    #[serde(default = "default_base_dir")]
    pub base_dir: String,
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
}

impl Default for PathsSpec {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            out_dir: default_out_dir(),
        }
    }
}

fn default_webdriver_endpoint() -> String {
    "http://localhost:9515".into()
}
fn default_headless() -> bool {
    true
}
fn default_window_width() -> u32 {
    1280
}
fn default_window_height() -> u32 {
    800
}
fn default_base_dir() -> String {
    ".".into()
}
fn default_out_dir() -> String {
    "verification".into()
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct ToolshotConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for ToolshotConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolshotConfigLoader {
    /// Start with sensible defaults: YAML file + `TOOLSHOT_` env overrides.
    ///
    /// ```
    /// use toolshot_config::ToolshotConfigLoader;
    ///
    /// let config = ToolshotConfigLoader::new()
    ///     .with_yaml_str("version: '1'\ntargets: []")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert!(config.targets.is_empty());
    /// ```
    pub fn new() -> Self {
        let builder =
            Config::builder().add_source(Environment::with_prefix("TOOLSHOT").separator("__"));
        Self { builder }
    }

    /// Attach a manifest file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self.builder.add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a manifest file that may be absent, so runs in a bare working
    /// directory fall back to env overrides and built-in defaults.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use toolshot_config::ToolshotConfigLoader;
    ///
    /// let cfg = ToolshotConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// version: "test"
    /// targets:
    ///   - id: "036-retro-filter"
    ///     title: "Retro Filter"
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.targets.len(), 1);
    /// assert_eq!(cfg.targets[0].title.as_deref(), Some("Retro Filter"));
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly typed config.
    ///
    /// The loader combines YAML sources with `TOOLSHOT_`-prefixed environment
    /// variables and expands `${VAR}` placeholders before materialising the
    /// typed structs.
    ///
    /// ```
    /// use toolshot_config::ToolshotConfigLoader;
    ///
    /// unsafe { std::env::set_var("PAGES_ROOT", "/srv/pages"); }
    ///
    /// let config = ToolshotConfigLoader::new()
    ///     .with_yaml_str(r#"
    /// version: "1"
    /// paths:
    ///   base_dir: "${PAGES_ROOT}"
    /// targets:
    ///   - id: "036-retro-filter"
    /// "#)
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.paths.base_dir, "/srv/pages");
    /// assert_eq!(config.browser.webdriver_url, "http://localhost:9515");
    ///
    /// unsafe { std::env::remove_var("PAGES_ROOT"); }
    /// ```
    pub fn load(self) -> Result<ToolshotConfig, ConfigError> {
        let cfg = self.builder.build()?;

        // Convert to serde_json::Value first
        let mut v: Value = cfg.try_deserialize()?;
        // Recursively expand environment variables
        expand_env_in_value(&mut v);

        let typed: ToolshotConfig =
            serde_json::from_value(v).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use temp_env;

    #[test]
    fn expands_simple_string() {
        temp_env::with_var("FOO", Some("bar"), || {
            let mut v = json!("prefix-${FOO}-suffix");
            expand_env_in_value(&mut v);
            assert_eq!(v, json!("prefix-bar-suffix"));
        });
    }

    #[test]
    fn expands_in_array_and_object() {
        temp_env::with_vars([("CITY", Some("Winston")), ("STATE", Some("NC"))], || {
            let mut v = json!([
                "hello-$CITY",
                { "loc": "${CITY}-${STATE}" },
                42,
                true,
                null
            ]);
            expand_env_in_value(&mut v);
            assert_eq!(
                v,
                json!(["hello-Winston", { "loc": "Winston-NC" }, 42, true, null])
            );
        });
    }

    #[test]
    fn stops_on_cycles_and_leaves_value_reasonable() {
        temp_env::with_vars([("A", Some("${B}")), ("B", Some("${A}"))], || {
            let mut v = json!("x=${A}-y");
            // The depth cap guarantees termination; the exact remainder is
            // unspecified beyond still containing an unresolved placeholder.
            expand_env_in_value(&mut v);
            let s = v.as_str().unwrap();
            assert!(s.starts_with("x=") && s.ends_with("-y"));
            assert!(s.contains("${"));
        });
    }

    #[test]
    fn unknown_vars_are_left_as_is() {
        let mut v = json!("hi-${DOES_NOT_EXIST}");
        expand_env_in_value(&mut v);
        assert_eq!(v, json!("hi-${DOES_NOT_EXIST}"));
    }

    #[test]
    fn target_list_keeps_manifest_order() {
        let cfg = ToolshotConfigLoader::new()
            .with_yaml_str(
                r#"
targets:
  - id: "021-object-removal"
  - id: "001-background-remover"
  - id: "036-retro-filter"
    enabled: false
"#,
            )
            .load()
            .unwrap();

        let ids: Vec<&str> = cfg.targets.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(
            ids,
            ["021-object-removal", "001-background-remover", "036-retro-filter"]
        );
        assert_eq!(cfg.targets[2].enabled, Some(false));
    }

    #[test]
    fn browser_section_defaults_apply() {
        let cfg = ToolshotConfigLoader::new()
            .with_yaml_str("targets: []")
            .load()
            .unwrap();

        assert!(cfg.browser.headless);
        assert_eq!(cfg.browser.window_width, 1280);
        assert_eq!(cfg.browser.window_height, 800);
        assert_eq!(cfg.paths.out_dir, "verification");
    }

    #[test]
    fn missing_optional_file_is_not_an_error() {
        let cfg = ToolshotConfigLoader::new()
            .with_optional_file("does-not-exist.yaml")
            .with_yaml_str("targets: []")
            .load()
            .unwrap();
        assert!(cfg.targets.is_empty());
    }
}
