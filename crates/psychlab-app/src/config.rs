use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use psychlab_bedrock::generate::{DEFAULT_MODEL_ID, GenerationSettings};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    pub region: String,
    /// Bedrock inference profile used for report generation. Added in v1.
    pub model_id: String,
    /// Extended-reasoning budget; `None` disables it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking_budget_tokens: Option<u32>,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    pub credentials: CredentialSource,
    pub created_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CredentialSource {
    Inline {
        access_key_id: String,
        secret_access_key: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        session_token: Option<String>,
    },
    Profile {
        profile_name: String,
    },
    DefaultChain,
}

/// Redacted config info safe to log or return over the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigInfo {
    pub region: String,
    pub model_id: String,
    pub bind_addr: String,
    pub created_at: String,
    pub credential_type: String,
    pub profile_name: Option<String>,
    pub access_key_hint: Option<String>,
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

impl AppConfig {
    /// Config assembled from `PSYCHLAB_*` environment variables, used when
    /// no config file exists.
    pub fn from_env() -> eyre::Result<Self> {
        let thinking_budget_tokens = match std::env::var("PSYCHLAB_THINKING_BUDGET") {
            Ok(raw) => Some(raw.trim().parse::<u32>().map_err(|e| {
                eyre::eyre!("PSYCHLAB_THINKING_BUDGET must be a token count, got {raw:?}: {e}")
            })?),
            Err(_) => None,
        };

        Ok(Self {
            config_version: CURRENT_VERSION,
            region: std::env::var("PSYCHLAB_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string()),
            model_id: std::env::var("PSYCHLAB_MODEL_ID")
                .unwrap_or_else(|_| DEFAULT_MODEL_ID.to_string()),
            thinking_budget_tokens,
            bind_addr: std::env::var("PSYCHLAB_BIND_ADDR").unwrap_or_else(|_| default_bind_addr()),
            credentials: CredentialSource::DefaultChain,
            created_at: jiff::Timestamp::now(),
        })
    }

    pub fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings {
            model_id: self.model_id.clone(),
            thinking_budget_tokens: self.thinking_budget_tokens,
        }
    }
}

pub fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("com.psychlab.app"))
}

/// `PSYCHLAB_CONFIG` if set, otherwise `config.json` in the config dir.
pub fn config_path() -> eyre::Result<PathBuf> {
    if let Ok(path) = std::env::var("PSYCHLAB_CONFIG") {
        return Ok(PathBuf::from(path));
    }
    Ok(config_dir()?.join("config.json"))
}

/// Load the config file if present, otherwise fall back to the environment.
pub fn load_or_default() -> eyre::Result<AppConfig> {
    let path = config_path()?;
    if path.exists() {
        load_config_from(&path)
    } else {
        tracing::info!(path = %path.display(), "no config file, using environment defaults");
        AppConfig::from_env()
    }
}

pub fn load_config_from(path: &Path) -> eyre::Result<AppConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: AppConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update PsychLab."
        ));
    }

    // v0 → v1: add model_id (the model was hard-wired before)
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("model_id")
            .or_insert(serde_json::Value::String(DEFAULT_MODEL_ID.to_string()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added model_id)");
    }

    Ok(json)
}

pub fn save_config_to(path: &Path, config: &AppConfig) -> eyre::Result<()> {
    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;
    write_private(path, json.as_bytes())?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

/// Write to a temp file with owner-only permissions, then rename into place.
pub(crate) fn write_private(path: &Path, contents: &[u8]) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);
    std::fs::write(&tmp_path, contents)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

pub fn config_info(config: &AppConfig) -> ConfigInfo {
    let (credential_type, profile_name, access_key_hint) = match &config.credentials {
        CredentialSource::Inline {
            access_key_id,
            session_token,
            ..
        } => {
            let cred_type = if session_token.is_some() {
                "temporary".to_string()
            } else {
                "inline".to_string()
            };
            let hint = redact_access_key(access_key_id);
            (cred_type, None, Some(hint))
        }
        CredentialSource::Profile { profile_name } => {
            ("profile".to_string(), Some(profile_name.clone()), None)
        }
        CredentialSource::DefaultChain => ("default_chain".to_string(), None, None),
    };

    ConfigInfo {
        region: config.region.clone(),
        model_id: config.model_id.clone(),
        bind_addr: config.bind_addr.clone(),
        created_at: config.created_at.to_string(),
        credential_type,
        profile_name,
        access_key_hint,
    }
}

fn redact_access_key(key: &str) -> String {
    if key.len() <= 8 {
        return "****".to_string();
    }
    match (key.get(..4), key.get(key.len() - 4..)) {
        (Some(prefix), Some(suffix)) => format!("{prefix}...{suffix}"),
        _ => "****".to_string(),
    }
}
