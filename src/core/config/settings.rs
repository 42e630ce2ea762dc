use std::env;
use std::path::PathBuf;

use anyhow::Context;

pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 8;
pub const DEFAULT_PORT: u16 = 8000;

const DEFAULT_PERSIST_DIR: &str = "db_solvex";
const DEFAULT_ROUTER_BASE_URL: &str = "https://router.huggingface.co/v1";
const DEFAULT_INFERENCE_BASE_URL: &str = "https://api-inference.huggingface.co";

/// Runtime configuration, provided through environment variables.
///
/// Loaded once at process start and injected into `AppState`; nothing in
/// the request path reads the environment directly.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory holding the vector store and logs (`DIRECTORIO_PERSISTENTE`).
    pub persist_dir: PathBuf,
    /// Embedding model identifier (`EMBEDDING_MODEL_NAME`).
    pub embedding_model: String,
    /// Language model identifier (`LLM_REPO_ID`).
    pub llm_model: String,
    /// API token for the hosted inference endpoints (`HUGGINGFACE_API_TOKEN`).
    pub api_token: String,
    /// Number of chunks returned per retrieval (`TOP_K`).
    pub top_k: usize,
    /// Upper bound on tool-invocation rounds per request (`MAX_TOOL_ROUNDS`).
    pub max_tool_rounds: usize,
    /// HTTP listen port (`PORT`).
    pub port: u16,
    /// Base URL for chat completions (`LLM_ROUTER_URL`).
    pub router_base_url: String,
    /// Base URL for the feature-extraction endpoint (`INFERENCE_API_URL`).
    pub inference_base_url: String,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let persist_dir = get("DIRECTORIO_PERSISTENTE")
            .unwrap_or_else(|| DEFAULT_PERSIST_DIR.to_string())
            .into();

        let embedding_model = get("EMBEDDING_MODEL_NAME")
            .context("EMBEDDING_MODEL_NAME is not set")?;
        let llm_model = get("LLM_REPO_ID").context("LLM_REPO_ID is not set")?;
        let api_token =
            get("HUGGINGFACE_API_TOKEN").context("HUGGINGFACE_API_TOKEN is not set")?;

        let top_k = parse_or(&get, "TOP_K", DEFAULT_TOP_K)?;
        let max_tool_rounds = parse_or(&get, "MAX_TOOL_ROUNDS", DEFAULT_MAX_TOOL_ROUNDS)?;
        let port = parse_or(&get, "PORT", DEFAULT_PORT)?;

        Ok(Settings {
            persist_dir,
            embedding_model,
            llm_model,
            api_token,
            top_k,
            max_tool_rounds,
            port,
            router_base_url: get("LLM_ROUTER_URL")
                .unwrap_or_else(|| DEFAULT_ROUTER_BASE_URL.to_string()),
            inference_base_url: get("INFERENCE_API_URL")
                .unwrap_or_else(|| DEFAULT_INFERENCE_BASE_URL.to_string()),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {key}: {raw}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn base_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("EMBEDDING_MODEL_NAME", "sentence-transformers/all-MiniLM-L6-v2"),
            ("LLM_REPO_ID", "meta-llama/Llama-3.1-8B-Instruct"),
            ("HUGGINGFACE_API_TOKEN", "hf_test"),
        ])
    }

    fn settings_from(map: &HashMap<&str, &str>) -> anyhow::Result<Settings> {
        Settings::from_lookup(|key| map.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn defaults_applied_when_optional_vars_missing() {
        let settings = settings_from(&base_env()).unwrap();

        assert_eq!(settings.persist_dir, PathBuf::from("db_solvex"));
        assert_eq!(settings.top_k, 5);
        assert_eq!(settings.max_tool_rounds, 8);
        assert_eq!(settings.port, 8000);
    }

    #[test]
    fn required_vars_are_enforced() {
        let mut env = base_env();
        env.remove("LLM_REPO_ID");

        let err = settings_from(&env).unwrap_err();
        assert!(err.to_string().contains("LLM_REPO_ID"));
    }

    #[test]
    fn overrides_are_parsed() {
        let mut env = base_env();
        env.insert("TOP_K", "3");
        env.insert("PORT", "9100");

        let settings = settings_from(&env).unwrap();
        assert_eq!(settings.top_k, 3);
        assert_eq!(settings.port, 9100);
    }

    #[test]
    fn invalid_numeric_override_is_an_error() {
        let mut env = base_env();
        env.insert("TOP_K", "five");

        assert!(settings_from(&env).is_err());
    }
}
