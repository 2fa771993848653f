// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// CONFIGURAÇÃO DO MOTOR
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Ajustes do motor INSEPA, todos com default sensato e sobrescrevíveis por
// variável de ambiente:
//
// - `INSEPA_DEFAULT_MAE`: nome da mãe padrão materializada em coleções
//   vazias (padrão: "Interações")
// - `INSEPA_PRETTY_JSON`: persistir JSON indentado ("1"/"true") ou
//   compacto (padrão: indentado)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use std::env;

/// Nome da mãe padrão de uma coleção vazia.
pub const DEFAULT_MAE_NAME: &str = "Interações";

/// Configuração do motor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Nome usado ao criar a mãe padrão.
    pub default_mae_name: String,

    /// JSON indentado na persistência.
    /// Padrão: true
    pub pretty_json: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_mae_name: DEFAULT_MAE_NAME.to_string(),
            pretty_json: true,
        }
    }
}

impl EngineConfig {
    /// Carrega a configuração do ambiente, caindo nos defaults para
    /// variáveis ausentes ou inválidas.
    pub fn from_env() -> Self {
        let default_mae_name = env::var("INSEPA_DEFAULT_MAE")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_MAE_NAME.to_string());

        let pretty_json = env::var("INSEPA_PRETTY_JSON")
            .ok()
            .map(|v| parse_bool(&v))
            .unwrap_or(true);

        let config = Self {
            default_mae_name,
            pretty_json,
        };
        log::debug!("configuração carregada: {:?}", config);
        config
    }
}

/// Interpreta flags booleanas do ambiente (case-insensitive).
fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.default_mae_name, "Interações");
        assert!(config.pretty_json);
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("1"));
        assert!(parse_bool("TRUE"));
        assert!(parse_bool(" yes "));
        assert!(!parse_bool("0"));
        assert!(!parse_bool("nope"));
        assert!(!parse_bool(""));
    }
}
