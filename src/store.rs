// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// STORE - Fronteira de carga e salvamento
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// A superfície fina entre o núcleo e a persistência: JSON UTF-8 em disco,
// round-trip sem perda de nenhum campo, ordem de iteração das mães
// preservada (IndexMap). Arquivo ausente vira estado padrão; uma lista de
// strings cruas legada é promovida a registros na carga.
//
// O chamador é responsável por serializar escritores concorrentes: o
// contrato é ler-modificar-gravar o snapshot inteiro como um passo só.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use std::fs;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::config::EngineConfig;
use crate::hierarchy::Subconsciente;
use crate::inconsciente::{Inconsciente, RecordEntry};

/// Erros da fronteira de persistência.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Falha de leitura/escrita em disco
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON inválido ou incompatível com o formato esperado
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Carrega o subconsciente de um arquivo JSON.
///
/// Arquivo ausente produz o estado padrão (uma mãe de chave 0 com o nome
/// configurado). O resultado é sempre reindexado, fechando lacunas de chave
/// deixadas por edições externas.
pub fn load_subconsciente(
    path: impl AsRef<Path>,
    config: &EngineConfig,
) -> Result<Subconsciente, StoreError> {
    let path = path.as_ref();
    if !path.exists() {
        log::debug!("{} ausente; estado padrão", path.display());
        return Ok(Subconsciente::with_default_mae(&config.default_mae_name));
    }

    let content = fs::read_to_string(path)?;
    let mut sub: Subconsciente = serde_json::from_str(&content)?;
    sub.reindex_maes();
    Ok(sub)
}

/// Grava o subconsciente em disco, verbatim.
pub fn save_subconsciente(
    path: impl AsRef<Path>,
    sub: &Subconsciente,
    config: &EngineConfig,
) -> Result<(), StoreError> {
    write_json(path.as_ref(), sub, config)
}

/// Carrega o inconsciente de um arquivo JSON.
///
/// Aceita tanto a lista processada quanto a lista legada de strings cruas
/// (ou uma mistura), promovendo entradas cruas pela posição.
pub fn load_inconsciente(path: impl AsRef<Path>) -> Result<Inconsciente, StoreError> {
    let path = path.as_ref();
    if !path.exists() {
        log::debug!("{} ausente; corpus vazio", path.display());
        return Ok(Inconsciente::default());
    }

    let content = fs::read_to_string(path)?;
    let entries: Vec<RecordEntry> = serde_json::from_str(&content)?;
    Ok(Inconsciente::from_entries(entries))
}

/// Grava o inconsciente em disco.
pub fn save_inconsciente(
    path: impl AsRef<Path>,
    inconsciente: &Inconsciente,
    config: &EngineConfig,
) -> Result<(), StoreError> {
    write_json(path.as_ref(), inconsciente, config)
}

fn write_json<T: Serialize>(path: &Path, value: &T, config: &EngineConfig) -> Result<(), StoreError> {
    let json = if config.pretty_json {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    fs::write(path, json)?;
    Ok(())
}
