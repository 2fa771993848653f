// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// INCONSCIENTE - Corpus plano de textos avulsos
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Lista ordenada de textos fora da hierarquia de mães. Cada registro é
// auto-escopado: a chave de escopo dos tokens dele é a própria posição
// 1-based na lista.
//
// Ao contrário dos blocos, remover um registro reconstrói TODOS os
// restantes (re-segmenta, re-identifica, recalcula alnulu) na nova posição:
// o corpus plano não admite lacunas numéricas nem identificadores com
// prefixo de posição antiga.
//
// Entradas legadas (strings cruas em vez de registros processados) são
// resolvidas uma única vez na ingestão, via a variante RecordEntry, nunca
// re-checadas ad hoc. A ingestão é idempotente: registro já processado
// passa intocado.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use serde::{Deserialize, Serialize};

use crate::alnulu::alnulu;
use crate::error::{InsepaError, Result};
use crate::segment;
use crate::token::{format_token, Token, TokenGroup};

/// Um texto avulso já indexado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRecord {
    /// Nome de exibição (`"Texto <posição>"`)
    pub nome: String,
    /// Texto cru
    pub texto: String,
    /// Tokens auto-escopados (só o TOTAL é populado)
    pub tokens: TokenGroup,
    /// Último token (espelho de `fim`)
    pub ultimo_child: String,
    /// Último token (`""` se o texto não tem unidades)
    pub fim: String,
    /// Fingerprint alnulu do texto
    pub alnulu: i64,
}

/// Uma entrada do corpus como encontrada na persistência: crua (legada) ou
/// já processada.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordEntry {
    /// Registro indexado
    Processed(TextRecord),
    /// String crua legada, ainda sem índice
    Raw(String),
}

/// Tokeniza um texto na posição dada (chave de escopo = posição 1-based).
fn tokenize(position: usize, texto: &str) -> TextRecord {
    let total: Vec<Token> = segment::units(texto)
        .enumerate()
        .map(|(i, _)| format_token(position as u32, (i + 1) as u64))
        .collect();

    let fim = total.last().cloned().unwrap_or_default();
    TextRecord {
        nome: format!("Texto {}", position),
        texto: texto.to_string(),
        tokens: TokenGroup {
            total,
            ..TokenGroup::default()
        },
        ultimo_child: fim.clone(),
        fim,
        alnulu: alnulu(texto),
    }
}

/// A lista ordenada de textos avulsos.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inconsciente {
    records: Vec<TextRecord>,
}

impl Inconsciente {
    /// Ingere entradas vindas da persistência, promovendo strings cruas a
    /// registros processados pela posição. Idempotente: registros já
    /// processados passam intocados.
    pub fn from_entries(entries: Vec<RecordEntry>) -> Self {
        let mut upgraded = 0usize;
        let records = entries
            .into_iter()
            .enumerate()
            .map(|(i, entry)| match entry {
                RecordEntry::Processed(record) => record,
                RecordEntry::Raw(texto) => {
                    upgraded += 1;
                    tokenize(i + 1, &texto)
                }
            })
            .collect();

        if upgraded > 0 {
            log::info!("{} texto(s) legado(s) promovido(s) a registro", upgraded);
        }
        Self { records }
    }

    /// Adiciona um texto novo no fim do corpus; devolve a posição dele.
    pub fn add(&mut self, texto: &str) -> usize {
        let position = self.records.len() + 1;
        self.records.push(tokenize(position, texto));
        position
    }

    /// Adiciona vários textos de uma vez (ex: upload em lote).
    pub fn add_many<I, S>(&mut self, textos: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut count = 0;
        for texto in textos {
            self.add(texto.as_ref());
            count += 1;
        }
        count
    }

    /// Substitui o texto de uma posição, re-tokenizando na mesma posição.
    pub fn update(&mut self, position: usize, texto: &str) -> Result<()> {
        self.check(position)?;
        self.records[position - 1] = tokenize(position, texto);
        Ok(())
    }

    /// Remove o registro da posição e reconstrói todos os restantes na
    /// nova posição 1-based de cada um.
    pub fn remove(&mut self, position: usize) -> Result<TextRecord> {
        self.check(position)?;
        let removed = self.records.remove(position - 1);

        for (i, record) in self.records.iter_mut().enumerate() {
            *record = tokenize(i + 1, &record.texto);
        }

        log::info!(
            "texto {} removido; {} registro(s) reconstruído(s)",
            position,
            self.records.len()
        );
        Ok(removed)
    }

    /// Registro da posição dada (1-based).
    pub fn get(&self, position: usize) -> Option<&TextRecord> {
        if position == 0 {
            return None;
        }
        self.records.get(position - 1)
    }

    /// Itera sobre os registros em ordem.
    pub fn iter(&self) -> impl Iterator<Item = &TextRecord> {
        self.records.iter()
    }

    /// Quantidade de registros.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` se o corpus está vazio.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn check(&self, position: usize) -> Result<()> {
        if position == 0 || position > self.records.len() {
            return Err(InsepaError::TextoNotFound { position });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_self_scoped() {
        let mut inc = Inconsciente::default();
        assert_eq!(inc.add("Olá Adam."), 1);
        assert_eq!(inc.add("Segundo texto"), 2);

        let first = inc.get(1).unwrap();
        assert_eq!(first.nome, "Texto 1");
        assert_eq!(first.tokens.total, vec!["1.1", "1.2", "1.3"]);
        assert_eq!(first.fim, "1.3");
        assert_eq!(first.ultimo_child, "1.3");

        let second = inc.get(2).unwrap();
        assert_eq!(second.tokens.total, vec!["2.1", "2.2"]);
    }

    #[test]
    fn test_empty_text_record() {
        let mut inc = Inconsciente::default();
        inc.add("   ");
        let record = inc.get(1).unwrap();
        assert!(record.tokens.is_empty());
        assert_eq!(record.fim, "");
        assert_eq!(record.alnulu, 0);
    }

    #[test]
    fn test_remove_rebuilds_all_positions() {
        let mut inc = Inconsciente::default();
        inc.add("um");
        inc.add("dois três");
        inc.add("quatro");

        let removed = inc.remove(1).unwrap();
        assert_eq!(removed.texto, "um");
        assert_eq!(inc.len(), 2);

        // cada registro foi reconstruído com a nova posição como escopo
        assert_eq!(inc.get(1).unwrap().tokens.total, vec!["1.1", "1.2"]);
        assert_eq!(inc.get(1).unwrap().nome, "Texto 1");
        assert_eq!(inc.get(2).unwrap().tokens.total, vec!["2.1"]);
        assert_eq!(inc.get(2).unwrap().texto, "quatro");
    }

    #[test]
    fn test_update_retokenizes_in_place() {
        let mut inc = Inconsciente::default();
        inc.add("curto");
        inc.update(1, "texto bem mais longo agora").unwrap();

        let record = inc.get(1).unwrap();
        assert_eq!(record.texto, "texto bem mais longo agora");
        assert_eq!(record.tokens.total.len(), 5);
        assert_eq!(record.alnulu, alnulu("texto bem mais longo agora"));
    }

    #[test]
    fn test_out_of_range_positions() {
        let mut inc = Inconsciente::default();
        inc.add("um");

        assert_eq!(
            inc.remove(0).unwrap_err(),
            InsepaError::TextoNotFound { position: 0 }
        );
        assert_eq!(
            inc.update(2, "x").unwrap_err(),
            InsepaError::TextoNotFound { position: 2 }
        );
        assert!(inc.get(0).is_none());
        assert!(inc.get(2).is_none());
    }

    #[test]
    fn test_from_entries_upgrades_raw_strings() {
        let entries = vec![
            RecordEntry::Raw("Olá Adam.".into()),
            RecordEntry::Raw("Segundo".into()),
        ];
        let inc = Inconsciente::from_entries(entries);

        assert_eq!(inc.len(), 2);
        assert_eq!(inc.get(1).unwrap().tokens.total, vec!["1.1", "1.2", "1.3"]);
        assert_eq!(inc.get(2).unwrap().tokens.total, vec!["2.1"]);
    }

    #[test]
    fn test_from_entries_is_idempotent() {
        let inc = Inconsciente::from_entries(vec![RecordEntry::Raw("Olá Adam.".into())]);
        let before = inc.get(1).unwrap().clone();

        // re-ingerir o registro já processado é um no-op
        let again = Inconsciente::from_entries(vec![RecordEntry::Processed(before.clone())]);
        assert_eq!(again.get(1).unwrap(), &before);
    }

    #[test]
    fn test_legacy_entry_deserializes_from_plain_string() {
        let entries: Vec<RecordEntry> =
            serde_json::from_str(r#"["texto cru", {"nome": "Texto 2", "texto": "x", "tokens": {"TOTAL": ["2.1"]}, "ultimo_child": "2.1", "fim": "2.1", "alnulu": 24}]"#)
                .unwrap();
        let inc = Inconsciente::from_entries(entries);

        assert_eq!(inc.len(), 2);
        assert_eq!(inc.get(1).unwrap().texto, "texto cru");
        assert_eq!(inc.get(2).unwrap().fim, "2.1");
    }

    #[test]
    fn test_add_many() {
        let mut inc = Inconsciente::default();
        let count = inc.add_many(["um", "dois"]);
        assert_eq!(count, 2);
        assert_eq!(inc.len(), 2);
    }
}
