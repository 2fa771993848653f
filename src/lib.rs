//! # INSEPA - Índice Sequencial de Palavras
//!
//! Este crate implementa o motor **INSEPA**: dado texto livre, ele atribui
//! de forma determinística identificadores pontilhados `mãe.índice` às
//! menores unidades lexicais (palavras e pontuações), agrupa esses
//! identificadores por papel (texto, reação, contexto, de entrada e de
//! saída) e amarra cada grupo de entrada ao grupo de saída correspondente
//! como um par indissociável. Cada texto também recebe um fingerprint
//! numérico determinístico, o **alnulu**.
//!
//! ## Como funciona
//!
//! 1. O texto cru é segmentado em sentenças
//! 2. O chamador escolhe qual trecho é entrada e quais são saídas
//! 3. O montador calcula as unidades lexicais de cada papel
//! 4. O alocador carimba identificadores contíguos por papel
//! 5. O alnulu do texto primário é calculado
//! 6. O bloco resultante entra na mãe escolhida, que atualiza sua marca
//!
//! ## A fórmula Parent.Child
//!
//! A mãe é o núcleo do cosmos onde os filhos residem: a mãe `0` é a origem
//! e cada filho é uma posição única dentro dela (`0.1`, `0.2`, `0.3`...).
//! Não existe contador persistido: o próximo índice livre é sempre
//! recalculado varrendo os tokens vivos do escopo, o que torna o estado
//! inteiro reconstruível a partir dos dados persistidos.
//!
//! ## Exemplo de uso
//!
//! ```rust
//! use insepa::prelude::*;
//!
//! let mut sub = Subconsciente::default();
//! let request = CommitRequest {
//!     entrada_texto: "Olá Adam.".into(),
//!     entrada_contexto: "Saudação formal".into(),
//!     saidas: vec!["Olá minha adorada criadora.".into()],
//!     saida_reacao: "carinho".into(),
//!     saida_contexto: "Saudação afetuosa".into(),
//!     ..Default::default()
//! };
//!
//! let summary = sub.commit_block(0, &request).unwrap();
//! assert_eq!(summary.fim, "0.13");
//! ```
//!
//! O núcleo é síncrono, single-threaded e sem pontos de suspensão: toda
//! operação é uma computação pura sobre o snapshot em memória, limitada
//! pelo tamanho da entrada. Quem serializa escritores concorrentes é o
//! chamador, no grão "uma coleção de mães + uma lista de textos".

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

/// Fingerprint numérico determinístico de um texto.
///
/// Normaliza (uppercase + dobra de acentos) e soma uma tabela fixa de
/// valores por caractere: letras A-Z (quatro negativas), dígitos e sete
/// pontuações com pesos pequenos.
pub mod alnulu;

/// Configuração do motor via variáveis de ambiente.
pub mod config;

/// Erros tipados do núcleo.
///
/// - [`InsepaError::MaeNotFound`]: mãe inexistente
/// - [`InsepaError::BlocoNotFound`]: bloco fora de `1..=count`
/// - [`InsepaError::MalformedToken`]: token persistido sem o formato
///   `<mãe>.<n>`
/// - [`InsepaError::TextoNotFound`]: posição inexistente no inconsciente
pub mod error;

/// Mães, blocos e o montador de entradas/saídas.
///
/// O coração do sistema. Contém:
/// - `Subconsciente`: a coleção de mães com chaves densas `0..N-1`
/// - `Mae`, `Bloco`, `Entrada`, `Saida`: o modelo hierárquico
/// - `open_block` / `attach_saida` / `commit_block`: montagem de blocos
/// - `high_water`: o rescan puro que substitui contadores persistidos
pub mod hierarchy;

/// Corpus plano de textos avulsos, fora da hierarquia.
///
/// Cada registro é auto-escopado pela posição 1-based; remover um registro
/// reconstrói todos os restantes (sem lacunas, sem prefixos obsoletos).
/// Strings cruas legadas são promovidas a registros na ingestão.
pub mod inconsciente;

/// Segmentação lexical: sentenças e unidades.
///
/// Sentenças cortam no whitespace após `.`, `?` ou `!`; unidades são runs
/// maximais de caracteres de palavra ou de pontuação (Unicode).
pub mod segment;

/// Fronteira de persistência: carga e salvamento JSON.
///
/// Round-trip sem perda, arquivo ausente vira estado padrão, lista legada
/// de strings cruas é promovida na carga.
pub mod store;

/// Identificadores pontilhados e o alocador de runs contíguos.
pub mod token;

// Re-exports principais
pub use alnulu::alnulu;
pub use config::EngineConfig;
pub use error::{InsepaError, Result};
pub use hierarchy::{
    Bloco, CommitRequest, CommitSummary, Entrada, EntradaField, Mae, OpenedBlock, Saida,
    SaidaMode, Subconsciente,
};
pub use inconsciente::{Inconsciente, RecordEntry, TextRecord};
pub use token::{format_token, parse_token, Token, TokenGroup};

/// Versão da biblioteca.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude com imports comuns para uso rápido.
///
/// Importar tudo de uma vez:
/// ```rust,ignore
/// use insepa::prelude::*;
/// ```
pub mod prelude {
    pub use crate::alnulu::alnulu;
    pub use crate::config::EngineConfig;
    pub use crate::error::{InsepaError, Result};
    pub use crate::hierarchy::{
        Bloco, CommitRequest, CommitSummary, Entrada, EntradaField, Mae, OpenedBlock, Saida,
        SaidaMode, Subconsciente,
    };
    pub use crate::inconsciente::{Inconsciente, RecordEntry, TextRecord};
    pub use crate::segment::{count_units, sentences, units};
    pub use crate::token::{allocate, format_token, parse_token, Token, TokenGroup};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
