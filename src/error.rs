// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ERROS DO NÚCLEO
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Todos os erros que o núcleo INSEPA reporta ao chamador. O núcleo é
// determinístico e livre de efeitos colaterais: nenhum erro é "recuperado"
// silenciosamente, e um token corrompido falha a operação inteira em vez de
// virar zero por omissão.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use thiserror::Error;

/// Erros que o núcleo INSEPA pode reportar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsepaError {
    /// Operação referenciou uma mãe que não existe na coleção.
    #[error("mãe {id} is not registered")]
    MaeNotFound {
        /// Chave da mãe referenciada
        id: u32,
    },

    /// Operação referenciou um bloco fora do intervalo 1..=count da mãe.
    #[error("bloco {bloco_id} is out of range for mãe {mae}")]
    BlocoNotFound {
        /// Chave da mãe dona do bloco
        mae: u32,
        /// Número de sequência pedido
        bloco_id: usize,
    },

    /// Um token persistido não tem o formato `<mãe>.<n>`.
    ///
    /// Aparece durante o recálculo da marca d'água (rescan dos blocos).
    /// Falhar aqui é deliberado: mascarar o token com zero esconderia
    /// corrupção de dados.
    #[error("malformed token '{token}' (expected <mãe>.<n>)")]
    MalformedToken {
        /// O token rejeitado, como lido
        token: String,
    },

    /// Operação referenciou uma posição inexistente no inconsciente.
    #[error("texto #{position} does not exist in the inconsciente")]
    TextoNotFound {
        /// Posição 1-based pedida
        position: usize,
    },
}

impl InsepaError {
    /// Cria um erro de token malformado.
    pub fn malformed(token: impl Into<String>) -> Self {
        InsepaError::MalformedToken {
            token: token.into(),
        }
    }
}

/// Alias de resultado usado em todo o núcleo.
pub type Result<T> = std::result::Result<T, InsepaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = InsepaError::MaeNotFound { id: 7 };
        assert_eq!(err.to_string(), "mãe 7 is not registered");

        let err = InsepaError::malformed("0,3");
        assert_eq!(err.to_string(), "malformed token '0,3' (expected <mãe>.<n>)");
    }

    #[test]
    fn test_errors_are_comparable() {
        assert_eq!(
            InsepaError::TextoNotFound { position: 2 },
            InsepaError::TextoNotFound { position: 2 }
        );
        assert_ne!(
            InsepaError::MaeNotFound { id: 0 },
            InsepaError::MaeNotFound { id: 1 }
        );
    }
}
