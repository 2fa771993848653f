// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TOKEN - Identificadores Parent.Child e o alocador de runs
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Um token tem a forma "<mãe>.<n>": a chave da mãe (escopo) seguida do
// índice sequencial da unidade dentro do escopo. A unicidade vem da
// derivação, não de um contador persistido: o próximo índice livre é sempre
// recalculado varrendo os tokens vivos do escopo (ver hierarchy::high_water).
//
// O alocador emite um run contíguo por papel (primário, depois reação,
// depois contexto) e devolve o último índice usado, para o chamador
// encadear alocações sem lacunas nem colisões.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use serde::{Deserialize, Serialize};

use crate::error::{InsepaError, Result};

/// Um identificador pontilhado `"<mãe>.<n>"`.
pub type Token = String;

/// Formata um token a partir da chave da mãe e do índice da unidade.
pub fn format_token(mae: u32, index: u64) -> Token {
    format!("{}.{}", mae, index)
}

/// Interpreta um token de volta para `(mãe, índice)`.
///
/// Falha com [`InsepaError::MalformedToken`] se a string não tiver o
/// formato `<mãe>.<n>`; nunca devolve zero por omissão, para não mascarar
/// corrupção de dados persistidos.
pub fn parse_token(token: &str) -> Result<(u32, u64)> {
    let (mae, index) = token
        .split_once('.')
        .ok_or_else(|| InsepaError::malformed(token))?;

    let mae: u32 = mae.parse().map_err(|_| InsepaError::malformed(token))?;
    let index: u64 = index.parse().map_err(|_| InsepaError::malformed(token))?;

    Ok((mae, index))
}

/// Pacote de tokens de um grupo de unidades, separado por papel.
///
/// Os três papéis são: texto primário, reação (zero ou um token: a reação
/// é indivisível) e contexto. `total` é a concatenação na ordem
/// primário → reação → contexto.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGroup {
    /// Tokens do texto primário
    #[serde(rename = "E", default)]
    pub primary: Vec<Token>,

    /// Token da reação (no máximo um)
    #[serde(rename = "RE", default)]
    pub reaction: Vec<Token>,

    /// Tokens do contexto
    #[serde(rename = "CE", default)]
    pub context: Vec<Token>,

    /// Concatenação primário → reação → contexto
    #[serde(rename = "TOTAL")]
    pub total: Vec<Token>,
}

impl TokenGroup {
    /// Último token do grupo (`""` quando o grupo é vazio).
    pub fn fim(&self) -> &str {
        self.total.last().map(String::as_str).unwrap_or("")
    }

    /// Quantidade de tokens no grupo.
    pub fn len(&self) -> usize {
        self.total.len()
    }

    /// `true` se o grupo não tem nenhum token.
    pub fn is_empty(&self) -> bool {
        self.total.is_empty()
    }

    /// Anexa outro grupo a este, estendendo as quatro listas em paralelo.
    ///
    /// É o mecanismo de merge de saídas: vários fragmentos selecionados
    /// colapsam em um único grupo mantendo a ordem de alocação.
    pub fn extend(&mut self, other: TokenGroup) {
        self.primary.extend(other.primary);
        self.reaction.extend(other.reaction);
        self.context.extend(other.context);
        self.total.extend(other.total);
    }
}

/// Aloca um run contíguo de tokens para um grupo de unidades.
///
/// Emite `n_primary` tokens a partir de `start`, depois `n_reaction`
/// imediatamente em seguida, depois `n_context`. Devolve o grupo e o
/// último índice usado (a nova marca d'água do escopo).
///
/// Pedido vazio (três contagens zero) é um caso degenerado definido, não um
/// erro: devolve um grupo vazio com `fim() == ""` e marca d'água
/// `start - 1` para o encadeamento seguir sem lacuna.
pub fn allocate(
    mae: u32,
    start: u64,
    n_primary: usize,
    n_reaction: usize,
    n_context: usize,
) -> (TokenGroup, u64) {
    let mut next = start;
    let run = |count: usize, next: &mut u64| -> Vec<Token> {
        (0..count)
            .map(|_| {
                let token = format_token(mae, *next);
                *next += 1;
                token
            })
            .collect()
    };

    let primary = run(n_primary, &mut next);
    let reaction = run(n_reaction, &mut next);
    let context = run(n_context, &mut next);

    let mut total = Vec::with_capacity(primary.len() + reaction.len() + context.len());
    total.extend(primary.iter().cloned());
    total.extend(reaction.iter().cloned());
    total.extend(context.iter().cloned());

    let group = TokenGroup {
        primary,
        reaction,
        context,
        total,
    };

    (group, next.saturating_sub(1))
}
