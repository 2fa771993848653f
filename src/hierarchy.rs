// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// HIERARCHY - Mães, blocos e o montador entrada/saída
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// O subconsciente é a coleção de mães. Cada mãe é um escopo: dona de um
// espaço de numeração próprio e de uma lista ordenada de blocos. Cada bloco
// amarra uma entrada (grupo de unidades de input) a zero-ou-mais saídas
// (grupos de output), e os tokens da entrada sempre precedem, na ordem de
// alocação, os das saídas anexadas depois.
//
// Invariantes mantidos aqui:
// - chaves de mãe densas 0..N-1 após qualquer add/remove (reindex);
// - bloco_id denso 1..M por mãe após qualquer add/remove;
// - nenhum contador persistido: o próximo índice livre é 1 + marca d'água,
//   recalculada varrendo os tokens vivos (reconstruível após crash);
// - remover bloco libera a faixa numérica dele, mas NUNCA renumera tokens
//   de blocos sobreviventes (lacunas numéricas são permitidas, colisões
//   entre blocos vivos não).
//
// Reindexar chaves de mãe não reescreve tokens já carimbados dentro dos
// blocos: eles guardam o prefixo de alocação para sempre. Consumidores
// dependem da estabilidade dos identificadores persistidos.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::alnulu::alnulu;
use crate::config::DEFAULT_MAE_NAME;
use crate::error::{InsepaError, Result};
use crate::segment;
use crate::token::{self, format_token, parse_token, TokenGroup};

/// Grupo de unidades de input de um bloco.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entrada {
    /// Texto primário
    pub texto: String,
    /// Reação (string opaca; vazia = sem reação)
    pub reacao: String,
    /// Contexto (segmentado como texto)
    pub contexto: String,
    /// Tokens alocados, por papel
    pub tokens: TokenGroup,
    /// Último token do grupo (`""` se vazio)
    pub fim: String,
    /// Fingerprint alnulu do texto primário
    pub alnulu: i64,
}

/// Grupo de unidades de output anexado a um bloco.
///
/// `textos` acumula fragmentos: no modo merge, vários segmentos
/// selecionados colapsam numa única saída, estendendo as listas de tokens
/// em paralelo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Saida {
    /// Fragmentos de texto acumulados
    pub textos: Vec<String>,
    /// Reação da saída
    pub reacao: String,
    /// Contexto da saída
    pub contexto: String,
    /// Tokens alocados, por papel
    pub tokens: TokenGroup,
    /// Último token do grupo (`""` se vazio)
    pub fim: String,
}

/// Um bloco: uma entrada amarrada às suas saídas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bloco {
    /// Número de sequência 1-based, denso dentro da mãe
    pub bloco_id: usize,
    /// Grupo de input
    pub entrada: Entrada,
    /// Grupos de output amarrados (zero ou mais)
    pub saidas: Vec<Saida>,
}

/// Uma mãe: escopo de numeração e dona de blocos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mae {
    /// Nome de exibição
    pub nome: String,
    /// Ponteiro informativo para o último token alocado no escopo
    pub ultimo_child: String,
    /// Blocos do escopo, em ordem de criação
    pub blocos: Vec<Bloco>,
}

impl Mae {
    /// Cria uma mãe vazia com a marca inicial `"<key>.0"`.
    pub fn new(key: u32, nome: impl Into<String>) -> Self {
        Self {
            nome: nome.into(),
            ultimo_child: format_token(key, 0),
            blocos: Vec::new(),
        }
    }
}

/// Como anexar fragmentos de saída a um bloco.
///
/// As variantes observadas do formato divergem aqui, então a escolha é
/// explícita do chamador.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaidaMode {
    /// Acumula o fragmento na última saída do bloco (criando-a se não
    /// existe). Vários segmentos selecionados viram uma saída só.
    #[default]
    Merge,
    /// Cada chamada cria uma saída nova.
    Separate,
}

/// Resultado de [`Subconsciente::open_block`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedBlock {
    /// Número de sequência do bloco criado
    pub bloco_id: usize,
    /// Último índice alocado (para encadear `attach_saida`)
    pub last_index: u64,
}

/// Campos editáveis de uma entrada.
///
/// Edição in-place, sem re-tokenizar: os tokens e o alnulu do bloco não
/// acompanham o valor novo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntradaField {
    /// Texto primário
    Texto,
    /// Reação
    Reacao,
    /// Contexto
    Contexto,
}

/// Pedido de commit de um bloco inteiro: uma entrada mais zero-ou-mais
/// fragmentos de saída, tudo numa operação.
///
/// É o estado de workflow explícito entre "segmentar" e "salvar": o
/// chamador monta o pedido com os trechos escolhidos e o núcleo não guarda
/// nenhum estado de sessão próprio.
#[derive(Debug, Clone, Default)]
pub struct CommitRequest {
    /// Trecho escolhido como entrada
    pub entrada_texto: String,
    /// Reação da entrada
    pub entrada_reacao: String,
    /// Contexto da entrada
    pub entrada_contexto: String,
    /// Trechos escolhidos como saída, em ordem
    pub saidas: Vec<String>,
    /// Reação aplicada às saídas
    pub saida_reacao: String,
    /// Contexto aplicado às saídas
    pub saida_contexto: String,
    /// Merge ou saídas separadas
    pub modo: SaidaMode,
}

/// Resumo de um commit bem-sucedido.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    /// Bloco criado
    pub bloco_id: usize,
    /// Último token alocado (`""` se nada foi alocado)
    pub fim: String,
    /// Quantidade de fragmentos de saída anexados
    pub saidas: usize,
}

/// A coleção de mães: o subconsciente inteiro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subconsciente {
    /// Mães por chave, em ordem de iteração semântica
    pub maes: IndexMap<u32, Mae>,
}

impl Default for Subconsciente {
    fn default() -> Self {
        let mut maes = IndexMap::new();
        maes.insert(0, Mae::new(0, DEFAULT_MAE_NAME));
        Self { maes }
    }
}

impl Subconsciente {
    /// Estado inicial: uma única mãe de chave 0 com o nome dado.
    pub fn with_default_mae(nome: impl Into<String>) -> Self {
        let mut maes = IndexMap::new();
        maes.insert(0, Mae::new(0, nome));
        Self { maes }
    }

    /// Quantidade de mães.
    pub fn count(&self) -> usize {
        self.maes.len()
    }

    /// Referência a uma mãe.
    pub fn mae(&self, key: u32) -> Result<&Mae> {
        self.maes.get(&key).ok_or(InsepaError::MaeNotFound { id: key })
    }

    fn mae_mut(&mut self, key: u32) -> Result<&mut Mae> {
        self.maes
            .get_mut(&key)
            .ok_or(InsepaError::MaeNotFound { id: key })
    }

    /// Renumera as chaves das mães para a faixa densa `0..N-1`.
    ///
    /// A ordem relativa é preservada (ordenação estável pela chave numérica
    /// anterior); só as chaves do mapa são reescritas, nunca o conteúdo.
    /// Coleção vazia materializa a mãe padrão de chave 0.
    ///
    /// Tokens já carimbados dentro dos blocos mantêm o prefixo original,
    /// mesmo que ele não corresponda mais à chave atual da mãe.
    pub fn reindex_maes(&mut self) {
        let mut items: Vec<(u32, Mae)> = self.maes.drain(..).collect();
        items.sort_by_key(|(key, _)| *key);

        for (new_key, (_, mae)) in items.into_iter().enumerate() {
            self.maes.insert(new_key as u32, mae);
        }

        if self.maes.is_empty() {
            self.maes.insert(0, Mae::new(0, DEFAULT_MAE_NAME));
        }
    }

    /// Cadastra uma mãe nova e devolve a chave dela (pós-reindex).
    pub fn add_mae(&mut self, nome: impl Into<String>) -> u32 {
        let new_key = self.maes.keys().max().map(|k| k + 1).unwrap_or(0);
        self.maes.insert(new_key, Mae::new(new_key, nome));
        self.reindex_maes();

        // a mãe nova tinha a maior chave, então termina na última posição
        let key = (self.maes.len() - 1) as u32;
        log::info!("mãe {} cadastrada", key);
        key
    }

    /// Remove uma mãe (e todos os blocos dela) e renumera as restantes.
    pub fn remove_mae(&mut self, key: u32) -> Result<Mae> {
        let removed = self
            .maes
            .shift_remove(&key)
            .ok_or(InsepaError::MaeNotFound { id: key })?;
        self.reindex_maes();
        log::info!("mãe {} removida ({} blocos)", key, removed.blocos.len());
        Ok(removed)
    }

    /// Renomeia uma mãe in-place, sem renumerar nada.
    pub fn rename_mae(&mut self, key: u32, nome: impl Into<String>) -> Result<()> {
        self.mae_mut(key)?.nome = nome.into();
        Ok(())
    }

    /// Marca d'água do escopo: o maior índice numérico entre todos os
    /// tokens vivos da mãe (entradas e saídas), ou 0 sem blocos.
    ///
    /// Função pura sobre o snapshot. É o rescan deliberado que substitui
    /// qualquer contador persistido. Um token que não parseia falha a
    /// operação com [`InsepaError::MalformedToken`] em vez de virar zero.
    pub fn high_water(&self, key: u32) -> Result<u64> {
        let mae = self.mae(key)?;
        let mut last = 0u64;

        for bloco in &mae.blocos {
            for tok in &bloco.entrada.tokens.total {
                let (_, index) = parse_token(tok)?;
                last = last.max(index);
            }
            for saida in &bloco.saidas {
                for tok in &saida.tokens.total {
                    let (_, index) = parse_token(tok)?;
                    last = last.max(index);
                }
            }
        }

        Ok(last)
    }

    /// Abre um bloco novo com a entrada montada a partir dos textos dados.
    ///
    /// As unidades do texto e do contexto vêm do segmentador; uma reação
    /// não-vazia conta como exatamente uma unidade, sem split. A alocação
    /// começa em `1 + marca d'água` do escopo.
    pub fn open_block(
        &mut self,
        key: u32,
        texto: &str,
        reacao: &str,
        contexto: &str,
    ) -> Result<OpenedBlock> {
        let start = self.high_water(key)? + 1;

        let n_texto = segment::count_units(texto);
        let n_reacao = usize::from(!reacao.is_empty());
        let n_contexto = segment::count_units(contexto);

        let (tokens, last_index) = token::allocate(key, start, n_texto, n_reacao, n_contexto);

        let entrada = Entrada {
            texto: texto.to_string(),
            reacao: reacao.to_string(),
            contexto: contexto.to_string(),
            fim: tokens.fim().to_string(),
            alnulu: alnulu(texto),
            tokens,
        };

        let mae = self.mae_mut(key)?;
        let bloco_id = mae.blocos.len() + 1;
        mae.blocos.push(Bloco {
            bloco_id,
            entrada,
            saidas: Vec::new(),
        });

        log::debug!(
            "bloco {} aberto na mãe {} (unidades até {})",
            bloco_id,
            key,
            last_index
        );
        Ok(OpenedBlock {
            bloco_id,
            last_index,
        })
    }

    /// Anexa um fragmento de saída a um bloco existente.
    ///
    /// A alocação continua a partir de `last_index` (o `fim` da entrada ou
    /// da saída anterior, fornecido pelo chamador), garantindo que os
    /// tokens de entrada e de cada saída sejam disjuntos e cubram uma faixa
    /// contígua do escopo. Devolve o novo último índice para encadear.
    pub fn attach_saida(
        &mut self,
        key: u32,
        bloco_id: usize,
        last_index: u64,
        modo: SaidaMode,
        texto: &str,
        reacao: &str,
        contexto: &str,
    ) -> Result<u64> {
        let n_texto = segment::count_units(texto);
        let n_reacao = usize::from(!reacao.is_empty());
        let n_contexto = segment::count_units(contexto);

        let (tokens, new_last) =
            token::allocate(key, last_index + 1, n_texto, n_reacao, n_contexto);

        let bloco = self.bloco_mut(key, bloco_id)?;
        match (modo, bloco.saidas.last_mut()) {
            (SaidaMode::Merge, Some(saida)) => {
                saida.textos.push(texto.to_string());
                saida.tokens.extend(tokens);
                saida.fim = saida.tokens.fim().to_string();
            }
            _ => {
                bloco.saidas.push(Saida {
                    textos: vec![texto.to_string()],
                    reacao: reacao.to_string(),
                    contexto: contexto.to_string(),
                    fim: tokens.fim().to_string(),
                    tokens,
                });
            }
        }

        Ok(new_last)
    }

    /// Commita um bloco inteiro: abre a entrada, anexa cada fragmento de
    /// saída e atualiza o `ultimo_child` da mãe para o token final.
    pub fn commit_block(&mut self, key: u32, request: &CommitRequest) -> Result<CommitSummary> {
        let before = self.high_water(key)?;

        let opened = self.open_block(
            key,
            &request.entrada_texto,
            &request.entrada_reacao,
            &request.entrada_contexto,
        )?;

        let mut last = opened.last_index;
        for fragmento in &request.saidas {
            last = self.attach_saida(
                key,
                opened.bloco_id,
                last,
                request.modo,
                fragmento,
                &request.saida_reacao,
                &request.saida_contexto,
            )?;
        }

        let fim = if last > before {
            let fim = format_token(key, last);
            self.mae_mut(key)?.ultimo_child = fim.clone();
            fim
        } else {
            String::new()
        };

        log::info!(
            "bloco {} commitado na mãe {} ({} saídas, fim={:?})",
            opened.bloco_id,
            key,
            request.saidas.len(),
            fim
        );
        Ok(CommitSummary {
            bloco_id: opened.bloco_id,
            fim,
            saidas: request.saidas.len(),
        })
    }

    /// Referência a um bloco pelo número de sequência.
    pub fn bloco(&self, key: u32, bloco_id: usize) -> Result<&Bloco> {
        let mae = self.mae(key)?;
        if bloco_id == 0 || bloco_id > mae.blocos.len() {
            return Err(InsepaError::BlocoNotFound { mae: key, bloco_id });
        }
        Ok(&mae.blocos[bloco_id - 1])
    }

    fn bloco_mut(&mut self, key: u32, bloco_id: usize) -> Result<&mut Bloco> {
        let mae = self.mae_mut(key)?;
        if bloco_id == 0 || bloco_id > mae.blocos.len() {
            return Err(InsepaError::BlocoNotFound { mae: key, bloco_id });
        }
        Ok(&mut mae.blocos[bloco_id - 1])
    }

    /// Remove um bloco e renumera os restantes para `1..M`.
    ///
    /// Os tokens dos blocos sobreviventes não mudam: a faixa numérica do
    /// bloco removido fica livre, e a próxima alocação a reusa se ela era o
    /// topo do escopo, ou continua acima do máximo restante, deixando a
    /// lacuna intocada.
    pub fn remove_bloco(&mut self, key: u32, bloco_id: usize) -> Result<Bloco> {
        // valida antes de mutar
        self.bloco(key, bloco_id)?;

        let mae = self.mae_mut(key)?;
        let removed = mae.blocos.remove(bloco_id - 1);
        renumber(&mut mae.blocos);

        log::info!("bloco {} removido da mãe {}", bloco_id, key);
        Ok(removed)
    }

    /// Remove todos os blocos com `bloco_id` no intervalo inclusivo
    /// `start..=end` e renumera os restantes. Devolve quantos saíram.
    pub fn remove_bloco_range(&mut self, key: u32, start: usize, end: usize) -> Result<usize> {
        let mae = self.mae_mut(key)?;
        let antes = mae.blocos.len();
        mae.blocos
            .retain(|bloco| !(start..=end).contains(&bloco.bloco_id));
        renumber(&mut mae.blocos);

        let removidos = antes - mae.blocos.len();
        log::info!(
            "{} bloco(s) removido(s) da mãe {} ({}-{})",
            removidos,
            key,
            start,
            end
        );
        Ok(removidos)
    }

    /// Edita um campo da entrada de um bloco, in-place e sem re-tokenizar.
    pub fn update_entrada_field(
        &mut self,
        key: u32,
        bloco_id: usize,
        field: EntradaField,
        value: impl Into<String>,
    ) -> Result<()> {
        let entrada = &mut self.bloco_mut(key, bloco_id)?.entrada;
        match field {
            EntradaField::Texto => entrada.texto = value.into(),
            EntradaField::Reacao => entrada.reacao = value.into(),
            EntradaField::Contexto => entrada.contexto = value.into(),
        }
        Ok(())
    }
}

/// Reatribui `bloco_id` denso 1..M na ordem atual da lista.
fn renumber(blocos: &mut [Bloco]) {
    for (i, bloco) in blocos.iter_mut().enumerate() {
        bloco.bloco_id = i + 1;
    }
}
