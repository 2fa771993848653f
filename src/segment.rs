// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// SEGMENT - Segmentação lexical
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Duas granularidades, ambas funções puras:
//
// - Sentenças: corta no whitespace imediatamente após pontuação terminal
//   (. ? !). Rust regex não suporta look-behind, então o corte é um scan
//   manual de caracteres.
// - Unidades: runs maximais de caracteres de palavra (Unicode) OU runs
//   maximais de pontuação, descartando whitespace (`\w+|[^\w\s]+`). É esta
//   granularidade que recebe tokens individuais.
//
// Strings de reação nunca passam por aqui: uma reação não-vazia conta como
// exatamente uma unidade, decisão do montador de blocos.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use once_cell::sync::Lazy;
use regex::Regex;

/// Padrão de unidade lexical: palavra Unicode ou run de pontuação.
static UNIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+|[^\w\s]+").expect("padrão de unidade é constante"));

/// Pontuação terminal de sentença.
fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '?' | '!')
}

/// Divide um texto em sentenças.
///
/// O corte acontece no whitespace imediatamente após `.`, `?` ou `!`;
/// cada sentença sai com as bordas aparadas e sentenças vazias são
/// descartadas. Texto sem pontuação terminal vira uma única sentença;
/// texto vazio (ou só whitespace) produz um iterador vazio.
///
/// Sequência lazy, finita e reiniciável: função pura da entrada, sem
/// estado compartilhado: basta chamar de novo para reiterar.
///
/// # Exemplo
/// ```rust
/// use insepa::segment::sentences;
///
/// let segs: Vec<String> = sentences("Olá Adam. Saudação formal").collect();
/// assert_eq!(segs, vec!["Olá Adam.", "Saudação formal"]);
/// ```
pub fn sentences(texto: &str) -> impl Iterator<Item = String> + '_ {
    let mut rest = texto.trim();
    std::iter::from_fn(move || {
        loop {
            if rest.is_empty() {
                return None;
            }

            // Procura o primeiro whitespace precedido por pontuação terminal
            let mut cut = None;
            let mut prev_terminal = false;
            for (i, c) in rest.char_indices() {
                if c.is_whitespace() && prev_terminal {
                    // consome o run inteiro de whitespace como delimitador
                    let after = rest[i..]
                        .find(|ch: char| !ch.is_whitespace())
                        .map(|off| i + off)
                        .unwrap_or(rest.len());
                    cut = Some((i, after));
                    break;
                }
                prev_terminal = is_terminal(c);
            }

            let (seg, next) = match cut {
                Some((end, after)) => (&rest[..end], &rest[after..]),
                None => (rest, ""),
            };
            rest = next;

            let seg = seg.trim();
            if !seg.is_empty() {
                return Some(seg.to_string());
            }
        }
    })
}

/// Divide um texto em unidades lexicais.
///
/// Cada unidade é um run maximal de caracteres de palavra (letras, dígitos,
/// underscore, Unicode) ou um run maximal de pontuação; whitespace é
/// descartado. Lazy e reiniciável.
///
/// # Exemplo
/// ```rust
/// use insepa::segment::units;
///
/// let us: Vec<&str> = units("Olá Adam.").collect();
/// assert_eq!(us, vec!["Olá", "Adam", "."]);
/// ```
pub fn units(texto: &str) -> impl Iterator<Item = &str> {
    UNIT_RE.find_iter(texto).map(|m| m.as_str())
}

/// Quantidade de unidades lexicais de um texto.
pub fn count_units(texto: &str) -> usize {
    units(texto).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentences_basic() {
        let segs: Vec<String> = sentences("Olá Adam. Saudação formal").collect();
        assert_eq!(segs, vec!["Olá Adam.", "Saudação formal"]);
    }

    #[test]
    fn test_sentences_multiple_terminators() {
        let segs: Vec<String> = sentences("Um. Dois! Três? Quatro").collect();
        assert_eq!(segs, vec!["Um.", "Dois!", "Três?", "Quatro"]);
    }

    #[test]
    fn test_sentences_no_terminal_punctuation() {
        let segs: Vec<String> = sentences("  texto sem pontuação terminal  ").collect();
        assert_eq!(segs, vec!["texto sem pontuação terminal"]);
    }

    #[test]
    fn test_sentences_empty_input() {
        assert_eq!(sentences("").count(), 0);
        assert_eq!(sentences("   \n\t ").count(), 0);
    }

    #[test]
    fn test_sentences_no_cut_without_whitespace() {
        // pontuação sem whitespace em seguida não corta (ex: siglas, URLs)
        let segs: Vec<String> = sentences("v1.2 pronto. fim").collect();
        assert_eq!(segs, vec!["v1.2 pronto.", "fim"]);
    }

    #[test]
    fn test_sentences_consume_whitespace_run() {
        let segs: Vec<String> = sentences("Primeira.   \n  Segunda.").collect();
        assert_eq!(segs, vec!["Primeira.", "Segunda."]);
    }

    #[test]
    fn test_sentences_restartable() {
        let texto = "Um. Dois.";
        assert_eq!(sentences(texto).count(), 2);
        assert_eq!(sentences(texto).count(), 2);
    }

    #[test]
    fn test_units_word_and_punctuation() {
        let us: Vec<&str> = units("Olá Adam.").collect();
        assert_eq!(us, vec!["Olá", "Adam", "."]);
    }

    #[test]
    fn test_units_punctuation_runs() {
        let us: Vec<&str> = units("pronto...!? já").collect();
        assert_eq!(us, vec!["pronto", "...!?", "já"]);
    }

    #[test]
    fn test_units_unicode_words() {
        let us: Vec<&str> = units("saudação_formal coração").collect();
        assert_eq!(us, vec!["saudação_formal", "coração"]);
    }

    #[test]
    fn test_units_empty() {
        assert_eq!(count_units(""), 0);
        assert_eq!(count_units(" \t\n"), 0);
    }

    #[test]
    fn test_count_units() {
        assert_eq!(count_units("Olá Adam."), 3);
        assert_eq!(count_units("Olá minha adorada criadora."), 5);
    }
}
