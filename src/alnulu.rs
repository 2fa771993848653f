// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ALNULU - Fingerprint numérico determinístico
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Mapeia cada caractere de um texto normalizado para um inteiro e soma tudo.
// A tabela de valores é fixa (constante publicada da fórmula): letras A-Z
// com quatro valores negativos (J, M, V, Y), dígitos valem a si mesmos e
// sete pontuações valem pesos pequenos. Qualquer outro caractere contribui
// zero.
//
// Normalização: uppercase + dobra de acentos latinos para a letra base
// (Á → A, Ç → C, Ñ → N...). Puro e total: mesma entrada, mesma soma, sempre.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Dobra um caractere acentuado (já em uppercase) para a letra base.
///
/// Caracteres fora da tabela de equivalência passam inalterados.
fn fold_accent(c: char) -> char {
    match c {
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
        'É' | 'Ê' | 'È' => 'E',
        'Í' | 'Ì' | 'Î' => 'I',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'Ç' => 'C',
        'Ñ' => 'N',
        other => other,
    }
}

/// Valor alnulu de um único caractere (já em uppercase e sem acento).
fn char_value(c: char) -> i64 {
    match c {
        'A' => 1,
        'B' => 2,
        'C' => 3,
        'D' => 4,
        'E' => 5,
        'F' => 6,
        'G' => 7,
        'H' => 8,
        'I' => 9,
        'J' => -10,
        'K' => 11,
        'L' => 12,
        'M' => -13,
        'N' => 14,
        'O' => 15,
        'P' => 16,
        'Q' => 17,
        'R' => 18,
        'S' => 19,
        'T' => 20,
        'U' => 21,
        'V' => -22,
        'W' => 23,
        'X' => 24,
        'Y' => -25,
        'Z' => 26,
        '.' => 2,
        '!' => 3,
        '?' => 4,
        ',' | ';' | ':' | '-' => 1,
        '0'..='9' => (c as i64) - ('0' as i64),
        _ => 0,
    }
}

/// Calcula o fingerprint alnulu de um texto.
///
/// # Exemplo
/// ```rust
/// use insepa::alnulu::alnulu;
///
/// assert_eq!(alnulu(""), 0);
/// assert_eq!(alnulu("A"), 1);
/// assert_eq!(alnulu("Á"), 1); // acento dobrado para a base
/// assert_eq!(alnulu("."), 2);
/// ```
pub fn alnulu(texto: &str) -> i64 {
    texto
        .chars()
        .flat_map(|c| c.to_uppercase())
        .map(|c| char_value(fold_accent(c)))
        .sum()
}
