// src/noyau/securite.rs
//
// Validateur (défense en profondeur).
// L’évaluateur n’exécute jamais de code : il parcourt un AST à fonctions fermées.
// Ce filtre reste une porte externe : la forme canonique doit le passer.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Chiffres, opérateurs, parenthèses, point, virgule, blancs, caractères d’identifiant.
    static ref CARACTERES_AUTORISES: Regex = Regex::new(r"^[0-9+\-*/().\s,\w]+$").unwrap();

    /// Indices d’injection (insensible à la casse, sous-chaîne).
    static ref MOTIFS_DANGEREUX: Regex =
        Regex::new(r"(?i)__|import|exec|eval|open|file").unwrap();
}

/// Vrai si le texte contient un indice d’injection (`__`, import, exec, eval, open, file).
pub fn contient_injection(expr: &str) -> bool {
    MOTIFS_DANGEREUX.is_match(expr)
}

/// Vrai si le texte (prétraité) ne contient que des caractères autorisés
/// et aucun indice d’injection.
pub fn is_safe(expr: &str) -> bool {
    CARACTERES_AUTORISES.is_match(expr) && !contient_injection(expr)
}
