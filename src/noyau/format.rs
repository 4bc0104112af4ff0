// src/noyau/format.rs

use num_rational::BigRational;

use super::decimal::Decimal;
use super::erreur::Resultat;
use super::expr::Expr;

/* ------------------------ Forme canonique (texte prétraité) ------------------------ */

fn format_nombre(r: &BigRational) -> String {
    match Decimal::exact(r) {
        Some(d) => d.to_string(),
        // n’arrive pas pour des littéraux ; reste lisible si jamais
        None => format!("({}/{})", r.numer(), r.denom()),
    }
}

/// Texte canonique de l’arbre :
/// - opérations binaires toujours parenthésées, puissance en `**`
/// - appels sous leur nom canonique (radians, degrees, log10…)
pub fn format_canonique(e: &Expr) -> String {
    use Expr::*;

    let bin = |a: &Expr, op: &str, b: &Expr| {
        format!("({}{op}{})", format_canonique(a), format_canonique(b))
    };

    match e {
        Nombre(r) => format_nombre(r),
        Neg(x) => format!("(-{})", format_canonique(x)),

        // même texte que ((a+b)-c) imbriqué, construit sans récursion sur la chaîne
        Chaine(tete, suite) => {
            let mut s = "(".repeat(suite.len());
            s.push_str(&format_canonique(tete));
            for (op, x) in suite {
                s.push_str(op.symbole());
                s.push_str(&format_canonique(x));
                s.push(')');
            }
            s
        }
        Pow(a, b) => bin(a, "**", b),

        Appel(f, x) => format!("{}({})", f.nom(), format_canonique(x)),
    }
}

/* ------------------------ Affichage d’un résultat ------------------------ */

/// Texte affichable d’un résultat :
/// - valeur : notation décimale sans zéros inutiles (8 et non 8.0), relisible telle quelle
/// - erreur : préfixe constant “Erreur : ”
pub fn format_resultat(r: &Resultat) -> String {
    match r {
        Ok(d) => d.to_string(),
        Err(e) => format!("Erreur : {e}"),
    }
}
