//! Noyau d’évaluation
//!
//! Organisation interne :
//! - jetons.rs        : tokenisation (constantes substituées, ^ / ** unifiés)
//! - rpn.rs           : shunting-yard + construction Expr (profondeur bornée)
//! - expr.rs          : AST + ensemble fermé de fonctions
//! - pretraitement.rs : mode d’angle + réécriture trig + forme canonique
//! - securite.rs      : validateur (liste blanche / liste noire)
//! - fonctions.rs     : fonctions et puissance (exact si possible, sinon f64 canonique)
//! - decimal.rs       : décimal haute précision (arrondi, lecture, affichage)
//! - format.rs        : texte canonique + affichage d’un résultat
//! - eval.rs          : pipeline complet + pourcentage

pub mod decimal;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod fonctions;
pub mod format;
pub mod jetons;
pub mod pretraitement;
pub mod rpn;
pub mod securite;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use decimal::{Decimal, CHIFFRES_DEFAUT};
pub use erreur::{ErreurCalcul, Resultat};
pub use eval::{eval_expression, evaluate, percentage, OptionsEval, LONGUEUR_MAX_DEFAUT};
pub use format::format_resultat;
pub use pretraitement::{preprocess, ExpressionPretraitee, ModeAngle, TrigInverse};
pub use securite::is_safe;
