// src/noyau/erreur.rs
//
// Taxonomie fermée des échecs d’évaluation.
// Toujours RETOURNÉE (jamais propagée en panique) : l’appelant choisit l’affichage.

use thiserror::Error;

use super::decimal::Decimal;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurCalcul {
    #[error("expression vide")]
    ExpressionVide,

    /// Refus du validateur (injection de code suspectée).
    #[error("expression refusée")]
    ExpressionDangereuse,

    #[error("division par zéro")]
    DivisionParZero,

    #[error("pas un nombre")]
    PasUnNombre,

    #[error("infini")]
    Infini,

    /// Syntaxe, domaine mathématique, lecture d’un nombre…
    #[error("expression invalide: {0}")]
    ExpressionInvalide(String),
}

/// Résultat d’une évaluation : valeur décimale OU erreur classée.
pub type Resultat = Result<Decimal, ErreurCalcul>;
