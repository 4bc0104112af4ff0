// src/noyau/pretraitement.rs
//
// Prétraitement : texte brut -> forme canonique évaluable.
//   jetons (constantes substituées, ^ et ** unifiés) -> RPN -> Expr -> réécriture des angles
// La réécriture descend dans tout l’arbre : sin(cos(1)) est traité à chaque niveau.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use super::erreur::ErreurCalcul;
use super::expr::{Expr, Fonction};
use super::format::format_canonique;
use super::jetons::{format_tokens, tokenize};
use super::rpn::{from_rpn, to_rpn};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ModeAngle {
    #[default]
    Deg,
    Rad,
}

/// asin/acos/atan en mode DEG.
/// - Heritage : l’ARGUMENT est converti en radians (comme sin/cos/tan), comportement historique
/// - Degres   : le RÉSULTAT est converti en degrés (asin(0.5) = 30)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TrigInverse {
    Heritage,
    #[default]
    Degres,
}

impl fmt::Display for ModeAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ModeAngle::Deg => "DEG",
            ModeAngle::Rad => "RAD",
        })
    }
}

impl FromStr for ModeAngle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deg" => Ok(ModeAngle::Deg),
            "rad" => Ok(ModeAngle::Rad),
            _ => Err(format!("mode d’angle inconnu: {s} (deg|rad)")),
        }
    }
}

impl FromStr for TrigInverse {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "heritage" => Ok(TrigInverse::Heritage),
            "degres" => Ok(TrigInverse::Degres),
            _ => Err(format!("politique trig inverse inconnue: {s} (heritage|degres)")),
        }
    }
}

/// Expression prête pour le validateur et l’évaluateur.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpressionPretraitee {
    arbre: Expr,
    texte: String,
}

impl ExpressionPretraitee {
    pub fn arbre(&self) -> &Expr {
        &self.arbre
    }

    /// Forme texte canonique (littéraux, + - * / **, noms de l’espace fermé).
    pub fn texte(&self) -> &str {
        &self.texte
    }
}

pub fn preprocess(
    raw: &str,
    mode: ModeAngle,
    inverse: TrigInverse,
) -> Result<ExpressionPretraitee, ErreurCalcul> {
    let jetons = tokenize(raw).map_err(ErreurCalcul::ExpressionInvalide)?;
    let rpn = to_rpn(&jetons).map_err(ErreurCalcul::ExpressionInvalide)?;
    debug!(
        jetons = %format_tokens(&jetons),
        rpn = %format_tokens(&rpn),
        "prétraitement"
    );

    let arbre = from_rpn(&rpn).map_err(ErreurCalcul::ExpressionInvalide)?;
    let arbre = reecrire_angles(arbre, mode, inverse);
    let texte = format_canonique(&arbre);
    debug!(%texte, %mode, "forme canonique");

    Ok(ExpressionPretraitee { arbre, texte })
}

/// Réécriture récursive selon le mode d’angle.
fn reecrire_angles(expr: Expr, mode: ModeAngle, inverse: TrigInverse) -> Expr {
    use Expr::*;

    let r = |e: Box<Expr>| Box::new(reecrire_angles(*e, mode, inverse));

    match expr {
        Appel(f, x) => {
            let x = reecrire_angles(*x, mode, inverse);
            match (mode, inverse) {
                (ModeAngle::Deg, _) if f.est_trig_directe() => {
                    Expr::appel(f, Expr::appel(Fonction::Radians, x))
                }
                (ModeAngle::Deg, TrigInverse::Heritage) if f.est_trig_inverse() => {
                    Expr::appel(f, Expr::appel(Fonction::Radians, x))
                }
                (ModeAngle::Deg, TrigInverse::Degres) if f.est_trig_inverse() => {
                    Expr::appel(Fonction::Degres, Expr::appel(f, x))
                }
                // sinh/cosh/tanh, sqrt, log… : jamais convertis
                _ => Expr::appel(f, x),
            }
        }

        Neg(x) => Neg(r(x)),
        Chaine(tete, suite) => Chaine(
            r(tete),
            suite
                .into_iter()
                .map(|(op, x)| (op, reecrire_angles(x, mode, inverse)))
                .collect(),
        ),
        Pow(a, b) => Pow(r(a), r(b)),

        Nombre(v) => Nombre(v),
    }
}
