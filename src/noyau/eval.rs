//! Noyau — évaluation (pipeline réel)
//!
//! brut -> trim/vide -> longueur -> injection (texte brut) -> prétraitement
//!      -> validateur (texte canonique) -> AST -> Decimal (N chiffres)
//!
//! Aucune erreur ne traverse cette frontière autrement que par `Resultat`.

use std::panic::{self, AssertUnwindSafe};

use num_rational::BigRational;
use num_traits::Zero;
use tracing::{error, warn};

use super::decimal::{Decimal, CHIFFRES_DEFAUT, EXPOSANT_MAX};
use super::erreur::{ErreurCalcul, Resultat};
use super::expr::{Expr, Operation};
use super::fonctions::{appliquer, borner, puissance};
use super::pretraitement::{preprocess, ExpressionPretraitee, ModeAngle, TrigInverse};
use super::securite::{contient_injection, is_safe};

/// Garde-fou : longueur max d’une saisie (coût du balayage borné).
pub const LONGUEUR_MAX_DEFAUT: usize = 4096;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OptionsEval {
    pub mode: ModeAngle,
    pub trig_inverse: TrigInverse,
    pub chiffres: usize,
    pub longueur_max: usize,
}

impl Default for OptionsEval {
    fn default() -> Self {
        Self {
            mode: ModeAngle::default(),
            trig_inverse: TrigInverse::default(),
            chiffres: CHIFFRES_DEFAUT,
            longueur_max: LONGUEUR_MAX_DEFAUT,
        }
    }
}

/// API publique : évalue une saisie brute.
/// Fonction pure de (saisie, options).
pub fn eval_expression(expr_str: &str, options: &OptionsEval) -> Resultat {
    match panic::catch_unwind(AssertUnwindSafe(|| pipeline(expr_str, options))) {
        Ok(r) => r,
        Err(_) => {
            error!(expression = expr_str, "panique interne pendant l’évaluation");
            Err(ErreurCalcul::ExpressionInvalide("erreur interne".into()))
        }
    }
}

fn pipeline(expr_str: &str, options: &OptionsEval) -> Resultat {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(ErreurCalcul::ExpressionVide);
    }

    if s.chars().count() > options.longueur_max {
        return Err(ErreurCalcul::ExpressionInvalide(format!(
            "expression trop longue (max {} caractères)",
            options.longueur_max
        )));
    }

    // Avant le parsing : `__import__('os')` ne se tokenize même pas,
    // mais doit être classé comme tentative d’injection.
    if contient_injection(s) {
        warn!(expression = s, "saisie refusée (injection)");
        return Err(ErreurCalcul::ExpressionDangereuse);
    }

    let pretraitee = preprocess(s, options.mode, options.trig_inverse)?;

    if !is_safe(pretraitee.texte()) {
        warn!(texte = pretraitee.texte(), "forme canonique refusée par le validateur");
        return Err(ErreurCalcul::ExpressionDangereuse);
    }

    evaluate(&pretraitee, options.chiffres)
}

/// Évalue une expression prétraitée, arrondie à `chiffres` chiffres significatifs.
pub fn evaluate(expr: &ExpressionPretraitee, chiffres: usize) -> Resultat {
    let r = valeur(expr.arbre())?;
    arrondir(&r, chiffres)
}

/// Arrondi final, restreint à ce que `Decimal::from_str` relit :
/// ordre > EXPOSANT_MAX => Infini, ordre < -EXPOSANT_MAX => 0.
fn arrondir(r: &BigRational, chiffres: usize) -> Resultat {
    let d = Decimal::depuis_rationnel(r, chiffres);
    match d.ordre() {
        Some(o) if o > EXPOSANT_MAX => Err(ErreurCalcul::Infini),
        Some(o) if o < -EXPOSANT_MAX => Ok(Decimal::zero()),
        _ => Ok(d),
    }
}

/// Parcours de l’arbre (profondeur bornée par rpn::PROFONDEUR_MAX).
fn valeur(e: &Expr) -> Result<BigRational, ErreurCalcul> {
    use Expr::*;

    match e {
        Nombre(r) => Ok(r.clone()),
        Neg(x) => Ok(-valeur(x)?),

        // chaîne plate : itérative, intermédiaire borné après chaque pas
        Chaine(tete, suite) => {
            let mut acc = valeur(tete)?;
            for (op, x) in suite {
                let b = valeur(x)?;
                acc = match op {
                    Operation::Plus => acc + b,
                    Operation::Moins => acc - b,
                    Operation::Fois => acc * b,
                    Operation::Divise => {
                        if b.is_zero() {
                            return Err(ErreurCalcul::DivisionParZero);
                        }
                        acc / b
                    }
                };
                acc = borner(acc)?;
            }
            Ok(acc)
        }

        Pow(a, b) => borner(puissance(&valeur(a)?, &valeur(b)?)?),

        Appel(f, x) => appliquer(*f, &valeur(x)?),
    }
}

/// Pourcentage “de calculette” : valeur + valeur × pourcent / 100.
pub fn percentage(value: &str, percent: &str, chiffres: usize) -> Resultat {
    let v: Decimal = value.parse()?;
    let p: Decimal = percent.parse()?;

    let v = v.en_rationnel();
    let cent = BigRational::from_integer(100.into());
    let r = &v + &v * p.en_rationnel() / cent;
    arrondir(&r, chiffres)
}
