// src/noyau/fonctions.rs
//
// Application des fonctions de l’ensemble fermé + puissance.
// - exact quand c’est bon marché : abs, factorielle, √ de carrés parfaits, puissance entière bornée
// - sinon f64, puis retour au rationnel via la chaîne décimale canonique du résultat
//   (NaN => PasUnNombre, ±∞ => Infini)
// - hors de la plage du f64 (ln, log, √, puissance) : m × 10^d, seul m passe en f64
// - borner : taille d’un intermédiaire exact plafonnée après chaque opération

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::decimal::{
    exposant_ajuste, mul_pow10, rationnel_depuis_flottant, Decimal, EXPOSANT_MAX,
};
use super::erreur::ErreurCalcul;
use super::expr::Fonction;

/// Garde-fou : n! au-delà, refus (coût + taille).
const FACTORIELLE_MAX: u32 = 3000;

/// Puissance exacte seulement si |n| et la taille du résultat restent raisonnables.
const EXPOSANT_EXACT_MAX: u64 = 10_000;
const BITS_EXACTS_MAX: u64 = 1 << 18;

/// Garde-fou : bits (numérateur + dénominateur) d’un intermédiaire exact.
const BITS_INTERMEDIAIRES_MAX: u64 = 1 << 17;
/// Chiffres gardés quand un intermédiaire trop gros est ramené à un décimal.
const CHIFFRES_INTERMEDIAIRES: usize = 80;

/// |log2 x| au-delà duquel x n’a plus de f64 fidèle (max ≈ 2^1024).
const BITS_FLOTTANTS_MAX: i64 = 1000;

fn domaine(nom: &str) -> ErreurCalcul {
    ErreurCalcul::ExpressionInvalide(format!("erreur de domaine mathématique: {nom}"))
}

fn vers_flottant(x: &BigRational) -> Result<f64, ErreurCalcul> {
    x.to_f64()
        .ok_or_else(|| ErreurCalcul::ExpressionInvalide("conversion flottante impossible".into()))
}

fn depuis_flottant(y: f64) -> Result<BigRational, ErreurCalcul> {
    if y.is_nan() {
        return Err(ErreurCalcul::PasUnNombre);
    }
    if y.is_infinite() {
        return Err(ErreurCalcul::Infini);
    }
    rationnel_depuis_flottant(y).map_err(ErreurCalcul::ExpressionInvalide)
}

fn via_flottant(x: &BigRational, f: fn(f64) -> f64) -> Result<BigRational, ErreurCalcul> {
    depuis_flottant(f(vers_flottant(x)?))
}

/// asin/acos : argument dans [-1, 1].
fn via_flottant_borne(
    x: &BigRational,
    nom: &str,
    f: fn(f64) -> f64,
) -> Result<BigRational, ErreurCalcul> {
    let v = vers_flottant(x)?;
    if !(-1.0..=1.0).contains(&v) {
        return Err(domaine(nom));
    }
    depuis_flottant(f(v))
}

fn hors_plage_flottante(x: &BigRational) -> bool {
    (x.numer().bits() as i64 - x.denom().bits() as i64).abs() > BITS_FLOTTANTS_MAX
}

/// x > 0 écrit m × 10^d, m ∈ [1, 10).
fn mantisse_et_ordre(x: &BigRational) -> Result<(f64, i64), ErreurCalcul> {
    let d = exposant_ajuste(x);
    Ok((vers_flottant(&mul_pow10(x.clone(), -d))?, d))
}

/// log(m × 10^d) = log(m) + d × log(10)
fn logarithme(f: Fonction, x: &BigRational) -> Result<BigRational, ErreurCalcul> {
    let (m, d) = if hors_plage_flottante(x) {
        mantisse_et_ordre(x)?
    } else {
        (vers_flottant(x)?, 0)
    };
    let y = match f {
        Fonction::Ln => m.ln() + d as f64 * std::f64::consts::LN_10,
        _ => m.log10() + d as f64,
    };
    depuis_flottant(y)
}

fn racine(x: &BigRational) -> Result<BigRational, ErreurCalcul> {
    if let Some(r) = racine_exacte(x) {
        return Ok(r);
    }
    if !hors_plage_flottante(x) {
        return via_flottant(x, f64::sqrt);
    }
    // √(m × 10^2j) = √m × 10^j
    let j = exposant_ajuste(x).div_euclid(2);
    let m = vers_flottant(&mul_pow10(x.clone(), -2 * j))?;
    Ok(mul_pow10(depuis_flottant(m.sqrt())?, j))
}

pub fn appliquer(f: Fonction, x: &BigRational) -> Result<BigRational, ErreurCalcul> {
    use Fonction::*;

    match f {
        Abs => Ok(x.abs()),
        Factorielle => factorielle(x),

        Sqrt if x.is_negative() => Err(domaine(f.nom())),
        Sqrt => racine(x),

        Ln | Log10 if !x.is_positive() => Err(domaine(f.nom())),
        Ln | Log10 => logarithme(f, x),

        Sin => via_flottant(x, f64::sin),
        Cos => via_flottant(x, f64::cos),
        Tan => via_flottant(x, f64::tan),
        Asin => via_flottant_borne(x, f.nom(), f64::asin),
        Acos => via_flottant_borne(x, f.nom(), f64::acos),
        Atan => via_flottant(x, f64::atan),

        Sinh => via_flottant(x, f64::sinh),
        Cosh => via_flottant(x, f64::cosh),
        Tanh => via_flottant(x, f64::tanh),

        Radians => via_flottant(x, f64::to_radians),
        Degres => via_flottant(x, f64::to_degrees),
    }
}

/// √(p/q) exacte si p et q sont des carrés parfaits.
fn racine_exacte(x: &BigRational) -> Option<BigRational> {
    let p = x.numer().sqrt();
    let q = x.denom().sqrt();
    if &(&p * &p) == x.numer() && &(&q * &q) == x.denom() {
        Some(BigRational::new(p, q))
    } else {
        None
    }
}

fn factorielle(x: &BigRational) -> Result<BigRational, ErreurCalcul> {
    let invalide = |m: &str| ErreurCalcul::ExpressionInvalide(format!("factorial: {m}"));

    if !x.is_integer() {
        return Err(invalide("valeur entière attendue"));
    }
    if x.is_negative() {
        return Err(invalide("valeur négative"));
    }
    let n = x
        .to_integer()
        .to_u32()
        .filter(|n| *n <= FACTORIELLE_MAX)
        .ok_or_else(|| invalide("argument trop grand"))?;

    let mut acc = BigInt::one();
    for k in 2..=n {
        acc *= k;
    }
    Ok(BigRational::from_integer(acc))
}

/// base^exp
pub fn puissance(base: &BigRational, exp: &BigRational) -> Result<BigRational, ErreurCalcul> {
    if base.is_zero() && exp.is_negative() {
        return Err(ErreurCalcul::DivisionParZero);
    }

    if exp.is_integer() {
        if let Some(n) = exp.to_integer().to_i64() {
            let cout = base.numer().bits() + base.denom().bits();
            let m = n.unsigned_abs();
            if m <= EXPOSANT_EXACT_MAX && cout.saturating_mul(m) <= BITS_EXACTS_MAX {
                return Ok(rational_pow_int(base.clone(), n));
            }
        }
    } else if base.is_negative() {
        return Err(ErreurCalcul::ExpressionInvalide(
            "puissance: base négative et exposant non entier".into(),
        ));
    }

    let e = vers_flottant(exp)?;
    if base.is_positive() && hors_plage_flottante(base) {
        return puissance_par_ordre(base, e);
    }
    let b = vers_flottant(base)?;
    depuis_flottant(b.powf(e))
}

/// (m × 10^d)^e = 10^(e × (d + log10 m)), partie entière gardée hors du f64.
fn puissance_par_ordre(base: &BigRational, e: f64) -> Result<BigRational, ErreurCalcul> {
    let (m, d) = mantisse_et_ordre(base)?;
    let l = e * (d as f64 + m.log10());
    if !l.is_finite() {
        return Err(ErreurCalcul::PasUnNombre);
    }

    let limite = (EXPOSANT_MAX + 2) as f64;
    if l > limite {
        return Err(ErreurCalcul::Infini);
    }
    if l < -limite {
        return Ok(BigRational::zero());
    }

    let k = l.floor();
    Ok(mul_pow10(depuis_flottant(10f64.powf(l - k))?, k as i64))
}

/// Plafond des intermédiaires exacts (10^10000 * 10^10000 * … ne doit pas geler).
/// Au-delà de BITS_INTERMEDIAIRES_MAX : hors plage => Infini ou 0,
/// sinon arrondi à CHIFFRES_INTERMEDIAIRES chiffres.
pub fn borner(r: BigRational) -> Result<BigRational, ErreurCalcul> {
    let (bn, bd) = (r.numer().bits(), r.denom().bits());
    if bn + bd <= BITS_INTERMEDIAIRES_MAX {
        return Ok(r);
    }

    // ordre de grandeur à ±1 près
    let ordre = (bn as f64 - bd as f64) * std::f64::consts::LOG10_2;
    let limite = (EXPOSANT_MAX + 2) as f64;
    if ordre > limite {
        return Err(ErreurCalcul::Infini);
    }
    if ordre < -limite {
        return Ok(BigRational::zero());
    }
    Ok(Decimal::depuis_rationnel(&r, CHIFFRES_INTERMEDIAIRES).en_rationnel())
}

/* ------------------------ Outil interne (puissance entière) ------------------------ */

fn rational_pow_int(base: BigRational, exp: i64) -> BigRational {
    if exp == 0 {
        return BigRational::one();
    }
    if exp < 0 {
        let pos = rational_pow_int(base, -exp);
        return BigRational::one() / pos;
    }

    let mut e = exp as u64;
    let mut acc = BigRational::one();
    let mut b = base;

    while e > 0 {
        if (e & 1) == 1 {
            acc *= b.clone();
        }
        e >>= 1;
        if e > 0 {
            b *= b.clone();
        }
    }
    acc
}
