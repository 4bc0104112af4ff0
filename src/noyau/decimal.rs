// src/noyau/decimal.rs
//
// Décimal haute précision (toujours fini).
// - valeur = coef × 10^exposant, coef sans zéro final (forme unique => Eq structurel)
// - arrondi : N chiffres significatifs, demi-pair
// - texte   : notation simple, ou d.dddE±n hors de la plage lisible
//
// Le calcul se fait en rationnels exacts (num-rational) ; Decimal n’est que la
// forme “sortie” (et la forme mémoire).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::erreur::ErreurCalcul;

/// Précision par défaut (chiffres significatifs).
pub const CHIFFRES_DEFAUT: usize = 50;

/// Garde-fou : |ordre de grandeur| d’un littéral (anti 1E999999999).
/// Les résultats sont restreints à la même plage, donc toujours relisibles.
pub(super) const EXPOSANT_MAX: i64 = 10_000;

/// Au-delà (ou en dessous de -6), l’affichage passe en notation scientifique.
const PLAGE_NOTATION_SIMPLE: i64 = 50;

/* ------------------------ Puissances de 10 ------------------------ */

fn pow10(n: u32) -> BigInt {
    BigInt::from(10).pow(n)
}

/// r × 10^e (e signé).
pub(super) fn mul_pow10(r: BigRational, e: i64) -> BigRational {
    let p = BigRational::from_integer(pow10(e.unsigned_abs() as u32));
    if e >= 0 {
        r * p
    } else {
        r / p
    }
}

/* ------------------------ Littéraux ------------------------ */

fn que_des_chiffres(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// Découpe un littéral en (coef, exposant) : `12`, `-1.5`, `.5`, `5.`, `1.5E+10`, `2e-3`.
fn lire_litteral(s: &str) -> Result<(BigInt, i64), String> {
    let t = s.trim();
    let invalide = || format!("nombre invalide: '{t}'");

    let (neg, corps) = match t.as_bytes().first() {
        Some(b'-') => (true, &t[1..]),
        Some(b'+') => (false, &t[1..]),
        _ => (false, t),
    };

    let (mantisse, exposant) = match corps.find(|c: char| c == 'e' || c == 'E') {
        Some(p) => (&corps[..p], Some(&corps[p + 1..])),
        None => (corps, None),
    };

    let (entier, frac) = mantisse.split_once('.').unwrap_or((mantisse, ""));
    if (entier.is_empty() && frac.is_empty()) || !que_des_chiffres(entier) || !que_des_chiffres(frac)
    {
        return Err(invalide());
    }

    let exp: i64 = match exposant {
        None => 0,
        Some(x) => {
            let (neg_e, chiffres) = match x.as_bytes().first() {
                Some(b'-') => (true, &x[1..]),
                Some(b'+') => (false, &x[1..]),
                _ => (false, x),
            };
            if chiffres.is_empty() || !que_des_chiffres(chiffres) {
                return Err(invalide());
            }
            if chiffres.len() > 6 {
                return Err(format!("exposant hors limites: '{t}'"));
            }
            let v: i64 = chiffres.parse().map_err(|_| invalide())?;
            if neg_e {
                -v
            } else {
                v
            }
        }
    };

    let tous = format!("{entier}{frac}");
    let significatifs = tous.trim_start_matches('0').len() as i64;
    if significatifs == 0 {
        return Ok((BigInt::zero(), 0));
    }

    // borne sur l’ordre (d.dddE±n), pas sur l’exposant brut : 0.1E+10001 passe
    let exp10 = exp - frac.len() as i64;
    if (exp10 + significatifs - 1).abs() > EXPOSANT_MAX {
        return Err(format!("exposant hors limites: '{t}'"));
    }

    let n = BigInt::parse_bytes(tous.as_bytes(), 10).ok_or_else(invalide)?;
    Ok((if neg { -n } else { n }, exp10))
}

/// Littéral décimal -> rationnel exact.
pub fn rationnel_depuis_texte(s: &str) -> Result<BigRational, String> {
    let (coef, exp) = lire_litteral(s)?;
    Ok(mul_pow10(BigRational::from_integer(coef), exp))
}

/// Flottant (fini) -> rationnel exact de sa représentation décimale canonique
/// (plus courte chaîne qui redonne le même f64), et non de sa valeur binaire.
pub fn rationnel_depuis_flottant(x: f64) -> Result<BigRational, String> {
    rationnel_depuis_texte(&format!("{x}"))
}

/* ------------------------ Arrondi ------------------------ */

/// floor(log10(a)) pour a > 0.
pub(super) fn exposant_ajuste(a: &BigRational) -> i64 {
    let ln = a.numer().to_str_radix(10).len() as i64;
    let ld = a.denom().to_str_radix(10).len() as i64;
    let e = ln - ld;
    // a ∈ (10^(e-1), 10^(e+1))
    if mul_pow10(BigRational::one(), e) > *a {
        e - 1
    } else {
        e
    }
}

/* ------------------------ Decimal ------------------------ */

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Decimal {
    coef: BigInt,
    exposant: i64,
}

impl Decimal {
    pub fn zero() -> Self {
        Self::default()
    }

    fn normalise(mut coef: BigInt, mut exposant: i64) -> Self {
        if coef.is_zero() {
            return Self::zero();
        }
        let dix = BigInt::from(10);
        while (&coef % &dix).is_zero() {
            coef /= &dix;
            exposant += 1;
        }
        Self { coef, exposant }
    }

    /// Arrondi demi-pair de `r` à `chiffres` chiffres significatifs.
    pub fn depuis_rationnel(r: &BigRational, chiffres: usize) -> Self {
        if r.is_zero() {
            return Self::zero();
        }

        let p = chiffres.max(1) as i64;
        let a = r.abs();
        let echelle = p - 1 - exposant_ajuste(&a);

        // x ∈ [10^(p-1), 10^p)
        let x = mul_pow10(a, echelle);
        let q = x.numer() / x.denom();
        let reste = x.numer() - &q * x.denom();

        let q = match (&reste * 2u32).cmp(x.denom()) {
            Ordering::Less => q,
            Ordering::Greater => q + 1u32,
            Ordering::Equal => {
                if (&q % 2u32).is_zero() {
                    q
                } else {
                    q + 1u32
                }
            }
        };

        let coef = if r.is_negative() { -q } else { q };
        Self::normalise(coef, -echelle)
    }

    /// Conversion sans perte, si `r` est un décimal fini (dénominateur en 2^a·5^b).
    pub fn exact(r: &BigRational) -> Option<Self> {
        let d = r.denom();
        let a = d.trailing_zeros().unwrap_or(0);
        let impair = d >> a;

        // 5^b a floor(b·log2(5)) + 1 bits : deux candidats au plus
        let approx = (impair.bits() - 1) as f64 / 5f64.log2();
        let b = [approx.floor() as u32, approx.floor() as u32 + 1]
            .into_iter()
            .find(|&b| BigInt::from(5).pow(b) == impair)?;

        let s = a.max(b as u64);
        let coef = r.numer() * pow10(s as u32) / d;
        Some(Self::normalise(coef, -(s as i64)))
    }

    pub fn en_rationnel(&self) -> BigRational {
        mul_pow10(BigRational::from_integer(self.coef.clone()), self.exposant)
    }

    pub fn to_f64(&self) -> Option<f64> {
        self.en_rationnel().to_f64()
    }

    /// Exposant de la notation d.dddE±n ; None pour zéro.
    pub fn ordre(&self) -> Option<i64> {
        if self.coef.is_zero() {
            return None;
        }
        let n = self.coef.magnitude().to_str_radix(10).len() as i64;
        Some(self.exposant + n - 1)
    }

    pub fn additionner(&self, autre: &Decimal, chiffres: usize) -> Self {
        Self::depuis_rationnel(&(self.en_rationnel() + autre.en_rationnel()), chiffres)
    }

    pub fn soustraire(&self, autre: &Decimal, chiffres: usize) -> Self {
        Self::depuis_rationnel(&(self.en_rationnel() - autre.en_rationnel()), chiffres)
    }
}

impl From<i64> for Decimal {
    fn from(n: i64) -> Self {
        Self::normalise(BigInt::from(n), 0)
    }
}

/// Lecture exacte (aucun arrondi), comme `Decimal("...")`.
impl FromStr for Decimal {
    type Err = ErreurCalcul;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (coef, exp) = lire_litteral(s).map_err(ErreurCalcul::ExpressionInvalide)?;
        Ok(Self::normalise(coef, exp))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coef.is_zero() {
            return f.write_str("0");
        }

        let signe = if self.coef.is_negative() { "-" } else { "" };
        let chiffres = self.coef.magnitude().to_str_radix(10);
        let n = chiffres.len() as i64;
        let ajuste = self.exposant + n - 1;

        if !(-6..PLAGE_NOTATION_SIMPLE).contains(&ajuste) {
            let (tete, queue) = chiffres.split_at(1);
            let signe_e = if ajuste < 0 { '-' } else { '+' };
            return if queue.is_empty() {
                write!(f, "{signe}{tete}E{signe_e}{}", ajuste.abs())
            } else {
                write!(f, "{signe}{tete}.{queue}E{signe_e}{}", ajuste.abs())
            };
        }

        if self.exposant >= 0 {
            let zeros = "0".repeat(self.exposant as usize);
            return write!(f, "{signe}{chiffres}{zeros}");
        }

        // position de la virgule dans `chiffres`
        let pos = n + self.exposant;
        if pos > 0 {
            let (ent, frac) = chiffres.split_at(pos as usize);
            write!(f, "{signe}{ent}.{frac}")
        } else {
            let zeros = "0".repeat((-pos) as usize);
            write!(f, "{signe}0.{zeros}{chiffres}")
        }
    }
}
