//! Moteur de calculatrice scientifique.
//!
//! - `noyau`        : évaluation pure (saisie + mode => résultat décimal ou erreur classée)
//! - `calculatrice` : session (mode d’angle, mémoire, historique)

pub mod calculatrice;
pub mod noyau;

pub use calculatrice::{Calculatrice, EntreeHistorique, Reglages};
pub use noyau::{format_resultat, Decimal, ErreurCalcul, ModeAngle, Resultat, TrigInverse};
