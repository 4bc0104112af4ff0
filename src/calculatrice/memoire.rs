//! src/calculatrice/memoire.rs
//!
//! Mémoire à une case (MS / MR / MC / M+ / M-).
//!
//! Contrat : la case contient toujours un décimal fini. Une entrée en erreur
//! est ignorée en silence (aucun changement d’état).

use tracing::{debug, info};

use crate::noyau::{Decimal, Resultat};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memoire {
    valeur: Decimal,
    chiffres: usize,
}

impl Memoire {
    /// Case à zéro ; `chiffres` = précision des M+ / M-.
    pub fn new(chiffres: usize) -> Self {
        Self {
            valeur: Decimal::zero(),
            chiffres,
        }
    }

    pub fn store(&mut self, v: Resultat) {
        let Ok(v) = v else {
            debug!("mémoire: stockage ignoré (entrée en erreur)");
            return;
        };
        self.valeur = v;
        info!(memoire = %self.valeur, "mémoire: stockage");
    }

    pub fn recall(&self) -> Decimal {
        self.valeur.clone()
    }

    pub fn clear(&mut self) {
        self.valeur = Decimal::zero();
        info!("mémoire: effacée");
    }

    pub fn add(&mut self, v: Resultat) {
        let Ok(v) = v else {
            debug!("mémoire: M+ ignoré (entrée en erreur)");
            return;
        };
        self.valeur = self.valeur.additionner(&v, self.chiffres);
        info!(memoire = %self.valeur, "mémoire: M+");
    }

    pub fn subtract(&mut self, v: Resultat) {
        let Ok(v) = v else {
            debug!("mémoire: M- ignoré (entrée en erreur)");
            return;
        };
        self.valeur = self.valeur.soustraire(&v, self.chiffres);
        info!(memoire = %self.valeur, "mémoire: M-");
    }
}
