//! src/calculatrice/reglages.rs
//!
//! Réglages d’une session (valeurs par défaut + garde-fous).
//!
//! Les setters bornent toujours : une session ne peut pas être construite
//! avec une précision nulle, un historique de capacité 0, etc.

use crate::noyau::{ModeAngle, TrigInverse, CHIFFRES_DEFAUT, LONGUEUR_MAX_DEFAUT};

/// Garde-fou : on borne la précision (anti-abus / anti-gel).
const CHIFFRES_MAX: usize = 200;

/// Capacité par défaut de l’historique (FIFO).
const CAPACITE_HISTORIQUE_DEFAUT: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reglages {
    /// Chiffres significatifs des résultats et de la mémoire.
    pub chiffres: usize,
    pub capacite_historique: usize,
    /// Longueur max d’une saisie (caractères).
    pub longueur_max: usize,
    pub mode_initial: ModeAngle,
    pub trig_inverse: TrigInverse,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            chiffres: CHIFFRES_DEFAUT,
            capacite_historique: CAPACITE_HISTORIQUE_DEFAUT,
            longueur_max: LONGUEUR_MAX_DEFAUT,
            mode_initial: ModeAngle::Deg,
            trig_inverse: TrigInverse::default(),
        }
    }
}

impl Reglages {
    pub fn avec_chiffres(mut self, chiffres: usize) -> Self {
        self.set_chiffres(chiffres);
        self
    }

    pub fn avec_capacite_historique(mut self, capacite: usize) -> Self {
        self.capacite_historique = capacite.max(1);
        self
    }

    pub fn avec_longueur_max(mut self, longueur: usize) -> Self {
        self.longueur_max = longueur.max(1);
        self
    }

    pub fn avec_mode(mut self, mode: ModeAngle) -> Self {
        self.mode_initial = mode;
        self
    }

    pub fn avec_trig_inverse(mut self, politique: TrigInverse) -> Self {
        self.trig_inverse = politique;
        self
    }

    /// Garde-fou : limite chiffres (évite abus / gel plus tard).
    pub fn set_chiffres(&mut self, chiffres: usize) {
        self.chiffres = chiffres.clamp(1, CHIFFRES_MAX);
    }

    /// Réapplique toutes les bornes (champs publics => modifiables sans setter).
    pub fn bornes(self) -> Self {
        let capacite = self.capacite_historique;
        let longueur = self.longueur_max;
        let chiffres = self.chiffres;
        self.avec_chiffres(chiffres)
            .avec_capacite_historique(capacite)
            .avec_longueur_max(longueur)
    }
}
