//! src/calculatrice/etat.rs
//!
//! Session de calculatrice : UN objet possédé qui regroupe le mode d’angle,
//! les réglages, la mémoire et l’historique (aucun état global).
//!
//! Contrats :
//! - `evaluate` est pure (saisie + mode) ; elle ne touche ni mémoire ni historique.
//! - Historique / mémoire ne changent que par appel explicite (ou `calculer`).

use tracing::info;

use super::historique::{EntreeHistorique, Historique};
use super::memoire::Memoire;
use super::reglages::Reglages;
use crate::noyau::{
    eval_expression, format_resultat, percentage, Decimal, ModeAngle, OptionsEval, Resultat,
};

#[derive(Clone, Debug)]
pub struct Calculatrice {
    mode: ModeAngle,
    reglages: Reglages,
    memoire: Memoire,
    historique: Historique,
}

impl Default for Calculatrice {
    fn default() -> Self {
        Self::new(Reglages::default())
    }
}

impl Calculatrice {
    pub fn new(reglages: Reglages) -> Self {
        let reglages = reglages.bornes();
        Self {
            mode: reglages.mode_initial,
            memoire: Memoire::new(reglages.chiffres),
            historique: Historique::new(reglages.capacite_historique),
            reglages,
        }
    }

    pub fn reglages(&self) -> &Reglages {
        &self.reglages
    }

    /* ------------------------ Mode d’angle ------------------------ */

    pub fn angle_mode(&self) -> ModeAngle {
        self.mode
    }

    pub fn set_angle_mode(&mut self, mode: ModeAngle) {
        self.mode = mode;
        info!(%mode, "mode d’angle");
    }

    /* ------------------------ Évaluation ------------------------ */

    fn options(&self) -> OptionsEval {
        OptionsEval {
            mode: self.mode,
            trig_inverse: self.reglages.trig_inverse,
            chiffres: self.reglages.chiffres,
            longueur_max: self.reglages.longueur_max,
        }
    }

    pub fn evaluate(&self, expression: &str) -> Resultat {
        eval_expression(expression, &self.options())
    }

    pub fn percentage(&self, value: &str, percent: &str) -> Resultat {
        percentage(value, percent, self.reglages.chiffres)
    }

    /// Touche “=” : évalue puis, si succès, ajoute (saisie, résultat affiché) à l’historique.
    pub fn calculer(&mut self, expression: &str) -> Resultat {
        let r = self.evaluate(expression);
        if r.is_ok() {
            self.historique
                .append(expression.trim(), format_resultat(&r));
        }
        r
    }

    /* ------------------------ Mémoire ------------------------ */

    pub fn memory_store(&mut self, v: Resultat) {
        self.memoire.store(v);
    }

    pub fn memory_recall(&self) -> Decimal {
        self.memoire.recall()
    }

    pub fn memory_clear(&mut self) {
        self.memoire.clear();
    }

    pub fn memory_add(&mut self, v: Resultat) {
        self.memoire.add(v);
    }

    pub fn memory_subtract(&mut self, v: Resultat) {
        self.memoire.subtract(v);
    }

    /* ------------------------ Historique ------------------------ */

    pub fn history_append(&mut self, expression: impl Into<String>, resultat: impl Into<String>) {
        self.historique.append(expression, resultat);
    }

    pub fn history_snapshot(&self) -> Vec<EntreeHistorique> {
        self.historique.snapshot()
    }

    pub fn history_clear(&mut self) {
        self.historique.clear();
    }
}
