//! src/calculatrice/historique.rs
//!
//! Historique borné des calculs réussis (FIFO : la plus ancienne entrée part).

use std::collections::VecDeque;

use tracing::info;

/// Paire figée (saisie, résultat affiché).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntreeHistorique {
    pub expression: String,
    pub resultat: String,
}

#[derive(Clone, Debug)]
pub struct Historique {
    entrees: VecDeque<EntreeHistorique>,
    capacite: usize,
}

impl Historique {
    pub fn new(capacite: usize) -> Self {
        let capacite = capacite.max(1);
        Self {
            entrees: VecDeque::with_capacity(capacite),
            capacite,
        }
    }

    pub fn append(&mut self, expression: impl Into<String>, resultat: impl Into<String>) {
        let e = EntreeHistorique {
            expression: expression.into(),
            resultat: resultat.into(),
        };
        info!(expression = %e.expression, resultat = %e.resultat, "historique: ajout");

        self.entrees.push_back(e);
        while self.entrees.len() > self.capacite {
            self.entrees.pop_front();
        }
    }

    /// Copie (pas une vue vivante), de la plus ancienne à la plus récente.
    pub fn snapshot(&self) -> Vec<EntreeHistorique> {
        self.entrees.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.entrees.clear();
        info!("historique: effacé");
    }

    pub fn len(&self) -> usize {
        self.entrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }

    pub fn capacite(&self) -> usize {
        self.capacite
    }
}
