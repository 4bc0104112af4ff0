// src/calculatrice.rs
//
// Calculatrice — module session (racine)
// --------------------------------------
// Rôle:
// - Déclarer les sous-modules (réglages, mémoire, historique, état)
// - Ré-exporter Calculatrice (pour main.rs: use calculatrice_moteur::Calculatrice;)
//
// Important:
// - Aucune I/O ici : le pilote terminal (main.rs) lit / affiche, la session calcule.

pub mod etat;
pub mod historique;
pub mod memoire;
pub mod reglages;

// Ré-exports pratiques
pub use etat::Calculatrice;
pub use historique::{EntreeHistorique, Historique};
pub use memoire::Memoire;
pub use reglages::Reglages;
