// src/main.rs
//
// Calculatrice — pilote terminal
// ------------------------------
// Une commande par ligne sur stdin :
// - une expression            => évaluée (“=”), ajoutée à l’historique si succès
// - :deg / :rad               => mode d’angle
// - :ms / :m+ / :m- [expr]    => mémoire (dernier résultat, ou l’expression donnée)
// - :mr / :mc                 => rappel / effacement mémoire
// - :hist / :hclear           => historique
// - :pct V P                  => V + V×P/100
// - :quit                     => sortie
//
// Journal : RUST_LOG (défaut “warn”), sur stderr.

use std::io::{self, BufRead, Write};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use calculatrice_moteur::{
    format_resultat, Calculatrice, ModeAngle, Reglages, Resultat, TrigInverse,
};

#[derive(Parser, Debug)]
#[command(name = "calculatrice")]
#[command(about = "Calculatrice scientifique (ligne de commande)")]
struct Options {
    /// Démarrer en radians (défaut : degrés)
    #[arg(long)]
    rad: bool,

    /// Chiffres significatifs des résultats (1..=200)
    #[arg(long, default_value_t = 50)]
    chiffres: usize,

    /// asin/acos/atan en DEG : “degres” (résultat en degrés) ou “heritage”
    #[arg(long, default_value = "degres")]
    trig_inverse: TrigInverse,

    /// Capacité de l’historique
    #[arg(long, default_value_t = 100)]
    historique: usize,
}

impl Options {
    fn reglages(&self) -> Reglages {
        let mode = if self.rad { ModeAngle::Rad } else { ModeAngle::Deg };
        Reglages::default()
            .avec_mode(mode)
            .avec_chiffres(self.chiffres)
            .avec_trig_inverse(self.trig_inverse)
            .avec_capacite_historique(self.historique)
    }
}

fn installer_journal() {
    let filtre = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filtre)
        .with_writer(io::stderr)
        .init();
}

/// Ce que la boucle doit faire après une commande.
enum Suite {
    Continuer,
    Quitter,
}

struct Pilote {
    calc: Calculatrice,
    dernier: Resultat,
}

impl Pilote {
    fn new(calc: Calculatrice) -> Self {
        Self {
            calc,
            dernier: Ok(Default::default()),
        }
    }

    /// `:ms 2+3` évalue l’argument ; `:ms` seul reprend le dernier résultat.
    fn operande(&self, arg: &str) -> Resultat {
        if arg.is_empty() {
            self.dernier.clone()
        } else {
            self.calc.evaluate(arg)
        }
    }

    fn executer(&mut self, ligne: &str, out: &mut impl Write) -> io::Result<Suite> {
        let ligne = ligne.trim();
        if ligne.is_empty() {
            return Ok(Suite::Continuer);
        }

        let Some(commande) = ligne.strip_prefix(':') else {
            self.dernier = self.calc.calculer(ligne);
            writeln!(out, "{}", format_resultat(&self.dernier))?;
            return Ok(Suite::Continuer);
        };

        let (nom, arg) = commande
            .split_once(char::is_whitespace)
            .map(|(n, a)| (n, a.trim()))
            .unwrap_or((commande, ""));

        match nom {
            "quit" | "q" => return Ok(Suite::Quitter),

            "deg" => self.calc.set_angle_mode(ModeAngle::Deg),
            "rad" => self.calc.set_angle_mode(ModeAngle::Rad),

            "ms" | "m+" | "m-" => {
                let v = self.operande(arg);
                match nom {
                    "ms" => self.calc.memory_store(v),
                    "m+" => self.calc.memory_add(v),
                    _ => self.calc.memory_subtract(v),
                }
            }
            "mc" => self.calc.memory_clear(),
            "mr" => {
                let v = self.calc.memory_recall();
                writeln!(out, "{v}")?;
                self.dernier = Ok(v);
            }

            "hist" => {
                for e in self.calc.history_snapshot() {
                    writeln!(out, "{} = {}", e.expression, e.resultat)?;
                }
            }
            "hclear" => self.calc.history_clear(),

            "pct" => {
                let mut it = arg.split_whitespace();
                let r = match (it.next(), it.next(), it.next()) {
                    (Some(v), Some(p), None) => self.calc.percentage(v, p),
                    _ => {
                        writeln!(out, "usage : :pct VALEUR POURCENT")?;
                        return Ok(Suite::Continuer);
                    }
                };
                writeln!(out, "{}", format_resultat(&r))?;
                self.dernier = r;
            }

            "mode" => writeln!(out, "{}", self.calc.angle_mode())?,

            _ => writeln!(out, "commande inconnue : :{nom}")?,
        }

        Ok(Suite::Continuer)
    }
}

fn main() -> io::Result<()> {
    let options = Options::parse();
    installer_journal();

    let mut pilote = Pilote::new(Calculatrice::new(options.reglages()));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for ligne in stdin.lock().lines() {
        match pilote.executer(&ligne?, &mut out)? {
            Suite::Continuer => out.flush()?,
            Suite::Quitter => break,
        }
    }

    Ok(())
}
