//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - jamais de panique, et seulement des erreurs classées
//! - invariant clé : un succès affiché se relit en la même valeur

use std::time::{Duration, Instant};

use super::{eval_expression, ErreurCalcul, ModeAngle, OptionsEval, Resultat};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn eval(expr: &str, mode: ModeAngle) -> Resultat {
    let options = OptionsEval {
        mode,
        chiffres: 30,
        ..OptionsEval::default()
    };
    eval_expression(expr, &options)
}

/// Une erreur “interne” (panique rattrapée) n’est jamais normale.
fn is_erreur_attendue(e: &ErreurCalcul) -> bool {
    match e {
        ErreurCalcul::ExpressionInvalide(m) => !m.contains("erreur interne"),
        _ => true,
    }
}

fn check_aller_retour(expr: &str, r: &Resultat, mode: ModeAngle) {
    if let Ok(v) = r {
        let texte = v.to_string();
        assert_eq!(&eval(&texte, mode), r, "aller-retour: expr={expr:?} texte={texte:?}");
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    // petits entiers / décimaux, incluant 0 (utile pour tester les zéros)
    let a = rng.pick(10);
    match rng.pick(4) {
        0 => format!("{a}.{}", rng.pick(100)),
        1 => format!(".{}", rng.pick(10)),
        _ => format!("{a}"),
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "pi".to_string(),
        1 => "e".to_string(),
        2 => format!("-{}", gen_nombre(rng)),
        _ => gen_nombre(rng),
    }
}

const FONCTIONS: [&str; 15] = [
    "sin", "cos", "tan", "asin", "acos", "atan", "sinh", "cosh", "tanh", "sqrt", "log", "ln",
    "abs", "factorial", "√",
];

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let d = depth - 1;

    match rng.pick(9) {
        0 => gen_atom(rng),
        1 => format!("({}+{})", gen_expr(rng, d), gen_expr(rng, d)),
        2 => format!("({}-{})", gen_expr(rng, d), gen_expr(rng, d)),
        3 => format!("({}*{})", gen_expr(rng, d), gen_expr(rng, d)),
        4 => format!("({}/{})", gen_expr(rng, d), gen_expr(rng, d)),
        5 => {
            // exposant petit : on teste la puissance, pas la RAM
            let op = if rng.coin() { "^" } else { "**" };
            format!("({}{op}{})", gen_expr(rng, d), rng.pick(5) as i32 - 2)
        }
        _ => {
            let f = FONCTIONS[rng.pick(FONCTIONS.len() as u32) as usize];
            format!("{f}({})", gen_expr(rng, d))
        }
    }
}

/// Bruit : caractères pris au hasard dans un alphabet “hostile”.
fn gen_bruit(rng: &mut Rng) -> String {
    const ALPHABET: &[char] = &[
        '1', '2', '.', '+', '-', '*', '/', '^', '(', ')', ' ', 'e', 'x', '_', '√', 'π', '\'', ';',
        '[', 'é', '%', ',',
    ];
    let n = 1 + rng.pick(20) as usize;
    (0..n)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_aller_retour() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let mode = if rng.coin() { ModeAngle::Deg } else { ModeAngle::Rad };

        let r = eval(&expr, mode);
        assert_eq!(r, eval(&expr, mode), "non déterministe: expr={expr:?}");

        match &r {
            Ok(_) => {
                check_aller_retour(&expr, &r, mode);
                seen_ok += 1;
            }
            Err(e) => {
                assert!(is_erreur_attendue(e), "erreur non attendue: expr={expr:?} err={e}");
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_bruit_jamais_de_panique() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..400 {
        budget(t0, max);

        let expr = gen_bruit(&mut rng);
        if let Err(e) = eval(&expr, ModeAngle::Deg) {
            assert!(is_erreur_attendue(&e), "erreur non attendue: expr={expr:?} err={e}");
        }
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // 800 termes : ~10 niveaux d’arbre seulement
    let expr = somme_balancee("1/2", 800);
    let r = eval(&expr, ModeAngle::Deg).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    // 800*(1/2) = 400
    assert_eq!(r.to_string(), "400");
}

#[test]
fn fuzz_safe_somme_lineaire_plate() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // a+a+…+a : chaîne plate, aucune profondeur ajoutée par terme
    let mille = vec!["1"; 1000].join("+");
    assert_eq!(eval(&mille, ModeAngle::Deg).map(|v| v.to_string()), Ok("1000".to_string()));

    // jusqu’à la longueur maximale (4095 caractères)
    let pleine = vec!["1"; 2048].join("+");
    assert_eq!(pleine.len(), 4095);
    assert_eq!(eval(&pleine, ModeAngle::Deg).map(|v| v.to_string()), Ok("2048".to_string()));

    let melange = vec!["2*3-5"; 600].join("+");
    assert_eq!(eval(&melange, ModeAngle::Deg).map(|v| v.to_string()), Ok("600".to_string()));
    budget(t0, max);

    // l’imbrication réelle reste bornée
    let profonde = format!("{}1", "-(".repeat(600)) + &")".repeat(600);
    assert!(matches!(
        eval(&profonde, ModeAngle::Deg),
        Err(ErreurCalcul::ExpressionInvalide(m)) if m.contains("imbriquée")
    ));
}

#[test]
fn fuzz_safe_produit_geant_borne_en_temps() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // 300 facteurs de 10^10000 : l’intermédiaire exact doit être coupé tôt
    let expr = vec!["10^10000"; 300].join("*");
    assert_eq!(eval(&expr, ModeAngle::Deg), Err(ErreurCalcul::Infini));
    budget(t0, max);

    let expr = vec!["10^-10000"; 20].join("*");
    assert_eq!(eval(&expr, ModeAngle::Deg).map(|v| v.to_string()), Ok("0".to_string()));
    budget(t0, max);

    // sous le plafond, les grands intermédiaires qui se compensent restent exacts
    let expr = "10^3000*10^3000*10^-3000*10^-3000+1/3";
    let r = eval(expr, ModeAngle::Deg).map(|v| v.to_string());
    assert_eq!(r, Ok(format!("1.{}", "3".repeat(29))));
    budget(t0, max);
}
