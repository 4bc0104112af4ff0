//! Tests scientifiques (campagne) : scénarios de bout en bout + invariants.
//!
//! Tout passe par l’API publique (`eval_expression`, `percentage`, `format_resultat`).
//! - budget temps global sur les scénarios lourds
//! - tailles bornées (profondeur, longueur)

use std::time::{Duration, Instant};

use super::{
    eval_expression, format_resultat, percentage, Decimal, ErreurCalcul, ModeAngle, OptionsEval,
    Resultat, TrigInverse,
};

fn eval(expr: &str) -> Resultat {
    eval_expression(expr, &OptionsEval::default())
}

fn eval_mode(expr: &str, mode: ModeAngle) -> Resultat {
    let options = OptionsEval {
        mode,
        ..OptionsEval::default()
    };
    eval_expression(expr, &options)
}

fn affiche(expr: &str) -> String {
    format_resultat(&eval(expr))
}

fn approx(expr: &str, attendu: f64, tol: f64) {
    let v = eval(expr)
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
        .to_f64()
        .unwrap_or_else(|| panic!("expr={expr:?} non représentable"));
    assert!((v - attendu).abs() <= tol, "expr={expr:?} v={v} attendu={attendu}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Scénarios d’affichage ------------------------ */

#[test]
fn sci_scenarios_affichage() {
    assert_eq!(affiche("2+2"), "4");
    assert_eq!(affiche("8/2"), "4");
    assert_eq!(affiche("2.5*4"), "10");
    assert_eq!(affiche(""), "Erreur : expression vide");
    assert_eq!(affiche("10/0"), "Erreur : division par zéro");
    assert_eq!(affiche("__import__('os')"), "Erreur : expression refusée");
    assert!(affiche("2+*3").starts_with("Erreur : expression invalide"));
}

#[test]
fn sci_pourcentage_de_calculette() {
    assert_eq!(format_resultat(&percentage("100", "10", 50)), "110");
    assert_eq!(format_resultat(&percentage("50", "100", 50)), "100");
    assert_eq!(format_resultat(&percentage("80", "0", 50)), "80");
    assert!(format_resultat(&percentage("x", "10", 50)).starts_with("Erreur : "));
}

/* ------------------------ Trig selon le mode ------------------------ */

#[test]
fn sci_trig_degres() {
    approx("sin(30)", 0.5, 1e-15);
    approx("cos(180)", -1.0, 0.0);
    approx("tan(45)", 1.0, 1e-15);
    approx("sin(30) + cos(60)", 1.0, 1e-15);
}

#[test]
fn sci_trig_radians() {
    let v = eval_mode("cos(pi)", ModeAngle::Rad).unwrap();
    assert_eq!(v.to_string(), "-1");

    // même saisie, autre mode => autre valeur
    assert_ne!(eval_mode("sin(1)", ModeAngle::Rad), eval_mode("sin(1)", ModeAngle::Deg));
}

#[test]
fn sci_trig_inverse_ronde_en_degres() {
    // asin(sin(30°)) retombe sur 30° (à l’epsilon flottant près)
    approx("asin(sin(30))", 30.0, 1e-12);
    approx("atan(1)", 45.0, 1e-12);
    approx("acos(-1)", 180.0, 1e-12);

    let heritage = OptionsEval {
        trig_inverse: TrigInverse::Heritage,
        ..OptionsEval::default()
    };
    let v = eval_expression("atan(1)", &heritage).unwrap().to_f64().unwrap();
    assert!((v - 1f64.to_radians().atan()).abs() < 1e-15, "{v}");
}

/* ------------------------ Fonctions usuelles ------------------------ */

#[test]
fn sci_fonctions_exactes() {
    assert_eq!(affiche("sqrt(16)"), "4");
    assert_eq!(affiche("√(0.25)"), "0.5");
    assert_eq!(affiche("abs(-7.5)"), "7.5");
    assert_eq!(affiche("factorial(10)"), "3628800");
    assert_eq!(affiche("log(0.001)"), "-3");
    assert_eq!(affiche("log10(100)"), "2");
    assert_eq!(affiche("2^0.5 * 2^0.5 - 2 + 2"), affiche("2^0.5 * 2^0.5"));
}

#[test]
fn sci_domaines() {
    for s in ["sqrt(-4)", "ln(0)", "log(-1)", "asin(2)", "acos(-1.5)", "factorial(3001)"] {
        assert!(
            matches!(eval(s), Err(ErreurCalcul::ExpressionInvalide(_))),
            "expr={s:?} => {:?}",
            eval(s)
        );
    }
    assert!(matches!(eval("(-8)^(1/3)"), Err(ErreurCalcul::ExpressionInvalide(_))));
}

/* ------------------------ Invariants ------------------------ */

#[test]
fn sci_idempotence() {
    for s in ["2+2", "1/3", "sin(30)", "10/0", "", "2^-3", "ln(2)", "__x"] {
        assert_eq!(eval(s), eval(s), "expr={s:?}");
    }
}

#[test]
fn sci_aller_retour_affichage() {
    // le texte affiché d’un succès se relit en la même valeur
    for s in [
        "2+2",
        "1/3",
        "-7/4",
        "2^200",
        "1/2^40",
        "sqrt(2)",
        "sin(30)",
        "-ln(10)",
        "factorial(60)",
    ] {
        let v = eval(s).unwrap_or_else(|e| panic!("expr={s:?} err={e}"));
        let texte = v.to_string();
        assert_eq!(eval(&texte), Ok(v), "expr={s:?} texte={texte:?}");
    }
}

#[test]
fn sci_precision_cinquante_chiffres() {
    assert_eq!(affiche("2/3"), format!("0.{}7", "6".repeat(49)));
    assert_eq!(affiche("0.1+0.2"), "0.3");
    assert_eq!(affiche("2^200"), "1.6069380442589902755419620923411626025222029937828E+60");
}

#[test]
fn sci_imbrication_profonde_controlee() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // 200 niveaux : ok
    let s = format!("{}0{}", "abs(".repeat(200), ")".repeat(200));
    assert_eq!(affiche(&s), "0");
    budget(t0, max);

    // 600 niveaux : refus propre (pas de débordement de pile)
    let s = format!("{}0{}", "abs(".repeat(600), ")".repeat(600));
    assert!(matches!(eval(&s), Err(ErreurCalcul::ExpressionInvalide(m)) if m.contains("imbriquée")));
    budget(t0, max);

    // parenthèses seules : pas de profondeur d’arbre
    let s = format!("{}1{}", "(".repeat(1000), ")".repeat(1000));
    assert_eq!(affiche(&s), "1");
    budget(t0, max);

    // chaîne plate de 1000 termes (1999 caractères) : un seul niveau
    let s = vec!["1"; 1000].join("+");
    assert_eq!(affiche(&s), "1000");
    let s = vec!["0.5"; 800].join("-");
    assert_eq!(affiche(&s), "-399");
    budget(t0, max);
}

#[test]
fn sci_grandes_valeurs() {
    assert_eq!(eval("10^400 * 10^400 / 10^800"), Ok(Decimal::from(1)));
    assert_eq!(eval("2^100000"), Err(ErreurCalcul::Infini));
    assert_eq!(eval("sinh(1000)"), Err(ErreurCalcul::Infini));
    assert_eq!(affiche("1E+60"), "1E+60");
    assert_eq!(affiche("1e-7"), "1E-7");

    // logarithmes et racines au-delà de la plage du f64
    assert_eq!(affiche("log(10^400)"), "400");
    assert_eq!(affiche("log(10^-400)"), "-400");
    let ln = eval("ln(10^400)").unwrap().to_f64().unwrap();
    assert!((ln - 921.034037197618).abs() < 1e-9, "{ln}");
    assert_eq!(affiche("sqrt(10^600)"), "1E+300");

    // tout résultat affiché se relit
    assert_eq!(eval("10^6000*10^6000"), Err(ErreurCalcul::Infini));
    let v = affiche("10^5000*10^5000");
    assert_eq!(v, "1E+10000");
    assert_eq!(affiche(&v), v);
}
