// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Ident(name): doit être une fonction connue ET suivie de '(' ; sinon erreur.
// - Moins unaire: '-' quand on n’attend PAS une valeur => Tok::Neg (préfixe)
//     precedence: + - (1) < * / (2) < neg (3) < ^ (4)
//     => -2^2 = -(2^2) ; 2^-1 = 2^(-1) ; 2*-3 = 2*(-3)
// - Plus unaire: ignoré.
//
// NOTE:
// - Les fonctions sont traitées comme des opérateurs “collés” à leur argument
//   et sont sorties après la parenthèse fermante.

use super::expr::{Expr, Fonction, Operation};
use super::jetons::Tok;

/// Garde-fou : profondeur max de l’arbre (les parcours sont récursifs).
pub const PROFONDEUR_MAX: usize = 512;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        Tok::Caret => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret | Tok::Neg)
}

fn is_fonction(t: &Tok) -> bool {
    matches!(t, Tok::Ident(name) if Fonction::depuis_nom(name).is_some())
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sin"), LPar, Num(30), RPar, Caret, Num(2)]
///   rpn:    [Num(30), Ident("sin"), Num(2), Caret]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, String> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter les signes unaires.
    let mut prev_was_value = false;

    for (i, tok) in tokens.iter().cloned().enumerate() {
        match tok {
            Tok::Num(_) => {
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if Fonction::depuis_nom(&name).is_none() {
                    return Err(format!("identifiant inconnu: {name}"));
                }
                if !matches!(tokens.get(i + 1), Some(Tok::LPar)) {
                    return Err(format!("'(' attendue après {name}"));
                }
                // fonction : on la garde sur la pile (elle sortira après son argument)
                ops.push(Tok::Ident(name));
                prev_was_value = false;
            }

            Tok::LPar => {
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                // dépile jusqu’à '('
                let mut ouverte = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouverte = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouverte {
                    return Err("parenthèse fermante sans ouvrante".into());
                }

                // si une fonction est au sommet, on la sort aussi
                if ops.last().is_some_and(is_fonction) {
                    out.extend(ops.pop());
                }

                prev_was_value = true;
            }

            Tok::Plus if !prev_was_value => {}

            Tok::Minus if !prev_was_value => {
                // préfixe : rien à dépiler
                ops.push(Tok::Neg);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                // dépile tant que:
                // - on n'est pas bloqué par '('
                // - et on ne traverse pas une fonction (fonction reste collée à son argument)
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) || is_fonction(top) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    out.extend(ops.pop());
                }

                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Neg => return Err("jeton neg inattendu en entrée".into()),
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err("parenthèses non fermées".into());
        }
        out.push(op);
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
/// La profondeur de chaque sous-arbre est suivie : au-delà de PROFONDEUR_MAX, refus.
/// Une chaîne gauche-associative (1+2-3*…) compte pour un seul niveau.
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, String> {
    let mut st: Vec<(Expr, usize)> = Vec::new();

    fn borne(p: usize) -> Result<usize, String> {
        if p > PROFONDEUR_MAX {
            Err(format!("expression trop imbriquée (max {PROFONDEUR_MAX})"))
        } else {
            Ok(p)
        }
    }

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(r) => st.push((Expr::Nombre(r), 1)),

            Tok::Caret => {
                let (b, pb) = st.pop().ok_or("opérande manquant")?;
                let (a, pa) = st.pop().ok_or("opérande manquant")?;
                let p = borne(pa.max(pb) + 1)?;
                st.push((Expr::Pow(Box::new(a), Box::new(b)), p));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash => {
                let (b, pb) = st.pop().ok_or("opérande manquant")?;
                let (a, pa) = st.pop().ok_or("opérande manquant")?;

                let op = match tok {
                    Tok::Plus => Operation::Plus,
                    Tok::Minus => Operation::Moins,
                    Tok::Star => Operation::Fois,
                    _ => Operation::Divise,
                };

                // gauche déjà en chaîne : on prolonge (profondeur inchangée)
                let (e, p) = match a {
                    Expr::Chaine(tete, mut suite) => {
                        suite.push((op, b));
                        (Expr::Chaine(tete, suite), pa.max(pb + 1))
                    }
                    a => (Expr::Chaine(Box::new(a), vec![(op, b)]), pa.max(pb) + 1),
                };
                st.push((e, borne(p)?));
            }

            Tok::Neg => {
                let (x, px) = st.pop().ok_or("opérande manquant")?;
                st.push((Expr::Neg(Box::new(x)), borne(px + 1)?));
            }

            Tok::Ident(name) => {
                let f = Fonction::depuis_nom(&name)
                    .ok_or_else(|| format!("identifiant inconnu: {name}"))?;
                let (x, px) = st.pop().ok_or("fonction sans argument")?;
                st.push((Expr::appel(f, x), borne(px + 1)?));
            }

            Tok::LPar | Tok::RPar => return Err("parenthèse inattendue en RPN".into()),
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some((e, _)), true) => Ok(e),
        (None, _) => Err("expression incomplète".into()),
        (Some(_), false) => Err("opérateur manquant entre deux valeurs".into()),
    }
}
