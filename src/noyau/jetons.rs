// src/noyau/jetons.rs

use num_rational::BigRational;

use super::decimal::{rationnel_depuis_flottant, rationnel_depuis_texte, Decimal};

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(BigRational),

    // Noms de fonctions (tout ce qui n’est pas constante / opérateur / nombre).
    // NOTE: to_rpn décidera si le nom est connu.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^ ou **

    // moins unaire : produit par to_rpn, jamais par tokenize
    Neg,

    LPar,
    RPar,
}

/// Constantes substituées dès la lecture, par leur littéral décimal canonique
/// (celui du f64 : 3.141592653589793, 2.718281828459045).
fn constante(nom: &str) -> Option<BigRational> {
    let x = match nom {
        "pi" => std::f64::consts::PI,
        "e" => std::f64::consts::E,
        _ => return None,
    };
    rationnel_depuis_flottant(x).ok()
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - décimaux (ex: 12, 1.5, .5, 5.) avec exposant collé (1.5E+10, 2e-3)
/// - opérateurs + - * / ^ et ** (puissance)
/// - parenthèses ( )
/// - π, pi, e (constantes -> nombres)
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
/// - √ (équivaut à ident("sqrt"))
pub fn tokenize(s: &str) -> Result<Vec<Tok>, String> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Opérateurs + parenthèses
        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '/' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            '*' if chars.get(i + 1) == Some(&'*') => {
                i += 1;
                Some(Tok::Caret)
            }
            '*' => Some(Tok::Star),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        if c == 'π' {
            out.push(Tok::Num(constante("pi").ok_or("constante π illisible")?));
            i += 1;
            continue;
        }

        // Racine carrée unicode : √  => ident("sqrt")
        if c == '√' {
            out.push(Tok::Ident("sqrt".to_string()));
            i += 1;
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let w = word.to_lowercase();

            match constante(&w) {
                Some(v) => out.push(Tok::Num(v)),
                None => out.push(Tok::Ident(w)),
            }
            continue;
        }

        // Nombre décimal (+ exposant collé)
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }

            // 2e5, 2E+5 : seulement si des chiffres suivent, sinon `e` reste la constante
            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let mut j = i + 1;
                if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                    j += 1;
                }
                if j < chars.len() && chars[j].is_ascii_digit() {
                    i = j;
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                }
            }

            let txt: String = chars[start..i].iter().collect();
            out.push(Tok::Num(rationnel_depuis_texte(&txt)?));
            continue;
        }

        return Err(format!("caractère inattendu: '{c}'"));
    }

    Ok(out)
}

/// Format utilitaire (trace) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    fn format_rat(r: &BigRational) -> String {
        match Decimal::exact(r) {
            Some(d) => d.to_string(),
            None => format!("{}/{}", r.numer(), r.denom()),
        }
    }

    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(r) => format_rat(r),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
