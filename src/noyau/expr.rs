// src/noyau/expr.rs
//
// AST d’évaluation.
// - Nombre : littéral exact (les constantes y sont déjà substituées)
// - Appel  : fonction d’un ensemble FERMÉ (aucun autre nom n’est atteignable)
//
// IMPORTANT (SAFE):
// - profondeur bornée à la construction (rpn.rs) => les parcours récursifs sont sûrs.
// - les chaînes a+b-c*… sont plates (Chaine) : seule l’imbrication réelle compte.

use num_rational::BigRational;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,

    Sinh,
    Cosh,
    Tanh,

    Sqrt,
    Log10,
    Ln,
    Abs,
    Factorielle,

    // Conversions d’angle : insérées par le prétraitement, jamais tapées.
    Radians,
    Degres,
}

impl Fonction {
    /// Noms acceptés à la saisie.
    pub fn depuis_nom(nom: &str) -> Option<Self> {
        use Fonction::*;

        Some(match nom {
            "sin" => Sin,
            "cos" => Cos,
            "tan" => Tan,
            "asin" => Asin,
            "acos" => Acos,
            "atan" => Atan,
            "sinh" => Sinh,
            "cosh" => Cosh,
            "tanh" => Tanh,
            "sqrt" => Sqrt,
            "log" | "log10" => Log10,
            "ln" => Ln,
            "abs" => Abs,
            "factorial" => Factorielle,
            _ => return None,
        })
    }

    /// Nom canonique (texte prétraité).
    pub fn nom(self) -> &'static str {
        use Fonction::*;

        match self {
            Sin => "sin",
            Cos => "cos",
            Tan => "tan",
            Asin => "asin",
            Acos => "acos",
            Atan => "atan",
            Sinh => "sinh",
            Cosh => "cosh",
            Tanh => "tanh",
            Sqrt => "sqrt",
            Log10 => "log10",
            Ln => "ln",
            Abs => "abs",
            Factorielle => "factorial",
            Radians => "radians",
            Degres => "degrees",
        }
    }

    pub fn est_trig_directe(self) -> bool {
        matches!(self, Fonction::Sin | Fonction::Cos | Fonction::Tan)
    }

    pub fn est_trig_inverse(self) -> bool {
        matches!(self, Fonction::Asin | Fonction::Acos | Fonction::Atan)
    }
}

/// Opérations gauche-associatives (+ - * /).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Plus,
    Moins,
    Fois,
    Divise,
}

impl Operation {
    pub fn symbole(self) -> &'static str {
        match self {
            Operation::Plus => "+",
            Operation::Moins => "-",
            Operation::Fois => "*",
            Operation::Divise => "/",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(BigRational),

    Neg(Box<Expr>), // -x

    /// ((tête op1 a) op2 b)… stockée à plat : une longue somme ne creuse pas l’arbre.
    Chaine(Box<Expr>, Vec<(Operation, Expr)>),

    Pow(Box<Expr>, Box<Expr>), // x^y

    Appel(Fonction, Box<Expr>),
}

impl Expr {
    pub fn appel(f: Fonction, x: Expr) -> Expr {
        Expr::Appel(f, Box::new(x))
    }
}
