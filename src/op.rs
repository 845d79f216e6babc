use std::fmt;

/// Precedence level. Larger binds tighter.
pub type Prec = u8;

/// One of the four binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Times,
    Divide,
    Plus,
    Minus,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Times,
        Operator::Divide,
        Operator::Plus,
        Operator::Minus,
    ];

    pub fn from_char(ch: char) -> Option<Operator> {
        match ch {
            '*' => Some(Operator::Times),
            '/' => Some(Operator::Divide),
            '+' => Some(Operator::Plus),
            '-' => Some(Operator::Minus),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Operator::Times => '*',
            Operator::Divide => '/',
            Operator::Plus => '+',
            Operator::Minus => '-',
        }
    }

    /// The precedence of this operator.
    ///
    /// Note that this is a four-level total order, `*` > `/` > `+` > `-`, and _not_ the usual
    /// two-level arithmetic one where `*` ties with `/` and `+` ties with `-`. So `1 / 2 * 3`
    /// groups as `1 / (2 * 3)`, and `1 - 2 + 3` groups as `1 - (2 + 3)`. Anyone expecting
    /// conventional precedence should not rely on the tree shape for evaluation.
    pub fn prec(self) -> Prec {
        match self {
            Operator::Times => 3,
            Operator::Divide => 2,
            Operator::Plus => 1,
            Operator::Minus => 0,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[test]
fn test_operator_chars() {
    for op in Operator::ALL {
        assert_eq!(Operator::from_char(op.as_char()), Some(op));
    }
    assert_eq!(Operator::from_char('%'), None);
    assert_eq!(Operator::from_char('1'), None);
}

#[test]
fn test_prec_is_a_total_order() {
    let precs = Operator::ALL.map(Operator::prec);
    assert_eq!(precs, [3, 2, 1, 0]);
}
