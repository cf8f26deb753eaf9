use crate::element::Element;
use crate::smiles::error::SmilesError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Atom(AtomToken),
    Bond { bond: BondToken, pos: usize },
    RingClosure { digit: u16, pos: usize },
    OpenParen(usize),
    CloseParen(usize),
    Dot(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomToken {
    pub element: Element,
    pub is_aromatic: bool,
    pub isotope: u16,
    /// Explicit H count; always `Some` for bracket atoms.
    pub hcount: Option<u8>,
    pub charge: i8,
    pub atom_class: u16,
    pub is_bracket: bool,
    pub pos: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondToken {
    Single,
    Double,
    Triple,
    Aromatic,
    Up,
    Down,
}

const MAX_CHARGE: i8 = 15;

struct Scanner {
    chars: Vec<char>,
    pos: usize,
}

impl Scanner {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn digits(&mut self) -> Option<u32> {
        let start = self.pos;
        let mut value: u32 = 0;
        while let Some(d) = self.peek().and_then(|c| c.to_digit(10)) {
            value = value.saturating_mul(10).saturating_add(d);
            self.pos += 1;
        }
        (self.pos > start).then_some(value)
    }
}

/// Splits a SMILES string into tokens. Whitespace ends the string; anything
/// after it is a title and is ignored.
pub fn tokenize(input: &str) -> Result<Vec<Token>, SmilesError> {
    let mut s = Scanner {
        chars: input.chars().collect(),
        pos: 0,
    };
    let mut tokens = Vec::new();

    while let Some(ch) = s.peek() {
        let pos = s.pos;
        let token = match ch {
            c if c.is_whitespace() => break,
            '[' => Token::Atom(bracket_atom(&mut s)?),
            'B' | 'C' if s.peek_at(1) == Some(if ch == 'B' { 'r' } else { 'l' }) => {
                s.pos += 2;
                let element = if ch == 'B' { Element::BR } else { Element::CL };
                Token::Atom(bare_atom(element, false, pos))
            }
            'B' | 'C' | 'N' | 'O' | 'P' | 'S' | 'F' | 'I' | '*' => {
                s.pos += 1;
                let element = Element::from_symbol(&ch.to_string())
                    .ok_or(SmilesError::UnexpectedChar { pos, ch })?;
                Token::Atom(bare_atom(element, false, pos))
            }
            'b' | 'c' | 'n' | 'o' | 'p' | 's' => {
                s.pos += 1;
                let element = Element::from_symbol(&ch.to_ascii_uppercase().to_string())
                    .ok_or(SmilesError::UnexpectedChar { pos, ch })?;
                Token::Atom(bare_atom(element, true, pos))
            }
            '-' | '=' | '#' | ':' | '/' | '\\' => {
                s.pos += 1;
                let bond = match ch {
                    '-' => BondToken::Single,
                    '=' => BondToken::Double,
                    '#' => BondToken::Triple,
                    ':' => BondToken::Aromatic,
                    '/' => BondToken::Up,
                    _ => BondToken::Down,
                };
                Token::Bond { bond, pos }
            }
            '(' => {
                s.pos += 1;
                Token::OpenParen(pos)
            }
            ')' => {
                s.pos += 1;
                Token::CloseParen(pos)
            }
            '.' => {
                s.pos += 1;
                Token::Dot(pos)
            }
            '0'..='9' => {
                s.pos += 1;
                Token::RingClosure {
                    digit: ch as u16 - '0' as u16,
                    pos,
                }
            }
            '%' => {
                s.pos += 1;
                match (s.peek().and_then(|c| c.to_digit(10)), s.peek_at(1).and_then(|c| c.to_digit(10))) {
                    (Some(tens), Some(ones)) => {
                        s.pos += 2;
                        Token::RingClosure {
                            digit: (tens * 10 + ones) as u16,
                            pos,
                        }
                    }
                    _ => return Err(SmilesError::UnexpectedChar { pos, ch }),
                }
            }
            _ => return Err(SmilesError::UnexpectedChar { pos, ch }),
        };
        tokens.push(token);
    }

    Ok(tokens)
}

fn bare_atom(element: Element, is_aromatic: bool, pos: usize) -> AtomToken {
    AtomToken {
        element,
        is_aromatic,
        isotope: 0,
        hcount: None,
        charge: 0,
        atom_class: 0,
        is_bracket: false,
        pos,
    }
}

// [isotope? symbol chirality? hcount? charge? class?]
fn bracket_atom(s: &mut Scanner) -> Result<AtomToken, SmilesError> {
    let start = s.pos;
    s.pos += 1;

    let isotope = match s.digits() {
        Some(n) => u16::try_from(n).map_err(|_| SmilesError::NumberOverflow { pos: start })?,
        None => 0,
    };
    let (element, is_aromatic) = bracket_element(s, start)?;
    skip_chirality(s);

    let hcount = if s.eat('H') {
        match s.peek().and_then(|c| c.to_digit(10)) {
            Some(d) => {
                s.pos += 1;
                d as u8
            }
            None => 1,
        }
    } else {
        0
    };

    let charge = bracket_charge(s)?;

    let atom_class = if s.eat(':') {
        let n = s.digits().ok_or(SmilesError::UnexpectedChar {
            pos: s.pos,
            ch: s.peek().unwrap_or(']'),
        })?;
        u16::try_from(n).map_err(|_| SmilesError::NumberOverflow { pos: start })?
    } else {
        0
    };

    if !s.eat(']') {
        return Err(SmilesError::UnclosedBracket { pos: start });
    }

    Ok(AtomToken {
        element,
        is_aromatic,
        isotope,
        hcount: Some(hcount),
        charge,
        atom_class,
        is_bracket: true,
        pos: start,
    })
}

fn bracket_element(s: &mut Scanner, start: usize) -> Result<(Element, bool), SmilesError> {
    let first = s.peek().ok_or(SmilesError::UnclosedBracket { pos: start })?;
    let second = s.peek_at(1);

    if first == '*' {
        s.pos += 1;
        return Ok((Element::WILDCARD, false));
    }

    if first.is_ascii_lowercase() {
        let two: Option<Element> = match (first, second) {
            ('s', Some('e')) => Some(Element::SE),
            ('t', Some('e')) => Some(Element::TE),
            ('a', Some('s')) => Some(Element::AS),
            _ => None,
        };
        if let Some(e) = two {
            s.pos += 2;
            return Ok((e, true));
        }
        let one = match first {
            'b' => Some(Element::B),
            'c' => Some(Element::C),
            'n' => Some(Element::N),
            'o' => Some(Element::O),
            'p' => Some(Element::P),
            's' => Some(Element::S),
            _ => None,
        };
        return match one {
            Some(e) => {
                s.pos += 1;
                Ok((e, true))
            }
            None => Err(SmilesError::InvalidElement {
                pos: s.pos,
                text: first.to_string(),
            }),
        };
    }

    if first.is_ascii_uppercase() {
        if let Some(lower) = second.filter(|c| c.is_ascii_lowercase()) {
            let symbol: String = [first, lower].iter().collect();
            if let Some(e) = Element::from_symbol(&symbol) {
                s.pos += 2;
                return Ok((e, false));
            }
        }
        if let Some(e) = Element::from_symbol(&first.to_string()) {
            s.pos += 1;
            return Ok((e, false));
        }
    }

    Err(SmilesError::InvalidElement {
        pos: s.pos,
        text: first.to_string(),
    })
}

// Stereo is parsed so that valid input is accepted, but depictions carry
// no wedges.
fn skip_chirality(s: &mut Scanner) {
    if !s.eat('@') {
        return;
    }
    if s.eat('@') {
        return;
    }
    let class_letters = matches!(
        (s.peek(), s.peek_at(1)),
        (Some('T'), Some('H')) | (Some('A'), Some('L')) | (Some('S'), Some('P'))
            | (Some('T'), Some('B')) | (Some('O'), Some('H'))
    );
    if class_letters {
        s.pos += 2;
        s.digits();
    }
}

fn bracket_charge(s: &mut Scanner) -> Result<i8, SmilesError> {
    let sign: i8 = match s.peek() {
        Some('+') => 1,
        Some('-') => -1,
        _ => return Ok(0),
    };
    let sign_char = if sign > 0 { '+' } else { '-' };
    let pos = s.pos;
    s.pos += 1;

    let magnitude = if let Some(n) = s.digits() {
        n
    } else {
        let mut count = 1;
        while s.eat(sign_char) {
            count += 1;
        }
        count
    };

    if magnitude > MAX_CHARGE as u32 {
        return Err(SmilesError::InvalidCharge { pos });
    }
    Ok(sign * magnitude as i8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_atom(s: &str) -> AtomToken {
        match tokenize(s).unwrap().as_slice() {
            [Token::Atom(a)] => a.clone(),
            other => panic!("expected one atom, got {:?}", other),
        }
    }

    #[test]
    fn organic_subset_two_letter() {
        let tokens = tokenize("ClCBr").unwrap();
        assert_eq!(tokens.len(), 3);
        assert!(matches!(&tokens[0], Token::Atom(a) if a.element == Element::CL));
        assert!(matches!(&tokens[1], Token::Atom(a) if a.element == Element::C));
        assert!(matches!(&tokens[2], Token::Atom(a) if a.element == Element::BR));
    }

    #[test]
    fn bracket_atom_fields() {
        let a = single_atom("[13CH3+:7]");
        assert_eq!(a.isotope, 13);
        assert_eq!(a.element, Element::C);
        assert_eq!(a.hcount, Some(3));
        assert_eq!(a.charge, 1);
        assert_eq!(a.atom_class, 7);
        assert!(a.is_bracket);
    }

    #[test]
    fn bracket_without_h_has_zero_h() {
        assert_eq!(single_atom("[Na+]").hcount, Some(0));
    }

    #[test]
    fn charge_spellings() {
        assert_eq!(single_atom("[O-]").charge, -1);
        assert_eq!(single_atom("[O--]").charge, -2);
        assert_eq!(single_atom("[O-2]").charge, -2);
        assert_eq!(single_atom("[Fe+++]").charge, 3);
        assert_eq!(single_atom("[Fe+3]").charge, 3);
    }

    #[test]
    fn charge_out_of_range() {
        assert!(matches!(
            tokenize("[C+99]"),
            Err(SmilesError::InvalidCharge { .. })
        ));
    }

    #[test]
    fn chirality_is_accepted() {
        assert_eq!(single_atom("[C@@H]").hcount, Some(1));
        assert_eq!(single_atom("[C@TH2]").element, Element::C);
    }

    #[test]
    fn aromatic_bracket_selenium() {
        let a = single_atom("[se]");
        assert!(a.is_aromatic);
        assert_eq!(a.element, Element::SE);
    }

    #[test]
    fn percent_ring_closure() {
        let tokens = tokenize("C%12CC%12").unwrap();
        assert!(matches!(tokens[1], Token::RingClosure { digit: 12, .. }));
    }

    #[test]
    fn whitespace_ends_smiles() {
        assert_eq!(tokenize("CCO ethanol").unwrap().len(), 3);
    }

    #[test]
    fn rejects_unknown_characters() {
        assert_eq!(
            tokenize("not-a-smiles"),
            Err(SmilesError::UnexpectedChar { pos: 2, ch: 't' })
        );
        assert!(matches!(
            tokenize("[Xx]"),
            Err(SmilesError::InvalidElement { .. })
        ));
        assert_eq!(
            tokenize("[CH4"),
            Err(SmilesError::UnclosedBracket { pos: 0 })
        );
    }
}
