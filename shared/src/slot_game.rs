use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::WHEEL_COUNT;

/// Faces that can land on a wheel.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Circle,
    Triangle,
    Star,
    Square,
}

impl Symbol {
    pub const ALL: [Symbol; 4] = [Symbol::Circle, Symbol::Triangle, Symbol::Star, Symbol::Square];

    pub fn glyph(self) -> &'static str {
        match self {
            Symbol::Circle => "🔵",
            Symbol::Triangle => "🔺",
            Symbol::Star => "⭐",
            Symbol::Square => "⬛",
        }
    }
}

/// The faces showing on every wheel after one spin.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct SpinOutcome {
    pub symbols: [Symbol; WHEEL_COUNT],
}

impl SpinOutcome {
    pub fn new(symbols: [Symbol; WHEEL_COUNT]) -> Self {
        Self { symbols }
    }

    /// A spin wins when every wheel shows the same face as the first one.
    pub fn is_win(&self) -> bool {
        let first = self.symbols[0];
        self.symbols.iter().all(|symbol| *symbol == first)
    }

    pub fn glyphs(&self) -> [&'static str; WHEEL_COUNT] {
        self.symbols.map(Symbol::glyph)
    }
}

/// Samples one face uniformly.
pub fn draw_symbol<R: Rng + ?Sized>(rng: &mut R) -> Symbol {
    Symbol::ALL[rng.gen_range(0..Symbol::ALL.len())]
}

/// Samples every wheel independently from the same source.
pub fn draw_outcome<R: Rng + ?Sized>(rng: &mut R) -> SpinOutcome {
    SpinOutcome::new(std::array::from_fn(|_| draw_symbol(&mut *rng)))
}
