//! Volumetric ("desi") calculator.
//!
//! One desi is 1000 cm³. Every component is computed independently and
//! contributes zero until all of its dimensions are present and positive.
//! Values stay unrounded until [`DesiBreakdown::rounded`] is called at the
//! presentation boundary.

use std::fmt;

use serde::Serialize;

use crate::i18n::Locale;
use crate::model::BLOCK_QUANTITY;

/// `(L * W * H * Q) / 1000`, or `0.0` if any input is non-finite or not
/// strictly positive.
pub fn desi(length: f64, width: f64, height: f64, quantity: f64) -> f64 {
    let inputs = [length, width, height, quantity];
    if inputs.iter().all(|v| v.is_finite() && *v > 0.0) {
        length * width * height * quantity / 1000.0
    } else {
        0.0
    }
}

/// Round half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Raw calculator input, in centimeters.
///
/// Quantities are `f64` so that whatever the host parsed (including
/// garbage) can be passed straight through; the calculator zeroes it out.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DesiInput {
    pub board_thickness: f64,
    pub upper_length: f64,
    pub upper_width: f64,
    pub upper_quantity: f64,
    pub lower_length: f64,
    pub lower_width: f64,
    pub lower_quantity: f64,
    pub closure_length: f64,
    pub closure_width: f64,
    pub closure_quantity: f64,
    pub block_length: f64,
    pub block_width: f64,
    pub block_height: f64,
    pub price: f64,
}

impl DesiInput {
    pub fn compute(&self) -> DesiBreakdown {
        let t = self.board_thickness;
        let upper = desi(self.upper_length, self.upper_width, t, self.upper_quantity);
        let lower = desi(self.lower_length, self.lower_width, t, self.lower_quantity);
        let closure = desi(self.closure_length, self.closure_width, t, self.closure_quantity);
        let block = desi(
            self.block_length,
            self.block_width,
            self.block_height,
            f64::from(BLOCK_QUANTITY),
        );
        let total = upper + lower + closure + block;

        let price_per_desi = if self.price.is_finite() && self.price > 0.0 && total > 0.0 {
            Some(self.price / total)
        } else {
            None
        };

        DesiBreakdown {
            upper,
            lower,
            closure,
            block,
            total,
            price_per_desi,
        }
    }
}

/// Per-component volumes plus derived totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DesiBreakdown {
    pub upper: f64,
    pub lower: f64,
    pub closure: f64,
    pub block: f64,
    pub total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_desi: Option<f64>,
}

impl DesiBreakdown {
    /// Copy with every value rounded to two decimals, for display only.
    pub fn rounded(&self) -> Self {
        Self {
            upper: round2(self.upper),
            lower: round2(self.lower),
            closure: round2(self.closure),
            block: round2(self.block),
            total: round2(self.total),
            price_per_desi: self.price_per_desi.map(round2),
        }
    }
}

impl DesiBreakdown {
    /// Breakdown lines in the given language, two decimals each.
    pub fn render(&self, locale: Locale) -> String {
        let (upper, lower, closure, block, total, per) = match locale {
            Locale::Tr => ("Üst Tahta", "Alt Tahta", "Kapama", "Takoz", "Toplam", "Desi başı"),
            Locale::En => ("Upper", "Lower", "Closure", "Block", "Total", "Per desi"),
        };
        let line = |label: &str, value: f64, unit: &str| {
            format!("{:<11} {:>10.2} {}", format!("{}:", label), value, unit)
        };
        let mut lines = vec![
            line(upper, self.upper, "desi"),
            line(lower, self.lower, "desi"),
            line(closure, self.closure, "desi"),
            line(block, self.block, "desi"),
            line(total, self.total, "desi"),
        ];
        if let Some(ppd) = self.price_per_desi {
            lines.push(line(per, ppd, "TL"));
        }
        lines.join("\n")
    }
}

impl fmt::Display for DesiBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(Locale::default()))
    }
}
