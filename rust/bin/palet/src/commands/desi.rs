//! `palet desi …`: the calculator on its own, no backend needed.

use anyhow::Result;
use palet_core::{DesiInput, Locale};

use super::{print_json, Output};

/// Component dimensions in centimeters. Missing components count as zero.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct DesiArgs {
    /// Board thickness, shared by upper, lower and closure boards.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub thickness: f64,
    #[arg(long, num_args = 3, value_names = ["LENGTH", "WIDTH", "QTY"], allow_negative_numbers = true)]
    pub upper: Vec<f64>,
    #[arg(long, num_args = 3, value_names = ["LENGTH", "WIDTH", "QTY"], allow_negative_numbers = true)]
    pub lower: Vec<f64>,
    #[arg(long, num_args = 3, value_names = ["LENGTH", "WIDTH", "QTY"], allow_negative_numbers = true)]
    pub closure: Vec<f64>,
    /// Support block; there are always nine.
    #[arg(long, num_args = 3, value_names = ["LENGTH", "WIDTH", "HEIGHT"], allow_negative_numbers = true)]
    pub block: Vec<f64>,
    /// Unit price, for the per-desi price.
    #[arg(long, default_value_t = 0.0)]
    pub price: f64,
}

impl DesiArgs {
    pub fn input(&self) -> DesiInput {
        let part = |v: &[f64], i: usize| v.get(i).copied().unwrap_or(0.0);
        DesiInput {
            board_thickness: self.thickness,
            upper_length: part(&self.upper, 0),
            upper_width: part(&self.upper, 1),
            upper_quantity: part(&self.upper, 2),
            lower_length: part(&self.lower, 0),
            lower_width: part(&self.lower, 1),
            lower_quantity: part(&self.lower, 2),
            closure_length: part(&self.closure, 0),
            closure_width: part(&self.closure, 1),
            closure_quantity: part(&self.closure, 2),
            block_length: part(&self.block, 0),
            block_width: part(&self.block, 1),
            block_height: part(&self.block, 2),
            price: self.price,
        }
    }
}

pub fn run(args: &DesiArgs, output: Output, locale: Locale) -> Result<()> {
    let breakdown = args.input().compute().rounded();
    match output {
        Output::Json => print_json(&breakdown),
        Output::Table => {
            println!("{}", breakdown.render(locale));
            Ok(())
        }
    }
}
