// Color key drawn over the top-left of the canvas so viewers know which gas is which

use crate::color::Color;
use crate::gas::GasKind;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub gas: GasKind,
    pub text: String,
    pub pos: [f64; 2],
}

pub struct Legend {
    entries: Vec<LegendEntry>,
}

impl Legend {
    pub const ORIGIN: [f64; 2] = [40.0, 20.0];
    pub const LINE_SPACING: f64 = 20.0;
    pub const FONT: &'static str = "18px sans-serif";
    pub const BACKGROUND: Color = Color::BLACK;

    // Fastest gas on top
    pub fn new() -> Legend {
        let entries = GasKind::ALL
            .iter()
            .rev()
            .enumerate()
            .map(|(i, &gas)| LegendEntry {
                gas,
                text: format!("--- {}", gas.label()),
                pos: [
                    Legend::ORIGIN[0],
                    Legend::ORIGIN[1] + i as f64 * Legend::LINE_SPACING,
                ],
            })
            .collect();
        Legend { entries }
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    #[allow(deprecated)]
    pub fn render(&self, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        ctx.set_font(Legend::FONT);
        ctx.set_text_baseline("top");
        for entry in &self.entries {
            let [x, y] = entry.pos;
            let width = ctx.measure_text(&entry.text)?.width();
            ctx.set_fill_style(&JsValue::from_str(&Legend::BACKGROUND.to_css()));
            ctx.fill_rect(x, y, width, Legend::LINE_SPACING);
            ctx.set_fill_style(&JsValue::from_str(&entry.gas.color().to_css()));
            ctx.fill_text(&entry.text, x, y)?;
        }
        Ok(())
    }
}

impl Default for Legend {
    fn default() -> Self {
        Legend::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_row_per_gas_fastest_first() {
        let legend = Legend::new();
        let texts: Vec<_> = legend.entries().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["--- H2O", "--- H2S", "--- CO2", "--- SO2"]);
    }

    #[test]
    fn rows_stack_down_from_origin() {
        let legend = Legend::new();
        let positions: Vec<_> = legend.entries().iter().map(|e| e.pos).collect();
        assert_eq!(
            positions,
            vec![[40.0, 20.0], [40.0, 40.0], [40.0, 60.0], [40.0, 80.0]]
        );
    }
}
