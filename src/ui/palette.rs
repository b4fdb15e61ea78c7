/// Palette model: four background slots indexed by pixel ink value, plus
/// a sprite accent, with DMG (four-shade) and CGB (color table) modes.
///
/// Screens blank the palette on entry and restore it a few frames later,
/// so transitions flash to black the way the hardware did.

use crossterm::style::Color;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ColorMode {
    Dmg,
    Cgb,
}

/// The four monochrome shades.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DmgShade {
    White,
    LightGray,
    DarkGray,
    Black,
}

impl DmgShade {
    /// Classic green-tinted monochrome ramp.
    pub fn color(self) -> Color {
        match self {
            DmgShade::White => Color::Rgb { r: 155, g: 188, b: 15 },
            DmgShade::LightGray => Color::Rgb { r: 139, g: 172, b: 15 },
            DmgShade::DarkGray => Color::Rgb { r: 48, g: 98, b: 48 },
            DmgShade::Black => Color::Rgb { r: 15, g: 56, b: 15 },
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Palette {
    /// Background slots, indexed by ink value 0..=3.
    pub bkg: [Color; 4],
    /// Sprite accent color (the cursor).
    pub obj: Color,
}

impl Palette {
    /// Every slot black: the blanked screen shown during transitions.
    pub fn blank() -> Palette {
        let black = Color::Rgb { r: 0, g: 0, b: 0 };
        Palette { bkg: [black; 4], obj: black }
    }

    /// Four-shade monochrome palette, one shade per slot.
    pub fn dmg(s0: DmgShade, s1: DmgShade, s2: DmgShade, s3: DmgShade) -> Palette {
        Palette {
            bkg: [s0.color(), s1.color(), s2.color(), s3.color()],
            obj: DmgShade::Black.color(),
        }
    }

    /// The color table used in color mode.
    pub fn cgb() -> Palette {
        Palette {
            bkg: [
                Color::Rgb { r: 232, g: 240, b: 248 },
                Color::Rgb { r: 144, g: 176, b: 216 },
                Color::Rgb { r: 48, g: 80, b: 160 },
                Color::Rgb { r: 16, g: 24, b: 56 },
            ],
            obj: Color::Rgb { r: 216, g: 64, b: 64 },
        }
    }

    pub fn for_mode(mode: ColorMode) -> Palette {
        match mode {
            ColorMode::Dmg => Palette::dmg(
                DmgShade::White,
                DmgShade::LightGray,
                DmgShade::DarkGray,
                DmgShade::Black,
            ),
            ColorMode::Cgb => Palette::cgb(),
        }
    }

    /// Color for a pixel ink value. Ink values outside 0..=3 don't exist.
    pub fn ink(&self, value: u8) -> Color {
        self.bkg[value as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_palette_is_all_black() {
        let p = Palette::blank();
        assert!(p.bkg.iter().all(|&c| c == Color::Rgb { r: 0, g: 0, b: 0 }));
    }

    #[test]
    fn dmg_palette_maps_shades_to_slots() {
        let p = Palette::for_mode(ColorMode::Dmg);
        assert_eq!(p.ink(0), DmgShade::White.color());
        assert_eq!(p.ink(2), DmgShade::DarkGray.color());
        assert_eq!(p.ink(3), DmgShade::Black.color());
    }
}
