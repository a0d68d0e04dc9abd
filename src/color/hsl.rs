/// Hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

/// Linear channel values in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Hsl {
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    pub fn to_rgb(self) -> Rgb {
        let Hsl {
            hue,
            saturation,
            lightness,
        } = self;
        let chroma = (100.0 - (2.0 * lightness - 100.0).abs()) * saturation / 100.0 / 100.0;
        let x = chroma * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
        let m = lightness / 100.0 - chroma / 2.0;
        let (r1, g1, b1) = match (hue / 60.0).floor() as i64 {
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            5 => (chroma, 0.0, x),
            _ => (chroma, x, 0.0),
        };
        Rgb {
            red: r1 + m,
            green: g1 + m,
            blue: b1 + m,
        }
    }
}

impl Rgb {
    /// Cubic-weighted luminance. Dark blues land near 0.01, yellows near 0.74.
    pub fn cubic_luminance(self) -> f64 {
        self.red.powi(3) * 0.2126 + self.green.powi(3) * 0.7152 + self.blue.powi(3) * 0.0722
    }

    pub fn to_bytes(self) -> [u8; 3] {
        [
            channel_byte(self.red),
            channel_byte(self.green),
            channel_byte(self.blue),
        ]
    }

    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_bytes();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

fn channel_byte(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}
