use palette::Srgba;

pub struct ThemeColors {
    pub background: Srgba<f64>,
    pub ring: Srgba<f64>,
    pub label: Srgba<f64>,
    pub label_hovered: Srgba<f64>,
    pub panel: Srgba<f64>,
    pub hint: Srgba<f64>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            background: Srgba::new(0.0, 0.0, 0.0, 0.5),
            // indigo accent
            ring: Srgba::new(0.388, 0.4, 0.945, 1.0),
            label: Srgba::new(0.612, 0.639, 0.686, 1.0),
            label_hovered: Srgba::new(1.0, 1.0, 1.0, 1.0),
            panel: Srgba::new(0.0, 0.0, 0.0, 0.7),
            hint: Srgba::new(0.42, 0.447, 0.502, 1.0),
        }
    }
}

pub fn set_source(cr: &cairo::Context, color: Srgba<f64>, alpha: f64) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a * alpha);
}
