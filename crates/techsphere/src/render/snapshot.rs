use super::theme::{self, ThemeColors};
use super::{RenderError, SnapshotOptions, Surface};
use crate::scene::{Frame, NodeTransform, OrbitRing};
use cairo::{Context, Format, ImageSurface};
use orbitkit::sphere::{RING_SEGMENTS, ring};
use orbitkit::{Rotation, Vec3};
use palette::Srgba;
use std::f64::consts::PI;
use std::path::PathBuf;

/// CSS-style perspective distance, in pixels.
pub const PERSPECTIVE: f64 = 1000.0;

/// Rasterizes frames with cairo and writes the latest one to a PNG file.
pub struct SnapshotSurface {
    surface: ImageSurface,
    options: SnapshotOptions,
    path: PathBuf,
    colors: ThemeColors,
}

impl SnapshotSurface {
    pub fn new(path: PathBuf, options: SnapshotOptions) -> Result<Self, RenderError> {
        let surface = ImageSurface::create(Format::ARgb32, options.width, options.height)?;
        Ok(Self {
            surface,
            options,
            path,
            colors: ThemeColors::default(),
        })
    }

    /// Perspective projection onto the image, centre of the scene at the centre of the image.
    fn project(&self, p: Vec3) -> (f64, f64, f64) {
        let k = self.options.units_to_px;
        let (x, y, z) = (p.x * k, p.y * k, p.z * k);
        let factor = PERSPECTIVE / (PERSPECTIVE - z).max(1.0);
        (
            self.options.width as f64 / 2.0 + x * factor,
            self.options.height as f64 / 2.0 + y * factor,
            factor,
        )
    }

    fn draw_ring(
        &self,
        cr: &Context,
        ring_def: &OrbitRing,
        rotation: Rotation,
    ) -> Result<(), RenderError> {
        let points = ring(ring_def.radius, RING_SEGMENTS);
        for (i, p) in points.iter().enumerate() {
            let (x, y, _) = self.project(rotation.apply(*p));
            if i == 0 {
                cr.move_to(x, y);
            } else {
                cr.line_to(x, y);
            }
        }
        theme::set_source(cr, self.colors.ring, ring_def.opacity);
        cr.set_line_width(1.0);
        cr.stroke()?;
        Ok(())
    }

    fn draw_node(&self, cr: &Context, node: &NodeTransform) -> Result<(), RenderError> {
        let (x, y, factor) = self.project(node.position);
        let radius = node.tile_size / 2.0 * factor;
        let (r, g, b) = node.color.to_f64().into_components();

        if node.glow > 0.0 {
            cr.set_source_rgba(r, g, b, node.glow);
            cr.arc(x, y, radius * 2.0, 0.0, 2.0 * PI);
            cr.fill()?;
        }

        cr.set_source_rgba(r, g, b, node.opacity);
        cr.arc(x, y, radius, 0.0, 2.0 * PI);
        cr.fill()?;

        let color = if node.hovered {
            self.colors.label_hovered
        } else {
            self.colors.label
        };
        self.draw_text(cr, &node.label, x, y + radius + 12.0, color, node.opacity)
    }

    fn draw_text(
        &self,
        cr: &Context,
        text: &str,
        x: f64,
        y: f64,
        color: Srgba<f64>,
        alpha: f64,
    ) -> Result<(), RenderError> {
        theme::set_source(cr, color, alpha);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(11.0);
        if let Ok(ext) = cr.text_extents(text) {
            cr.move_to(x - ext.width() / 2.0, y);
            cr.show_text(text)?;
        }
        Ok(())
    }

    fn draw_footer(&self, cr: &Context, frame: &Frame) -> Result<(), RenderError> {
        let (w, h) = (self.options.width as f64, self.options.height as f64);

        match (&frame.hovered, frame.hint) {
            (Some(panel), _) => {
                theme::set_source(cr, self.colors.panel, 1.0);
                cr.rectangle(16.0, h - 72.0, w - 32.0, 56.0);
                cr.fill()?;

                let (r, g, b) = panel.color.to_f64().into_components();
                cr.set_source_rgb(r, g, b);
                cr.arc(34.0, h - 52.0, 6.0, 0.0, 2.0 * PI);
                cr.fill()?;

                theme::set_source(cr, self.colors.label_hovered, 1.0);
                cr.set_font_size(13.0);
                cr.move_to(48.0, h - 47.0);
                cr.show_text(&panel.label)?;

                theme::set_source(cr, self.colors.label, 1.0);
                cr.set_font_size(11.0);
                cr.move_to(28.0, h - 27.0);
                cr.show_text(&panel.description)?;
                Ok(())
            }
            (None, Some(hint)) => {
                self.draw_text(cr, hint, w / 2.0, h - 20.0, self.colors.hint, 1.0)
            }
            (None, None) => Ok(()),
        }
    }
}

impl Surface for SnapshotSurface {
    fn draw(&mut self, frame: &Frame) -> Result<(), RenderError> {
        {
            let cr = Context::new(&self.surface)?;

            cr.set_operator(cairo::Operator::Source);
            theme::set_source(&cr, self.colors.background, 1.0);
            cr.paint()?;
            cr.set_operator(cairo::Operator::Over);

            for ring_def in &frame.rings {
                self.draw_ring(&cr, ring_def, frame.rotation)?;
            }
            for node in frame.draw_order() {
                self.draw_node(&cr, node)?;
            }
            self.draw_footer(&cr, frame)?;
        }

        self.surface.flush();
        let mut file = fs_err::File::create(&self.path)?;
        self.surface.write_to_png(&mut file)?;
        log::debug!("wrote snapshot to {}", self.path.display());
        Ok(())
    }
}
