use super::{RenderError, Surface};
use crate::scene::Frame;
use std::io::Write;

/// Writes each frame as a front-to-back listing.
pub struct TextSurface<W: Write> {
    out: W,
}

impl<W: Write> TextSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Surface for TextSurface<W> {
    fn draw(&mut self, frame: &Frame) -> Result<(), RenderError> {
        writeln!(
            self.out,
            "t={:.3}s pitch={:.3} yaw={:.3} [{}]",
            frame.time, frame.rotation.pitch, frame.rotation.yaw, frame.locale
        )?;

        for node in frame.draw_order().into_iter().rev() {
            writeln!(
                self.out,
                "{} {:>5} {:<12} {} {} scale={:.2} opacity={:.2}",
                if node.hovered { '*' } else { ' ' },
                node.stacking,
                node.label,
                node.color,
                node.position,
                node.scale,
                node.opacity,
            )?;
        }

        match (&frame.hovered, frame.hint) {
            (Some(panel), _) => writeln!(self.out, "> {}: {}", panel.label, panel.description)?,
            (None, Some(hint)) => writeln!(self.out, "> {}", hint)?,
            (None, None) => {}
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use crate::scene::{
        Catalog, Input, ItemId, Scene, SceneKind, TrackerSettings, ViewSettings,
    };

    fn scene() -> Scene {
        Scene::mount(
            Catalog::builtin(SceneKind::Orbit, 120.0).unwrap(),
            TrackerSettings::for_kind(SceneKind::Orbit),
            SceneKind::Orbit.default_bounds(),
            Locale::En,
            ViewSettings::default(),
        )
    }

    #[test]
    fn test_hovered_node_listed_first_with_panel() {
        let mut scene = scene();
        scene.handle(Input::NodeEnter(ItemId::from("crm")));

        let mut surface = TextSurface::new(Vec::new());
        surface.draw(&scene.frame().unwrap()).unwrap();
        let text = String::from_utf8(surface.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 1 + 6 + 1);
        assert!(lines[1].starts_with("*  1000 CRM"));
        assert_eq!(lines[7], "> CRM: Customer & case management");
    }

    #[test]
    fn test_hint_when_nothing_hovered() {
        let mut surface = TextSurface::new(Vec::new());
        surface.draw(&scene().frame().unwrap()).unwrap();
        let text = String::from_utf8(surface.into_inner()).unwrap();
        assert!(text.ends_with("> Hover over nodes to explore\n"));
    }
}
