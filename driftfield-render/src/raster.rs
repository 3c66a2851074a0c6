// Scene rasterizer
//
// Paints a scene into a pseudo-pixel grid: one terminal cell is one pixel
// wide and two pixels tall (the upper-half-block split), which makes the
// pixels roughly square. The viewport maps terminal geometry to surface
// units so the engine's density and link-radius constants keep the tuning
// they were written with.

use driftfield_engine::{ColorClass, Dot, Link, Scene};

use crate::theme::{Rgb, Theme};

/// Surface units per pseudo-pixel.
pub const DEFAULT_SCALE: f32 = 4.0;

/// Terminal geometry plus the unit scale mapping it to surface space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub scale: f32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, scale: f32) -> Self {
        Self { cols, rows, scale }
    }

    /// Pixel grid width: one pixel per column.
    pub fn pixel_width(&self) -> usize {
        usize::from(self.cols)
    }

    /// Pixel grid height: two pixels per row.
    pub fn pixel_height(&self) -> usize {
        usize::from(self.rows) * 2
    }

    /// Surface width in engine units.
    pub fn surface_width(&self) -> f32 {
        self.pixel_width() as f32 * self.scale
    }

    /// Surface height in engine units.
    pub fn surface_height(&self) -> f32 {
        self.pixel_height() as f32 * self.scale
    }
}

/// RGB pixel grid for one frame.
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize, fill: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, fill: Rgb) {
        self.pixels.fill(fill);
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    /// Alpha-composite a color onto one pixel. Out-of-grid coordinates are
    /// ignored so callers can paint shapes that overlap the edges.
    pub(crate) fn blend(&mut self, x: isize, y: isize, color: Rgb, alpha: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let index = y as usize * self.width + x as usize;
        self.pixels[index] = self.pixels[index].blend_toward(color, alpha);
    }
}

/// Rasterizes scenes for one viewport with a fixed theme.
pub struct Rasterizer {
    viewport: Viewport,
    theme: Theme,
    buffer: PixelBuffer,
}

impl Rasterizer {
    pub fn new(viewport: Viewport, theme: Theme) -> Self {
        let buffer = PixelBuffer::new(
            viewport.pixel_width(),
            viewport.pixel_height(),
            theme.background,
        );
        Self {
            viewport,
            theme,
            buffer,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Adopt a new terminal geometry, rebuilding the pixel grid.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.buffer = PixelBuffer::new(
            viewport.pixel_width(),
            viewport.pixel_height(),
            self.theme.background,
        );
    }

    /// Paint one scene: clear, every dot, then every link.
    pub fn rasterize(&mut self, scene: &Scene) -> &PixelBuffer {
        self.buffer.clear(self.theme.background);
        for dot in &scene.dots {
            self.fill_dot(dot);
        }
        for link in &scene.links {
            self.stroke_link(link);
        }
        &self.buffer
    }

    fn fill_dot(&mut self, dot: &Dot) {
        let color = match dot.class {
            ColorClass::Accent => self.theme.accent,
            ColorClass::Base => self.theme.base,
        };
        let scale = self.viewport.scale;
        let cx = dot.x / scale;
        let cy = dot.y / scale;
        let radius = (dot.radius / scale).max(0.5);

        // Sub-pixel radii still paint the pixel under the center, so every
        // particle stays visible.
        let center_x = cx.floor() as isize;
        let center_y = cy.floor() as isize;
        self.buffer.blend(center_x, center_y, color, dot.opacity);

        let x0 = (cx - radius).floor() as isize;
        let x1 = (cx + radius).ceil() as isize;
        let y0 = (cy - radius).floor() as isize;
        let y1 = (cy + radius).ceil() as isize;
        for py in y0..y1 {
            for px in x0..x1 {
                if px == center_x && py == center_y {
                    continue;
                }
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= radius * radius {
                    self.buffer.blend(px, py, color, dot.opacity);
                }
            }
        }
    }

    fn stroke_link(&mut self, link: &Link) {
        let scale = self.viewport.scale;
        let x1 = link.x1 / scale;
        let y1 = link.y1 / scale;
        let x2 = link.x2 / scale;
        let y2 = link.y2 / scale;
        let length = ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt();
        let steps = (length * 2.0).ceil().max(1.0) as usize;

        // Half-pixel sampling; skip repeats so a pixel is not composited
        // twice by adjacent samples, which would overshoot the link alpha.
        let mut last = None;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let px = (x1 + (x2 - x1) * t).floor() as isize;
            let py = (y1 + (y2 - y1) * t).floor() as isize;
            if last == Some((px, py)) {
                continue;
            }
            last = Some((px, py));
            self.buffer.blend(px, py, self.theme.accent, link.alpha);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeName;
    use driftfield_engine::ColorClass;

    fn test_theme() -> Theme {
        ThemeName::Midnight.theme()
    }

    fn dot(x: f32, y: f32, class: ColorClass) -> Dot {
        Dot {
            x,
            y,
            radius: 1.5,
            opacity: 0.5,
            class,
        }
    }

    #[test]
    fn test_viewport_pixel_and_surface_dimensions() {
        let viewport = Viewport::new(100, 30, 4.0);
        assert_eq!(viewport.pixel_width(), 100);
        assert_eq!(viewport.pixel_height(), 60);
        assert_eq!(viewport.surface_width(), 400.0);
        assert_eq!(viewport.surface_height(), 240.0);
    }

    #[test]
    fn test_buffer_starts_and_clears_to_fill() {
        let mut buffer = PixelBuffer::new(4, 4, Rgb::new(1, 2, 3));
        assert_eq!(buffer.get(3, 3), Rgb::new(1, 2, 3));
        buffer.clear(Rgb::new(9, 9, 9));
        assert_eq!(buffer.get(0, 0), Rgb::new(9, 9, 9));
    }

    #[test]
    fn test_blend_ignores_out_of_grid_pixels() {
        let mut buffer = PixelBuffer::new(4, 4, Rgb::new(0, 0, 0));
        buffer.blend(-1, 0, Rgb::new(255, 255, 255), 1.0);
        buffer.blend(0, 4, Rgb::new(255, 255, 255), 1.0);
        buffer.blend(7, 7, Rgb::new(255, 255, 255), 1.0);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(buffer.get(x, y), Rgb::new(0, 0, 0));
            }
        }
    }

    #[test]
    fn test_dot_paints_pixel_under_center() {
        let theme = test_theme();
        let mut rasterizer = Rasterizer::new(Viewport::new(20, 10, 4.0), theme);
        let scene = Scene {
            width: 80.0,
            height: 80.0,
            dots: vec![dot(10.0, 10.0, ColorClass::Base)],
            links: vec![],
        };
        let buffer = rasterizer.rasterize(&scene);
        // (10, 10) units at scale 4 lands on pixel (2, 2)
        let expected = theme.background.blend_toward(theme.base, 0.5);
        assert_eq!(buffer.get(2, 2), expected);
        assert_eq!(buffer.get(10, 5), theme.background);
    }

    #[test]
    fn test_accent_dot_uses_accent_color() {
        let theme = test_theme();
        let mut rasterizer = Rasterizer::new(Viewport::new(20, 10, 4.0), theme);
        let scene = Scene {
            width: 80.0,
            height: 80.0,
            dots: vec![dot(10.0, 10.0, ColorClass::Accent)],
            links: vec![],
        };
        let buffer = rasterizer.rasterize(&scene);
        assert_eq!(
            buffer.get(2, 2),
            theme.background.blend_toward(theme.accent, 0.5)
        );
    }

    #[test]
    fn test_link_paints_pixels_along_segment() {
        let theme = test_theme();
        let mut rasterizer = Rasterizer::new(Viewport::new(20, 10, 4.0), theme);
        let scene = Scene {
            width: 80.0,
            height: 80.0,
            dots: vec![],
            links: vec![Link {
                x1: 2.0,
                y1: 2.0,
                x2: 38.0,
                y2: 2.0,
                alpha: 0.08,
            }],
        };
        let buffer = rasterizer.rasterize(&scene);
        let expected = theme.background.blend_toward(theme.accent, 0.08);
        // The segment spans pixels (0,0) through (9,0)
        for x in 0..=9 {
            assert_eq!(buffer.get(x, 0), expected, "pixel ({}, 0)", x);
        }
        assert_eq!(buffer.get(11, 0), theme.background);
    }

    #[test]
    fn test_rasterize_clears_between_frames() {
        let theme = test_theme();
        let mut rasterizer = Rasterizer::new(Viewport::new(20, 10, 4.0), theme);
        let scene = Scene {
            width: 80.0,
            height: 80.0,
            dots: vec![dot(10.0, 10.0, ColorClass::Base)],
            links: vec![],
        };
        rasterizer.rasterize(&scene);
        let empty = Scene {
            width: 80.0,
            height: 80.0,
            dots: vec![],
            links: vec![],
        };
        let buffer = rasterizer.rasterize(&empty);
        assert_eq!(buffer.get(2, 2), theme.background);
    }

    #[test]
    fn test_set_viewport_rebuilds_grid() {
        let mut rasterizer = Rasterizer::new(Viewport::new(20, 10, 4.0), test_theme());
        rasterizer.set_viewport(Viewport::new(40, 20, 4.0));
        let empty = Scene::default();
        let buffer = rasterizer.rasterize(&empty);
        assert_eq!(buffer.width(), 40);
        assert_eq!(buffer.height(), 40);
    }
}
