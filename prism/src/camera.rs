use crate::{canvas::Canvas, config::RenderConfig, world::World, Matrix, Point, Ray, Result};

use std::time::Instant;

use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use once_cell::sync::OnceCell;
use rayon::prelude::*;

/// Maps a canvas onto the scene: a pinhole camera at the origin looking
/// toward -z, with the canvas one unit in front of it.
#[derive(Debug)]
pub struct Camera {
    hsize: usize,
    vsize: usize,
    field_of_view: f64,
    transformation: Matrix,
    inverse: OnceCell<Matrix>,
    half_width: f64,
    half_height: f64,
    pixel_size: f64,
    config: RenderConfig,
}

impl Camera {
    pub fn new(hsize: usize, vsize: usize, field_of_view: f64) -> Self {
        let half_view = (field_of_view / 2.).tan();
        let aspect = hsize as f64 / vsize as f64;

        let (half_width, half_height) = if aspect >= 1. {
            (half_view, half_view / aspect)
        } else {
            (half_view * aspect, half_view)
        };

        let pixel_size = half_width * 2. / hsize as f64;

        Self {
            hsize,
            vsize,
            field_of_view,
            transformation: Matrix::identity(),
            inverse: OnceCell::new(),
            half_width,
            half_height,
            pixel_size,
            config: RenderConfig::default(),
        }
    }

    pub fn with_transformation(mut self, transformation: Matrix) -> Self {
        self.transformation = transformation;
        self.inverse = OnceCell::new();
        self
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn hsize(&self) -> usize {
        self.hsize
    }

    pub fn vsize(&self) -> usize {
        self.vsize
    }

    pub fn field_of_view(&self) -> f64 {
        self.field_of_view
    }

    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    pub fn transformation(&self) -> Matrix {
        self.transformation
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn inverse(&self) -> Result<&Matrix> {
        Ok(self
            .inverse
            .get_or_try_init(|| self.transformation.inverse())?)
    }

    /// Computes the world coordinates at the center of the given pixel,
    /// then constructs a ray that passes through that point.
    pub fn ray_for_pixel(&self, px: usize, py: usize) -> Result<Ray> {
        // the offset from the edge of the canvas to the pixel's center
        let x_offset = (px as f64 + 0.5) * self.pixel_size;
        let y_offset = (py as f64 + 0.5) * self.pixel_size;

        // the untransformed coordinates of the pixel in the world space
        // (the camera looks toward -z, so +x is to the *left*)
        let world_x = self.half_width - x_offset;
        let world_y = self.half_height - y_offset;

        // the canvas is at z=-1
        let inverse = *self.inverse()?;
        let pixel = inverse * Point::new(world_x, world_y, -1.);
        let origin = inverse * Point::origin();
        let direction = (pixel - origin).norm();

        Ok(Ray::new(origin, direction))
    }

    /// Creates a canvas and casts a ray through each of its pixels,
    /// coloring the pixels with the colors of the corresponding intersections.
    ///
    /// Rows are rendered in parallel. When the config asks for it,
    /// a progress bar is drawn to stderr.
    pub fn render(&self, world: &World) -> Result<Canvas> {
        let started = Instant::now();
        log::info!(
            "rendering {} objects at {}x{} with {} reflections and {} refractions per ray",
            world.objects().len(),
            self.hsize,
            self.vsize,
            self.config.max_reflections,
            self.config.max_refractions,
        );
        if world.light.is_none() {
            log::warn!("world has no light source; the image will be black");
        }

        let bar = if self.config.show_progress {
            let style = ProgressStyle::with_template(
                "{msg} {elapsed:>5} -- {eta:5} {bar:40.cyan/blue} {pos:>7}/{len:7} {percent}%",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar());
            ProgressBar::new(self.vsize as u64)
                .with_style(style)
                .with_message("Rendering...")
        } else {
            ProgressBar::hidden()
        };

        let rows = (0..self.vsize)
            .into_par_iter()
            .progress_with(bar)
            .map(|y| {
                (0..self.hsize)
                    .map(|x| {
                        let ray = self.ray_for_pixel(x, y)?;
                        world.color_at(
                            &ray,
                            self.config.max_reflections,
                            self.config.max_refractions,
                        )
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        let mut image = Canvas::new(self.hsize, self.vsize);
        for (y, row) in rows.into_iter().enumerate() {
            for (x, color) in row.into_iter().enumerate() {
                image.write_pixel(x, y, color);
            }
        }

        log::info!(
            "finished rendering {} pixels in {:.2?}",
            self.hsize * self.vsize,
            started.elapsed()
        );
        Ok(image)
    }
}
