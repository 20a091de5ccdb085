use crate::{
    color::Color,
    light::PointLight,
    pattern::Pattern,
    shape::{ShapeArena, ShapeId},
    Point, Result, Vector,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub color: Color,
    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,
    /// Overrides `color` when present.
    pub pattern: Option<Box<dyn Pattern>>,
    /// 0 is a matte surface, 1 a perfect mirror.
    pub reflective: f64,
    /// 0 is opaque, 1 fully transparent.
    pub transparency: f64,
    /// 1.0 is vacuum; glass is around 1.5.
    pub refractive_index: f64,
    pub casts_shadow: bool,
}

impl Material {
    /// Adds together the material's ambient, diffuse, and specular components,
    /// weighted by the angles between the eye_vector and the normal_vector.
    ///
    /// `object` is the shape being lit; patterns are sampled in its object space.
    #[allow(clippy::too_many_arguments)]
    pub fn lighting(
        &self,
        shapes: &ShapeArena,
        object: ShapeId,
        light: &PointLight,
        point: Point,
        eye_vector: Vector,
        normal_vector: Vector,
        in_shadow: bool,
    ) -> Result<Color> {
        let color = match &self.pattern {
            Some(pattern) => pattern.pattern_at_shape(shapes, object, point)?,
            None => self.color,
        };

        // combine the surface color with the light's color/intensity
        let effective_color = color * light.intensity;

        let ambient = effective_color * self.ambient;
        if in_shadow {
            // only the ambient light illuminates the material in shadow
            return Ok(ambient);
        }

        // cosine of the angle between the light vector and the normal;
        // negative means the light is on the other side of the surface
        let light_vector = (light.position - point).norm();
        let light_dot_normal = light_vector.dot(&normal_vector);
        if light_dot_normal < 0. {
            return Ok(ambient);
        }

        let diffuse = effective_color * self.diffuse * light_dot_normal;

        // cosine of the angle between the reflection and the eye;
        // non-positive means the light reflects away from the eye
        let reflect_vector = (-light_vector).reflect(&normal_vector);
        let reflect_dot_eye = reflect_vector.dot(&eye_vector);
        let specular = if reflect_dot_eye <= 0. {
            Color::black()
        } else {
            light.intensity * self.specular * reflect_dot_eye.powf(self.shininess)
        };

        Ok(ambient + diffuse + specular)
    }
}

impl Default for Material {
    /// A white, opaque, non-reflective material that casts shadows:
    /// ambient = 0.1, diffuse = 0.9, specular = 0.9, shininess = 200.
    fn default() -> Self {
        Self {
            color: Color::white(),
            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.,
            pattern: None,
            reflective: 0.,
            transparency: 0.,
            refractive_index: 1.,
            casts_shadow: true,
        }
    }
}
