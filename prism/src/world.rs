use crate::{
    camera::Camera,
    canvas::Canvas,
    intersection::{hit, Computations, Intersect, Intersection},
    light::PointLight,
    material::Material,
    shape::{Shape, ShapeArena, ShapeId},
    Color, Matrix, Point, Ray, Result,
};

/// A scene: every shape, and the single light illuminating them.
#[derive(Debug)]
pub struct World {
    pub shapes: ShapeArena,
    pub light: Option<PointLight>,
}

impl World {
    pub fn new(shapes: ShapeArena, light: Option<PointLight>) -> Self {
        Self { shapes, light }
    }

    /// Constructs an empty world with no objects and no light.
    pub fn new_empty() -> Self {
        Self::new(ShapeArena::new(), None)
    }

    /// Adds a shape at the top level of the scene.
    pub fn add_object(&mut self, shape: Shape) -> ShapeId {
        self.shapes.add_object(shape)
    }

    /// The top-level objects of the scene.
    pub fn objects(&self) -> &[ShapeId] {
        self.shapes.roots()
    }

    fn material_of(&self, object: ShapeId) -> Result<&Material> {
        Ok(self.shapes.get(object)?.material())
    }

    /// Intersects the world with the given ray and returns
    /// the color at the resulting hit, or black if nothing is hit.
    ///
    /// The two budgets bound how many more times reflected and refracted rays
    /// may be spawned along this path; each is only spent by its own kind of ray.
    pub fn color_at(
        &self,
        ray: &Ray,
        remaining_reflections: usize,
        remaining_refractions: usize,
    ) -> Result<Color> {
        let xs = self.intersect(ray)?;
        match hit(&xs) {
            Some(hit) => {
                let comps = hit.prepare_computations(ray, &xs, &self.shapes)?;
                self.shade_hit(&comps, remaining_reflections, remaining_refractions)
            }
            None => Ok(Color::black()),
        }
    }

    /// Returns the color at the intersection encapsulated by comps:
    /// the lit surface plus whatever it reflects and lets through.
    /// Returns black if the world has no light source.
    pub fn shade_hit(
        &self,
        comps: &Computations,
        remaining_reflections: usize,
        remaining_refractions: usize,
    ) -> Result<Color> {
        let Some(light) = &self.light else {
            return Ok(Color::black());
        };

        let material = self.material_of(comps.object)?;
        let in_shadow = self.is_shadowed(comps.over_point)?;
        let surface = material.lighting(
            &self.shapes,
            comps.object,
            light,
            comps.over_point,
            comps.eye_vector,
            comps.normal_vector,
            in_shadow,
        )?;

        let reflected = self.reflected_color(comps, remaining_reflections, remaining_refractions)?;
        let refracted = self.refracted_color(comps, remaining_reflections, remaining_refractions)?;

        Ok(apply_fresnel(material, comps, surface, reflected, refracted))
    }

    /// Whether something sits between the point and the light.
    /// Shapes whose material doesn't cast shadows are ignored.
    /// Without a light, everything is in shadow.
    pub fn is_shadowed(&self, point: Point) -> Result<bool> {
        let Some(light) = &self.light else {
            return Ok(true);
        };

        let point_to_light = light.position - point;
        let distance = point_to_light.magnitude();
        let ray = Ray::new(point, point_to_light.norm());

        let mut blockers = vec![];
        for intersection in self.intersect(&ray)? {
            if self.shapes.get(intersection.object)?.casts_shadow() {
                blockers.push(intersection);
            }
        }

        Ok(hit(&blockers).is_some_and(|hit| hit.t < distance))
    }

    pub fn reflected_color(
        &self,
        comps: &Computations,
        remaining_reflections: usize,
        remaining_refractions: usize,
    ) -> Result<Color> {
        let reflective = self.material_of(comps.object)?.reflective;
        if remaining_reflections == 0 || reflective == 0. {
            return Ok(Color::black());
        }

        let reflect_ray = Ray::new(comps.over_point, comps.reflect_vector);
        let color = self.color_at(&reflect_ray, remaining_reflections - 1, remaining_refractions)?;
        Ok(color * reflective)
    }

    pub fn refracted_color(
        &self,
        comps: &Computations,
        remaining_reflections: usize,
        remaining_refractions: usize,
    ) -> Result<Color> {
        let transparency = self.material_of(comps.object)?.transparency;
        if remaining_refractions == 0 || transparency == 0. {
            return Ok(Color::black());
        }

        // Snell's law, for the angle of the refracted ray
        let n_ratio = comps.n1 / comps.n2;
        let cos_i = comps.eye_vector.dot(&comps.normal_vector);
        let sin2_t = n_ratio.powi(2) * (1. - cos_i.powi(2));
        if sin2_t >= 1. {
            // total internal reflection
            return Ok(Color::black());
        }

        let cos_t = (1. - sin2_t).sqrt();
        let direction = comps.normal_vector * (n_ratio * cos_i - cos_t) - comps.eye_vector * n_ratio;
        let refract_ray = Ray::new(comps.under_point, direction);

        let color = self.color_at(&refract_ray, remaining_reflections, remaining_refractions - 1)?;
        Ok(color * transparency)
    }

    /// Renders the world as seen through the camera.
    pub fn render(&self, camera: &Camera) -> Result<Canvas> {
        camera.render(self)
    }
}

/// Transparent, reflective surfaces split light between the two
/// according to the Schlick approximation; otherwise both are added as is.
fn apply_fresnel(
    material: &Material,
    comps: &Computations,
    surface: Color,
    reflected: Color,
    refracted: Color,
) -> Color {
    if material.reflective > 0. && material.transparency > 0. {
        let reflectance = comps.schlick();
        surface + reflected * reflectance + refracted * (1. - reflectance)
    } else {
        surface + reflected + refracted
    }
}

impl Default for World {
    /// Constructs the default world with a light source at (-10, 10, -10)
    /// and two concentric spheres, where the outermost is a unit sphere
    /// and the innermost has a radius of 0.5. Both lie at the origin.
    fn default() -> Self {
        let light = PointLight::new(Point::new(-10., 10., -10.), Color::white());

        let material = Material {
            color: Color::new(0.8, 1.0, 0.6),
            diffuse: 0.7,
            specular: 0.2,
            ..Default::default()
        };

        let mut shapes = ShapeArena::new();
        shapes.add_object(Shape::sphere().with_material(material));
        shapes.add_object(Shape::sphere().with_transformation(Matrix::scaling(0.5, 0.5, 0.5)));

        Self::new(shapes, Some(light))
    }
}

impl Intersect for World {
    fn intersect(&self, ray: &Ray) -> Result<Vec<Intersection>> {
        let mut xs = vec![];
        for &object in self.objects() {
            xs.extend(self.shapes.intersect(object, ray)?);
        }
        xs.sort_unstable_by(|a, b| a.t.total_cmp(&b.t));
        Ok(xs)
    }
}
