use std::fmt;

use crate::{
    color::Color,
    shape::{ShapeArena, ShapeId},
    Matrix, Point, Result,
};

#[derive(Debug, PartialEq)]
pub enum PatternType {
    StripePattern,
    GradientPattern,
    RingPattern,
    CheckersPattern,
    #[cfg(test)]
    TestPattern,
}

pub trait PatternClone {
    fn clone_box(&self) -> Box<dyn Pattern>;
}

/// A procedural texture: a function from a point in pattern space to a color.
pub trait Pattern: PatternClone + Send + Sync {
    fn transformation(&self) -> Matrix;

    /// Converts a world point into a color for the given shape:
    /// world space to object space (through every parent of the shape),
    /// then object space to pattern space.
    fn pattern_at_shape(
        &self,
        shapes: &ShapeArena,
        object: ShapeId,
        world_point: Point,
    ) -> Result<Color> {
        let object_point = shapes.world_to_object(object, world_point)?;
        let pattern_point = self.transformation().inverse()? * object_point;
        Ok(self.pattern_at(pattern_point))
    }

    fn pattern_at(&self, point: Point) -> Color;

    fn pattern_type(&self) -> PatternType;
}

impl fmt::Debug for dyn Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("type", &self.pattern_type())
            .field("transformation", &self.transformation())
            .finish()
    }
}

/// Pattern-space points where two patterns of the same type must agree to be equal.
/// Every pattern shows both of its colors somewhere among them.
const SAMPLE_POINTS: [(f64, f64, f64); 5] = [
    (0., 0., 0.),
    (0.5, 0., 0.),
    (1., 0., 0.),
    (0., 1., 0.),
    (0., 0., 1.),
];

impl PartialEq for dyn Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern_type() == other.pattern_type()
            && self.transformation() == other.transformation()
            && SAMPLE_POINTS.iter().all(|&(x, y, z)| {
                let point = Point::new(x, y, z);
                self.pattern_at(point) == other.pattern_at(point)
            })
    }
}

impl<T> PatternClone for T
where
    T: 'static + Pattern + Clone,
{
    fn clone_box(&self) -> Box<dyn Pattern> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Pattern> {
    fn clone(&self) -> Box<dyn Pattern> {
        self.clone_box()
    }
}

/// True for even integers, including negative ones.
fn is_even(value: f64) -> bool {
    value.rem_euclid(2.) == 0.
}

pub mod stripe_pattern {
    use super::*;

    /// Alternates between two colors with every unit along x.
    #[derive(Debug, Clone, PartialEq)]
    pub struct StripePattern {
        a: Color,
        b: Color,
        transformation: Matrix,
    }

    impl StripePattern {
        pub fn new(a: Color, b: Color) -> Self {
            Self {
                a,
                b,
                transformation: Matrix::identity(),
            }
        }

        pub fn with_transformation(mut self, transformation: Matrix) -> Self {
            self.transformation = transformation;
            self
        }
    }

    impl Default for StripePattern {
        fn default() -> Self {
            Self::new(Color::white(), Color::black())
        }
    }

    impl Pattern for StripePattern {
        fn pattern_type(&self) -> PatternType {
            PatternType::StripePattern
        }

        fn transformation(&self) -> Matrix {
            self.transformation
        }

        fn pattern_at(&self, point: Point) -> Color {
            if is_even(point.x.floor()) {
                self.a
            } else {
                self.b
            }
        }
    }

}

pub mod gradient_pattern {
    use super::*;

    /// Blends linearly from `a` to `b` over every unit along x.
    #[derive(Debug, Clone, PartialEq)]
    pub struct GradientPattern {
        a: Color,
        b: Color,
        transformation: Matrix,
    }

    impl GradientPattern {
        pub fn new(a: Color, b: Color) -> Self {
            Self {
                a,
                b,
                transformation: Matrix::identity(),
            }
        }

        pub fn with_transformation(mut self, transformation: Matrix) -> Self {
            self.transformation = transformation;
            self
        }
    }

    impl Pattern for GradientPattern {
        fn pattern_type(&self) -> PatternType {
            PatternType::GradientPattern
        }

        fn transformation(&self) -> Matrix {
            self.transformation
        }

        fn pattern_at(&self, point: Point) -> Color {
            let distance = self.b - self.a;
            let fraction = point.x - point.x.floor();
            self.a + distance * fraction
        }
    }

}

pub mod ring_pattern {
    use super::*;

    /// Concentric rings around the y axis, alternating every unit of radius.
    #[derive(Debug, Clone, PartialEq)]
    pub struct RingPattern {
        a: Color,
        b: Color,
        transformation: Matrix,
    }

    impl RingPattern {
        pub fn new(a: Color, b: Color) -> Self {
            Self {
                a,
                b,
                transformation: Matrix::identity(),
            }
        }

        pub fn with_transformation(mut self, transformation: Matrix) -> Self {
            self.transformation = transformation;
            self
        }
    }

    impl Pattern for RingPattern {
        fn pattern_type(&self) -> PatternType {
            PatternType::RingPattern
        }

        fn transformation(&self) -> Matrix {
            self.transformation
        }

        fn pattern_at(&self, point: Point) -> Color {
            let radius = (point.x.powi(2) + point.z.powi(2)).sqrt();
            if is_even(radius.floor()) {
                self.a
            } else {
                self.b
            }
        }
    }

}

pub mod checkers_pattern {
    use super::*;

    /// Alternating cubes in all three dimensions.
    #[derive(Debug, Clone, PartialEq)]
    pub struct CheckersPattern {
        a: Color,
        b: Color,
        transformation: Matrix,
    }

    impl CheckersPattern {
        pub fn new(a: Color, b: Color) -> Self {
            Self {
                a,
                b,
                transformation: Matrix::identity(),
            }
        }

        pub fn with_transformation(mut self, transformation: Matrix) -> Self {
            self.transformation = transformation;
            self
        }
    }

    impl Pattern for CheckersPattern {
        fn pattern_type(&self) -> PatternType {
            PatternType::CheckersPattern
        }

        fn transformation(&self) -> Matrix {
            self.transformation
        }

        fn pattern_at(&self, point: Point) -> Color {
            let sum = point.x.floor() + point.y.floor() + point.z.floor();
            if is_even(sum) {
                self.a
            } else {
                self.b
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn checkers_repeat_in_each_dimension() {
            let pattern = CheckersPattern::new(Color::white(), Color::black());
            for (x, y, z) in [(1., 0., 0.), (0., 1., 0.), (0., 0., 1.)] {
                assert_eq!(pattern.pattern_at(Point::origin()), Color::white());
                assert_eq!(
                    pattern.pattern_at(Point::new(x * 0.99, y * 0.99, z * 0.99)),
                    Color::white()
                );
                assert_eq!(
                    pattern.pattern_at(Point::new(x * 1.01, y * 1.01, z * 1.01)),
                    Color::black()
                );
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_pattern {
    use super::*;

    /// Returns the pattern-space point itself as a color, to observe transformations.
    #[derive(Debug, Clone, Default)]
    pub(crate) struct TestPattern {
        transformation: Matrix,
    }

    impl TestPattern {
        pub(crate) fn with_transformation(mut self, transformation: Matrix) -> Self {
            self.transformation = transformation;
            self
        }
    }

    impl Pattern for TestPattern {
        fn pattern_type(&self) -> PatternType {
            PatternType::TestPattern
        }

        fn pattern_at(&self, point: Point) -> Color {
            Color::new(point.x, point.y, point.z)
        }

        fn transformation(&self) -> Matrix {
            self.transformation
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::test_pattern::TestPattern;
    use super::*;
    use crate::shape::Shape;

    #[test]
    fn default_pattern_transformation() {
        // erase the type in order to test the trait object
        let pattern: Box<dyn Pattern> = Box::new(TestPattern::default());
        assert_eq!(pattern.transformation(), Matrix::identity());
    }

    #[test]
    fn boxed_patterns_clone_and_compare() {
        let pattern: Box<dyn Pattern> =
            Box::new(TestPattern::default().with_transformation(Matrix::translation(1., 2., 3.)));
        let copy = pattern.clone();
        assert_eq!(&copy, &pattern);
        assert_eq!(copy.transformation(), Matrix::translation(1., 2., 3.));
    }

    #[test]
    fn boxed_patterns_with_different_colors_differ() {
        let default_stripes: Box<dyn Pattern> = Box::new(stripe_pattern::StripePattern::default());
        let red_and_blue: Box<dyn Pattern> = Box::new(stripe_pattern::StripePattern::new(
            Color::new(1., 0., 0.),
            Color::new(0., 0., 1.),
        ));
        assert_ne!(&default_stripes, &red_and_blue);

        // swapping the colors changes which one sits at the origin
        let white_and_black: Box<dyn Pattern> = Box::new(checkers_pattern::CheckersPattern::new(
            Color::white(),
            Color::black(),
        ));
        let black_and_white: Box<dyn Pattern> = Box::new(checkers_pattern::CheckersPattern::new(
            Color::black(),
            Color::white(),
        ));
        assert_ne!(&white_and_black, &black_and_white);
    }

    #[test]
    fn materials_with_different_pattern_colors_differ() {
        use crate::material::Material;

        let striped = |a, b| Material {
            pattern: Some(Box::new(stripe_pattern::StripePattern::new(a, b))),
            ..Default::default()
        };
        assert_eq!(
            striped(Color::white(), Color::black()),
            striped(Color::white(), Color::black())
        );
        assert_ne!(
            striped(Color::white(), Color::black()),
            striped(Color::new(1., 0., 0.), Color::new(0., 0., 1.))
        );
    }

    #[test]
    fn pattern_with_object_and_pattern_transformations() {
        let mut shapes = ShapeArena::new();
        let scaled =
            shapes.add_object(Shape::sphere().with_transformation(Matrix::scaling(2., 2., 2.)));
        let plain = shapes.add_object(Shape::sphere());

        let pattern = TestPattern::default();
        let color = pattern
            .pattern_at_shape(&shapes, scaled, Point::new(2., 3., 4.))
            .unwrap();
        assert_eq!(color, Color::new(1., 1.5, 2.));

        let pattern = TestPattern::default().with_transformation(Matrix::scaling(2., 2., 2.));
        let color = pattern
            .pattern_at_shape(&shapes, plain, Point::new(2., 3., 4.))
            .unwrap();
        assert_eq!(color, Color::new(1., 1.5, 2.));

        let pattern =
            TestPattern::default().with_transformation(Matrix::translation(0.5, 1., 1.5));
        let color = pattern
            .pattern_at_shape(&shapes, scaled, Point::new(2.5, 3., 3.5))
            .unwrap();
        assert_eq!(color, Color::new(0.75, 0.5, 0.25));
    }

    #[test]
    fn pattern_on_grouped_shape_goes_through_parents() {
        let mut shapes = ShapeArena::new();
        let group =
            shapes.add_object(Shape::group().with_transformation(Matrix::rotation_y(PI / 2.)));
        let sphere =
            shapes.insert(Shape::sphere().with_transformation(Matrix::scaling(2., 2., 2.)));
        shapes.add_child(group, sphere).unwrap();

        let pattern = TestPattern::default();
        let color = pattern
            .pattern_at_shape(&shapes, sphere, Point::new(2., 0., 0.))
            .unwrap();
        // rotating (2, 0, 0) back around y lands on (0, 0, 2), then scaled by half
        assert_eq!(color, Color::new(0., 0., 1.));
    }

    #[test]
    fn singular_pattern_transformation_is_an_error() {
        let mut shapes = ShapeArena::new();
        let sphere = shapes.add_object(Shape::sphere());
        let pattern = TestPattern::default().with_transformation(Matrix::scaling(0., 0., 0.));
        assert!(pattern
            .pattern_at_shape(&shapes, sphere, Point::origin())
            .is_err());
    }
}
