use std::{env, f64::consts::PI, fs};

use anyhow::{Context, Result};
use log::info;

use prism::prelude::*;
use prism_obj::parse_obj_file;

const WIDTH: usize = 400;
const HEIGHT: usize = 200;

fn floor(world: &mut World) {
    let pattern = CheckersPattern::new(Color::white(), Color::new(0.2, 0.2, 0.25));
    world.add_object(Shape::plane().with_material(Material {
        pattern: Some(Box::new(pattern)),
        reflective: 0.2,
        specular: 0.,
        ..Default::default()
    }));
}

fn glass_ball(world: &mut World) {
    let material = Material {
        color: Color::new(0.05, 0.05, 0.1),
        diffuse: 0.1,
        shininess: 300.,
        reflective: 0.9,
        transparency: 0.9,
        refractive_index: 1.5,
        casts_shadow: false,
        ..Default::default()
    };
    world.add_object(
        Shape::sphere()
            .with_transformation(Matrix::translation(0., 1., 0.))
            .with_material(material),
    );
}

/// A rounded cube, drilled through along each axis.
fn die(world: &mut World) -> Result<()> {
    let red = Material {
        color: Color::new(0.8, 0.1, 0.1),
        specular: 0.3,
        ..Default::default()
    };

    let shapes = &mut world.shapes;
    let cube = shapes.insert(Shape::cube().with_material(red.clone()));
    let ball = shapes.insert(
        Shape::sphere()
            .with_transformation(Matrix::scaling(1.35, 1.35, 1.35))
            .with_material(red.clone()),
    );
    let rounded = shapes.add_csg(CsgOperation::Intersection, cube, ball)?;

    let drills = shapes.insert(Shape::group());
    for rotation in [
        Matrix::identity(),
        Matrix::rotation_x(PI / 2.),
        Matrix::rotation_z(PI / 2.),
    ] {
        let drill = shapes.insert(
            Shape::new(Cylinder::new(-2., 2., true))
                .with_transformation(rotation * Matrix::scaling(0.4, 1., 0.4))
                .with_material(red.clone()),
        );
        shapes.add_child(drills, drill)?;
    }
    let die = shapes.add_csg(CsgOperation::Difference, rounded, drills)?;

    shapes.get_mut(die)?.set_transformation(
        Matrix::identity()
            .scale(0.5, 0.5, 0.5)
            .rotate_y(PI / 5.)
            .translate(2.2, 0.5, 0.8),
    );
    shapes.add_root(die)?;
    Ok(())
}

/// Six corner spheres joined by cylinder edges, each side a group of its own.
fn hexagon(world: &mut World) -> Result<()> {
    let gold = Material {
        color: Color::new(0.9, 0.7, 0.2),
        reflective: 0.3,
        ..Default::default()
    };

    let shapes = &mut world.shapes;
    let hex = shapes.insert(Shape::group().with_transformation(
        Matrix::identity()
            .scale(0.6, 0.6, 0.6)
            .rotate_x(-PI / 6.)
            .translate(-2.3, 0.9, 0.5),
    ));

    for n in 0..6 {
        let side = shapes.insert(
            Shape::group().with_transformation(Matrix::rotation_y(n as f64 * PI / 3.)),
        );
        shapes.add_child(hex, side)?;

        let corner = shapes.insert(
            Shape::sphere()
                .with_transformation(Matrix::identity().scale(0.25, 0.25, 0.25).translate(0., 0., -1.))
                .with_material(gold.clone()),
        );
        let edge = shapes.insert(
            Shape::new(Cylinder::new(0., 1., false))
                .with_transformation(
                    Matrix::identity()
                        .scale(0.25, 1., 0.25)
                        .rotate_z(-PI / 2.)
                        .rotate_y(-PI / 6.)
                        .translate(0., 0., -1.),
                )
                .with_material(gold.clone()),
        );
        shapes.add_child(side, corner)?;
        shapes.add_child(side, edge)?;
    }

    shapes.add_root(hex)?;
    Ok(())
}

fn model(world: &mut World, path: &str) -> Result<()> {
    let material = Material {
        color: Color::new(0.3, 0.6, 0.9),
        ..Default::default()
    };
    let parsed = parse_obj_file(path, &mut world.shapes, Some(material))
        .with_context(|| format!("could not load model from {path}"))?;
    info!(
        "loaded {path}: {} vertices, {} ignored lines",
        parsed.vertices.len(),
        parsed.ignored_lines
    );

    world
        .shapes
        .get_mut(parsed.default_group)?
        .set_transformation(Matrix::translation(0., 0., 3.));
    world.shapes.add_root(parsed.default_group)?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = env::args().collect::<Vec<_>>();
    let model_path = args.get(1).filter(|path| !path.is_empty());
    let output = args.get(2).map_or("scene.ppm", String::as_str);

    let mut world = World::new_empty();
    world.light = Some(PointLight::new(Point::new(-10., 10., -10.), Color::white()));

    floor(&mut world);
    glass_ball(&mut world);
    die(&mut world)?;
    hexagon(&mut world)?;
    if let Some(path) = model_path {
        model(&mut world, path)?;
    }

    let camera = Camera::new(WIDTH, HEIGHT, PI / 3.).with_transformation(view_transformation(
        Point::new(0., 2.5, -6.),
        Point::new(0., 0.8, 0.),
        Vector::new(0., 1., 0.),
    ));

    let canvas = world.render(&camera)?;
    fs::write(output, canvas.to_ppm()).with_context(|| format!("could not write {output}"))?;

    info!("Wrote output to {output}");
    Ok(())
}
