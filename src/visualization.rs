//! 3D visualization of pyramid solutions using kiss3d.

use std::collections::HashMap;

use kiss3d::prelude::*;

use pyramid::grid::Solution;
use pyramid::lattice::{sphere_center, CELL_COUNT};

/// Returns the display color for a piece symbol.
///
/// The mapping is stable to keep colors consistent across renders.
fn piece_color(symbol: u8) -> Color {
    match symbol {
        b'L' => Color::new(1.0, 0.2, 0.2, 1.0), // red
        b'T' => Color::new(0.2, 1.0, 0.2, 1.0), // green
        b'I' => Color::new(0.2, 0.2, 1.0, 1.0), // blue
        b'v' => Color::new(1.0, 1.0, 0.2, 1.0), // yellow
        b'i' => Color::new(1.0, 0.2, 1.0, 1.0), // magenta
        _ => Color::new(0.2, 1.0, 1.0, 1.0),    // cyan
    }
}

/// Represents a rendered sphere in the 3D scene.
struct RenderedSphere {
    node: SceneNode3d,
    /// The sphere's position when not exploded.
    base_position: Vec3,
    symbol: u8,
}

fn to_vec3(point: [f32; 3]) -> Vec3 {
    Vec3::new(point[0], point[1], point[2])
}

/// Centre of the whole pyramid, used as the origin of explosions.
fn pyramid_center() -> Vec3 {
    let sum = (0..CELL_COUNT)
        .map(|cell| to_vec3(sphere_center(cell)))
        .fold(Vec3::ZERO, |acc, pos| acc + pos);
    sum / CELL_COUNT as f32
}

/// Builds the 3D scene for a solution.
///
/// Sphere centres come from the pyramid geometry (unit diameter, base on
/// y = 0) and are shifted so the pyramid is centred on the origin.
///
/// Returns the rendered spheres and each piece's centroid, relative to the
/// pyramid centre, for the explosion animation.
fn build_scene(
    scene: &mut SceneNode3d,
    solution: &Solution,
) -> (Vec<RenderedSphere>, HashMap<u8, Vec3>) {
    /// Rendered radius, slightly below 0.5 so neighbouring spheres stay apart.
    const SPHERE_RADIUS: f32 = 0.46;

    let center = pyramid_center();

    let mut sums: HashMap<u8, (Vec3, f32)> = HashMap::new();
    let mut rendered_spheres = Vec::with_capacity(CELL_COUNT);

    for (cell, &symbol) in solution.iter().enumerate() {
        let base_position = to_vec3(sphere_center(cell)) - center;
        let entry = sums.entry(symbol).or_insert((Vec3::ZERO, 0.0));
        entry.0 += base_position;
        entry.1 += 1.0;

        let node = scene
            .add_sphere(SPHERE_RADIUS)
            .set_color(piece_color(symbol))
            .set_position(base_position);
        rendered_spheres.push(RenderedSphere {
            node,
            base_position,
            symbol,
        });
    }

    let piece_centroids = sums
        .into_iter()
        .map(|(symbol, (sum, count))| (symbol, sum / count))
        .collect();

    (rendered_spheres, piece_centroids)
}

/// Displays all solutions in an interactive 3D viewer.
pub fn display(solutions: Vec<Solution>) {
    pollster::block_on(display_async(solutions));
}

async fn display_async(solutions: Vec<Solution>) {
    if solutions.is_empty() {
        println!("No solutions to display");
        return;
    }

    let num_solutions = solutions.len();
    let mut current_solution_index = 0;

    let mut window = Window::new(&format!(
        "Solution 1/{} - [Left/Right] navigate, [Up/Down] explode, [R] reset",
        num_solutions
    ))
    .await;

    let mut camera = OrbitCamera3d::default();
    camera.set_dist(6.0);

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(100.0))
        .set_position(Vec3::new(5.0, 5.0, 5.0));

    let (mut rendered_spheres, mut piece_centroids) =
        build_scene(&mut scene, &solutions[current_solution_index]);

    // how far pieces move outward (0.0 = packed)
    let mut explosion_amount: f32 = 0.0;
    const EXPLOSION_SPEED: f32 = 0.05;
    let mut needs_rebuild = false;

    loop {
        for event in window.events().iter() {
            if let kiss3d::event::WindowEvent::Key(key, action, _) = event.value {
                use kiss3d::event::{Action, Key};
                if action == Action::Press {
                    match key {
                        Key::Up => explosion_amount += EXPLOSION_SPEED,
                        Key::Down => {
                            explosion_amount = (explosion_amount - EXPLOSION_SPEED).max(0.0)
                        }
                        Key::R => explosion_amount = 0.0,
                        Key::Right => {
                            current_solution_index = (current_solution_index + 1) % num_solutions;
                            needs_rebuild = true;
                        }
                        Key::Left => {
                            current_solution_index = current_solution_index
                                .checked_sub(1)
                                .unwrap_or(num_solutions - 1);
                            needs_rebuild = true;
                        }
                        _ => {}
                    }
                }
            }
        }

        if needs_rebuild {
            for mut sphere in rendered_spheres.drain(..) {
                sphere.node.remove();
            }
            let (new_spheres, new_centroids) =
                build_scene(&mut scene, &solutions[current_solution_index]);
            rendered_spheres = new_spheres;
            piece_centroids = new_centroids;
            window.set_title(&format!(
                "Solution {}/{} - [Left/Right] navigate, [Up/Down] explode, [R] reset",
                current_solution_index + 1,
                num_solutions
            ));
            needs_rebuild = false;
        }

        for sphere in &mut rendered_spheres {
            let direction = piece_centroids
                .get(&sphere.symbol)
                .map_or(Vec3::ZERO, |centroid| centroid.normalize_or_zero());
            sphere
                .node
                .set_position(sphere.base_position + direction * explosion_amount * 2.0);
        }

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }
}
