use crate::prelude::*;
use crate::simulation::core::prng::SimulationRng;
use avian3d::prelude::*;
use rand::Rng;

/// Obstacles never spawn closer than this to the body's starting point.
const SPAWN_CLEARANCE: f32 = 3.0;
const GROUND_THICKNESS: f32 = 0.2;

/// A resource to hold shared render assets. Only present when the app renders.
#[derive(Resource)]
struct WorldAssets {
    body_mesh: Handle<Mesh>,
    body_material: Handle<StandardMaterial>,
    ground_material: Handle<StandardMaterial>,
    obstacle_material: Handle<StandardMaterial>,
}

/// An axis-aligned box placed in the arena.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub center: Vec3,
    /// Full side lengths.
    pub size: Vec3,
}

pub struct WorldSpawnerPlugin;

impl Plugin for WorldSpawnerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(AppState::SceneBuilding),
            (
                // Spawn non-physical helpers and the recorded body's logic.
                setup_world_assets.in_set(SceneBuildSet::Spawn),
                spawn_lighting_and_camera.in_set(SceneBuildSet::Spawn),
                spawn_recorded_body.in_set(SceneBuildSet::Spawn),
                // Everything with a collider.
                spawn_arena.in_set(SceneBuildSet::Physics),
                attach_body_physics.in_set(SceneBuildSet::Physics),
            ),
        );
    }
}

/// Scatters `count` boxes over the arena, keeping `keep_clear` free.
///
/// Gives up on a box after a bounded number of draws, so a crowded arena ends up
/// with fewer obstacles rather than looping.
pub fn obstacle_layout<R: Rng>(
    rng: &mut R,
    count: usize,
    half_extent: f32,
    keep_clear: Vec3,
) -> Vec<Obstacle> {
    const ATTEMPTS_PER_OBSTACLE: usize = 20;

    let margin = 1.0;
    let reach = half_extent - margin;
    if reach <= 0.0 {
        return Vec::new();
    }

    let mut obstacles = Vec::with_capacity(count);
    for _ in 0..count * ATTEMPTS_PER_OBSTACLE {
        if obstacles.len() == count {
            break;
        }
        let size = Vec3::new(
            rng.gen_range(0.5..2.0),
            rng.gen_range(0.3..1.5),
            rng.gen_range(0.5..2.0),
        );
        let center = Vec3::new(
            rng.gen_range(-reach..reach),
            size.y * 0.5,
            rng.gen_range(-reach..reach),
        );
        let planar_gap = Vec2::new(center.x - keep_clear.x, center.z - keep_clear.z).length();
        if planar_gap < SPAWN_CLEARANCE + size.max_element() {
            continue;
        }
        obstacles.push(Obstacle { center, size });
    }
    obstacles
}

/// SPAWNING (ASSETS): Loads shared meshes and materials when rendering is available.
fn setup_world_assets(
    mut commands: Commands,
    config: Res<ScenarioConfig>,
    meshes: Option<ResMut<Assets<Mesh>>>,
    materials: Option<ResMut<Assets<StandardMaterial>>>,
) {
    let (Some(mut meshes), Some(mut materials)) = (meshes, materials) else {
        info!("[SCENE] No render assets available; spawning colliders only.");
        return;
    };
    commands.insert_resource(WorldAssets {
        body_mesh: meshes.add(Capsule3d::new(config.body.radius, config.body.height)),
        body_material: materials.add(Color::srgb(0.2, 0.5, 0.9)),
        ground_material: materials.add(Color::srgb(0.35, 0.4, 0.35)),
        obstacle_material: materials.add(Color::srgb(0.6, 0.45, 0.3)),
    });
}

fn spawn_lighting_and_camera(mut commands: Commands) {
    // --- Spawn Lighting ---
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            illuminance: 15_000.0,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // --- Spawn Camera ---
    let camera_transform = Transform::from_xyz(-18.0, 16.0, 18.0).looking_at(Vec3::ZERO, Vec3::Y);
    commands.spawn((Camera3d::default(), camera_transform));
}

/// SPAWNING (LOGIC): The recorded body with its recorder and movement controller.
fn spawn_recorded_body(mut commands: Commands, config: Res<ScenarioConfig>) {
    let body = &config.body;
    // The config was validated when it was loaded.
    let recorder = PathRecorder::new(config.recorder)
        .unwrap_or_else(|err| panic!("[SPAWN] cannot build recorder: {err}"));

    info!(
        "[SPAWN] Spawning recorded body '{}' at {:?}",
        body.name,
        body.starting_pose.translation.as_slice()
    );
    commands.spawn((
        Name::new(body.name.clone()),
        body.starting_pose.to_bevy_transform(),
        TrajectoryRecorder(recorder),
        MovementControl {
            enabled: true,
            speed: body.walk_speed,
        },
        ShowPathGizmos,
    ));
}

/// SPAWNING (PHYSICS): Attaches the rigid body, and the visual mesh if there is one.
fn attach_body_physics(
    mut commands: Commands,
    config: Res<ScenarioConfig>,
    assets: Option<Res<WorldAssets>>,
    query: Query<(Entity, &Transform), (With<TrajectoryRecorder>, Without<RigidBody>)>,
) {
    let body = &config.body;
    for (entity, transform) in &query {
        let mut entity_commands = commands.entity(entity);
        entity_commands.insert((
            RigidBody::Dynamic,
            Collider::capsule(body.radius, body.height),
            // A walking body stays upright; yaw is free.
            LockedAxes::new().lock_rotation_x().lock_rotation_z(),
            Mass(body.mass),
            Friction::new(0.3),
            // Replayed velocities must apply on every step.
            SleepingDisabled,
            // Seed the physics pose so the first fixed step reads the spawn pose.
            Position(transform.translation),
            Rotation(transform.rotation),
            LinearVelocity::default(),
            AngularVelocity::default(),
        ));
        if let Some(assets) = &assets {
            entity_commands.insert((
                Mesh3d(assets.body_mesh.clone()),
                MeshMaterial3d(assets.body_material.clone()),
            ));
        }
    }
}

/// SPAWNING (PHYSICS): Ground plane and seeded obstacles.
fn spawn_arena(
    mut commands: Commands,
    config: Res<ScenarioConfig>,
    mut rng: ResMut<SimulationRng>,
    assets: Option<Res<WorldAssets>>,
    mut meshes: Option<ResMut<Assets<Mesh>>>,
) {
    let half = config.world.arena_half_extent;
    let ground_size = Vec3::new(2.0 * half, GROUND_THICKNESS, 2.0 * half);

    let mut ground = commands.spawn((
        Name::new("Ground"),
        RigidBody::Static,
        Collider::cuboid(ground_size.x, ground_size.y, ground_size.z),
        Transform::from_xyz(0.0, -GROUND_THICKNESS * 0.5, 0.0),
    ));
    if let (Some(assets), Some(meshes)) = (&assets, meshes.as_mut()) {
        ground.insert((
            Mesh3d(meshes.add(Cuboid::from_size(ground_size))),
            MeshMaterial3d(assets.ground_material.clone()),
        ));
    }

    let start = config.body.starting_pose.to_bevy_transform().translation;
    let obstacles = obstacle_layout(&mut rng.0, config.world.obstacle_count, half, start);
    if obstacles.len() < config.world.obstacle_count {
        warn!(
            "[SCENE] Placed {} of {} obstacles; the arena is too crowded.",
            obstacles.len(),
            config.world.obstacle_count
        );
    }

    for (i, obstacle) in obstacles.iter().enumerate() {
        let mut entity = commands.spawn((
            Name::new(format!("Obstacle_{i}")),
            RigidBody::Static,
            Collider::cuboid(obstacle.size.x, obstacle.size.y, obstacle.size.z),
            Transform::from_translation(obstacle.center),
        ));
        if let (Some(assets), Some(meshes)) = (&assets, meshes.as_mut()) {
            entity.insert((
                Mesh3d(meshes.add(Cuboid::from_size(obstacle.size))),
                MeshMaterial3d(assets.obstacle_material.clone()),
            ));
        }
    }
    info!("[SCENE] Arena built with {} obstacles.", obstacles.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn layout_is_reproducible_from_a_seed() {
        let a = obstacle_layout(&mut ChaCha8Rng::seed_from_u64(11), 8, 20.0, Vec3::ZERO);
        let b = obstacle_layout(&mut ChaCha8Rng::seed_from_u64(11), 8, 20.0, Vec3::ZERO);
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
    }

    #[test]
    fn obstacles_stay_inside_and_clear_of_the_start() {
        let start = Vec3::new(2.0, 1.5, -3.0);
        let obstacles = obstacle_layout(&mut ChaCha8Rng::seed_from_u64(5), 30, 15.0, start);
        for obstacle in &obstacles {
            assert!(obstacle.center.x.abs() < 15.0 && obstacle.center.z.abs() < 15.0);
            let gap = Vec2::new(obstacle.center.x - start.x, obstacle.center.z - start.z).length();
            assert!(gap >= SPAWN_CLEARANCE, "obstacle too close: {:?}", obstacle);
            // Resting on the ground.
            assert!((obstacle.center.y - obstacle.size.y * 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn tiny_arenas_get_no_obstacles() {
        let obstacles = obstacle_layout(&mut ChaCha8Rng::seed_from_u64(1), 5, 0.5, Vec3::ZERO);
        assert!(obstacles.is_empty());
    }
}
