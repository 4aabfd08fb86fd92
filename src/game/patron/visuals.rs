use bevy::prelude::*;
use crate::game::control::TargetPoint;
use crate::game::navigation::NavigationAgent;
use crate::game::simulation::{DebugConfig, SimPosition, SimPositionPrev};
use crate::game::spawner::Spawner;
use crate::game::GameState;
use super::components::{Motion, MotionPhase, Patron};

const PATRON_RADIUS: f32 = 8.0;
const MARKER_RADIUS: f32 = 12.0;

/// Shared mesh and material handles for patron rendering
#[derive(Resource)]
pub struct PatronAssets {
    pub mesh: Handle<Mesh>,
    pub idle: Handle<ColorMaterial>,
    pub following: Handle<ColorMaterial>,
    pub stalled: Handle<ColorMaterial>,
    pub arrived: Handle<ColorMaterial>,
}

impl PatronAssets {
    fn material(&self, phase: MotionPhase) -> Handle<ColorMaterial> {
        match phase {
            MotionPhase::Idle => self.idle.clone(),
            MotionPhase::Following => self.following.clone(),
            MotionPhase::StalledRecovery => self.stalled.clone(),
            MotionPhase::Arrived => self.arrived.clone(),
        }
    }
}

/// Rendering for patrons, spawners and the debug path overlay.
/// Needs the render plugins, so headless apps leave it out.
pub struct PatronVisualsPlugin;

impl Plugin for PatronVisualsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_patron_assets)
           .add_systems(Update, (
               spawn_patron_visuals,
               update_phase_visuals,
               sync_visuals,
               draw_spawners,
               draw_patron_paths,
           ).run_if(in_state(GameState::InGame).or(in_state(GameState::Paused))));
    }
}

fn setup_patron_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.insert_resource(PatronAssets {
        mesh: meshes.add(Circle::new(PATRON_RADIUS)),
        idle: materials.add(Color::srgb(0.6, 0.6, 0.6)),
        following: materials.add(Color::srgb(0.9, 0.7, 0.3)),
        stalled: materials.add(Color::srgb(0.9, 0.2, 0.2)),
        arrived: materials.add(Color::srgb(0.3, 0.8, 0.4)),
    });
}

fn spawn_patron_visuals(
    mut commands: Commands,
    query: Query<(Entity, &Motion), Added<Patron>>,
    assets: Res<PatronAssets>,
) {
    for (entity, motion) in query.iter() {
        commands.entity(entity).insert((
            Mesh2d(assets.mesh.clone()),
            MeshMaterial2d(assets.material(motion.phase)),
        ));
    }
}

fn update_phase_visuals(
    mut query: Query<(&Motion, &mut MeshMaterial2d<ColorMaterial>), Changed<Motion>>,
    assets: Res<PatronAssets>,
) {
    for (motion, mut material) in query.iter_mut() {
        material.0 = assets.material(motion.phase);
    }
}

/// Interpolate render transforms between the last two simulation ticks.
///
/// Simulation positions are in world space, so patrons parented under a
/// moved scene node get their translation expressed in that node's frame.
fn sync_visuals(
    mut query: Query<(&mut Transform, &SimPosition, &SimPositionPrev, Option<&ChildOf>)>,
    parents: Query<&GlobalTransform>,
    fixed_time: Res<Time<Fixed>>,
) {
    let alpha = fixed_time.overstep_fraction();
    for (mut transform, pos, prev_pos, child_of) in query.iter_mut() {
        let world = prev_pos.0.to_vec2().lerp(pos.0.to_vec2(), alpha);
        let world = world.extend(transform.translation.z);

        let local = match child_of.and_then(|c| parents.get(c.parent()).ok()) {
            Some(parent) => parent.affine().inverse().transform_point3(world),
            None => world,
        };
        transform.translation.x = local.x;
        transform.translation.y = local.y;
    }
}

fn draw_spawners(query: Query<&SimPosition, With<Spawner>>, mut gizmos: Gizmos) {
    for pos in query.iter() {
        gizmos.circle_2d(pos.0.to_vec2(), MARKER_RADIUS, Color::srgb(0.4, 0.6, 1.0));
    }
}

fn draw_patron_paths(
    query: Query<(&SimPosition, &NavigationAgent), With<Patron>>,
    target: Res<TargetPoint>,
    debug_config: Res<DebugConfig>,
    mut gizmos: Gizmos,
) {
    if !debug_config.show_paths {
        return;
    }

    for (pos, agent) in query.iter() {
        if agent.is_navigation_finished() {
            continue;
        }
        let remaining = agent.current_path().iter().skip(agent.current_path_index());
        let points = std::iter::once(pos.0).chain(remaining.copied()).map(|p| p.to_vec2());
        gizmos.linestrip_2d(points, Color::srgb(0.0, 1.0, 0.0));
    }

    if let Some(point) = target.0 {
        gizmos.circle_2d(point, 4.0, Color::srgb(1.0, 1.0, 0.0));
    }
}
