use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use patron::game::control::{ControlPlugin, PointerWorldPosition, TargetPoint};
use patron::game::math::{FixedNum, FixedVec2};
use patron::game::navigation::{NavPath, NavigationAgent, NavigationPlugin, NavigationServer};
use patron::game::patron::{Motion, MotionPhase, Patron, PatronPlugin, PatronTemplate};
use patron::game::simulation::{SimConfig, SimPosition, SimVelocity, SimulationPlugin};
use patron::game::spawner::SpawnerPlugin;
use patron::game::GameState;
use smallvec::smallvec;

/// Headless app without a time plugin: FixedUpdate only runs when a test runs it.
fn headless_app(sim_config: SimConfig) -> App {
    let mut app = App::new();
    app.add_plugins(StatesPlugin);
    app.init_resource::<ButtonInput<KeyCode>>();
    app.init_resource::<ButtonInput<MouseButton>>();
    app.init_state::<GameState>();
    app.add_plugins((SimulationPlugin, NavigationPlugin, PatronPlugin, SpawnerPlugin, ControlPlugin));
    app.insert_resource(sim_config);

    app.update();
    app
}

fn template() -> PatronTemplate {
    PatronTemplate {
        movement_speed: 100.0,
        path_desired_distance: 20.0,
        target_desired_distance: 10.0,
    }
}

fn spawn_patron(app: &mut App, x: f32, y: f32) -> Entity {
    let template = template();
    app.world_mut()
        .spawn(template.instantiate(FixedVec2::from_f32(x, y), template.agent()))
        .id()
}

fn click_at(app: &mut App, point: Vec2) {
    app.world_mut().resource_mut::<PointerWorldPosition>().0 = Some(point);
    app.world_mut().resource_mut::<ButtonInput<MouseButton>>().press(MouseButton::Left);
    app.update();
    let mut mouse = app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
    mouse.release(MouseButton::Left);
    mouse.clear();
}

fn tick(app: &mut App, n: usize) {
    for _ in 0..n {
        app.world_mut().run_schedule(FixedUpdate);
    }
}

fn position(app: &App, entity: Entity) -> Vec2 {
    app.world().get::<SimPosition>(entity).unwrap().0.to_vec2()
}

fn velocity(app: &App, entity: Entity) -> FixedVec2 {
    app.world().get::<SimVelocity>(entity).unwrap().0
}

#[test]
fn click_sets_target_point_to_pointer_position() {
    let mut app = headless_app(SimConfig { tick_rate: 62.5, ..Default::default() });
    let patron = spawn_patron(&mut app, 0.0, 0.0);

    click_at(&mut app, Vec2::new(200.0, -40.0));

    assert_eq!(app.world().resource::<TargetPoint>().0, Some(Vec2::new(200.0, -40.0)));

    tick(&mut app, 1);
    let agent = app.world().get::<NavigationAgent>(patron).unwrap();
    assert_eq!(agent.target(), Some(FixedVec2::from_f32(200.0, -40.0)));
}

#[test]
fn patron_walks_to_the_click_and_stops() {
    let mut app = headless_app(SimConfig { tick_rate: 62.5, ..Default::default() });
    let patron = spawn_patron(&mut app, 0.0, 0.0);

    click_at(&mut app, Vec2::new(200.0, 0.0));
    tick(&mut app, 1);

    // speed 100 at 0.016 s per tick
    let step: f32 = velocity(&app, patron).length().to_num();
    assert!((step - 1.6).abs() < 0.01, "first step was {}", step);
    assert_eq!(
        app.world().get::<Motion>(patron).unwrap().phase,
        MotionPhase::Following
    );

    tick(&mut app, 200);

    let pos = position(&app, patron);
    assert!((pos.x - 200.0).abs() <= 10.0, "stopped at {:?}", pos);
    assert!(pos.y.abs() < 0.01, "drifted off the straight path: {:?}", pos);
    assert!(app.world().get::<NavigationAgent>(patron).unwrap().is_navigation_finished());
    assert_eq!(velocity(&app, patron), FixedVec2::ZERO);
    assert_eq!(
        app.world().get::<Motion>(patron).unwrap().phase,
        MotionPhase::Arrived
    );
}

#[test]
fn every_patron_follows_the_same_click() {
    let mut app = headless_app(SimConfig { tick_rate: 62.5, ..Default::default() });
    let a = spawn_patron(&mut app, -50.0, 0.0);
    let b = spawn_patron(&mut app, 50.0, 0.0);

    click_at(&mut app, Vec2::new(0.0, 100.0));
    tick(&mut app, 150);

    for patron in [a, b] {
        let pos = position(&app, patron);
        assert!(pos.distance(Vec2::new(0.0, 100.0)) <= 10.0, "{:?} stopped at {:?}", patron, pos);
    }
}

#[test]
fn new_click_retargets_an_arrived_patron() {
    let mut app = headless_app(SimConfig {
        tick_rate: 62.5,
        stall_recovery: false,
        ..Default::default()
    });
    let patron = spawn_patron(&mut app, 0.0, 0.0);

    click_at(&mut app, Vec2::new(50.0, 0.0));
    tick(&mut app, 60);
    assert_eq!(app.world().get::<Motion>(patron).unwrap().phase, MotionPhase::Arrived);

    click_at(&mut app, Vec2::new(50.0, 80.0));
    tick(&mut app, 1);
    assert_eq!(app.world().get::<Motion>(patron).unwrap().phase, MotionPhase::Following);
    assert!(velocity(&app, patron).y > FixedNum::ZERO);
}

#[test]
fn arrived_patron_stays_stalled_on_a_direct_retarget() {
    let mut app = headless_app(SimConfig { tick_rate: 62.5, ..Default::default() });
    let patron = spawn_patron(&mut app, 0.0, 0.0);

    click_at(&mut app, Vec2::new(50.0, 0.0));
    tick(&mut app, 60);
    assert_eq!(app.world().get::<Motion>(patron).unwrap().phase, MotionPhase::Arrived);
    let arrived_at = position(&app, patron);

    // Zero velocity after moving counts as a stall, and a direct path has
    // nothing past its goal to skip to
    click_at(&mut app, Vec2::new(50.0, 80.0));
    tick(&mut app, 5);

    assert_eq!(app.world().get::<Motion>(patron).unwrap().phase, MotionPhase::StalledRecovery);
    assert_eq!(velocity(&app, patron), FixedVec2::ZERO);
    assert_eq!(position(&app, patron), arrived_at);
    assert!(!app.world().get::<NavigationAgent>(patron).unwrap().is_navigation_finished());
}

#[test]
fn click_with_pointer_outside_the_window_sets_no_target() {
    let mut app = headless_app(SimConfig { tick_rate: 62.5, ..Default::default() });
    let patron = spawn_patron(&mut app, 0.0, 0.0);

    app.world_mut().resource_mut::<PointerWorldPosition>().0 = None;
    app.world_mut().resource_mut::<ButtonInput<MouseButton>>().press(MouseButton::Left);
    app.update();
    tick(&mut app, 1);

    assert_eq!(app.world().resource::<TargetPoint>().0, None);
    assert_eq!(app.world().get::<NavigationAgent>(patron).unwrap().target(), None);
    assert_eq!(app.world().get::<Motion>(patron).unwrap().phase, MotionPhase::Idle);
    assert_eq!(position(&app, patron), Vec2::ZERO);
}

#[test]
fn pause_freezes_the_simulation() {
    let mut app = headless_app(SimConfig { tick_rate: 62.5, ..Default::default() });
    let patron = spawn_patron(&mut app, 0.0, 0.0);
    click_at(&mut app, Vec2::new(200.0, 0.0));
    tick(&mut app, 10);
    let before = position(&app, patron);

    app.world_mut().resource_mut::<NextState<GameState>>().set(GameState::Paused);
    app.update();
    tick(&mut app, 10);

    assert_eq!(position(&app, patron), before);
}

/// Patron at (99, 99) on a 200x200 map, routed through (150, 150), which is
/// off the map, before heading back to the origin.
fn cornered_app(stall_recovery: bool) -> (App, Entity) {
    let mut app = headless_app(SimConfig {
        tick_rate: 62.5,
        map_width: FixedNum::from_num(200),
        map_height: FixedNum::from_num(200),
        stall_recovery,
        ..Default::default()
    });
    app.insert_resource(NavigationServer::new(|from: FixedVec2, to: FixedVec2| -> NavPath {
        smallvec![from, FixedVec2::from_f32(150.0, 150.0), to]
    }));
    let patron = spawn_patron(&mut app, 99.0, 99.0);
    click_at(&mut app, Vec2::ZERO);
    (app, patron)
}

#[test]
fn cornered_patron_recovers_toward_the_following_waypoint() {
    let (mut app, patron) = cornered_app(true);

    // 1: slide into the corner, 2: pinned (zero velocity), 3: recovery
    tick(&mut app, 2);
    assert_eq!(position(&app, patron), Vec2::new(100.0, 100.0));
    assert_eq!(velocity(&app, patron), FixedVec2::ZERO);

    tick(&mut app, 1);
    assert_eq!(
        app.world().get::<Motion>(patron).unwrap().phase,
        MotionPhase::StalledRecovery
    );
    let pos = position(&app, patron);
    assert!(pos.x < 100.0 && pos.y < 100.0, "still pinned at {:?}", pos);
}

#[test]
fn cornered_patron_stays_pinned_without_recovery() {
    let (mut app, patron) = cornered_app(false);

    tick(&mut app, 5);

    assert_eq!(position(&app, patron), Vec2::new(100.0, 100.0));
    assert_eq!(velocity(&app, patron), FixedVec2::ZERO);
    assert_eq!(app.world().get::<Motion>(patron).unwrap().phase, MotionPhase::Following);
    assert!(app.world().get::<Patron>(patron).is_some());
}
