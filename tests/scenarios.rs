use polygon_physics::{BodyHandle, BodySnapshot, Material, Scene, SceneConfig, Vec2};

const DT: f64 = 1.0 / 60.0;

fn rect(center: Vec2, w: f64, h: f64) -> Vec<Vec2> {
    vec![
        center + Vec2::new(-w / 2.0, -h / 2.0),
        center + Vec2::new(w / 2.0, -h / 2.0),
        center + Vec2::new(w / 2.0, h / 2.0),
        center + Vec2::new(-w / 2.0, h / 2.0),
    ]
}

/// y-up scene with g = (0, -10) and a fixed 20x1 floor whose top is at y = 0.
fn scene_with_floor(floor_restitution: f64) -> (Scene, BodyHandle) {
    let mut scene = Scene::new(SceneConfig::y_up());
    scene.set_gravity(Vec2::new(0.0, -10.0));
    let floor = scene
        .create_polygon_body(
            rect(Vec2::new(0.0, -0.5), 20.0, 1.0),
            Material::new(1.0, floor_restitution, 0.5, 0.3),
        )
        .unwrap();
    scene.set_body_fixed(floor, true).unwrap();
    (scene, floor)
}

#[test]
fn free_fall_follows_constant_acceleration() {
    let mut scene = Scene::new(SceneConfig::y_up());
    let g = Vec2::new(0.0, -10.0);
    scene.set_gravity(g);
    let p0 = Vec2::new(3.0, 100.0);
    let v0 = Vec2::new(1.0, 2.0);
    let body = scene.create_default_body(rect(p0, 1.0, 1.0)).unwrap();
    scene.set_velocity(body, v0).unwrap();

    let dt = 0.01;
    let ticks = 100;
    for _ in 0..ticks {
        scene.step(dt);
    }
    let t = dt * ticks as f64;
    let expected = p0 + v0 * t + g * (0.5 * t * t);
    let actual = scene.body(body).unwrap().position();
    // Semi-implicit Euler runs ahead by g·t·dt/2.
    assert!((actual - expected).magnitude() < g.magnitude() * t * dt);
    assert!((scene.body(body).unwrap().velocity() - (v0 + g * t)).magnitude() < 1e-9);
}

#[test]
fn inelastic_box_comes_to_rest_on_floor() {
    let (mut scene, _floor) = scene_with_floor(0.0);
    let body = scene
        .create_polygon_body(rect(Vec2::new(0.0, 1.0), 1.0, 1.0), Material::new(1.0, 0.0, 0.5, 0.3))
        .unwrap();

    for _ in 0..300 {
        scene.step(DT);
    }
    let b = scene.body(body).unwrap();
    assert!(b.velocity().y.abs() < 1e-6, "vy = {}", b.velocity().y);
    assert!((b.position().y - 0.5).abs() < 0.02, "y = {}", b.position().y);
    assert!(b.position().x.abs() < 1e-6);
    assert!(b.angle().abs() < 1e-6);
    assert_eq!(scene.last_contacts().len(), 1);
}

#[test]
fn tilted_box_settles_on_a_face() {
    for tilt in [0.1, 0.4, 0.7] {
        let (mut scene, _floor) = scene_with_floor(0.0);
        let body = scene
            .create_polygon_body(rect(Vec2::new(0.0, 1.5), 1.0, 1.0), Material::new(1.0, 0.0, 0.5, 0.3))
            .unwrap();
        scene.set_angle(body, tilt).unwrap();

        let mut max_vy: f64 = 0.0;
        for tick in 0..3600 {
            scene.step(DT);
            if tick >= 3000 {
                max_vy = max_vy.max(scene.body(body).unwrap().velocity().y.abs());
            }
        }

        let b = scene.body(body).unwrap();
        let quarter = std::f64::consts::FRAC_PI_2;
        let off_face = b.angle() - quarter * (b.angle() / quarter).round();
        assert!(max_vy < 0.02, "tilt {tilt}: max vy = {max_vy}");
        assert!(off_face.abs() < 0.05, "tilt {tilt}: angle = {}", b.angle());
        assert!((b.position().y - 0.5).abs() < 0.03, "tilt {tilt}: y = {}", b.position().y);
        assert!(b.position().x.abs() < 1.0, "tilt {tilt}: x = {}", b.position().x);
    }
}

#[test]
fn sliding_box_decelerates_and_sticks() {
    let (mut scene, _floor) = scene_with_floor(0.0);
    let body = scene
        .create_polygon_body(rect(Vec2::new(-3.0, 0.5), 1.0, 1.0), Material::new(1.0, 0.0, 0.5, 0.3))
        .unwrap();
    for _ in 0..30 {
        scene.step(DT);
    }
    scene.set_velocity(body, Vec2::new(3.0, 0.0)).unwrap();
    let start = scene.body(body).unwrap().position().x;

    let mut previous_vx = 3.0;
    for _ in 0..50 {
        scene.step(DT);
        let vx = scene.body(body).unwrap().velocity().x;
        assert!(vx <= previous_vx + 1e-9, "vx rose from {previous_vx} to {vx}");
        previous_vx = vx;
    }
    for _ in 50..120 {
        scene.step(DT);
    }

    // v²/(2·μd·g) = 9 / 6
    let stopped_at = scene.body(body).unwrap().position().x;
    assert!((stopped_at - start - 1.5).abs() < 0.2, "slid {}", stopped_at - start);
    for _ in 120..600 {
        scene.step(DT);
        let b = scene.body(body).unwrap();
        assert!(b.velocity().x.abs() < 0.2, "vx = {}", b.velocity().x);
        assert!((b.position().x - stopped_at).abs() < 0.1, "x = {}", b.position().x);
    }
}

#[test]
fn strong_dynamic_friction_only_slows_the_slide() {
    let slippery_start = Material::new(1.0, 0.0, 0.1, 1.0);
    let mut scene = Scene::new(SceneConfig::y_up());
    scene.set_gravity(Vec2::new(0.0, -10.0));
    let floor = scene
        .create_polygon_body(rect(Vec2::new(0.0, -0.5), 20.0, 1.0), slippery_start)
        .unwrap();
    scene.set_body_fixed(floor, true).unwrap();
    let body = scene
        .create_polygon_body(rect(Vec2::new(0.0, 0.45), 1.0, 1.0), slippery_start)
        .unwrap();
    scene.set_velocity(body, Vec2::new(0.5, -3.0)).unwrap();

    scene.step(DT);
    assert!(!scene.last_contacts().is_empty());
    let vx = scene.body(body).unwrap().velocity().x;
    assert!((0.0..=0.5).contains(&vx), "vx = {vx}");
}

#[test]
fn bounce_reverses_velocity_with_restitution_ratio() {
    let (mut scene, _floor) = scene_with_floor(1.0);
    // Bottom edge 10 above the floor.
    let body = scene
        .create_polygon_body(rect(Vec2::new(0.0, 10.5), 1.0, 1.0), Material::new(1.0, 0.5, 0.0, 0.0))
        .unwrap();

    let mut before = 0.0;
    let mut after = None;
    for _ in 0..600 {
        before = scene.body(body).unwrap().velocity().y;
        scene.step(DT);
        let vy = scene.body(body).unwrap().velocity().y;
        if vy > 0.0 {
            after = Some(vy);
            break;
        }
    }

    let after = after.expect("box never bounced");
    assert!(before < -10.0);
    let ratio = after / before.abs();
    assert!((ratio - 0.5).abs() < 0.05, "ratio = {ratio}");
}

#[test]
fn bounce_peaks_decay() {
    let (mut scene, _floor) = scene_with_floor(1.0);
    let body = scene
        .create_polygon_body(rect(Vec2::new(0.0, 5.5), 1.0, 1.0), Material::new(1.0, 0.6, 0.0, 0.0))
        .unwrap();

    let mut peaks = Vec::new();
    let mut previous_vy = 0.0;
    for _ in 0..600 {
        scene.step(DT);
        let b = scene.body(body).unwrap();
        if previous_vy > 0.0 && b.velocity().y <= 0.0 {
            peaks.push(b.position().y);
        }
        previous_vy = b.velocity().y;
    }

    // Later peaks sit in the jitter of a resting contact; the first bounces are clear.
    assert!(peaks.len() >= 3, "peaks = {peaks:?}");
    assert!(peaks[0] < 5.5 && peaks[0] > 1.0, "peaks = {peaks:?}");
    assert!(peaks[..3].windows(2).all(|w| w[1] < w[0]), "peaks = {peaks:?}");
}

#[test]
fn collision_conserves_momentum_between_free_bodies() {
    let mut scene = Scene::new(SceneConfig::y_up());
    scene.set_gravity(Vec2::ZERO);
    let a = scene
        .create_polygon_body(rect(Vec2::new(-2.0, 0.0), 1.0, 1.0), Material::new(1.0, 0.8, 0.4, 0.2))
        .unwrap();
    let b = scene
        .create_polygon_body(rect(Vec2::new(2.0, 0.2), 1.0, 1.0), Material::new(2.0, 0.8, 0.4, 0.2))
        .unwrap();
    scene.set_velocity(a, Vec2::new(3.0, 0.0)).unwrap();
    scene.set_velocity(b, Vec2::new(-3.0, 0.0)).unwrap();

    let momentum = |scene: &Scene| scene.bodies().fold(Vec2::ZERO, |acc, (_, body)| acc + body.momentum());
    let initial = momentum(&scene);

    let mut collided = false;
    for _ in 0..90 {
        scene.step(DT);
        collided |= !scene.last_contacts().is_empty();
        assert!((momentum(&scene) - initial).magnitude() < 1e-9);
    }
    assert!(collided);
    assert!(scene.body(a).unwrap().velocity().x < 0.0);
    assert!(scene.body(b).unwrap().velocity().x > -3.0);
}

#[test]
fn two_box_stack_stays_upright() {
    let (mut scene, _floor) = scene_with_floor(0.0);
    let material = Material::new(1.0, 0.0, 0.5, 0.3);
    let bottom = scene
        .create_polygon_body(rect(Vec2::new(0.0, 0.55), 1.0, 1.0), material)
        .unwrap();
    // Wider than the bottom box so no edges coincide.
    let top = scene
        .create_polygon_body(rect(Vec2::new(0.0, 1.4), 1.6, 0.5), material)
        .unwrap();

    for _ in 0..240 {
        scene.step(DT);
    }

    let (b, t) = (scene.body(bottom).unwrap(), scene.body(top).unwrap());
    assert!((b.position().y - 0.5).abs() < 0.05, "bottom y = {}", b.position().y);
    assert!((t.position().y - 1.25).abs() < 0.07, "top y = {}", t.position().y);
    assert!(b.angle().abs() < 1e-6 && t.angle().abs() < 1e-6);
    assert!(b.position().x.abs() < 1e-6 && t.position().x.abs() < 1e-6);
}

#[test]
fn screen_coordinates_fall_toward_positive_y() {
    let mut scene = Scene::default();
    let floor = scene.create_default_body(rect(Vec2::new(0.0, 10.5), 20.0, 1.0)).unwrap();
    scene.set_body_fixed(floor, true).unwrap();
    let body = scene
        .create_polygon_body(rect(Vec2::new(0.0, 8.0), 1.0, 1.0), Material::new(1.0, 0.0, 0.5, 0.3))
        .unwrap();

    for _ in 0..300 {
        scene.step(DT);
    }
    let y = scene.body(body).unwrap().position().y;
    assert!((y - 9.5).abs() < 0.02, "y = {y}");
}

#[test]
fn removing_the_floor_lets_the_box_fall() {
    let (mut scene, floor) = scene_with_floor(0.0);
    let body = scene
        .create_polygon_body(rect(Vec2::new(0.0, 0.55), 1.0, 1.0), Material::new(1.0, 0.0, 0.5, 0.3))
        .unwrap();
    for _ in 0..60 {
        scene.step(DT);
    }
    assert!(!scene.last_contacts().is_empty());

    scene.remove_body(floor).unwrap();
    assert!(scene.last_contacts().iter().all(|c| !c.involves(floor)));
    for _ in 0..30 {
        scene.step(DT);
    }
    assert!(scene.last_contacts().is_empty());
    assert!(scene.body(body).unwrap().velocity().y < -4.0);
}

#[test]
fn snapshot_survives_json_round_trip() {
    let mut scene = Scene::default();
    let body = scene
        .create_polygon_body(
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(3.0, 0.0),
                Vec2::new(3.0, 1.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(1.0, 3.0),
                Vec2::new(0.0, 3.0),
            ],
            Material::new(2.5, 0.3, 0.6, 0.4),
        )
        .unwrap();
    scene.set_angle(body, 1.2).unwrap();
    scene.set_velocity(body, Vec2::new(-1.0, 4.0)).unwrap();

    let snapshot = scene.snapshot(body).unwrap();
    let json = serde_json::to_string(&snapshot).unwrap();
    let decoded: BodySnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, snapshot);

    let mut other = Scene::default();
    let restored = other.restore(&decoded).unwrap();
    let b = other.body(restored).unwrap();
    let original = scene.body(body).unwrap();
    assert!((b.position() - original.position()).magnitude() < 1e-9);
    assert!((b.mass() - original.mass()).abs() < 1e-9);
    assert!((b.angle() - 1.2).abs() < 1e-12);
    assert_eq!(b.polygon().len(), 6);
}

#[test]
fn listener_reports_final_position_each_tick() {
    let (mut scene, _floor) = scene_with_floor(0.0);
    let body = scene.create_default_body(rect(Vec2::new(0.0, 3.0), 1.0, 1.0)).unwrap();

    let reports = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let sink = reports.clone();
    scene
        .set_movement_listener(body, move |position, _angle| sink.borrow_mut().push(position))
        .unwrap();

    for _ in 0..10 {
        scene.step(DT);
    }
    let reports = reports.borrow();
    assert_eq!(reports.len(), 10);
    assert_eq!(*reports.last().unwrap(), scene.body(body).unwrap().position());
}
