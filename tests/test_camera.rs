use battallica::camera::*;
use battallica::entities::GameObject;

const W: i32 = 800;
const H: i32 = 600;

fn follower(x: i32, y: i32, vx: i32, vy: i32) -> GameObject {
    let mut obj = GameObject::vacant(0);
    obj.alive = true;
    obj.x = x;
    obj.y = y;
    obj.vx = vx;
    obj.vy = vy;
    obj
}

// ── lead bands ────────────────────────────────────────────────────────────────

#[test]
fn bands_split_at_three_and_eight() {
    assert_eq!(LeadBand::classify(0), LeadBand::Neutral);
    assert_eq!(LeadBand::classify(3), LeadBand::Neutral);
    assert_eq!(LeadBand::classify(4), LeadBand::SlowPositive);
    assert_eq!(LeadBand::classify(8), LeadBand::SlowPositive);
    assert_eq!(LeadBand::classify(9), LeadBand::FastPositive);
    assert_eq!(LeadBand::classify(-3), LeadBand::Neutral);
    assert_eq!(LeadBand::classify(-4), LeadBand::SlowNegative);
    assert_eq!(LeadBand::classify(-8), LeadBand::SlowNegative);
    assert_eq!(LeadBand::classify(-9), LeadBand::FastNegative);
}

#[test]
fn fast_follower_leads_by_a_quarter() {
    assert_eq!(desired_position(1000, 10, W), 1000 - W / 4);
}

#[test]
fn moderate_follower_leads_by_a_third() {
    assert_eq!(desired_position(1000, 5, W), 1000 - W / 3);
}

#[test]
fn slow_follower_is_centred() {
    assert_eq!(desired_position(1000, 1, W), 1000 - W / 2);
}

#[test]
fn reverse_bands_mirror_forward_bands() {
    assert_eq!(desired_position(1000, -5, W), 1000 - 2 * W / 3);
    assert_eq!(desired_position(1000, -10, W), 1000 - 3 * W / 4);
}

// ── approach ──────────────────────────────────────────────────────────────────

#[test]
fn approach_is_hard_outside_dead_zone() {
    assert_eq!(approach_velocity(0, 50, 2), 2 + HARD_CORRECTION);
    assert_eq!(approach_velocity(50, 0, 2), 2 - HARD_CORRECTION);
}

#[test]
fn approach_is_gentle_inside_dead_zone() {
    assert_eq!(approach_velocity(0, 10, 2), 2 + SOFT_CORRECTION);
    assert_eq!(approach_velocity(0, 1, 2), 2 + SOFT_CORRECTION);
    assert_eq!(approach_velocity(10, 0, 2), 2 - SOFT_CORRECTION);
}

#[test]
fn approach_matches_follower_when_aligned() {
    assert_eq!(approach_velocity(7, 7, -4), -4);
}

// ── viewport ──────────────────────────────────────────────────────────────────

#[test]
fn centred_on_places_follower_mid_screen() {
    let obj = follower(1000, 900, 0, 0);
    let vp = Viewport::centered_on(&obj, W, H);
    assert_eq!((vp.x, vp.y), (600, 600));
    assert_eq!((vp.vx, vp.vy), (0, 0));
    assert_eq!(vp.follow, Some(obj.id()));
}

#[test]
fn stationary_follower_at_neutral_position_does_not_drift() {
    let obj = follower(1000, 1000, 0, 0);
    let mut vp = Viewport::centered_on(&obj, W, H);
    for _ in 0..10 {
        vp.update(&obj);
        assert_eq!((vp.vx, vp.vy), (0, 0));
        assert_eq!((vp.x, vp.y), (600, 700));
    }
}

#[test]
fn update_integrates_after_steering() {
    let obj = follower(1000, 1000, 10, 0);
    let mut vp = Viewport::centered_on(&obj, W, H);
    // desired x = 800, camera at 600: 200 behind
    vp.update(&obj);
    assert_eq!(vp.vx, 10 + HARD_CORRECTION);
    assert_eq!(vp.x, 600 + 13);
    assert_eq!(vp.vy, 0);
}

#[test]
fn camera_settles_on_moving_follower() {
    let mut obj = follower(0, 0, 5, 0);
    let mut vp = Viewport::centered_on(&obj, W, H);
    for _ in 0..500 {
        obj.x += obj.vx;
        vp.update(&obj);
    }
    let (dx, _) = vp.desired(&obj);
    assert!((vp.x - dx).abs() <= DEAD_ZONE, "camera {} desired {}", vp.x, dx);
}

#[test]
fn hold_stops_the_camera() {
    let obj = follower(0, 0, 0, 0);
    let mut vp = Viewport::centered_on(&obj, W, H);
    vp.vx = 4;
    vp.vy = -2;
    vp.hold();
    assert_eq!((vp.vx, vp.vy), (0, 0));
}

#[test]
fn containment_is_inclusive() {
    let vp = Viewport {
        x: 100,
        y: 200,
        vx: 0,
        vy: 0,
        width: W,
        height: H,
        follow: None,
    };
    assert!(vp.contains(100, 200));
    assert!(vp.contains(900, 800));
    assert!(!vp.contains(99, 200));
    assert!(!vp.contains(900, 801));
    assert_eq!(vp.to_screen(150, 250), (50, 50));
}
