use approx::assert_abs_diff_eq;
use mirrorcast::{
    algebra::{Ray, Vec3},
    color::BLACK,
    config,
    plane::Plane,
    renderer,
    scene::DEFAULT_BACKGROUND,
    sphere::Sphere,
    Scene,
};

const YELLOW: Vec3 = Vec3(255.0, 255.0, 0.0);

const SINGLE_SPHERE: &str = r#"{
    "camera": { "focus": [30, 0, 0], "fov": 90, "rotation": [0, 0, 0], "zoom": 6 },
    "render": { "width": 21, "height": 21, "depth": 1 },
    "light": [-50, 30, 5],
    "background": [255, 0, 255],
    "objects": [
        { "sphere": { "name": "ball", "center": [0, 0, 0], "radius": 5 } }
    ]
}"#;

#[test]
fn single_sphere_fills_the_centre_and_leaves_corners_empty() {
    let (camera, scene, settings) = config::parse(SINGLE_SPHERE).unwrap().build().unwrap();
    let (img, _) = renderer::render(&camera, &scene, &settings, true).unwrap();

    let bg = [255, 0, 255];
    assert_ne!(img.get_pixel(10, 10).0, bg);
    for (x, y) in [(0, 0), (20, 0), (0, 20), (20, 20)] {
        assert_eq!(img.get_pixel(x, y).0, bg, "corner ({x}, {y})");
    }
}

#[test]
fn reflective_sphere_splits_intensity_between_direct_and_mirror() {
    let camera = mirrorcast::Camera::new(&[30.0, 0.0, 0.0], 90.0, 20, 20, &[0.0; 3], 6.0).unwrap();
    let mut scene = Scene::new(Vec3(-50.0, 0.0, 0.0));
    scene.push(Sphere::new(Vec3::ZERO, 5.0, YELLOW, 0.2).unwrap());

    let ray = camera.primary_ray(camera.world_point(10, 10, 20, 20));
    let (point, surface) = scene.find_nearest_hit(&ray).unwrap();
    let direct = scene.shade(point, surface, 0.8, None);
    let traced = scene.trace(&ray, 1.0, 1).unwrap();

    // the mirror ray leaves the scene and brings back the background at 0.2
    assert_abs_diff_eq!(traced.intensity, direct.intensity + 0.2, epsilon = 1e-6);
    assert_abs_diff_eq!(traced.intensity, 1.0, epsilon = 1e-4);
    let expected = direct.tint.scale(direct.intensity).add(DEFAULT_BACKGROUND.scale(0.2));
    assert_abs_diff_eq!(traced.tint.0, expected.0, epsilon = 1e-2);
    assert_abs_diff_eq!(traced.tint.2, expected.2, epsilon = 1e-2);
}

#[test]
fn sphere_between_light_and_lit_face_blacks_it_out() {
    let mut scene = Scene::new(Vec3(0.0, 0.0, 50.0));
    scene.push(Sphere::new(Vec3::ZERO, 5.0, YELLOW, 0.0).unwrap());
    scene.push(Sphere::new(Vec3(0.0, 0.0, 20.0), 3.0, Vec3(0.0, 0.0, 255.0), 0.0).unwrap());

    let top = Vec3(0.0, 0.0, 5.0);
    let c = scene.shade(top, &scene.objects[0], 0.75, None);
    assert_eq!(c.intensity, 0.75);
    assert_eq!(c.tint, BLACK);

    // without the blocker the same point is lit head-on
    scene.objects.pop();
    let c = scene.shade(top, &scene.objects[0], 0.75, None);
    assert_abs_diff_eq!(c.intensity, 0.75, epsilon = 1e-6);
    assert_eq!(c.tint, YELLOW);
}

#[test]
fn checkerboard_alternates_one_cell_apart() {
    let dark = Vec3(10.0, 10.0, 10.0);
    let light = Vec3(200.0, 200.0, 200.0);
    let mut scene = Scene::new(Vec3(0.0, 0.0, 10.0));
    scene.push(Plane::new(Vec3::ZERO, Vec3::X, Vec3::Y, 1.0, (dark, light), 0.0).unwrap());

    let down = Vec3(0.0, 0.0, -1.0);
    let a = scene.trace(&Ray::new(Vec3(0.5, 0.5, 5.0), down), 1.0, 1).unwrap();
    let b = scene.trace(&Ray::new(Vec3(1.5, 0.5, 5.0), down), 1.0, 1).unwrap();
    assert_eq!(a.tint, dark);
    assert_eq!(b.tint, light);
}

#[test]
fn rendering_twice_gives_the_same_image() {
    let (camera, scene, settings) = config::parse(SINGLE_SPHERE).unwrap().build().unwrap();
    let (a, _) = renderer::render(&camera, &scene, &settings, true).unwrap();
    let (b, _) = renderer::render(&camera, &scene, &settings, true).unwrap();
    assert_eq!(a, b);
}

#[test]
fn sample_scene_file_builds() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/scenes/mirror_ball.json");
    let file = config::load(path).unwrap();
    let (_, scene, settings) = file.build().unwrap();
    assert_eq!(scene.objects.len(), 3);
    assert!(settings.depth >= 1);
}
