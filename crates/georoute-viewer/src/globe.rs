//! The globe, its starfield backdrop and the route drawables on it.
//!
//! Route markers and the arc are spawned as children of [`GlobeRoot`] through
//! [`GlobeScene`], which implements the core's scene seam with entities as
//! handles. Despawning an entity drops its mesh and material handles, which
//! releases the GPU resources.

use bevy::asset::RenderAssetUsages;
use bevy::ecs::system::SystemParam;
use bevy::mesh::PrimitiveTopology;
use bevy::prelude::*;
use georoute::SceneGraph;
use glam::DVec3;
use rand::Rng;

use crate::launch_params::LaunchParams;

/// Radius of the marker spheres in globe units.
const MARKER_SPHERE_RADIUS: f32 = 0.02;
/// Number of stars in the backdrop.
const STAR_COUNT: usize = 4_500;
/// Stars are scattered in a shell between these radii.
const STAR_SHELL_MIN: f32 = 25.0;
const STAR_SHELL_MAX: f32 = 50.0;

/// Plugin for the globe scene.
pub struct GlobePlugin;

impl Plugin for GlobePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_globe, setup_starfield));
    }
}

/// Root entity of the globe; route drawables are parented to it.
#[derive(Component)]
pub struct GlobeRoot;

/// Tags a marker or arc spawned for the route.
#[derive(Component)]
pub struct RouteDrawable;

/// Convert a `0xRRGGBB` colour.
pub fn color_from_hex(hex: u32) -> Color {
    let [_, r, g, b] = hex.to_be_bytes();
    Color::srgb_u8(r, g, b)
}

#[allow(clippy::needless_pass_by_value)]
fn setup_globe(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    params: Res<LaunchParams>,
) {
    #[allow(clippy::cast_possible_truncation)]
    let radius = params.config.globe_radius as f32;

    commands.spawn((
        GlobeRoot,
        Mesh3d(meshes.add(Sphere::new(radius).mesh().uv(96, 48))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.08, 0.22, 0.45),
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::default(),
    ));

    // Key light from over the camera's shoulder.
    commands.spawn((
        DirectionalLight {
            color: Color::WHITE,
            illuminance: 8_000.0,
            ..default()
        },
        Transform::from_xyz(2.0, 3.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    tracing::info!("Globe ready (radius {radius})");
}

/// Random points on a spherical shell, each with a dim pastel colour.
fn star_points(count: usize, rng: &mut impl Rng) -> (Vec<[f32; 3]>, Vec<[f32; 4]>) {
    let mut positions = Vec::with_capacity(count);
    let mut colors = Vec::with_capacity(count);

    for _ in 0..count {
        let radius = rng.random_range(STAR_SHELL_MIN..STAR_SHELL_MAX);
        let theta = std::f32::consts::TAU * rng.random::<f32>();
        let phi = (2.0 * rng.random::<f32>() - 1.0).acos();

        positions.push([
            radius * phi.sin() * theta.cos(),
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
        ]);

        let color = Color::hsl(rng.random_range(0.0..360.0), 0.2, rng.random::<f32>());
        colors.push(color.to_linear().to_f32_array());
    }

    (positions, colors)
}

fn setup_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let (positions, colors) = star_points(STAR_COUNT, &mut rand::rng());

    let mut mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);

    commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            ..default()
        })),
        Transform::default(),
    ));
}

/// Scene access for the route planner.
#[derive(SystemParam)]
pub struct GlobeScene<'w, 's> {
    commands: Commands<'w, 's>,
    meshes: ResMut<'w, Assets<Mesh>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    root: Query<'w, 's, Entity, With<GlobeRoot>>,
}

impl GlobeScene<'_, '_> {
    fn unlit(&mut self, color: u32) -> Handle<StandardMaterial> {
        self.materials.add(StandardMaterial {
            base_color: color_from_hex(color),
            unlit: true,
            ..default()
        })
    }

    fn spawn_drawable(&mut self, bundle: impl Bundle) -> Entity {
        let mut entity = self.commands.spawn((RouteDrawable, bundle));
        if let Ok(root) = self.root.single() {
            entity.insert(ChildOf(root));
        }
        entity.id()
    }
}

impl SceneGraph for GlobeScene<'_, '_> {
    type Handle = Entity;

    fn add_marker(&mut self, position: DVec3, color: u32) -> Entity {
        let mesh = self.meshes.add(Sphere::new(MARKER_SPHERE_RADIUS));
        let material = self.unlit(color);
        self.spawn_drawable((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_translation(position.as_vec3()),
        ))
    }

    fn add_polyline(&mut self, points: &[DVec3], color: u32) -> Entity {
        let positions: Vec<[f32; 3]> = points.iter().map(|p| p.as_vec3().to_array()).collect();
        let mut mesh = Mesh::new(PrimitiveTopology::LineStrip, RenderAssetUsages::default());
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);

        let mesh = self.meshes.add(mesh);
        let material = self.unlit(color);
        self.spawn_drawable((Mesh3d(mesh), MeshMaterial3d(material), Transform::default()))
    }

    fn remove(&mut self, handle: Entity) {
        self.commands.entity(handle).despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        let color = color_from_hex(0x44_ff_88).to_srgba();
        assert!((color.red - f32::from(0x44_u8) / 255.0).abs() < 1e-6);
        assert!((color.green - 1.0).abs() < 1e-6);
        assert!((color.blue - f32::from(0x88_u8) / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_star_points_lie_in_shell() {
        let (positions, colors) = star_points(200, &mut rand::rng());
        assert_eq!(positions.len(), 200);
        assert_eq!(colors.len(), 200);
        for p in positions {
            let r = Vec3::from_array(p).length();
            assert!((STAR_SHELL_MIN - 1e-3..STAR_SHELL_MAX + 1e-3).contains(&r));
        }
    }
}
