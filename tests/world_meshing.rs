use cgmath::{Deg, InnerSpace, Point3, Vector3};
use voxel_world::engine_state::{
    camera_state::camera::{Camera, CameraController, ViewMatrixState},
    rendering::meshing::{chunk_world_offset, create_meshes, has_voxel},
    voxels::{chunk::Chunk, world::World},
    PlayerAction,
};
use web_time::Duration;

/// Faces of one terrain chunk with no neighbours: the ten-layer slab plus the marker,
/// which hides one slab top face.
const LONE_TERRAIN_FACES: usize = 2 * 256 + 4 * 16 * 10 + 5 - 1;

fn assert_close(actual: Vector3<f32>, expected: Vector3<f32>) {
    assert!(
        (actual - expected).magnitude() < 1e-4,
        "expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn generated_world_has_one_chunk_per_grid_cell() {
    let world = World::generate(Vector3::new(3, 2, 1));
    assert_eq!(world.len(), 6);

    for x in 0..3 {
        for y in 0..2 {
            assert!(world.get_chunk(x, y, 0).is_some());
        }
    }
    assert!(world.get_chunk(3, 0, 0).is_none());
    assert!(world.get_chunk(0, 0, 1).is_none());
}

#[test]
fn terrain_layers_match_across_chunks() {
    let world = World::generate(Vector3::new(2, 1, 1));

    for chunk in world.chunks() {
        assert_eq!(chunk.get_voxel(0, 0, 0), 1);
        assert_eq!(chunk.get_voxel(7, 5, 7), 1);
        assert_eq!(chunk.get_voxel(7, 6, 7), 2);
        assert_eq!(chunk.get_voxel(7, 8, 7), 2);
        assert_eq!(chunk.get_voxel(7, 9, 7), 3);
        assert_eq!(chunk.get_voxel(4, 10, 5), 3);
        assert_eq!(chunk.get_voxel(5, 10, 4), 0);
        assert_eq!(chunk.get_voxel(0, 15, 0), 0);
    }
}

#[test]
fn neighbour_lookup_crosses_chunk_walls() {
    let world = World::generate(Vector3::new(2, 1, 1));
    let left = world.get_chunk(0, 0, 0).unwrap();
    let right = world.get_chunk(1, 0, 0).unwrap();

    // Step out of the left chunk into the solid bottom of the right one
    assert!(has_voxel(&world, left, 16, 0, 3));
    assert!(has_voxel(&world, right, -1, 9, 3));
    // Air above the slab on the other side
    assert!(!has_voxel(&world, left, 16, 12, 3));
    // Off the edge of the world
    assert!(!has_voxel(&world, right, 16, 0, 3));
    assert!(!has_voxel(&world, left, 0, -1, 0));
}

#[test]
fn lone_terrain_chunk_face_count() {
    let mut world = World::new();
    world.add_chunk(Chunk::new(Point3::new(0, 0, 0)));

    let meshes = create_meshes(&world);
    assert_eq!(meshes.len(), 1);

    let mesh = &meshes[0].mesh;
    assert_eq!(mesh.face_count(), LONE_TERRAIN_FACES);
    assert_eq!(mesh.vertex_count(), LONE_TERRAIN_FACES * 4);
    assert_eq!(mesh.indices.len(), LONE_TERRAIN_FACES * 6);
}

#[test]
fn shared_walls_are_culled_in_a_two_by_two_world() {
    let world = World::generate(Vector3::new(2, 1, 2));
    let meshes = create_meshes(&world);

    let positions: Vec<_> = meshes.iter().map(|result| result.grid_position).collect();
    assert_eq!(
        positions,
        vec![
            Point3::new(0, 0, 0),
            Point3::new(0, 0, 1),
            Point3::new(1, 0, 0),
            Point3::new(1, 0, 1),
        ]
    );

    // Every chunk touches exactly two others, each hiding one 16x10 wall
    for result in &meshes {
        assert_eq!(result.mesh.face_count(), LONE_TERRAIN_FACES - 2 * 160);
    }
}

#[test]
fn mesh_indices_stay_in_range() {
    let world = World::generate(Vector3::new(2, 1, 1));

    for result in create_meshes(&world) {
        let vertex_count = result.mesh.vertex_count() as u32;
        assert!(result.mesh.indices.iter().all(|&i| i < vertex_count));
        assert_eq!(result.mesh.normals.len(), result.mesh.vertices.len());
    }
}

#[test]
fn chunks_are_placed_at_half_their_dimension() {
    assert_close(chunk_world_offset(Point3::new(0, 0, 0)), Vector3::new(0.0, 0.0, 0.0));
    assert_close(chunk_world_offset(Point3::new(1, 0, 2)), Vector3::new(8.0, 0.0, 16.0));

    let world = World::generate(Vector3::new(2, 1, 1));
    let meshes = create_meshes(&world);
    assert_close(meshes[1].world_offset(), Vector3::new(8.0, 0.0, 0.0));
}

#[test]
fn camera_starts_looking_down_negative_z() {
    let mut camera = Camera::new();
    assert_eq!(camera.yaw(), Deg(-90.0));
    assert_eq!(camera.pitch(), Deg(0.0));
    assert_close(camera.direction(), Vector3::new(0.0, 0.0, -1.0));

    assert!(matches!(camera.view_matrix_state(), ViewMatrixState::Dirty));
    camera.view_matrix();
    assert!(matches!(camera.view_matrix_state(), ViewMatrixState::Clean(_)));

    camera.set_position_x(3.0);
    assert!(matches!(camera.view_matrix_state(), ViewMatrixState::Dirty));
}

#[test]
fn controller_moves_camera_forward() {
    let mut camera = Camera::new();
    let mut controller = CameraController::new(10.0, 90.0, 0.1);
    let actions = PlayerAction {
        move_forward: true,
        ..Default::default()
    };

    let dt = Duration::from_secs(1);
    controller.intake_actions(&actions, dt);
    controller.update_camera(&mut camera, dt);

    assert_close(
        camera.position() - Point3::new(0.0, 0.0, 0.0),
        Vector3::new(0.0, 0.0, -10.0),
    );
    assert!(!controller.has_updates());
}

#[test]
fn controller_clamps_pitch() {
    let mut camera = Camera::new();
    let mut controller = CameraController::new(10.0, 90.0, 0.1);
    let actions = PlayerAction {
        look_up: true,
        ..Default::default()
    };

    for _ in 0..3 {
        let dt = Duration::from_secs(1);
        controller.intake_actions(&actions, dt);
        controller.update_camera(&mut camera, dt);
    }

    assert_eq!(camera.pitch(), Deg(89.0));
}
