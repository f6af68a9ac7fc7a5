//! Face-culled meshing.
//!
//! A face is emitted only where a solid voxel meets empty space. Emptiness across a
//! chunk boundary is answered by the neighbouring chunk, found through the world.

use cgmath::Point3;
use log::{debug, info};

use crate::engine_state::voxels::{
    block::{block_side::BlockSide, is_solid},
    chunk::{Chunk, ChunkIndex},
    world::World,
};

use super::{face::Face, mesh::ChunkMesh, ChunkMeshResult};

/// Resolves whether a solid voxel exists at a local coordinate of `chunk`.
///
/// Coordinates outside the chunk are carried into whichever neighbour owns them,
/// stepping one chunk at a time along every axis that is out of range. A step that
/// finds no chunk in the world answers `false`: the edge of the generated world is
/// open air.
pub fn has_voxel(world: &World, chunk: &Chunk, x: i32, y: i32, z: i32) -> bool {
    let mut current = chunk;
    let mut local = Point3::new(x, y, z);

    loop {
        if ChunkIndex::in_bounds(local) {
            return is_solid(current.get_voxel_at(local));
        }

        let offset = ChunkIndex::boundary_offset(local);
        let position = current.position();
        // Nothing exists past the edge of the i32 grid.
        let (Some(gx), Some(gy), Some(gz)) = (
            position.x.checked_add(offset.x),
            position.y.checked_add(offset.y),
            position.z.checked_add(offset.z),
        ) else {
            return false;
        };
        current = match world.get_chunk(gx, gy, gz) {
            Some(neighbor) => neighbor,
            None => return false,
        };
        local = ChunkIndex::translate_into_neighbor(local, offset);
    }
}

/// Generates the face-culled mesh of one chunk.
///
/// Voxels are visited y, then z, then x; faces of each voxel in
/// [`BlockSide::all`] order. The output for an unchanged world is identical from call
/// to call.
pub fn generate_chunk_mesh(world: &World, chunk: &Chunk) -> ChunkMesh {
    let mut mesh = ChunkMesh::new();

    for (position, _code) in chunk.solid_blocks() {
        let local = Point3::new(position.x as i32, position.y as i32, position.z as i32);

        for side in BlockSide::all() {
            let neighbor = local + side.neighbor_offset();
            if !has_voxel(world, chunk, neighbor.x, neighbor.y, neighbor.z) {
                mesh.add_face(&Face::new(position.x, position.y, position.z, side));
            }
        }
    }

    debug!(
        "Meshed chunk {:?}: {} faces",
        chunk.position(),
        mesh.face_count()
    );
    mesh
}

/// Generates one independent mesh per chunk in the world.
///
/// Results are sorted by grid position so repeated builds line up.
pub fn create_meshes(world: &World) -> Vec<ChunkMeshResult> {
    let mut results: Vec<ChunkMeshResult> = world
        .chunks()
        .map(|chunk| ChunkMeshResult {
            grid_position: chunk.position(),
            mesh: generate_chunk_mesh(world, chunk),
        })
        .collect();
    results.sort_by_key(|result| {
        let Point3 { x, y, z } = result.grid_position;
        (x, y, z)
    });

    let total_vertices: usize = results.iter().map(|r| r.mesh.vertex_count()).sum();
    let total_indices: usize = results.iter().map(|r| r.mesh.indices.len()).sum();
    info!(
        "Built {} chunk meshes ({} vertices, {} indices)",
        results.len(),
        total_vertices,
        total_indices
    );

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::chunk::{ChunkIndex, CHUNK_SIZE};

    fn chunk_with(position: Point3<i32>, solids: &[(usize, usize, usize)]) -> Chunk {
        let mut voxels = vec![0; CHUNK_SIZE];
        for &(x, y, z) in solids {
            voxels[ChunkIndex::to_index(x, y, z)] = 1;
        }
        Chunk::from_voxels(position, voxels).unwrap()
    }

    fn cube(origin: (usize, usize, usize), size: usize) -> Vec<(usize, usize, usize)> {
        let mut solids = Vec::new();
        for x in 0..size {
            for y in 0..size {
                for z in 0..size {
                    solids.push((origin.0 + x, origin.1 + y, origin.2 + z));
                }
            }
        }
        solids
    }

    fn single_chunk_world(chunk: Chunk) -> World {
        let mut world = World::new();
        world.add_chunk(chunk);
        world
    }

    #[test]
    fn lookup_crosses_into_neighbour() {
        let mut world = World::new();
        world.add_chunk(chunk_with(Point3::new(0, 0, 0), &[(15, 3, 3)]));
        world.add_chunk(chunk_with(Point3::new(1, 0, 0), &[(0, 3, 3)]));
        let left = world.get_chunk(0, 0, 0).unwrap();
        let right = world.get_chunk(1, 0, 0).unwrap();

        assert!(has_voxel(&world, left, 16, 3, 3));
        assert!(has_voxel(&world, right, -1, 3, 3));
        assert!(!has_voxel(&world, left, 16, 4, 3));
        assert!(!has_voxel(&world, right, -1, 4, 3));
    }

    #[test]
    fn lookup_round_trips_across_shared_wall() {
        let mut checkerboard = vec![0; CHUNK_SIZE];
        for (index, code) in checkerboard.iter_mut().enumerate() {
            *code = (index % 3 == 0) as u8;
        }
        let mut world = World::new();
        world.add_chunk(Chunk::new(Point3::new(0, 0, 0)));
        world.add_chunk(Chunk::from_voxels(Point3::new(1, 0, 0), checkerboard).unwrap());
        let left = world.get_chunk(0, 0, 0).unwrap();
        let right = world.get_chunk(1, 0, 0).unwrap();

        for y in 0..16 {
            for z in 0..16 {
                assert_eq!(
                    has_voxel(&world, left, 16, y, z),
                    has_voxel(&world, right, 0, y, z)
                );
                assert_eq!(
                    has_voxel(&world, right, -1, y, z),
                    has_voxel(&world, left, 15, y, z)
                );
            }
        }
    }

    #[test]
    fn lookup_past_world_edge_is_empty() {
        let world = single_chunk_world(Chunk::solid(Point3::new(0, 0, 0), 1));
        let chunk = world.get_chunk(0, 0, 0).unwrap();

        assert!(has_voxel(&world, chunk, 0, 0, 0));
        assert!(!has_voxel(&world, chunk, -1, 0, 0));
        assert!(!has_voxel(&world, chunk, 0, 16, 0));
        assert!(!has_voxel(&world, chunk, 5, 5, 40));
    }

    #[test]
    fn lookup_stops_at_grid_limits() {
        let mut world = World::new();
        world.add_chunk(Chunk::solid(Point3::new(i32::MAX, 0, 0), 1));
        world.add_chunk(Chunk::solid(Point3::new(0, i32::MIN, i32::MAX), 1));
        let high = world.get_chunk(i32::MAX, 0, 0).unwrap();
        let low = world.get_chunk(0, i32::MIN, i32::MAX).unwrap();

        assert!(has_voxel(&world, high, 15, 0, 0));
        assert!(!has_voxel(&world, high, 16, 0, 0));
        assert!(!has_voxel(&world, low, 3, -1, 3));
        assert!(!has_voxel(&world, low, 3, 3, 16));
    }

    #[test]
    fn chunks_at_grid_limits_still_mesh() {
        let world = single_chunk_world(Chunk::solid(Point3::new(i32::MAX, i32::MIN, 0), 1));
        let meshes = create_meshes(&world);

        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].mesh.face_count(), 6 * 16 * 16);
    }

    #[test]
    fn lookup_follows_diagonal_neighbours() {
        let mut world = World::new();
        world.add_chunk(Chunk::empty(Point3::new(0, 0, 0)));
        world.add_chunk(chunk_with(Point3::new(1, 1, 0), &[(0, 0, 7)]));
        let origin = world.get_chunk(0, 0, 0).unwrap();

        assert!(has_voxel(&world, origin, 16, 16, 7));
        assert!(!has_voxel(&world, origin, 16, 16, 8));
        // (1, 0, 0) is missing, so a step only along x stops there.
        assert!(!has_voxel(&world, origin, 16, 0, 7));
    }

    #[test]
    fn lookup_spans_several_chunks() {
        let mut world = World::new();
        for x in 0..3 {
            world.add_chunk(Chunk::empty(Point3::new(x, 0, 0)));
        }
        world.add_chunk(chunk_with(Point3::new(2, 0, 0), &[(1, 0, 0)]));
        let origin = world.get_chunk(0, 0, 0).unwrap();

        assert!(has_voxel(&world, origin, 33, 0, 0));
        assert!(!has_voxel(&world, origin, 49, 0, 0));
    }

    #[test]
    fn single_voxel_emits_every_face() {
        let world = single_chunk_world(chunk_with(Point3::new(0, 0, 0), &[(3, 3, 3)]));
        let mesh = generate_chunk_mesh(&world, world.get_chunk(0, 0, 0).unwrap());

        assert_eq!(mesh.face_count(), 6);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert_eq!(mesh.normal(0), BlockSide::TOP.normal());
        assert_eq!(mesh.normal(20), BlockSide::FRONT.normal());
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn isolated_cube_emits_only_its_hull() {
        let world = single_chunk_world(chunk_with(Point3::new(0, 0, 0), &cube((4, 4, 4), 2)));
        let mesh = generate_chunk_mesh(&world, world.get_chunk(0, 0, 0).unwrap());

        assert_eq!(mesh.face_count(), 24);
    }

    #[test]
    fn enclosed_cube_emits_nothing() {
        // The 2x2x2 core of a 4x4x4 cube contributes no faces.
        let world = single_chunk_world(chunk_with(Point3::new(0, 0, 0), &cube((3, 3, 3), 4)));
        let mesh = generate_chunk_mesh(&world, world.get_chunk(0, 0, 0).unwrap());
        assert_eq!(mesh.face_count(), 6 * 16);

        for v in 0..mesh.vertex_count() {
            let corner = mesh.vertex(v);
            let on_hull = [corner.x, corner.y, corner.z]
                .iter()
                .any(|&c| c == 2.5 || c == 6.5);
            assert!(on_hull, "interior corner {:?}", corner);
        }
    }

    #[test]
    fn full_chunk_emits_its_boundary() {
        let world = single_chunk_world(Chunk::solid(Point3::new(0, 0, 0), 1));
        let mesh = generate_chunk_mesh(&world, world.get_chunk(0, 0, 0).unwrap());

        assert_eq!(mesh.face_count(), 6 * 16 * 16);
    }

    #[test]
    fn empty_chunk_has_empty_mesh() {
        let world = single_chunk_world(Chunk::empty(Point3::new(0, 0, 0)));
        let mesh = generate_chunk_mesh(&world, world.get_chunk(0, 0, 0).unwrap());

        assert!(mesh.is_empty());
        assert!(mesh.vertices.is_empty());
        assert!(mesh.normals.is_empty());
    }

    #[test]
    fn adjacent_chunks_cull_their_shared_wall() {
        let mut world = World::new();
        world.add_chunk(Chunk::solid(Point3::new(0, 0, 0), 1));
        world.add_chunk(Chunk::solid(Point3::new(1, 0, 0), 2));
        let mesh = generate_chunk_mesh(&world, world.get_chunk(0, 0, 0).unwrap());

        assert_eq!(mesh.face_count(), 5 * 16 * 16);
        let right = BlockSide::RIGHT.normal();
        assert!((0..mesh.vertex_count()).all(|v| mesh.normal(v) != right));
    }

    #[test]
    fn terrain_chunk_face_count() {
        let world = single_chunk_world(Chunk::new(Point3::new(0, 0, 0)));
        let mesh = generate_chunk_mesh(&world, world.get_chunk(0, 0, 0).unwrap());

        // Slab of 16x10x16: top, bottom, four sides of 16x10.
        let slab = 2 * 16 * 16 + 4 * 16 * 10;
        // The marker shows five faces and covers one face of the slab's top.
        assert_eq!(mesh.face_count(), slab + 5 - 1);
    }

    #[test]
    fn meshing_is_repeatable() {
        let world = World::generate(cgmath::Vector3::new(2, 1, 2));

        let first = create_meshes(&world);
        let second = create_meshes(&world);
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
        assert_eq!(first[0].grid_position, Point3::new(0, 0, 0));
        assert_eq!(first[3].grid_position, Point3::new(1, 0, 1));
    }

    #[test]
    fn empty_world_has_no_meshes() {
        assert!(create_meshes(&World::new()).is_empty());
    }
}
