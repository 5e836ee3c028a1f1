//! Bulk edit demo — carves a basin into an in-memory grid, floods it,
//! and resurfaces the rim.
//!
//! Usage: cargo run --release --bin bulk_fill -- [OPTIONS]
//!
//! Options:
//!   --size <CELLS>     Ground plate side length (default: 64)
//!   --radius <CELLS>   Basin radius (default: 20)
//!   --depth <CELLS>    Basin / flood depth (default: 8)
//!   --ceiling <N>      Abort after N mutations (default: unlimited)

use std::time::Instant;

use voxedit::arrange::{PlacementPriority, ReorderConfig};
use voxedit::core::logging;
use voxedit::core::types::{Column, Position};
use voxedit::grid::{MemoryGrid, VoxelType, VoxelValue};
use voxedit::session::{EditSession, SessionConfig};

const STONE: VoxelType = VoxelType(1);
const WATER: VoxelType = VoxelType(2);
const SAND: VoxelType = VoxelType(3);

fn main() {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let size = parse_i32_arg(&args, "--size").unwrap_or(64);
    let radius = parse_u32_arg(&args, "--radius").unwrap_or(20);
    let depth = parse_u32_arg(&args, "--depth").unwrap_or(8);
    let ceiling = parse_usize_arg(&args, "--ceiling");

    println!("=== Voxedit Bulk Fill Demo ===");
    println!("Plate:   {size} x {size}");
    println!("Basin:   radius {radius}, depth {depth}");
    match ceiling {
        Some(n) => println!("Ceiling: {n} mutations"),
        None => println!("Ceiling: unlimited"),
    }
    println!();

    // Solid stone plate, surface at y = 0
    let mut grid = match ceiling {
        Some(n) => MemoryGrid::with_ceiling(n),
        None => MemoryGrid::new(),
    };
    let start = Instant::now();
    for x in 0..size {
        for z in 0..size {
            for y in -(depth as i32 + 2)..=0 {
                grid.seed(Position::new(x, y, z), VoxelValue::new(STONE));
            }
        }
    }
    println!("Seeded {} cells in {:.2?}", grid.len(), start.elapsed());

    let reorder = ReorderConfig::new().with_priority(WATER, PlacementPriority::Physics);
    let mut session = EditSession::new(grid, SessionConfig::default(), &reorder);
    let center = Position::new(size / 2, 0, size / 2);

    // Carve the basin: connected stone within the radius sphere-ish bowl
    let start = Instant::now();
    let mut carved = 0;
    for y in (-(depth as i32) + 1..=0).rev() {
        let shrink = (-y) as u32;
        carved += carve_ring(&mut session, center, y, radius.saturating_sub(shrink));
    }
    println!("Carved {} cells in {:.2?}", carved, start.elapsed());

    // Flood it from the rim
    let start = Instant::now();
    let filled = session
        .fill_down(center, &VoxelValue::new(WATER), radius, depth)
        .unwrap_or_else(|e| fatal(&e));
    println!("Flooded {} cells in {:.2?}", filled, start.elapsed());

    // Resurface the exposed stone around the waterline
    let start = Instant::now();
    let columns = (0..size).flat_map(|x| (0..size).map(move |z| Column::new(x, z)));
    let layers = [VoxelValue::new(SAND), VoxelValue::new(SAND)];
    let surfaced = session
        .overlay_layers(columns, -(depth as i32), 1, &[STONE], &layers)
        .unwrap_or_else(|e| fatal(&e));
    println!("Resurfaced {} cells in {:.2?}", surfaced, start.elapsed());

    let grid = session.into_grid().unwrap_or_else(|e| fatal(&e));
    println!();
    println!("Final grid: {} cells, {} mutations applied", grid.len(), grid.mutation_count());
}

/// Clear one horizontal disc of the basin, returning cells cleared.
fn carve_ring(
    session: &mut EditSession<MemoryGrid>,
    center: Position,
    y: i32,
    radius: u32,
) -> usize {
    let r = radius as i32;
    let radius_sq = (r as i64) * (r as i64);
    let mut cleared = 0;
    for dx in -r..=r {
        for dz in -r..=r {
            if (dx as i64) * (dx as i64) + (dz as i64) * (dz as i64) > radius_sq {
                continue;
            }
            let pos = Position::new(center.x + dx, y, center.z + dz);
            match session.set_voxel(pos, VoxelValue::empty()) {
                Ok(true) => cleared += 1,
                Ok(false) => {}
                Err(e) => fatal(&e),
            }
        }
    }
    if let Err(e) = session.flush() {
        fatal(&e);
    }
    cleared
}

fn fatal(err: &voxedit::core::Error) -> ! {
    log::error!("edit aborted: {err}");
    std::process::exit(1);
}

fn parse_i32_arg(args: &[String], flag: &str) -> Option<i32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_u32_arg(args: &[String], flag: &str) -> Option<u32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}
