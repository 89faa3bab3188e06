//! Decode a PLY file and print a JSON summary of the result.
//!
//! Run: `cargo run -p ply-decode --features cli --bin ply_inspect -- <model.ply>`
//!
//! Useful for checking an asset before bundling it with the viewer: the
//! decode runs with the same checks the viewer applies, and `--u16` confirms
//! the mesh fits a 16-bit index buffer.

use std::path::PathBuf;

use clap::Parser;
use ply_decode::{DecodedModel, MeshIndex, load_mesh_from_path};

#[derive(Parser, Debug)]
#[command(about = "Decode a PLY mesh and print a summary")]
struct Args {
    /// Path to the PLY file.
    path: PathBuf,

    /// Decode into a 16-bit index buffer instead of a 32-bit one.
    #[arg(long)]
    u16: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let summary = if args.u16 {
        summarize(&load_mesh_from_path::<u16>(&args.path)?)
    } else {
        summarize(&load_mesh_from_path::<u32>(&args.path)?)
    };

    tracing::info!("Decoded {}", args.path.display());
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn summarize<I: MeshIndex>(model: &DecodedModel<I>) -> serde_json::Value {
    let bounds = model.bounding_box().map(|b| {
        serde_json::json!({
            "min": [b.min.x, b.min.y, b.min.z],
            "max": [b.max.x, b.max.y, b.max.z],
            "radius": b.radius(),
        })
    });
    let max_index = model.index_buffer.iter().map(|i| i.to_u32()).max();

    serde_json::json!({
        "vertex_count": model.vertex_count(),
        "triangle_count": model.triangle_count,
        "index_bits": I::BITS,
        "max_index": max_index,
        "bounds": bounds,
        "first_positions": model.position_buffer.chunks_exact(3).take(5).collect::<Vec<_>>(),
        "first_indices": model.index_buffer.iter().take(15).map(|i| i.to_u32()).collect::<Vec<_>>(),
    })
}
