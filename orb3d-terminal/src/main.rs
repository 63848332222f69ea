/// ORB3D Terminal Demo - Orbiting Camera
///
/// Spins a cube about the y axis while the camera orbits it on a tilted
/// circle, rendered as ASCII in the terminal. Press Q or ESC to quit.
use orb3d_core::Mesh;
use orb3d_terminal::OrbitApp;
use std::io;

fn main() -> io::Result<()> {
    env_logger::init();

    let cube = Mesh::cube(2.0);
    log::info!(
        "created cube mesh: {} vertices, {} triangles",
        cube.vertex_count(),
        cube.triangle_count()
    );

    let mut app = OrbitApp::new(cube)?;
    app.run()?;

    log::info!("rendered {} frames", app.total_frames());
    Ok(())
}
