/// Terminal-based orbit demo for the orb3d math kernel
///
/// Renders a spinning cube while the camera orbits it on a tilted circle.
/// Controls:
///   - Q / ESC: Quit
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use orb3d_core::{Camera, Mat4, Mesh, Vec3};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Distance of the camera from the cube center.
const ORBIT_DISTANCE: f32 = 7.0;
/// Height of the orbit above the cube.
const ORBIT_HEIGHT: f32 = 3.0;
/// Tilt of the orbit circle in radians.
const ORBIT_TILT: f32 = 30.0 * std::f32::consts::PI / 180.0;
/// Camera angular speed in radians per second (45 degrees/s).
const CAMERA_SPEED: f32 = 45.0 * std::f32::consts::PI / 180.0;
/// Cube spin speed in radians per second (90 degrees/s).
const CUBE_SPEED: f32 = 90.0 * std::f32::consts::PI / 180.0;

/// Main application struct for the orbiting-camera demo
pub struct OrbitApp {
    mesh: Mesh,
    camera: Camera,
    renderer: AsciiRenderer,
    running: bool,
    started: Instant,
    last_frame: Instant,
    frame_count: u32,
    total_frames: u64,
    fps: f32,
}

impl OrbitApp {
    pub fn new(mesh: Mesh) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        let mut camera = Camera::new(
            Vec3::new(ORBIT_DISTANCE, ORBIT_HEIGHT, 0.0),
            Vec3::zero(),
            Vec3::up(),
        );
        camera.set_perspective(
            60.0 * std::f32::consts::PI / 180.0,
            width as f32 / height as f32,
            1.0,
            100.0,
        );

        Ok(Self {
            mesh,
            camera,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            running: true,
            started: Instant::now(),
            last_frame: Instant::now(),
            frame_count: 0,
            total_frames: 0,
            fps: 0.0,
        })
    }

    /// Total frames rendered since the app started.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // Update
            self.update();

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            self.total_frames += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn update(&mut self) {
        let t = self.started.elapsed().as_secs_f32();

        // Orbit on a tilted circle around the cube at half its spin rate
        let angle = t * CAMERA_SPEED;
        let position = Vec3::new(
            ORBIT_DISTANCE * angle.cos(),
            ORBIT_HEIGHT + ORBIT_DISTANCE * angle.sin() * ORBIT_TILT.sin(),
            ORBIT_DISTANCE * angle.sin() * ORBIT_TILT.cos(),
        );
        self.camera.set_position(position);
        self.camera.look_at(Vec3::zero());
    }

    fn render(&mut self) -> io::Result<()> {
        let t = self.started.elapsed().as_secs_f32();
        let model = Mat4::rotation_y(t * CUBE_SPEED);

        self.renderer.clear();
        self.renderer
            .render_mesh(&self.mesh, &model, &mut self.camera);

        // Coordinate axes through the origin
        for (from, to) in [
            (Vec3::new(-2.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0)),
            (Vec3::new(0.0, -2.0, 0.0), Vec3::new(0.0, 2.0, 0.0)),
            (Vec3::new(0.0, 0.0, -2.0), Vec3::new(0.0, 0.0, 2.0)),
        ] {
            self.renderer
                .render_line(&from, &to, &mut self.camera, '.');
        }

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "ORB3D Terminal Demo | FPS: {:.1} | Camera orbiting at half cube spin | Q=Quit",
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
