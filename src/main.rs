//! SDL2 desktop shell around the raster scene

use rasterpad::config::{Config, DEFAULT_CONFIG_PATH};
use rasterpad::display::{make_palette, Color, Display, InputEvent, Key, RenderTarget};
use rasterpad::geometry::Point;
use rasterpad::mqtt::MqttClient;
use rasterpad::scene::{PrimitiveKind, Scene};
use rasterpad::transform::Direction;
use sdl2::keyboard::Keycode;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const DEFAULT_OUTPUT: &str = "rasterpad.png";
const TANGENT_LENGTH_STEP: f64 = 10.0;
const TANGENT_ANGLE_STEP: f64 = 15.0;
const PALETTE_SIZE: usize = 12;

struct Args {
    config: PathBuf,
    width: Option<u32>,
    height: Option<u32>,
    image: Option<PathBuf>,
    output: PathBuf,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        config: PathBuf::from(DEFAULT_CONFIG_PATH),
        width: None,
        height: None,
        image: None,
        output: PathBuf::from(DEFAULT_OUTPUT),
    };

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match (args[i].as_str(), value) {
            ("--config" | "-c", Some(v)) => {
                parsed.config = PathBuf::from(v);
                i += 1;
            },
            ("--width" | "-w", Some(v)) => {
                parsed.width = v.parse().ok();
                i += 1;
            },
            ("--height" | "-h", Some(v)) => {
                parsed.height = v.parse().ok();
                i += 1;
            },
            ("--image" | "-i", Some(v)) => {
                parsed.image = Some(PathBuf::from(v));
                i += 1;
            },
            ("--output" | "-o", Some(v)) => {
                parsed.output = PathBuf::from(v);
                i += 1;
            },
            ("--help", _) => {
                println!("Usage: rasterpad [OPTIONS]");
                println!();
                println!("Options:");
                println!(
                    "  --config PATH, -c PATH   Config file (default: {})",
                    DEFAULT_CONFIG_PATH
                );
                println!("  --width W, -w W          Canvas width");
                println!("  --height H, -h H         Canvas height");
                println!("  --image PATH, -i PATH    Open an image as the canvas");
                println!("  --output PATH, -o PATH   Save target (default: {})", DEFAULT_OUTPUT);
                println!("  --help                   Show this help message");
                std::process::exit(0);
            },
            (other, _) => tracing::warn!(arg = other, "ignoring argument"),
        }
        i += 1;
    }

    parsed
}

fn load_image(scene: &mut Scene, path: &Path) -> Result<(), String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {}", path.display(), e))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    scene.load_image(width, height, img.as_raw()).map_err(|e| e.to_string())
}

fn save_image(scene: &Scene, path: &Path) -> Result<(), String> {
    let img = image::RgbaImage::from_raw(scene.width(), scene.height(), scene.to_rgba())
        .ok_or_else(|| "frame size does not match its pixel data".to_string())?;
    img.save(path)
        .map_err(|e| format!("Failed to save {}: {}", path.display(), e))
}

/// Keyboard-driven state that lives outside the scene
struct Shell {
    config: Config,
    args: Args,
    palette: Vec<Color>,
    palette_index: usize,
    reflect_edge: usize,
    anchor: usize,
}

enum KeyOutcome {
    Continue,
    Quit,
}

impl Shell {
    fn handle_key(&mut self, scene: &mut Scene, key: Key) -> Result<KeyOutcome, String> {
        let kind = match key.code {
            Keycode::Num1 => Some(PrimitiveKind::Line),
            Keycode::Num2 => Some(PrimitiveKind::Polygon),
            Keycode::Num3 => Some(PrimitiveKind::Circle),
            Keycode::Num4 => Some(PrimitiveKind::Hermite),
            Keycode::Num5 => Some(PrimitiveKind::Bezier),
            Keycode::Num6 => Some(PrimitiveKind::Coons),
            _ => None,
        };
        if let Some(kind) = kind {
            scene.arm(kind);
            tracing::info!(%kind, "tool");
            return Ok(KeyOutcome::Continue);
        }

        let step = self.config.rotate_step;
        let result = match key.code {
            Keycode::Escape => {
                if scene.armed().is_none() {
                    return Ok(KeyOutcome::Quit);
                }
                scene.disarm();
                Ok(())
            },
            Keycode::A => {
                let algorithm = scene.style().algorithm.toggled();
                scene.set_algorithm(algorithm);
                tracing::info!(%algorithm, "line algorithm");
                Ok(())
            },
            Keycode::C => {
                self.palette_index = (self.palette_index + 1) % self.palette.len();
                let color = self.palette[self.palette_index];
                scene.set_color(color);
                tracing::info!(%color, "color");
                Ok(())
            },
            Keycode::R if key.shift => scene.apply_rotate(step, Direction::Clockwise),
            Keycode::R => scene.apply_rotate(step, Direction::CounterClockwise),
            Keycode::Plus | Keycode::Equals | Keycode::KpPlus => {
                scene.apply_scale(self.config.scale_step, self.config.scale_step)
            },
            Keycode::Minus | Keycode::KpMinus => {
                let s = 1.0 / self.config.scale_step;
                scene.apply_scale(s, s)
            },
            Keycode::H => scene.apply_shear(self.config.shear_factor),
            Keycode::M => {
                let edge = self.reflect_edge;
                self.reflect_edge += 1;
                scene.apply_reflect(edge)
            },
            Keycode::LeftBracket => {
                self.anchor = self.anchor.saturating_sub(1);
                tracing::info!(anchor = self.anchor, "hermite anchor");
                Ok(())
            },
            Keycode::RightBracket => {
                let last = scene.hermite_anchor_count().saturating_sub(1);
                self.anchor = (self.anchor + 1).min(last);
                tracing::info!(anchor = self.anchor, "hermite anchor");
                Ok(())
            },
            Keycode::Up => self.edit_tangent(scene, TANGENT_LENGTH_STEP, 0.0),
            Keycode::Down => self.edit_tangent(scene, -TANGENT_LENGTH_STEP, 0.0),
            Keycode::Left => self.edit_tangent(scene, 0.0, -TANGENT_ANGLE_STEP),
            Keycode::Right => self.edit_tangent(scene, 0.0, TANGENT_ANGLE_STEP),
            Keycode::Delete | Keycode::Backspace => {
                scene.clear_all();
                self.reflect_edge = 0;
                self.anchor = 0;
                Ok(())
            },
            Keycode::S => {
                return save_image(scene, &self.args.output).map(|()| {
                    tracing::info!(path = %self.args.output.display(), "saved");
                    KeyOutcome::Continue
                });
            },
            Keycode::P => {
                let style = scene.style();
                self.config.color = style.color;
                self.config.algorithm = style.algorithm;
                self.config.width = scene.width();
                self.config.height = scene.height();
                let path = &self.args.config;
                return self.config.save(path).map_err(|e| e.to_string()).map(|()| {
                    tracing::info!(path = %path.display(), "settings saved");
                    KeyOutcome::Continue
                });
            },
            Keycode::L => {
                if let Some(path) = &self.args.image {
                    load_image(scene, path)?;
                }
                return Ok(KeyOutcome::Continue);
            },
            _ => Ok(()),
        };
        result.map(|()| KeyOutcome::Continue).map_err(|e| e.to_string())
    }

    /// Change the selected Hermite tangent by length and direction
    fn edit_tangent(
        &self,
        scene: &mut Scene,
        d_length: f64,
        d_degrees: f64,
    ) -> rasterpad::Result<()> {
        let Some(anchor) = scene.hermite_anchor(self.anchor) else {
            tracing::warn!(anchor = self.anchor, "no hermite anchor selected");
            return Ok(());
        };
        let (x, y) = anchor.tangent.as_f64();
        let length = (x.hypot(y) + d_length).max(0.0);
        let degrees = y.atan2(x).to_degrees() + d_degrees;
        scene.set_hermite_tangent(self.anchor, Point::from_polar(length, degrees))
    }
}

fn main() -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = parse_args();
    let mut config = Config::load(&args.config).map_err(|e| e.to_string())?;
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }

    let mut scene = Scene::from_config(&config).map_err(|e| e.to_string())?;
    if let Some(path) = &args.image {
        if let Err(e) = load_image(&mut scene, path) {
            tracing::error!(error = %e, "image not loaded");
        }
    }

    let (mut display, texture_creator) = Display::new("rasterpad", scene.width(), scene.height())?;
    let mut target = RenderTarget::with_size(&texture_creator, scene.width(), scene.height())?;

    let mqtt = config.mqtt.as_ref().and_then(|mqtt| match MqttClient::connect(mqtt) {
        Ok(client) => Some(client),
        Err(e) => {
            tracing::error!(error = %e, "MQTT disabled");
            None
        },
    });

    let palette = make_palette(PALETTE_SIZE);
    let mut shell = Shell {
        config,
        args,
        palette,
        palette_index: 0,
        reflect_edge: 0,
        anchor: 0,
    };

    tracing::info!(width = scene.width(), height = scene.height(), "rasterpad ready");
    println!("Controls:");
    println!("  1-6        - Line, polygon, circle, Hermite, Bezier, Coons tool");
    println!("  Left click - Place point (drag without a tool to move everything)");
    println!("  Right click- Finish polygon / curve");
    println!("  Wheel      - Scale");
    println!("  A          - Toggle DDA / Bresenham");
    println!("  C          - Next color");
    println!("  R / Shift+R- Rotate counter-clockwise / clockwise");
    println!("  + / -      - Scale up / down");
    println!("  H          - Shear");
    println!("  M          - Reflect over next polygon edge");
    println!("  [ / ]      - Select Hermite anchor");
    println!("  Arrows     - Edit tangent length / direction");
    println!("  Delete     - Clear");
    println!("  S / L      - Save image / reload image");
    println!("  P          - Save color, algorithm and size to the config file");
    println!("  Escape     - Cancel tool, or quit");

    'main: loop {
        for event in display.poll_events() {
            let result = match event {
                InputEvent::Quit => break 'main,
                InputEvent::KeyDown(key) => match shell.handle_key(&mut scene, key) {
                    Ok(KeyOutcome::Quit) => break 'main,
                    Ok(KeyOutcome::Continue) => Ok(()),
                    Err(e) => Err(e),
                },
                InputEvent::Pointer(pointer) => {
                    scene.handle_event(&pointer).map_err(|e| e.to_string())
                },
            };
            if let Err(e) = result {
                tracing::error!(error = %e, "command failed");
            }
        }

        if let Some(mqtt) = &mqtt {
            for command in mqtt.poll() {
                if let Err(e) = scene.execute(&command) {
                    tracing::error!(error = %e, ?command, "remote command failed");
                }
            }
        }

        if (display.width(), display.height()) != (scene.width(), scene.height()) {
            display.resize(scene.width(), scene.height())?;
            target = RenderTarget::with_size(&texture_creator, scene.width(), scene.height())?;
        }

        display.present(&mut target, scene.buffer())?;
    }

    Ok(())
}
