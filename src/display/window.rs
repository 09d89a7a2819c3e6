//! SDL2 window presenting the scene buffer

use super::PixelBuffer;
use crate::input::{PointerButton, PointerEvent};
use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Mod};
use sdl2::mouse::MouseButton;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    width: u32,
    height: u32,
}

pub struct RenderTarget<'a> {
    texture: Texture<'a>,
    width: u32,
    height: u32,
}

/// Key press with the shift state at the time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    pub code: Keycode,
    pub shift: bool,
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    Pointer(PointerEvent),
}

impl Display {
    pub fn new(
        title: &str,
        width: u32,
        height: u32,
    ) -> Result<(Self, TextureCreator<WindowContext>), String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window
            .into_canvas()
            .accelerated()
            .present_vsync()
            .build()
            .map_err(|e| e.to_string())?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump()?;

        Ok((
            Self {
                canvas,
                event_pump,
                width,
                height,
            },
            texture_creator,
        ))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Resize the window to match a new canvas
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        self.canvas
            .window_mut()
            .set_size(width, height)
            .map_err(|e| e.to_string())?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn present(
        &mut self,
        target: &mut RenderTarget,
        buffer: &PixelBuffer,
    ) -> Result<(), String> {
        if (target.width, target.height) != (buffer.width(), buffer.height()) {
            return Err(format!(
                "buffer is {}x{}, texture is {}x{}",
                buffer.width(),
                buffer.height(),
                target.width,
                target.height
            ));
        }
        target
            .texture
            .update(None, buffer.as_bytes(), buffer.stride())
            .map_err(|e| e.to_string())?;

        self.canvas.copy(&target.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(code),
                    keymod,
                    ..
                } => events.push(InputEvent::KeyDown(Key {
                    code,
                    shift: keymod.intersects(Mod::LSHIFTMOD | Mod::RSHIFTMOD),
                })),
                Event::MouseMotion { x, y, .. } => {
                    events.push(InputEvent::Pointer(PointerEvent::moved(x, y)));
                },
                Event::MouseButtonDown { x, y, mouse_btn, .. } => {
                    if let Some(button) = map_mouse_button(mouse_btn) {
                        events.push(InputEvent::Pointer(PointerEvent::down(x, y, button)));
                    }
                },
                Event::MouseButtonUp { x, y, mouse_btn, .. } => {
                    if let Some(button) = map_mouse_button(mouse_btn) {
                        events.push(InputEvent::Pointer(PointerEvent::up(x, y, button)));
                    }
                },
                Event::MouseWheel { y, .. } => {
                    events.push(InputEvent::Pointer(PointerEvent::Scroll { delta: y }));
                },
                _ => {},
            }
        }

        events
    }
}

impl<'a> RenderTarget<'a> {
    /// Streaming texture whose ARGB8888 layout matches the buffer's BGRA bytes
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;
        Ok(Self {
            texture,
            width,
            height,
        })
    }
}

fn map_mouse_button(btn: MouseButton) -> Option<PointerButton> {
    match btn {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}
