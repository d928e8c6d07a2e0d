use std::collections::VecDeque;
use std::time::Duration;

use anyhow::{Context, anyhow};
use input::{
    Button, ButtonState, KeyState, KeyboardEvent, KeyboardEventKind, Keycode, PointerEvent,
    PointerEventKind, RawKey, Scancode,
};
use raw_window_handle as rwh;
use winit::platform::pump_events::EventLoopExtPumpEvents;

use crate::{DEFAULT_LOGICAL_SIZE, Event, Window, WindowAttrs, WindowEvent};

#[inline]
fn map_pointer_button(button: winit::event::MouseButton) -> Option<Button> {
    use winit::event::MouseButton;
    match button {
        MouseButton::Left => Some(Button::Primary),
        MouseButton::Right => Some(Button::Secondary),
        MouseButton::Middle => Some(Button::Tertiary),
        _ => None,
    }
}

fn map_scancode(physical_key: winit::keyboard::PhysicalKey) -> Scancode {
    use winit::keyboard::{KeyCode, PhysicalKey};
    let PhysicalKey::Code(key_code) = physical_key else {
        return Scancode::Unidentified(RawKey::Unidentified);
    };
    match key_code {
        KeyCode::Escape => Scancode::Esc,
        KeyCode::Tab => Scancode::Tab,
        KeyCode::Enter => Scancode::Enter,
        KeyCode::Space => Scancode::Space,
        KeyCode::Backspace => Scancode::Backspace,
        KeyCode::KeyQ => Scancode::Q,
        KeyCode::KeyW => Scancode::W,
        KeyCode::KeyA => Scancode::A,
        KeyCode::KeyS => Scancode::S,
        KeyCode::KeyD => Scancode::D,
        KeyCode::ControlLeft => Scancode::CtrlLeft,
        KeyCode::ControlRight => Scancode::CtrlRight,
        KeyCode::ShiftLeft => Scancode::ShiftLeft,
        KeyCode::ShiftRight => Scancode::ShiftRight,
        KeyCode::AltLeft => Scancode::AltLeft,
        KeyCode::AltRight => Scancode::AltRight,
        KeyCode::ArrowUp => Scancode::ArrowUp,
        KeyCode::ArrowDown => Scancode::ArrowDown,
        KeyCode::ArrowLeft => Scancode::ArrowLeft,
        KeyCode::ArrowRight => Scancode::ArrowRight,
        _ => Scancode::Unidentified(RawKey::Unidentified),
    }
}

fn map_key_event(event: winit::event::KeyEvent) -> KeyboardEvent {
    let keycode = match event.logical_key {
        winit::keyboard::Key::Character(str) if str.chars().count() == 1 => {
            Keycode::Char(str.chars().next().unwrap())
        }
        _ => Keycode::Unidentified(RawKey::Unidentified),
    };
    KeyboardEvent {
        kind: KeyboardEventKind::Key {
            state: if event.state.is_pressed() {
                KeyState::Pressed
            } else {
                KeyState::Released
            },
            scancode: map_scancode(event.physical_key),
            keycode,
            repeat: event.repeat,
        },
    }
}

struct WinitApp {
    attrs: WindowAttrs,

    window: Option<winit::window::Window>,
    window_create_error: Option<winit::error::OsError>,

    events: VecDeque<Event>,
}

impl winit::application::ApplicationHandler for WinitApp {
    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let logical_size = self.attrs.logical_size.unwrap_or(DEFAULT_LOGICAL_SIZE);

        let winit_attrs = winit::window::WindowAttributes::default()
            .with_title(self.attrs.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                logical_size.0 as f64,
                logical_size.1 as f64,
            ))
            .with_resizable(self.attrs.resizable);
        match event_loop.create_window(winit_attrs) {
            Ok(window) => {
                log::info!("created winit window (id {:?})", window.id());
                self.window = Some(window);
            }
            Err(err) => self.window_create_error = Some(err),
        }

        self.events
            .push_back(Event::Window(WindowEvent::Configure { logical_size }));
    }

    fn window_event(
        &mut self,
        _event_loop: &winit::event_loop::ActiveEventLoop,
        window_id: winit::window::WindowId,
        window_event: winit::event::WindowEvent,
    ) {
        assert!(
            self.window
                .as_ref()
                .is_some_and(|window| window.id() == window_id)
        );

        use winit::event::WindowEvent::*;
        let event = match window_event {
            CloseRequested => Event::Window(WindowEvent::CloseRequested),
            Resized(physical_size) => Event::Window(WindowEvent::Resized {
                physical_size: (physical_size.width, physical_size.height),
            }),
            ScaleFactorChanged { scale_factor, .. } => {
                Event::Window(WindowEvent::ScaleFactorChanged { scale_factor })
            }

            KeyboardInput { event, .. } => Event::Keyboard(map_key_event(event)),

            CursorEntered { .. } => Event::Pointer(PointerEvent {
                kind: PointerEventKind::Enter { position: None },
            }),
            CursorLeft { .. } => Event::Pointer(PointerEvent {
                kind: PointerEventKind::Leave,
            }),
            CursorMoved { position, .. } => Event::Pointer(PointerEvent {
                kind: PointerEventKind::Move {
                    position: (position.x, position.y),
                },
            }),
            MouseWheel { delta, .. } => {
                use winit::event::MouseScrollDelta;
                let delta = match delta {
                    // NOTE: a wheel step normalizes to roughly this many
                    // pixels on the compositors i could check.
                    MouseScrollDelta::LineDelta(x, y) => (x as f64 * 16.0, y as f64 * 16.0),
                    MouseScrollDelta::PixelDelta(pos) => (pos.x, pos.y),
                };
                Event::Pointer(PointerEvent {
                    kind: PointerEventKind::Scroll { delta },
                })
            }
            MouseInput { button, state, .. } => {
                let Some(button) = map_pointer_button(button) else {
                    return;
                };
                Event::Pointer(PointerEvent {
                    kind: PointerEventKind::Button {
                        state: if state.is_pressed() {
                            ButtonState::Pressed
                        } else {
                            ButtonState::Released
                        },
                        button,
                    },
                })
            }

            other => {
                log::debug!("unused window event: {other:?}");
                return;
            }
        };
        self.events.push_back(event);
    }
}

pub struct WinitBackend {
    event_loop: winit::event_loop::EventLoop<()>,
    app: WinitApp,
}

impl WinitBackend {
    pub fn new(attrs: WindowAttrs) -> anyhow::Result<Self> {
        Ok(Self {
            event_loop: winit::event_loop::EventLoop::new()?,
            app: WinitApp {
                attrs,

                window: None,
                window_create_error: None,

                events: VecDeque::new(),
            },
        })
    }

    fn window(&self) -> &winit::window::Window {
        self.app.window.as_ref().expect("initialized window")
    }
}

impl rwh::HasDisplayHandle for WinitBackend {
    fn display_handle(&self) -> Result<rwh::DisplayHandle<'_>, rwh::HandleError> {
        self.event_loop.display_handle()
    }
}

impl rwh::HasWindowHandle for WinitBackend {
    fn window_handle(&self) -> Result<rwh::WindowHandle<'_>, rwh::HandleError> {
        match self.app.window {
            Some(ref window) => window.window_handle(),
            None => Err(rwh::HandleError::Unavailable),
        }
    }
}

impl Window for WinitBackend {
    fn pump_events(&mut self) -> anyhow::Result<()> {
        use winit::platform::pump_events::PumpStatus;
        // NOTE: zero timeout = non-blocking drain of whatever is pending.
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.app);

        if let Some(err) = self.app.window_create_error.take() {
            return Err(err).context("could not create window");
        }

        match status {
            PumpStatus::Continue => Ok(()),
            PumpStatus::Exit(code) => Err(anyhow!("event loop exited unexpectedly (code {code})")),
        }
    }

    fn pop_event(&mut self) -> Option<Event> {
        self.app.events.pop_front()
    }

    fn scale_factor(&self) -> f64 {
        self.window().scale_factor()
    }

    fn size(&self) -> (u32, u32) {
        let inner_size = self.window().inner_size();
        (inner_size.width, inner_size.height)
    }
}
