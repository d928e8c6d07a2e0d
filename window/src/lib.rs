use anyhow::anyhow;
use raw_window_handle as rwh;

mod backend_winit;

pub const DEFAULT_LOGICAL_SIZE: (u32, u32) = (640, 480);

#[derive(Debug, Clone)]
pub struct WindowAttrs {
    pub logical_size: Option<(u32, u32)>,
    pub resizable: bool,
    pub title: String,
}

impl Default for WindowAttrs {
    fn default() -> Self {
        Self {
            logical_size: None,
            resizable: true,
            title: "window".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum WindowEvent {
    Configure { logical_size: (u32, u32) },
    Resized { physical_size: (u32, u32) },
    ScaleFactorChanged { scale_factor: f64 },
    CloseRequested,
}

#[derive(Debug, Clone)]
pub enum Event {
    Window(WindowEvent),
    Pointer(input::PointerEvent),
    Keyboard(input::KeyboardEvent),
}

pub trait Window: rwh::HasDisplayHandle + rwh::HasWindowHandle {
    fn pump_events(&mut self) -> anyhow::Result<()>;
    fn pop_event(&mut self) -> Option<Event>;
    fn scale_factor(&self) -> f64;
    /// physical size, in pixels.
    fn size(&self) -> (u32, u32);
}

pub fn create_window(attrs: WindowAttrs) -> anyhow::Result<Box<dyn Window>> {
    let mut errors: Vec<anyhow::Error> = Vec::new();

    match backend_winit::WinitBackend::new(attrs.clone()) {
        Ok(winit_backend) => return Ok(Box::new(winit_backend)),
        Err(err) => errors.push(err),
    }

    Err(anyhow!("could not create window: {errors:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window_attrs() {
        let attrs = WindowAttrs::default();
        assert_eq!(attrs.logical_size, None);
        assert!(attrs.resizable);
    }
}
