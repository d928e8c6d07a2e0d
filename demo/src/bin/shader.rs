use anyhow::Context as _;
use app::{AppContext, AppHandler, Flow};
use input::{KeyState, KeyboardEventKind, Scancode};
use window::{Event, WindowAttrs};

fn is_escape_press(event: &Event) -> bool {
    let Event::Keyboard(keyboard_event) = event else {
        return false;
    };
    matches!(
        keyboard_event.kind,
        KeyboardEventKind::Key {
            state: KeyState::Pressed,
            scancode: Scancode::Esc,
            ..
        }
    )
}

struct App {
    // compiled and linked during startup, never bound; this variant stops at
    // proving the pair compiles.
    _program: gl::Program,
}

impl AppHandler for App {
    fn create(ctx: AppContext) -> anyhow::Result<Self> {
        let program = unsafe {
            demo::shader::create_program(ctx.gl_api, demo::VSHADER_SOURCE, demo::FSHADER_SOURCE)
        }
        .context("could not create program")?;
        log::info!("created shader program");

        Ok(Self { _program: program })
    }

    fn iterate(
        &mut self,
        ctx: AppContext,
        mut events: impl Iterator<Item = Event>,
    ) -> anyhow::Result<Flow> {
        if events.any(|event| is_escape_press(&event)) {
            return Ok(Flow::Exit);
        }

        let (width, height) = ctx.window.size();
        let [r, g, b, a] = demo::CLEAR_COLOR;
        unsafe {
            ctx.gl_api
                .viewport(0, 0, width as gl::GLsizei, height as gl::GLsizei);
            ctx.gl_api.clear_color(r, g, b, a);
            ctx.gl_api.clear(gl::COLOR_BUFFER_BIT);
        }

        Ok(Flow::Continue)
    }
}

fn main() -> anyhow::Result<()> {
    app::run::<App>(WindowAttrs {
        title: "shader".to_string(),
        ..WindowAttrs::default()
    })
}
