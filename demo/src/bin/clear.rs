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

struct App;

impl AppHandler for App {
    fn create(_ctx: AppContext) -> anyhow::Result<Self> {
        Ok(Self)
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
        title: "clear".to_string(),
        ..WindowAttrs::default()
    })
}
