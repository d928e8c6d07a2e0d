use std::ffi::c_void;
use std::mem::offset_of;

use anyhow::Context as _;
use app::{AppContext, AppHandler, Flow};
use input::Scancode;
use window::{Event, WindowAttrs};

struct App {
    input: input::State,

    program: gl::Program,
    _vbo: gl::Buffer,
    vao: gl::VertexArray,
    vertex_count: gl::GLsizei,
}

impl AppHandler for App {
    fn create(ctx: AppContext) -> anyhow::Result<Self> {
        let gl_api = &*ctx.gl_api;

        let program = unsafe {
            demo::shader::create_program(gl_api, demo::VSHADER_SOURCE, demo::FSHADER_SOURCE)
        }
        .context("could not create program")?;

        let (vbo, vao) = unsafe {
            let vbo = gl_api.create_buffer().context("could not create vbo")?;
            gl_api.bind_buffer(gl::ARRAY_BUFFER, Some(vbo));
            gl_api.buffer_data(
                gl::ARRAY_BUFFER,
                size_of_val(&demo::TRIANGLE_VERTICES) as gl::GLsizeiptr,
                demo::TRIANGLE_VERTICES.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            let vao = gl_api.create_vertex_array().context("could not create vao")?;
            gl_api.bind_vertex_array(Some(vao));

            let a_position = 0;
            gl_api.enable_vertex_attrib_array(a_position);
            gl_api.vertex_attrib_pointer(
                a_position,
                4,
                gl::FLOAT,
                gl::FALSE,
                size_of::<demo::Vertex>() as gl::GLsizei,
                offset_of!(demo::Vertex, position) as *const c_void,
            );

            (vbo, vao)
        };

        Ok(Self {
            input: input::State::default(),

            program,
            _vbo: vbo,
            vao,
            vertex_count: demo::TRIANGLE_VERTICES.len() as gl::GLsizei,
        })
    }

    fn iterate(
        &mut self,
        ctx: AppContext,
        events: impl Iterator<Item = Event>,
    ) -> anyhow::Result<Flow> {
        self.input.handle_events(events.filter_map(|event| match event {
            Event::Pointer(ev) => Some(input::Event::Pointer(ev)),
            Event::Keyboard(ev) => Some(input::Event::Keyboard(ev)),
            Event::Window(_) => None,
        }));
        if self.input.keyboard.scancodes.just_pressed(Scancode::Esc) {
            return Ok(Flow::Exit);
        }

        let (width, height) = ctx.window.size();
        let [r, g, b, a] = demo::CLEAR_COLOR;
        unsafe {
            let gl_api = &*ctx.gl_api;

            // NOTE: this needs to be specified.
            //   without it nothing shows up on some nvidia gpus, amd is fine.
            gl_api.draw_buffer(gl::BACK);

            gl_api.viewport(0, 0, width as gl::GLsizei, height as gl::GLsizei);
            gl_api.clear_color(r, g, b, a);
            gl_api.clear(gl::COLOR_BUFFER_BIT);

            gl_api.use_program(Some(self.program));
            gl_api.bind_vertex_array(Some(self.vao));
            gl_api.draw_arrays(gl::TRIANGLES, 0, self.vertex_count);
        }

        Ok(Flow::Continue)
    }
}

fn main() -> anyhow::Result<()> {
    app::run::<App>(WindowAttrs {
        title: "triangle".to_string(),
        ..WindowAttrs::default()
    })
}
